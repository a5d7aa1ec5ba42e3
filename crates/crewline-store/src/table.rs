// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyed collection that iterates in insertion order.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crewline_core::{ActivityId, BookingId, MessageId, ShiftId, ThreadId, UserId};

use crate::models::{ActivityItem, Booking, Message, Shift, Thread, User};

/// An entity with a primary key.
pub trait Keyed {
    type Key: Clone + Eq + Hash;

    fn key(&self) -> &Self::Key;
}

macro_rules! keyed {
    ($entity:ty => $key:ty) => {
        impl Keyed for $entity {
            type Key = $key;

            fn key(&self) -> &$key {
                &self.id
            }
        }
    };
}

keyed!(User => UserId);
keyed!(Shift => ShiftId);
keyed!(Booking => BookingId);
keyed!(Thread => ThreadId);
keyed!(Message => MessageId);
keyed!(ActivityItem => ActivityId);

/// Rows keyed by id, iterated in the order their keys were first inserted.
#[derive(Debug, Clone)]
pub struct Table<V: Keyed> {
    rows: Vec<V>,
    index: HashMap<V::Key, usize>,
}

impl<V: Keyed> Default for Table<V> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Keyed> Table<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. A row with the same key is replaced in place and returned.
    pub fn insert(&mut self, row: V) -> Option<V> {
        match self.index.get(row.key()).copied() {
            Some(pos) => Some(std::mem::replace(&mut self.rows[pos], row)),
            None => {
                self.index.insert(row.key().clone(), self.rows.len());
                self.rows.push(row);
                None
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        V::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&pos| &self.rows[pos])
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        V::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&pos| &mut self.rows[pos])
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        V::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<V: Keyed> FromIterator<V> for Table<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut table = Self::new();
        for row in iter {
            table.insert(row);
        }
        table
    }
}

impl<'a, V: Keyed> IntoIterator for &'a Table<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crewline_core::Role;

    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: UserId::from(id),
            name: name.into(),
            role: Role::Staff,
            avatar_url: String::new(),
            company: None,
        }
    }

    #[test]
    fn iterates_in_insertion_order() {
        let table: Table<User> = ["zed", "amy", "kim"]
            .into_iter()
            .map(|id| user(id, id))
            .collect();
        let order: Vec<_> = table.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(order, vec!["zed", "amy", "kim"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut table = Table::new();
        table.insert(user("a", "first"));
        table.insert(user("b", "second"));
        let old = table.insert(user("a", "renamed")).expect("replaced row");
        assert_eq!(old.name, "first");
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().unwrap().name, "renamed");
    }

    #[test]
    fn lookup_by_str() {
        let mut table = Table::new();
        table.insert(user("ben", "Ben Smith"));
        assert_eq!(table.get("ben").map(|u| u.name.as_str()), Some("Ben Smith"));
        assert!(table.get("nobody").is_none());
        assert!(table.contains("ben"));

        table.get_mut("ben").unwrap().name = "Benjamin".into();
        assert_eq!(table.get("ben").unwrap().name, "Benjamin");
    }
}
