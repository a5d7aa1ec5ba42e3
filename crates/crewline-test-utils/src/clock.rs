// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hand-driven clock.

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use crewline_core::Clock;

/// A [`Clock`] frozen at a fixed instant until [`ManualClock::advance`] or
/// [`ManualClock::set`] moves it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Default for ManualClock {
    /// Monday 24 October 2022, 07:00 UTC: day one of the demo booking.
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2022, 10, 24, 7, 0, 0)
            .single()
            .unwrap_or_default();
        Self::new(start)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_put_until_advanced() {
        let clock = ManualClock::default();
        let first = clock.now();
        assert_eq!(clock.now(), first);

        clock.advance(Duration::milliseconds(1500));
        assert_eq!(clock.now() - first, Duration::milliseconds(1500));

        clock.set(first);
        assert_eq!(clock.now(), first);
    }
}
