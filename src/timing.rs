// src/timing.rs

//! Elapsed-time measurement and human-readable rendering.

use std::fmt;
use std::future::Future;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::time::{Duration, Instant};

/// Await `fut` and return its output together with the wall-clock time it
/// took.
pub async fn timed<F: Future>(fut: F) -> (F::Output, TimeTaken) {
    let start = Instant::now();
    let output = fut.await;
    (output, TimeTaken::from(start.elapsed()))
}

/// A duration that prints like `1 hour, 23 minutes, and 2.3 seconds`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeTaken(Duration);

impl TimeTaken {
    pub fn from_secs_f64(secs: f64) -> Self {
        Self(Duration::from_secs_f64(secs))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl From<Duration> for TimeTaken {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl Add for TimeTaken {
    type Output = TimeTaken;

    fn add(self, rhs: TimeTaken) -> TimeTaken {
        TimeTaken(self.0 + rhs.0)
    }
}

impl Sub for TimeTaken {
    type Output = TimeTaken;

    fn sub(self, rhs: TimeTaken) -> TimeTaken {
        TimeTaken(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for TimeTaken {
    fn sum<I: Iterator<Item = TimeTaken>>(iter: I) -> Self {
        iter.fold(TimeTaken::default(), Add::add)
    }
}

impl fmt::Display for TimeTaken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.as_secs_f64();
        let hours = (total / 3600.0).floor();
        let minutes = ((total - hours * 3600.0) / 60.0).floor();
        let seconds = round3(total - hours * 3600.0 - minutes * 60.0);

        let mut parts = Vec::with_capacity(3);
        if hours >= 1.0 {
            parts.push(pluralize_whole(hours as u64, "hour", "hours"));
        }
        if minutes >= 1.0 {
            parts.push(pluralize_whole(minutes as u64, "minute", "minutes"));
        }
        if seconds > 0.0 {
            parts.push(pluralize_seconds(seconds));
        }

        match parts.as_slice() {
            [] => f.write_str("0 seconds"),
            [one] => f.write_str(one),
            [a, b] => write!(f, "{a} and {b}"),
            [init @ .., last] => write!(f, "{}, and {last}", init.join(", ")),
        }
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn pluralize_whole(value: u64, singular: &str, plural: &str) -> String {
    format!("{value} {}", if value == 1 { singular } else { plural })
}

fn pluralize_seconds(value: f64) -> String {
    let unit = if value == 1.0 { "second" } else { "seconds" };
    if value.fract() == 0.0 {
        format!("{value:.1} {unit}")
    } else {
        format!("{value} {unit}")
    }
}
