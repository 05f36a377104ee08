use std::fmt;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::info;

use crate::timer::PeriodicTask;

/// Whole hours, minutes and seconds until the target. Hours do not wrap at 24.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeLeft {
    pub const ZERO: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Time from `now` until `target`, rounded down to the second. Zero once
/// the target has passed.
pub fn time_left(target: DateTime<FixedOffset>, now: DateTime<Utc>) -> TimeLeft {
    let diff = target.with_timezone(&Utc) - now;
    if diff <= chrono::Duration::zero() {
        return TimeLeft::ZERO;
    }
    let secs = diff.num_seconds() as u64;
    TimeLeft {
        hours: secs / 3600,
        minutes: ((secs / 60) % 60) as u8,
        seconds: (secs % 60) as u8,
    }
}

/// A countdown that recomputes itself on every timer tick and lets go of
/// its timer once it reaches zero.
pub struct Countdown {
    target: DateTime<FixedOffset>,
    left: TimeLeft,
    expired: bool,
    timer: Option<PeriodicTask>,
}

impl Countdown {
    pub fn start(target: DateTime<FixedOffset>, tick: Duration, now: DateTime<Utc>) -> Self {
        let mut countdown = Self {
            target,
            left: TimeLeft::ZERO,
            expired: false,
            timer: None,
        };
        countdown.update(now);
        if !countdown.expired {
            countdown.timer = Some(PeriodicTask::spawn("countdown", tick));
        }
        countdown
    }

    /// Recompute when the timer ticked since the last call.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let ticked = self.timer.as_ref().is_some_and(|t| t.try_ticks() > 0);
        if ticked {
            self.update(now);
        }
        ticked
    }

    /// Recompute the time left right now.
    pub fn update(&mut self, now: DateTime<Utc>) {
        self.left = time_left(self.target, now);
        if self.left.is_zero() && !self.expired {
            info!(at = %self.target, "countdown reached zero");
            self.expired = true;
            self.timer = None;
        }
    }

    /// Stop ticking without expiring (the countdown is no longer shown).
    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn time_left(&self) -> TimeLeft {
        self.left
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.as_ref().is_some_and(PeriodicTask::is_running)
    }
}
