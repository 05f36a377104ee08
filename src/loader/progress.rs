//! Settled-asset counting and the smoothed percentage shown to the user.

use std::time::{Duration, Instant};

/// Owns the loading counters. Only `report_settled` mutates them.
#[derive(Debug)]
pub struct ProgressAggregator {
    total: usize,
    completed: usize,
    smoothing: Duration,
    tween_from: f32,
    tween_to: f32,
    tween_start: Option<Instant>,
    /// Highest value handed out so far; the display never goes below it.
    floor: f32,
    all_complete: bool,
}

impl ProgressAggregator {
    /// `total == 0` counts as already fully loaded.
    pub fn new(total: usize, smoothing: Duration) -> Self {
        let start = if total == 0 { 100.0 } else { 0.0 };
        Self {
            total,
            completed: 0,
            smoothing,
            tween_from: start,
            tween_to: start,
            tween_start: None,
            floor: start,
            all_complete: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// `round(100 * completed / total)`.
    pub fn raw_percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed as f64 * 100.0) / self.total as f64).round() as u8
    }

    fn value(&self, now: Instant) -> f32 {
        let Some(start) = self.tween_start else {
            return self.tween_to.max(self.floor);
        };
        if self.smoothing.is_zero() {
            return self.tween_to.max(self.floor);
        }
        let t = now.saturating_duration_since(start).as_secs_f32() / self.smoothing.as_secs_f32();
        let v = if t >= 1.0 {
            self.tween_to
        } else {
            self.tween_from + (self.tween_to - self.tween_from) * t
        };
        v.max(self.floor)
    }

    /// Count one more settled asset and start easing the display towards
    /// the new raw percentage. Returns `false` once everything is counted.
    pub fn report_settled(&mut self, now: Instant) -> bool {
        if self.completed >= self.total {
            return false;
        }
        let current = self.value(now);
        self.floor = current;
        self.completed += 1;
        self.tween_from = current;
        self.tween_to = self.raw_percent() as f32;
        self.tween_start = Some(now);
        true
    }

    /// The percentage to show at `now`. Never lower than any earlier result.
    pub fn displayed_percent(&mut self, now: Instant) -> u8 {
        let v = self.value(now);
        self.floor = v;
        v.round().clamp(0.0, 100.0) as u8
    }

    /// `true` exactly once: when every asset has settled and the display has
    /// finished easing to 100.
    pub fn poll_complete(&mut self, now: Instant) -> bool {
        if self.all_complete || self.completed < self.total {
            return false;
        }
        if self.value(now) < 100.0 {
            return false;
        }
        self.floor = 100.0;
        self.all_complete = true;
        true
    }
}
