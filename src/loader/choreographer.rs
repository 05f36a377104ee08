//! The fixed exit animation of the loader.
//!
//! Steps run strictly one after another, each after its own delay:
//! counter fade, split-panel wipe, whole-loader fade.

use std::time::{Duration, Instant};

use crate::config::TransitionSettings;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The percentage counter and photo fade out.
    CounterFade,
    /// The top half slides up and the bottom half slides down.
    SplitWipe,
    /// What is left of the loader fades away.
    ContainerFade,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ease {
    Linear,
    QuadIn,
    QuartInOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuartInOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub effect: Effect,
    pub delay: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    steps: Vec<Step>,
}

impl Timeline {
    pub fn from_settings(s: &TransitionSettings) -> Self {
        Self {
            steps: vec![
                Step {
                    effect: Effect::CounterFade,
                    delay: Duration::ZERO,
                    duration: Duration::from_millis(s.counter_fade_ms),
                    ease: Ease::QuadIn,
                },
                Step {
                    effect: Effect::SplitWipe,
                    delay: Duration::from_millis(s.wipe_delay_ms),
                    duration: Duration::from_millis(s.wipe_ms),
                    ease: Ease::QuartInOut,
                },
                Step {
                    effect: Effect::ContainerFade,
                    delay: Duration::from_millis(s.container_delay_ms),
                    duration: Duration::from_millis(s.container_fade_ms),
                    ease: Ease::Linear,
                },
            ],
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Start and end offsets of every step.
    fn windows(&self) -> impl Iterator<Item = (&Step, Duration, Duration)> {
        let mut cursor = Duration::ZERO;
        self.steps.iter().map(move |step| {
            let start = cursor + step.delay;
            let end = start + step.duration;
            cursor = end;
            (step, start, end)
        })
    }

    /// Sum of every delay and duration.
    pub fn total(&self) -> Duration {
        self.windows().last().map(|(_, _, end)| end).unwrap_or_default()
    }

    /// Eased progress (0.0 - 1.0) of `effect` at `elapsed`.
    pub fn progress(&self, effect: Effect, elapsed: Duration) -> f32 {
        self.windows()
            .find(|(step, _, _)| step.effect == effect)
            .map(|(step, start, end)| {
                if elapsed >= end {
                    1.0
                } else if elapsed <= start {
                    0.0
                } else {
                    let t = (elapsed - start).as_secs_f32() / step.duration.as_secs_f32();
                    step.ease.apply(t)
                }
            })
            .unwrap_or(1.0)
    }

    /// The step running at `elapsed`, if any (delays belong to no step).
    pub fn active(&self, elapsed: Duration) -> Option<Effect> {
        self.windows()
            .find(|(_, start, end)| elapsed >= *start && elapsed < *end)
            .map(|(step, _, _)| step.effect)
    }
}

/// What the loader looks like at one instant of the transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitionFrame {
    /// 1.0 = fully visible.
    pub counter_opacity: f32,
    /// 0.0 = panels closed, 1.0 = panels fully off screen.
    pub wipe: f32,
    /// 1.0 = fully visible.
    pub container_opacity: f32,
}

impl TransitionFrame {
    pub const IDLE: Self = Self {
        counter_opacity: 1.0,
        wipe: 0.0,
        container_opacity: 1.0,
    };
}

#[derive(Debug)]
pub struct Choreographer {
    timeline: Timeline,
    started_at: Instant,
    finished: bool,
}

impl Choreographer {
    pub fn start(timeline: Timeline, now: Instant) -> Self {
        Self {
            timeline,
            started_at: now,
            finished: false,
        }
    }

    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn frame(&self, now: Instant) -> TransitionFrame {
        let elapsed = self.elapsed(now);
        TransitionFrame {
            counter_opacity: 1.0 - self.timeline.progress(Effect::CounterFade, elapsed),
            wipe: self.timeline.progress(Effect::SplitWipe, elapsed),
            container_opacity: 1.0 - self.timeline.progress(Effect::ContainerFade, elapsed),
        }
    }

    pub fn active(&self, now: Instant) -> Option<Effect> {
        self.timeline.active(self.elapsed(now))
    }

    /// `true` exactly once, at or after the end of the last step.
    pub fn poll_finished(&mut self, now: Instant) -> bool {
        if self.finished || self.elapsed(now) < self.timeline.total() {
            return false;
        }
        self.finished = true;
        true
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
