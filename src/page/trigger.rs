use std::time::{Duration, Instant};

use super::SectionKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reveal {
    /// Hero intro paragraph fades up.
    HeroText,
    /// The decorative path draws itself in.
    ValentinePath,
    /// "valentine's" gives way to "lover's".
    LoverSwap,
    /// The letter card slides up.
    Letter,
    /// The vinyl section fades in.
    Vinyl,
    /// The countdown question comes into focus.
    CountdownHeading,
    /// The signature scales in.
    Footer,
}

/// A once-only reveal: fires when the top of `section` reaches `start`
/// (a fraction of the viewport height, from the top).
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    pub reveal: Reveal,
    pub section: SectionKind,
    pub start: f32,
    pub fired_at: Option<Instant>,
}

impl ScrollTrigger {
    pub fn new(reveal: Reveal, section: SectionKind, start: f32) -> Self {
        Self {
            reveal,
            section,
            start,
            fired_at: None,
        }
    }

    /// Quadratic ease-out progress of the reveal animation.
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(at) = self.fired_at else {
            return 0.0;
        };
        let d = duration_of(self.reveal).as_secs_f32();
        let t = (now.saturating_duration_since(at).as_secs_f32() / d).clamp(0.0, 1.0);
        1.0 - (1.0 - t) * (1.0 - t)
    }
}

pub(super) fn duration_of(reveal: Reveal) -> Duration {
    Duration::from_millis(match reveal {
        Reveal::HeroText | Reveal::CountdownHeading | Reveal::Footer => 1200,
        Reveal::ValentinePath => 2000,
        Reveal::LoverSwap => 600,
        Reveal::Letter | Reveal::Vinyl => 1000,
    })
}

pub fn default_triggers() -> Vec<ScrollTrigger> {
    vec![
        ScrollTrigger::new(Reveal::HeroText, SectionKind::Hero, 0.9),
        ScrollTrigger::new(Reveal::ValentinePath, SectionKind::Valentine, 0.6),
        ScrollTrigger::new(Reveal::LoverSwap, SectionKind::Valentine, 0.3),
        ScrollTrigger::new(Reveal::Letter, SectionKind::Letter, 0.8),
        ScrollTrigger::new(Reveal::Vinyl, SectionKind::Vinyl, 0.7),
        ScrollTrigger::new(Reveal::CountdownHeading, SectionKind::Countdown, 0.6),
        ScrollTrigger::new(Reveal::Footer, SectionKind::Footer, 0.8),
    ]
}
