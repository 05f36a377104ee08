//! The scrolling page below the loader.
//!
//! Six full-viewport sections stacked vertically. The page keeps a scroll
//! offset in rows, fires each scroll-triggered reveal once when its section
//! crosses a line in the viewport, and derives the hero's parallax from the
//! offset.

use std::time::Instant;

use tracing::debug;

mod trigger;

pub use trigger::Reveal;
use trigger::{ScrollTrigger, default_triggers};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Valentine,
    Letter,
    Vinyl,
    Countdown,
    Footer,
}

/// Top-to-bottom order of the page.
pub const SECTIONS: [SectionKind; 6] = [
    SectionKind::Hero,
    SectionKind::Valentine,
    SectionKind::Letter,
    SectionKind::Vinyl,
    SectionKind::Countdown,
    SectionKind::Footer,
];

impl SectionKind {
    pub fn index(self) -> usize {
        SECTIONS.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// How far the hero background and heading have moved up, in rows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Parallax {
    pub background: f32,
    pub heading: f32,
}

pub struct Page {
    viewport_height: u16,
    offset: u32,
    triggers: Vec<ScrollTrigger>,
}

impl Page {
    pub fn new(viewport_height: u16) -> Self {
        Self {
            viewport_height: viewport_height.max(1),
            offset: 0,
            triggers: default_triggers(),
        }
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Keep the current section in place across a terminal resize.
    pub fn resize(&mut self, viewport_height: u16) {
        let viewport_height = viewport_height.max(1);
        if viewport_height == self.viewport_height {
            return;
        }
        let old = self.viewport_height as f64;
        let ratio = self.offset as f64 / old;
        self.viewport_height = viewport_height;
        self.offset = ((ratio * viewport_height as f64).round() as u32).min(self.max_offset());
    }

    pub fn content_height(&self) -> u32 {
        SECTIONS.len() as u32 * self.viewport_height as u32
    }

    pub fn max_offset(&self) -> u32 {
        self.content_height() - self.viewport_height as u32
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn scroll_by(&mut self, rows: i32) {
        let target = (self.offset as i64 + rows as i64).clamp(0, self.max_offset() as i64);
        self.offset = target as u32;
    }

    pub fn scroll_to(&mut self, offset: u32) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn section_top(&self, kind: SectionKind) -> u32 {
        kind.index() as u32 * self.viewport_height as u32
    }

    /// The section occupying the top row of the viewport.
    pub fn current_section(&self) -> SectionKind {
        let i = (self.offset / self.viewport_height as u32) as usize;
        SECTIONS[i.min(SECTIONS.len() - 1)]
    }

    /// Snap to the top of the next section.
    pub fn next_section(&mut self) {
        let i = (self.offset / self.viewport_height as u32) as usize + 1;
        if let Some(kind) = SECTIONS.get(i) {
            self.scroll_to(self.section_top(*kind));
        } else {
            self.scroll_to(self.max_offset());
        }
    }

    /// Snap to the top of the current section, or the previous one when
    /// already there.
    pub fn prev_section(&mut self) {
        let h = self.viewport_height as u32;
        let i = (self.offset / h) as usize;
        let target = if self.offset % h == 0 { i.saturating_sub(1) } else { i };
        self.scroll_to(self.section_top(SECTIONS[target]));
    }

    /// Fire every reveal whose section has crossed its start line. Each
    /// reveal fires at most once.
    pub fn update_triggers(&mut self, now: Instant) {
        let h = self.viewport_height as f32;
        let offset = self.offset as f32;
        let tops: Vec<f32> = self
            .triggers
            .iter()
            .map(|t| self.section_top(t.section) as f32 - offset)
            .collect();

        for (trigger, top) in self.triggers.iter_mut().zip(tops) {
            if trigger.fired_at.is_none() && top <= trigger.start * h {
                debug!(reveal = ?trigger.reveal, "scroll trigger fired");
                trigger.fired_at = Some(now);
            }
        }
    }

    pub fn has_fired(&self, reveal: Reveal) -> bool {
        self.trigger(reveal).is_some_and(|t| t.fired_at.is_some())
    }

    /// Eased progress (0.0 - 1.0) of a reveal's animation at `now`.
    pub fn reveal_progress(&self, reveal: Reveal, now: Instant) -> f32 {
        self.trigger(reveal).map_or(0.0, |t| t.progress(now))
    }

    fn trigger(&self, reveal: Reveal) -> Option<&ScrollTrigger> {
        self.triggers.iter().find(|t| t.reveal == reveal)
    }

    /// The hero background rises by 20% and the heading by 40% of the
    /// viewport while the hero scrolls out.
    pub fn hero_parallax(&self) -> Parallax {
        let h = self.viewport_height as f32;
        let p = (self.offset as f32 / h).clamp(0.0, 1.0);
        Parallax {
            background: 0.2 * h * p,
            heading: 0.4 * h * p,
        }
    }

    /// Rows of the content that are visible, as `(first, last_exclusive)`.
    pub fn visible_rows(&self) -> (u32, u32) {
        (self.offset, self.offset + self.viewport_height as u32)
    }

    /// Rows of the whole sections that overlap the viewport: one section
    /// when aligned, two while between them.
    pub fn visible_section_rows(&self) -> (u32, u32) {
        let h = self.viewport_height as u32;
        let (first, last) = self.visible_rows();
        let top = first - first % h;
        let bottom = last.div_ceil(h).saturating_mul(h).min(self.content_height());
        (top, bottom.max(top))
    }
}

#[cfg(test)]
mod tests;
