//! Film grain: a small random speck pattern tiled over the screen and
//! regenerated on a timer.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::config::GrainSettings;
use crate::timer::PeriodicTask;

pub const PATTERN_WIDTH: u16 = 64;
pub const PATTERN_HEIGHT: u16 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrainPattern {
    /// Brightness of the speck at each pattern cell, if any.
    cells: Vec<Option<u8>>,
}

impl GrainPattern {
    pub fn random<R: Rng + ?Sized>(density: f64, rng: &mut R) -> Self {
        let density = density.clamp(0.0, 1.0);
        let cells = (0..PATTERN_WIDTH as usize * PATTERN_HEIGHT as usize)
            .map(|_| rng.gen_bool(density).then(|| rng.gen_range(90..=200)))
            .collect();
        Self { cells }
    }

    /// The speck at screen cell (`x`, `y`); the pattern repeats in both directions.
    pub fn speck_at(&self, x: u16, y: u16) -> Option<u8> {
        let px = (x % PATTERN_WIDTH) as usize;
        let py = (y % PATTERN_HEIGHT) as usize;
        self.cells[py * PATTERN_WIDTH as usize + px]
    }

    pub fn speck_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

pub struct Grain {
    density: f64,
    pattern: Option<GrainPattern>,
    timer: Option<PeriodicTask>,
}

impl Grain {
    /// Disabled grain owns no timer and draws nothing.
    pub fn start(settings: &GrainSettings) -> Self {
        if !settings.enabled {
            return Self {
                density: settings.density,
                pattern: None,
                timer: None,
            };
        }
        let pattern = GrainPattern::random(settings.density, &mut rand::thread_rng());
        debug!(specks = pattern.speck_count(), "grain enabled");
        Self {
            density: settings.density,
            pattern: Some(pattern),
            timer: Some(PeriodicTask::spawn(
                "grain",
                Duration::from_millis(settings.interval_ms),
            )),
        }
    }

    /// Regenerate when the timer ticked. Returns whether the pattern changed.
    pub fn tick(&mut self) -> bool {
        let ticked = self.timer.as_ref().is_some_and(|t| t.try_ticks() > 0);
        if ticked {
            self.pattern = Some(GrainPattern::random(self.density, &mut rand::thread_rng()));
        }
        ticked
    }

    pub fn pattern(&self) -> Option<&GrainPattern> {
        self.pattern.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.pattern.is_some()
    }
}

#[cfg(test)]
mod tests;
