use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::layout::{Position, Size};
use tracing::{debug, info};

/// Hearts released by a "Yes".
pub const HEART_COUNT: usize = 20;

/// Footprint of a prompt button in cells.
pub const BUTTON_SIZE: Size = Size {
    width: 9,
    height: 3,
};

/// One heart of the burst. Positions are fractions of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub x: f32,
    pub y: f32,
    /// Upward travel over the whole lifetime.
    pub rise: f32,
    /// Sideways travel over the whole lifetime.
    pub drift: f32,
    pub large: bool,
    pub born: Instant,
    pub lifetime: Duration,
}

impl Heart {
    fn random<R: Rng + ?Sized>(rng: &mut R, now: Instant) -> Self {
        Self {
            x: rng.gen_range(0.0..1.0),
            y: rng.gen_range(0.0..1.0),
            rise: rng.gen_range(0.2..0.5),
            drift: rng.gen_range(-0.1..0.1),
            large: rng.gen_bool(0.5),
            born: now,
            lifetime: Duration::from_millis(rng.gen_range(1500..=2500)),
        }
    }

    /// `0.0..1.0` through the animation, `None` once it is over.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let t = now.saturating_duration_since(self.born).as_secs_f32() / self.lifetime.as_secs_f32();
        (t < 1.0).then_some(t)
    }

    /// Where the heart is at `now` (quadratic ease-out), as viewport fractions.
    pub fn position(&self, now: Instant) -> Option<(f32, f32)> {
        let t = self.progress(now)?;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        Some((self.x + self.drift * eased, self.y - self.rise * eased))
    }
}

/// Where the "No" button jumps to: anywhere its whole box fits inside
/// `bounds`. With no room to move, it stays at the origin.
pub fn dodge_position<R: Rng + ?Sized>(bounds: Size, button: Size, rng: &mut R) -> Position {
    let max_x = bounds.width.saturating_sub(button.width);
    let max_y = bounds.height.saturating_sub(button.height);
    Position::new(rng.gen_range(0..=max_x), rng.gen_range(0..=max_y))
}

#[derive(Debug)]
pub struct ValentinePrompt {
    answered: bool,
    no_position: Option<Position>,
    dodges: u32,
    hearts: Vec<Heart>,
}

impl Default for ValentinePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ValentinePrompt {
    pub fn new() -> Self {
        Self {
            answered: false,
            no_position: None,
            dodges: 0,
            hearts: Vec::new(),
        }
    }

    /// Accept. Releases the heart burst; only the first call counts.
    pub fn say_yes<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> bool {
        if self.answered {
            return false;
        }
        self.answered = true;
        self.hearts = (0..HEART_COUNT).map(|_| Heart::random(rng, now)).collect();
        info!(dodges = self.dodges, "valentine accepted");
        true
    }

    /// Any attempt to reach "No" moves it somewhere else inside `bounds`.
    /// "No" never holds the focus; "Yes" always does.
    pub fn try_focus_no<R: Rng + ?Sized>(
        &mut self,
        bounds: Size,
        button: Size,
        rng: &mut R,
    ) -> Option<Position> {
        if self.answered {
            return None;
        }
        let pos = dodge_position(bounds, button, rng);
        self.no_position = Some(pos);
        self.dodges += 1;
        debug!(x = pos.x, y = pos.y, dodges = self.dodges, "no dodged");
        Some(pos)
    }

    /// Drop hearts whose animation is over.
    pub fn prune_hearts(&mut self, now: Instant) {
        self.hearts.retain(|h| h.progress(now).is_some());
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// `None` until the first dodge; the button then sits at its usual spot.
    pub fn no_position(&self) -> Option<Position> {
        self.no_position
    }

    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    /// The three lines of the question, rephrased once it is answered.
    pub fn heading(&self) -> [&'static str; 3] {
        if self.answered {
            ["You will be my", "valentine and", "go out with me at 8"]
        } else {
            ["Will you be my", "valentine and", "go out with me at 8?"]
        }
    }
}
