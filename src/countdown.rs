//! The "will you be my valentine" section: a ticking countdown to the
//! date and the prompt with its dodging "No".

mod clock;
mod prompt;

pub use clock::{Countdown, TimeLeft, time_left};
pub use prompt::{BUTTON_SIZE, HEART_COUNT, Heart, ValentinePrompt, dodge_position};
