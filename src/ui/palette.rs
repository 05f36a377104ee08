//! Page colours and blending. Fades are done by mixing towards the colour
//! underneath, since terminal cells have no alpha.

use ratatui::style::Color;

pub type Rgb = (u8, u8, u8);

/// Page background.
pub const CREAM: Rgb = (255, 252, 245);
/// Loader background.
pub const NIGHT: Rgb = (12, 10, 9);
pub const INK: Rgb = (41, 37, 36);
pub const STONE: Rgb = (168, 162, 158);
pub const MIST: Rgb = (214, 211, 209);
pub const WINE: Rgb = (150, 18, 16);
pub const ROSE: Rgb = (185, 28, 28);

/// Linear mix: `t == 0.0` gives `a`, `t == 1.0` gives `b`.
pub fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    (ch(a.0, b.0), ch(a.1, b.1), ch(a.2, b.2))
}

pub fn color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// `fg` drawn at `opacity` over `bg`.
pub fn faded(fg: Rgb, bg: Rgb, opacity: f32) -> Color {
    color(mix(bg, fg, opacity))
}

pub fn rgb_of(c: Color) -> Option<Rgb> {
    match c {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::Black => Some((0, 0, 0)),
        Color::White => Some((255, 255, 255)),
        _ => None,
    }
}
