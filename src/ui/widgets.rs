//! Pixel-ish widgets drawn with half blocks: photo thumbnails and the
//! spinning record.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::loader::Thumbnail;

use super::palette::{CREAM, Rgb, WINE, color, mix};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fit {
    /// Whole image visible, letterboxed.
    Contain,
    /// Area filled, image cropped.
    Cover,
}

/// A thumbnail drawn with `▀`: each cell shows two pixels stacked.
pub struct Thumb<'a> {
    thumb: &'a Thumbnail,
    fit: Fit,
    opacity: f32,
    backdrop: Rgb,
    /// Vertical scroll of the image, as a fraction of its height.
    shift: f32,
}

impl<'a> Thumb<'a> {
    pub fn new(thumb: &'a Thumbnail) -> Self {
        Self {
            thumb,
            fit: Fit::Contain,
            opacity: 1.0,
            backdrop: (0, 0, 0),
            shift: 0.0,
        }
    }

    pub fn fit(mut self, fit: Fit) -> Self {
        self.fit = fit;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn backdrop(mut self, backdrop: Rgb) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn shift(mut self, shift: f32) -> Self {
        self.shift = shift;
        self
    }

    /// Where the image lands inside `area`, and which part of it (`u0, u1, v0, v1`) is shown.
    pub fn layout(&self, area: Rect) -> (Rect, [f32; 4]) {
        if area.is_empty() {
            return (area, [0.0, 1.0, 0.0, 1.0]);
        }
        let img_aspect = self.thumb.width() as f32 / self.thumb.height() as f32;
        let area_aspect = area.width as f32 / (area.height as f32 * 2.0);

        match self.fit {
            Fit::Contain => {
                let (w, h) = if img_aspect > area_aspect {
                    let w = area.width;
                    (w, ((w as f32 / img_aspect) / 2.0).round().max(1.0) as u16)
                } else {
                    let h = area.height;
                    (((h as f32 * 2.0) * img_aspect).round().max(1.0) as u16, h)
                };
                let (w, h) = (w.min(area.width), h.min(area.height));
                let x = area.x + (area.width - w) / 2;
                let y = area.y + (area.height - h) / 2;
                (Rect::new(x, y, w, h), [0.0, 1.0, 0.0, 1.0])
            }
            Fit::Cover => {
                let uv = if img_aspect > area_aspect {
                    let span = area_aspect / img_aspect;
                    [0.5 - span / 2.0, 0.5 + span / 2.0, 0.0, 1.0]
                } else {
                    let span = img_aspect / area_aspect;
                    [0.0, 1.0, 0.5 - span / 2.0, 0.5 + span / 2.0]
                };
                (area, uv)
            }
        }
    }
}

impl Widget for Thumb<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (target, [u0, u1, v0, v1]) = self.layout(area);
        let rows = target.height as f32 * 2.0;

        for cy in 0..target.height {
            for cx in 0..target.width {
                let u = u0 + (u1 - u0) * ((cx as f32 + 0.5) / target.width as f32);
                let v_top = v0 + (v1 - v0) * ((cy as f32 * 2.0 + 0.5) / rows) + self.shift;
                let v_bottom = v0 + (v1 - v0) * ((cy as f32 * 2.0 + 1.5) / rows) + self.shift;

                let top = mix(self.backdrop, px(self.thumb.sample(u, v_top)), self.opacity);
                let bottom = mix(self.backdrop, px(self.thumb.sample(u, v_bottom)), self.opacity);

                if let Some(cell) = buf.cell_mut((target.x + cx, target.y + cy)) {
                    cell.set_symbol("▀").set_fg(color(top)).set_bg(color(bottom));
                }
            }
        }
    }
}

fn px(p: [u8; 3]) -> Rgb {
    (p[0], p[1], p[2])
}

/// The record: grooves, a light streak that turns with the disc, and the
/// cover (or a plain label) in the middle.
pub struct Disc<'a> {
    pub angle: f32,
    pub cover: Option<&'a Thumbnail>,
    pub opacity: f32,
    pub backdrop: Rgb,
}

const LABEL_RADIUS: f32 = 0.38;

impl Widget for Disc<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Cells are about twice as tall as wide.
        let r = (area.width as f32 / 2.0).min(area.height as f32);
        if r < 1.0 {
            return;
        }
        let cx = area.x as f32 + area.width as f32 / 2.0;
        let cy = area.y as f32 + area.height as f32 / 2.0;
        let (sin, cos) = (-self.angle.to_radians()).sin_cos();

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let dx = (x as f32 + 0.5 - cx) / r;
                let dy = (y as f32 + 0.5 - cy) / (r / 2.0);
                let d = (dx * dx + dy * dy).sqrt();
                if d > 1.0 {
                    continue;
                }

                // Rotate into the disc's own frame.
                let rx = dx * cos - dy * sin;
                let ry = dx * sin + dy * cos;

                let (symbol, rgb) = if d < 0.06 {
                    ("●", CREAM)
                } else if d < LABEL_RADIUS {
                    let rgb = self.cover.map_or(WINE, |c| {
                        let p = c.sample(
                            (rx / LABEL_RADIUS + 1.0) / 2.0,
                            (ry / LABEL_RADIUS + 1.0) / 2.0,
                        );
                        px(p)
                    });
                    ("█", rgb)
                } else {
                    let groove = if ((d * 14.0) as i32) % 2 == 0 {
                        (24, 24, 27)
                    } else {
                        (39, 39, 42)
                    };
                    let streak = ry.abs() < 0.12 && rx > 0.0;
                    ("█", if streak { mix(groove, (120, 120, 130), 0.6) } else { groove })
                };

                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(symbol)
                        .set_fg(color(mix(self.backdrop, rgb, self.opacity)));
                }
            }
        }
    }
}
