//! Layers drawn over the page: the heart burst and film grain.

use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::countdown::Heart;
use crate::grain::GrainPattern;

use super::palette::{CREAM, ROSE, color, mix, rgb_of};

pub fn draw_hearts(buf: &mut Buffer, area: Rect, hearts: &[Heart], now: Instant) {
    for heart in hearts {
        let (Some((fx, fy)), Some(t)) = (heart.position(now), heart.progress(now)) else {
            continue;
        };
        if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
            continue;
        }
        let x = area.x + (fx * area.width as f32) as u16;
        let y = area.y + (fy * area.height as f32) as u16;
        let Some(cell) = buf.cell_mut((x, y)) else {
            continue;
        };
        let bg = rgb_of(cell.bg).unwrap_or(CREAM);
        // Fades out over the last half of its life.
        let opacity = (2.0 * (1.0 - t)).min(1.0);
        cell.set_symbol(if heart.large { "❤" } else { "♥" })
            .set_fg(color(mix(bg, ROSE, opacity)));
    }
}

/// Specks only land on empty cells so text stays readable.
pub fn draw_grain(buf: &mut Buffer, area: Rect, pattern: &GrainPattern) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let Some(brightness) = pattern.speck_at(x - area.x, y - area.y) else {
                continue;
            };
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            if cell.symbol() != " " {
                continue;
            }
            let bg = rgb_of(cell.bg).unwrap_or(CREAM);
            let speck = (brightness, brightness, brightness);
            cell.set_symbol("·").set_fg(color(mix(bg, speck, 0.35)));
        }
    }
}
