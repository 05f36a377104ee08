//! The loader screen and its split-panel exit.

use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::loader::{Loader, RevealPhase};

use super::palette::{CREAM, NIGHT, Rgb, STONE, color, faded, mix, rgb_of};
use super::widgets::{Fit, Thumb};

const HINT: &str = "press any key to continue";

/// Draw the loader over whatever `buf` already holds in `area`.
pub fn draw_loader(buf: &mut Buffer, area: Rect, loader: &Loader, now: Instant) {
    if loader.is_revealed() || area.is_empty() {
        return;
    }
    let frame = loader.frame();

    let mut canvas = Buffer::empty(area);
    canvas.set_style(area, Style::default().bg(color(NIGHT)).fg(color(CREAM)));

    let photo_area = photo_rect(area);
    if let Some(photo) = loader.current_photo() {
        Thumb::new(photo)
            .fit(Fit::Contain)
            .opacity(frame.counter_opacity)
            .backdrop(NIGHT)
            .render(photo_area, &mut canvas);
    }

    let counter = format!("{:>3}%", loader.displayed_percent());
    let counter_x = area.right().saturating_sub(counter.len() as u16 + 2);
    let counter_y = area.bottom().saturating_sub(2);
    canvas.set_string(
        counter_x,
        counter_y,
        &counter,
        Style::default()
            .fg(faded(CREAM, NIGHT, frame.counter_opacity))
            .add_modifier(Modifier::BOLD),
    );

    if loader.phase() == RevealPhase::ReadyWaitingForInput {
        let t = now.saturating_duration_since(loader.started_at()).as_secs_f32();
        let pulse = 0.55 + 0.45 * (t * std::f32::consts::PI).sin().abs();
        let hint_y = (photo_area.bottom() + 1).min(area.bottom().saturating_sub(1));
        let hint_x = area.x + area.width.saturating_sub(HINT.len() as u16) / 2;
        canvas.set_string(hint_x, hint_y, HINT, Style::default().fg(faded(CREAM, NIGHT, pulse)));
    }

    if !loader.failures().is_empty() {
        let note = format!("{} could not be loaded", plural(loader.failures().len()));
        canvas.set_string(
            area.x + 2,
            counter_y,
            &note,
            Style::default().fg(faded(STONE, NIGHT, 0.6 * frame.counter_opacity)),
        );
    }

    split_onto(buf, &canvas, area, frame.wipe, frame.container_opacity);
}

fn plural(n: usize) -> String {
    if n == 1 {
        "1 file".to_string()
    } else {
        format!("{n} files")
    }
}

fn photo_rect(area: Rect) -> Rect {
    let w = (area.width * 2 / 5).clamp(1, 48).min(area.width);
    let h = (area.height / 2).clamp(1, 16).min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Copy `canvas` onto `buf`, the top half pushed up and the bottom half
/// pushed down by `wipe` of their height, mixed with what is underneath at
/// `opacity`.
fn split_onto(buf: &mut Buffer, canvas: &Buffer, area: Rect, wipe: f32, opacity: f32) {
    let half = area.height / 2;
    let up = (wipe * half as f32).round() as u16;
    let down = (wipe * (area.height - half) as f32).round() as u16;

    for row in 0..area.height {
        let dest_row = if row < half {
            match row.checked_sub(up) {
                Some(r) => r,
                None => continue,
            }
        } else {
            let r = row + down;
            if r >= area.height {
                continue;
            }
            r
        };

        for col in 0..area.width {
            let (x, src_y, dst_y) = (area.x + col, area.y + row, area.y + dest_row);
            let Some(src) = canvas.cell((x, src_y)) else {
                continue;
            };
            let Some(dst) = buf.cell_mut((x, dst_y)) else {
                continue;
            };
            if opacity >= 1.0 {
                *dst = src.clone();
                continue;
            }
            let under = rgb_of(dst.bg).unwrap_or(CREAM);
            let blend = |c: Option<Rgb>| color(mix(under, c.unwrap_or(NIGHT), opacity));
            let (fg, bg) = (blend(rgb_of(src.fg)), blend(rgb_of(src.bg)));
            if opacity > 0.5 {
                dst.set_symbol(src.symbol());
            }
            dst.set_fg(fg).set_bg(bg);
        }
    }
}
