//! Terminal rendering with `ratatui`.
//!
//! The sections in view are drawn into an off-screen buffer at their page
//! rows, and the rows under the current scroll offset are copied into the
//! frame. The loader, hearts and grain are layered on top.

use std::time::{Duration, Instant};

use ratatui::{Frame, buffer::Buffer, layout::Rect};

use crate::app::App;
use crate::loader::RevealPhase;
use crate::page::{SECTIONS, SectionKind};

mod loader_view;
mod overlay;
mod palette;
mod sections;
mod widgets;

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Copy the rows of `page` starting at `offset` into `area` of `target`.
fn blit(page: &Buffer, offset: u32, target: &mut Buffer, area: Rect) {
    for row in 0..area.height {
        let Ok(src_y) = u16::try_from(offset + row as u32) else {
            break;
        };
        for col in 0..area.width {
            let Some(src) = page.cell((col, src_y)) else {
                continue;
            };
            if let Some(dst) = target.cell_mut((area.x + col, area.y + row)) {
                *dst = src.clone();
            }
        }
    }
}

/// One dot per section down the right edge, the current one filled.
fn section_dots(buf: &mut Buffer, area: Rect, current: SectionKind) {
    let n = SECTIONS.len() as u16;
    if area.height < n || area.width < 2 {
        return;
    }
    let x = area.right() - 2;
    let top = area.y + (area.height - n) / 2;
    for (i, kind) in SECTIONS.iter().enumerate() {
        let Some(cell) = buf.cell_mut((x, top + i as u16)) else {
            continue;
        };
        let bg = palette::rgb_of(cell.bg).unwrap_or(palette::CREAM);
        let (symbol, fg) = if *kind == current {
            ("●", palette::WINE)
        } else {
            ("○", palette::mix(bg, palette::STONE, 0.7))
        };
        cell.set_symbol(symbol).set_fg(palette::color(fg));
    }
}

/// Render the whole UI for `app` at `now`.
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();
    if area.is_empty() {
        return;
    }

    // While the loader is still opaque there is nothing of the page to see.
    if app.loader.phase() >= RevealPhase::Transitioning {
        let (top, bottom) = app.page.visible_section_rows();
        let top = top.min(u16::MAX as u32) as u16;
        let bottom = bottom.min(u16::MAX as u32) as u16;
        let mut page = Buffer::empty(Rect::new(0, top, area.width, bottom - top));
        sections::draw_page(&mut page, app, now);
        blit(&page, app.page.offset(), frame.buffer_mut(), area);
        section_dots(frame.buffer_mut(), area, app.page.current_section());
        overlay::draw_hearts(frame.buffer_mut(), area, app.prompt.hearts(), now);
    }

    loader_view::draw_loader(frame.buffer_mut(), area, &app.loader, now);

    if let Some(pattern) = app.grain.pattern() {
        overlay::draw_grain(frame.buffer_mut(), area, pattern);
    }
}

#[cfg(test)]
mod tests;
