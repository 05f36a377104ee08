//! The six page sections, drawn into one tall buffer at their page rows.

use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::app::App;
use crate::countdown::BUTTON_SIZE;
use crate::manifest::Song;
use crate::page::{Reveal, SECTIONS, SectionKind};

use super::format_mmss;
use super::palette::{CREAM, INK, MIST, Rgb, ROSE, STONE, WINE, color, faded, mix};
use super::widgets::{Disc, Fit, Thumb};

const HERO_SHADE: Rgb = (28, 25, 23);

/// Draw every section that overlaps the visible rows into `page`, a buffer
/// addressed by page row that spans at least those sections.
pub fn draw_page(page: &mut Buffer, app: &App, now: Instant) {
    let width = page.area.width;
    let h = app.page.viewport_height();
    let (first, last) = app.page.visible_rows();

    for kind in SECTIONS {
        let top = app.page.section_top(kind);
        if top + h as u32 <= first || top >= last {
            continue;
        }
        let area = Rect::new(0, top as u16, width, h);
        match kind {
            SectionKind::Hero => hero(page, area, app, now),
            SectionKind::Valentine => valentine(page, area, app, now),
            SectionKind::Letter => letter(page, area, app, now),
            SectionKind::Vinyl => vinyl(page, area, app, now),
            SectionKind::Countdown => countdown(page, area, app, now),
            SectionKind::Footer => footer(page, area, app, now),
        }
    }
}

fn fill(buf: &mut Buffer, area: Rect, bg: Rgb) {
    buf.set_style(area, Style::default().bg(color(bg)).fg(color(INK)));
}

/// Write `text` centred on row `y`, skipping rows outside `area`.
fn centered(buf: &mut Buffer, area: Rect, y: i32, text: &str, style: Style) {
    if y < area.y as i32 || y >= area.bottom() as i32 {
        return;
    }
    let len = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(len) / 2;
    buf.set_stringn(x, y as u16, text, area.width as usize, style);
}

/// "HELLO" -> "H E L L O".
fn spaced(text: &str, gap: usize) -> String {
    let sep = " ".repeat(gap);
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(&sep)
}

fn hero(buf: &mut Buffer, area: Rect, app: &App, now: Instant) {
    fill(buf, area, HERO_SHADE);
    let parallax = app.page.hero_parallax();
    let text = &app.content.text;

    let hero_image = app
        .content
        .hero
        .as_deref()
        .and_then(|p| app.loader.assets().thumbnail(p));
    if let Some(thumb) = hero_image {
        Thumb::new(thumb)
            .fit(Fit::Cover)
            .opacity(0.45)
            .backdrop(HERO_SHADE)
            .shift(parallax.background / area.height as f32)
            .render(area, buf);
    }

    let mid = area.y as i32 + area.height as i32 / 2;
    let lift = parallax.heading.round() as i32;

    let pill = format!("( {} )", text.date_label);
    centered(buf, area, mid - 5 - lift, &pill, Style::default().fg(color(MIST)));
    centered(
        buf,
        area,
        mid - 3 - lift,
        &text.heading_top,
        Style::default().fg(color(CREAM)).add_modifier(Modifier::ITALIC),
    );
    centered(
        buf,
        area,
        mid - 2 - lift,
        &spaced(&text.heading_bottom.to_uppercase(), 1),
        Style::default().fg(color(CREAM)).add_modifier(Modifier::BOLD),
    );

    let p = app.page.reveal_progress(Reveal::HeroText, now);
    if p > 0.0 {
        let w = area.width.saturating_sub(4).min(60);
        let rise = ((1.0 - p) * 2.0).round() as u16;
        let intro = Rect::new(
            area.x + (area.width - w) / 2,
            (mid as u16 + 1 + rise).min(area.bottom().saturating_sub(1)),
            w,
            5.min(area.bottom().saturating_sub(mid as u16 + 1)),
        )
        .intersection(area);
        Paragraph::new(text.intro.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(faded(MIST, HERO_SHADE, p)))
            .render(intro, buf);
    }

    centered(
        buf,
        area,
        area.bottom() as i32 - 2,
        "j/k scroll · space next · q quit",
        Style::default().fg(faded(STONE, HERO_SHADE, 0.7)),
    );
}

fn valentine(buf: &mut Buffer, area: Rect, app: &App, now: Instant) {
    fill(buf, area, CREAM);

    // The decorative path draws itself from left to right.
    let drawn = app.page.reveal_progress(Reveal::ValentinePath, now);
    let cols = (drawn * area.width as f32) as u16;
    let base = area.y as f32 + area.height as f32 * 0.3;
    let amp = (area.height as f32 * 0.15).max(1.0);
    for col in 0..cols {
        let y = (base + amp * (col as f32 * 0.11).sin()).round() as u16;
        if y >= area.y && y < area.bottom() {
            if let Some(cell) = buf.cell_mut((area.x + col, y)) {
                cell.set_symbol("·").set_fg(faded(WINE, CREAM, 0.8));
            }
        }
    }

    let mid = area.y as i32 + area.height as i32 / 2;
    let heading = Style::default().fg(color(INK)).add_modifier(Modifier::BOLD);
    centered(buf, area, mid - 2, &spaced("Happy", 1), heading);

    // "valentine's" fades while "lover's" wipes in over it.
    let swap = app.page.reveal_progress(Reveal::LoverSwap, now);
    let before = spaced("valentine's", 1);
    let after = spaced("lover's", 1);
    centered(
        buf,
        area,
        mid,
        &before,
        Style::default().fg(faded(INK, CREAM, 1.0 - swap)).add_modifier(Modifier::ITALIC),
    );
    if swap > 0.0 {
        let shown: String = after
            .chars()
            .take((swap * after.chars().count() as f32).ceil() as usize)
            .collect();
        let x = area.x + area.width.saturating_sub(after.chars().count() as u16) / 2;
        let blank = " ".repeat(before.chars().count());
        if swap >= 1.0 {
            centered(buf, area, mid, &blank, Style::default());
        }
        buf.set_string(
            x,
            mid as u16,
            &shown,
            Style::default().fg(color(WINE)).add_modifier(Modifier::ITALIC | Modifier::BOLD),
        );
    }
    centered(buf, area, mid + 2, &spaced("day", 1), heading);

    let w = area.width.saturating_sub(4).min(50);
    let note_h = 4.min(area.height.saturating_sub(2));
    let note = Rect::new(area.x + 2, area.bottom().saturating_sub(note_h + 1), w, note_h)
        .intersection(area);
    Paragraph::new(app.content.text.valentine_note.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color(STONE)))
        .render(note, buf);

    if app.page.has_fired(Reveal::LoverSwap) {
        return;
    }
    let hint = "scroll to see";
    buf.set_string(
        area.right().saturating_sub(hint.len() as u16 + 2),
        area.bottom().saturating_sub(2),
        hint,
        Style::default().fg(color(STONE)).add_modifier(Modifier::ITALIC),
    );
}

fn letter(buf: &mut Buffer, area: Rect, app: &App, now: Instant) {
    fill(buf, area, CREAM);
    let p = app.page.reveal_progress(Reveal::Letter, now);
    if p <= 0.0 {
        return;
    }
    let text = &app.content.text;

    let mut lines: Vec<Line> = Vec::new();
    for (i, para) in text.letter.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(para.as_str()));
    }
    lines.push(Line::default());
    lines.push(Line::from(format!("{} ❤", text.letter_closing)).alignment(Alignment::Right));

    let w = area.width.saturating_sub(4).min(72);
    let h = area.height.saturating_sub(2);
    let slide = ((1.0 - p) * 4.0).round() as u16;
    let card = Rect::new(
        area.x + (area.width - w) / 2,
        area.y + 1 + slide.min(area.height.saturating_sub(h + 1)),
        w,
        h,
    )
    .intersection(area);

    let ink = faded(INK, CREAM, p);
    Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(ink))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(faded(MIST, CREAM, p)))
                .title(Span::styled(
                    format!(" {} ", text.letter_title),
                    Style::default().fg(faded(WINE, CREAM, p)).add_modifier(Modifier::ITALIC),
                ))
                .title_alignment(Alignment::Center)
                .padding(Padding::new(2, 2, 1, 0)),
        )
        .render(card, buf);
}

fn vinyl(buf: &mut Buffer, area: Rect, app: &App, now: Instant) {
    fill(buf, area, CREAM);
    let p = app.page.reveal_progress(Reveal::Vinyl, now);
    if p <= 0.0 {
        return;
    }
    let songs = &app.content.songs;
    let state = app.player.state();

    let disc_w = (area.width / 2).min(area.height.saturating_sub(2) * 2).max(2);
    let disc_area = Rect::new(
        area.x + area.width / 4 - disc_w / 4,
        area.y + 1,
        disc_w,
        area.height.saturating_sub(2),
    )
    .intersection(area);
    let cover = songs
        .get(state.current_track_index)
        .and_then(|s| app.loader.assets().thumbnail(&s.cover));
    Disc {
        angle: app.player.spin_angle(now),
        cover,
        opacity: p,
        backdrop: CREAM,
    }
    .render(disc_area, buf);

    let ink = faded(INK, CREAM, p);
    let dim = faded(STONE, CREAM, p);
    let accent = faded(WINE, CREAM, p);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "our songs",
            Style::default().fg(accent).add_modifier(Modifier::ITALIC | Modifier::BOLD),
        )),
        Line::default(),
    ];
    if songs.is_empty() {
        lines.push(Line::from(Span::styled("no songs configured", Style::default().fg(dim))));
    }
    for (i, song) in songs.iter().enumerate() {
        let current = i == state.current_track_index;
        let marker = match (current, state.is_playing) {
            (true, true) => "▶ ",
            (true, false) => "‖ ",
            _ => "  ",
        };
        let key = if i < 9 {
            format!("[{}] ", i + 1)
        } else {
            "    ".to_string()
        };
        let style = if current {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ink)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(key, Style::default().fg(dim)),
            Span::styled(song.display_or(tag_title(app, song)), style),
        ]));
    }

    lines.push(Line::default());
    let length = songs
        .get(state.current_track_index)
        .and_then(|s| app.loader.assets().audio_info(&s.audio))
        .and_then(|info| info.duration);
    let status = if !state.has_ever_played {
        "press p to play".to_string()
    } else if state.is_playing {
        format!("playing  {}", track_clock(app.player.position(now), length))
    } else {
        format!("paused  {}", track_clock(app.player.position(now), length))
    };
    lines.push(Line::from(Span::styled(status, Style::default().fg(ink))));
    lines.push(Line::from(Span::styled(
        "[1-9] pick  [h/l] prev/next  [p] play/pause",
        Style::default().fg(dim),
    )));

    let info_x = area.x + area.width / 2 + 2;
    let info = Rect::new(
        info_x,
        area.y + 2,
        area.right().saturating_sub(info_x + 2),
        area.height.saturating_sub(4),
    )
    .intersection(area);
    Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .render(info, buf);
}

fn tag_title<'a>(app: &'a App, song: &Song) -> Option<&'a str> {
    app.loader
        .assets()
        .audio_info(&song.audio)
        .and_then(|info| info.title.as_deref())
}

/// "01:23 / 03:45". Tracks loop, so the elapsed part wraps at the length.
fn track_clock(position: Duration, length: Option<Duration>) -> String {
    match length.filter(|l| l.as_millis() > 0) {
        Some(length) => {
            let into = Duration::from_millis((position.as_millis() % length.as_millis()) as u64);
            format!("{} / {}", format_mmss(into), format_mmss(length))
        }
        None => format_mmss(position),
    }
}

/// Characters come into focus in a fixed scattered order as `p` grows.
fn focus_in(text: &str, p: f32) -> String {
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            let threshold = ((i * 7919) % 97) as f32 / 97.0;
            if c == ' ' || threshold < p * 1.2 { c } else { '·' }
        })
        .collect()
}

fn countdown(buf: &mut Buffer, area: Rect, app: &App, now: Instant) {
    fill(buf, area, CREAM);
    let p = app.page.reveal_progress(Reveal::CountdownHeading, now);
    let prompt = &app.prompt;

    let top = area.y as i32 + (area.height as i32 / 5).max(1);
    let heading = prompt.heading();
    for (i, line) in heading.iter().enumerate() {
        let fg = if i == 2 { ROSE } else { INK };
        centered(
            buf,
            area,
            top + i as i32,
            &focus_in(line, p),
            Style::default()
                .fg(faded(fg, CREAM, p.max(0.15)))
                .add_modifier(Modifier::ITALIC),
        );
    }

    let mid = top + 5;
    if app.shows_countdown() {
        let left = app.countdown.time_left();
        let digits = format!(
            "{:02}  :  {:02}  :  {:02}",
            left.hours, left.minutes, left.seconds
        );
        centered(
            buf,
            area,
            mid,
            &digits,
            Style::default().fg(color(WINE)).add_modifier(Modifier::BOLD),
        );
        centered(buf, area, mid + 1, "hours    min    sec", Style::default().fg(color(STONE)));
    }

    if prompt.is_answered() {
        let beat = (now.saturating_duration_since(app.loader.started_at()).as_millis() / 600) % 2 == 0;
        let mut style = Style::default().fg(color(WINE)).add_modifier(Modifier::ITALIC);
        if beat {
            style = style.add_modifier(Modifier::BOLD);
        }
        centered(buf, area, mid + 3, "See you at 8! ❤", style);
        return;
    }

    let buttons_y = (mid + 3)
        .min(area.bottom() as i32 - BUTTON_SIZE.height as i32)
        .max(area.y as i32) as u16;
    let yes = Rect::new(
        (area.x + area.width / 2).saturating_sub(BUTTON_SIZE.width + 1),
        buttons_y,
        BUTTON_SIZE.width,
        BUTTON_SIZE.height,
    )
    .intersection(area);
    let no = match prompt.no_position() {
        Some(pos) => Rect::new(area.x + pos.x, area.y + pos.y, BUTTON_SIZE.width, BUTTON_SIZE.height),
        None => Rect::new(area.x + area.width / 2 + 1, buttons_y, BUTTON_SIZE.width, BUTTON_SIZE.height),
    }
    .intersection(area);

    // "No" loses heart a little more with every escape.
    let no_fg = mix(CREAM, STONE, (1.0 - 0.1 * prompt.dodges() as f32).max(0.35));
    // "Yes" holds the focus for good.
    button(buf, yes, "Yes", WINE, true);
    button(buf, no, "No", no_fg, false);
}

fn button(buf: &mut Buffer, area: Rect, label: &str, fg: Rgb, focused: bool) {
    let mut style = Style::default().fg(color(fg));
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    let border = if focused { BorderType::Thick } else { BorderType::Rounded };
    Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::bordered()
                .border_type(border)
                .border_style(Style::default().fg(color(fg))),
        )
        .render(area, buf);
}

fn footer(buf: &mut Buffer, area: Rect, app: &App, now: Instant) {
    fill(buf, area, CREAM);
    let p = app.page.reveal_progress(Reveal::Footer, now);
    if p <= 0.0 {
        return;
    }
    // Scales in: the letters draw together as the reveal runs.
    let gap = ((1.0 - p) * 3.0).round() as usize + 1;
    let name = spaced(&app.content.text.signature.to_uppercase(), gap);
    centered(
        buf,
        area,
        area.y as i32 + area.height as i32 / 2,
        &name,
        Style::default().fg(faded(WINE, CREAM, p)).add_modifier(Modifier::BOLD),
    );
}
