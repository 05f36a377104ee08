use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::style::Style;
use ratatui::widgets::Widget;

use super::widgets::{Fit, Thumb};
use super::*;
use crate::app::{App, Content};
use crate::audio::VinylPlayer;
use crate::config::{
    AudioSettings, ContentSettings, GrainSettings, LoaderSettings, TransitionSettings,
};
use crate::countdown::Countdown;
use crate::grain::Grain;
use crate::error::AssetError;
use crate::loader::{AssetFetcher, AudioInfo, LoadedAsset, Loader, Thumbnail};
use crate::manifest::{AssetRef, Manifest, Song};
use crate::page::SectionKind;
use crate::testing::{InstantFetcher, MuteBackend, wait_settled};

fn now_utc() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap()
}

/// Every audio file claims to be a 3:45 track titled "From Tag".
struct TaggedFetcher;

impl AssetFetcher for TaggedFetcher {
    fn fetch(&self, _asset: &AssetRef) -> Result<LoadedAsset, AssetError> {
        Ok(LoadedAsset::Audio(AudioInfo {
            duration: Some(Duration::from_secs(225)),
            title: Some("From Tag".to_string()),
        }))
    }
}

fn app(t0: Instant) -> App {
    app_with(t0, Arc::new(InstantFetcher), Vec::new())
}

fn app_with(t0: Instant, fetcher: Arc<dyn AssetFetcher>, songs: Vec<Song>) -> App {
    let manifest = Manifest::new(vec![AssetRef::audio("a.mp3")]).unwrap();
    let loader = Loader::start(
        &manifest,
        Vec::new(),
        fetcher,
        &LoaderSettings::default(),
        &TransitionSettings::default(),
        t0,
    );
    let player = VinylPlayer::new(Box::new(MuteBackend), songs.len(), &AudioSettings::default());
    let target = DateTime::parse_from_rfc3339("2026-02-14T20:00:00+00:00").unwrap();
    let countdown = Countdown::start(target, Duration::from_secs(1), now_utc());
    let grain = Grain::start(&GrainSettings {
        enabled: false,
        ..GrainSettings::default()
    });
    let content = Content {
        text: ContentSettings::default(),
        songs,
        hero: None,
    };
    App::new(
        content,
        loader,
        player,
        countdown,
        grain,
        Size::new(80, 24),
        StdRng::seed_from_u64(7),
    )
}

/// Drive `app` through the loader; returns a time after the reveal.
fn reveal(app: &mut App, t0: Instant) -> Instant {
    wait_settled(app, t0, now_utc());
    let ready = t0 + Duration::from_millis(600);
    app.tick(ready, now_utc());
    assert!(app.continue_intro(ready));
    let done = ready + Duration::from_millis(2100);
    app.tick(done, now_utc());
    assert!(app.is_revealed());
    done
}

fn render(app: &App, now: Instant) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| draw(f, app, now)).unwrap();
    terminal.backend().buffer().clone()
}

fn screen(buf: &Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn format_mmss_pads_minutes_and_seconds() {
    assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
    assert_eq!(format_mmss(Duration::from_secs(75)), "01:15");
    assert_eq!(format_mmss(Duration::from_millis(3599_900)), "59:59");
}

#[test]
fn loader_covers_the_page_until_revealed() {
    let t0 = Instant::now();
    let app = app(t0);
    let text = screen(&render(&app, t0));
    assert!(text.contains("0%"));
    assert!(!text.contains("the 14th of"));
}

#[test]
fn loader_asks_for_a_key_once_ready() {
    let t0 = Instant::now();
    let mut app = app(t0);
    wait_settled(&mut app, t0, now_utc());
    let ready = t0 + Duration::from_millis(600);
    app.tick(ready, now_utc());

    let text = screen(&render(&app, ready));
    assert!(text.contains("100%"));
    assert!(text.contains("press any key to continue"));
}

#[test]
fn hero_shows_after_the_reveal() {
    let t0 = Instant::now();
    let mut app = app(t0);
    let now = reveal(&mut app, t0);

    let text = screen(&render(&app, now));
    assert!(text.contains("the 14th of"));
    assert!(text.contains("F E B R U A R Y"));
    assert!(!text.contains("0%"));
}

#[test]
fn countdown_section_shows_time_and_buttons() {
    let t0 = Instant::now();
    let mut app = app(t0);
    let now = reveal(&mut app, t0);

    let top = app.page.section_top(SectionKind::Countdown);
    app.page.scroll_to(top);
    app.tick(now, now_utc());
    let later = now + Duration::from_millis(1500);
    app.tick(later, now_utc());

    let text = screen(&render(&app, later));
    assert!(text.contains("Will you be my"));
    assert!(text.contains("10  :  00  :  00"));
    assert!(text.contains("Yes"));
    assert!(text.contains("No"));
    // Only "Yes" is drawn focused; "No" keeps its rounded border.
    assert_eq!(text.matches("┏").count(), 1);
    assert_eq!(text.matches("╭").count(), 1);

    app.say_yes(later);
    // Past the heart burst.
    let text = screen(&render(&app, later + Duration::from_secs(3)));
    assert!(text.contains("See you at 8!"));
    assert!(!text.contains("10  :  00  :  00"));
}

#[test]
fn vinyl_shows_tag_title_and_track_length() {
    let t0 = Instant::now();
    let songs = vec![Song {
        title: String::new(),
        artist: "Someone".to_string(),
        cover: "vinyl/c.jpg".into(),
        audio: "a.mp3".into(),
    }];
    let mut app = app_with(t0, Arc::new(TaggedFetcher), songs);
    let now = reveal(&mut app, t0);

    let top = app.page.section_top(SectionKind::Vinyl);
    app.page.scroll_to(top);
    app.tick(now, now_utc());
    app.select_track(0, now);
    let later = now + Duration::from_secs(83);
    app.tick(later, now_utc());

    let text = screen(&render(&app, later));
    assert!(text.contains("Someone - From Tag"));
    assert!(text.contains("playing  01:23 / 03:45"));
}

#[test]
fn blit_copies_rows_from_the_offset() {
    let mut page = Buffer::empty(Rect::new(0, 0, 10, 10));
    page.set_string(0, 5, "hello", Style::default());
    let mut target = Buffer::empty(Rect::new(0, 0, 10, 3));
    let area = target.area;
    blit(&page, 5, &mut target, area);
    assert_eq!(target.cell((0, 0)).unwrap().symbol(), "h");
    assert_eq!(target.cell((4, 0)).unwrap().symbol(), "o");
}

#[test]
fn blit_reads_page_rows_from_a_window_buffer() {
    // Only rows 40..60 of the page exist.
    let mut page = Buffer::empty(Rect::new(0, 40, 10, 20));
    page.set_string(0, 45, "deep", Style::default());
    let mut target = Buffer::empty(Rect::new(0, 0, 10, 3));
    let area = target.area;
    blit(&page, 44, &mut target, area);
    assert_eq!(target.cell((0, 1)).unwrap().symbol(), "d");
    assert_eq!(target.cell((0, 0)).unwrap().symbol(), " ");
}

#[test]
fn contain_letterboxes_wide_images() {
    // 8x2 pixels: four cells wide for every one cell high.
    let thumb = Thumbnail::from_pixels(8, 2, vec![[200, 0, 0]; 16]).unwrap();
    let (rect, uv) = Thumb::new(&thumb).layout(Rect::new(0, 0, 20, 20));
    assert_eq!(rect.width, 20);
    assert_eq!(rect.height, 3);
    assert_eq!(rect.y, 8);
    assert_eq!(uv, [0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn cover_fills_the_area() {
    let thumb = Thumbnail::from_pixels(8, 2, vec![[0, 0, 200]; 16]).unwrap();
    let area = Rect::new(0, 0, 10, 10);
    let mut buf = Buffer::empty(area);
    Thumb::new(&thumb).fit(Fit::Cover).render(area, &mut buf);
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(buf.cell((x, y)).unwrap().symbol(), "▀");
        }
    }
}
