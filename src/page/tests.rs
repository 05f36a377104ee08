use std::time::{Duration, Instant};

use super::*;

#[test]
fn scrolling_is_clamped_to_the_page() {
    let mut page = Page::new(20);
    assert_eq!(page.content_height(), 120);
    assert_eq!(page.max_offset(), 100);

    page.scroll_by(-5);
    assert_eq!(page.offset(), 0);
    page.scroll_by(1000);
    assert_eq!(page.offset(), 100);
    assert_eq!(page.current_section(), SectionKind::Footer);
}

#[test]
fn section_navigation_snaps_to_section_tops() {
    let mut page = Page::new(20);
    page.next_section();
    assert_eq!(page.offset(), 20);
    assert_eq!(page.current_section(), SectionKind::Valentine);

    page.scroll_by(5);
    page.prev_section();
    assert_eq!(page.offset(), 20);
    page.prev_section();
    assert_eq!(page.offset(), 0);
    page.prev_section();
    assert_eq!(page.offset(), 0);

    for _ in 0..10 {
        page.next_section();
    }
    assert_eq!(page.offset(), page.max_offset());
}

#[test]
fn visible_section_rows_cover_only_sections_in_view() {
    let mut page = Page::new(20);
    assert_eq!(page.visible_section_rows(), (0, 20));

    page.scroll_by(30);
    assert_eq!(page.visible_section_rows(), (20, 60));

    page.scroll_by(1000);
    assert_eq!(page.visible_section_rows(), (100, 120));
}

#[test]
fn hero_text_is_revealed_on_first_update() {
    let t0 = Instant::now();
    let mut page = Page::new(20);
    page.update_triggers(t0);

    assert!(page.has_fired(Reveal::HeroText));
    assert!(!page.has_fired(Reveal::ValentinePath));
    assert_eq!(page.reveal_progress(Reveal::HeroText, t0), 0.0);
    assert_eq!(
        page.reveal_progress(Reveal::HeroText, t0 + trigger::duration_of(Reveal::HeroText)),
        1.0
    );
}

#[test]
fn triggers_fire_at_their_lines() {
    let t0 = Instant::now();
    let mut page = Page::new(20);

    // Valentine top sits at 20 - offset; path line is 12, swap line is 6.
    page.scroll_to(7);
    page.update_triggers(t0);
    assert!(!page.has_fired(Reveal::ValentinePath));

    page.scroll_to(8);
    page.update_triggers(t0);
    assert!(page.has_fired(Reveal::ValentinePath));
    assert!(!page.has_fired(Reveal::LoverSwap));

    page.scroll_to(14);
    page.update_triggers(t0);
    assert!(page.has_fired(Reveal::LoverSwap));
}

#[test]
fn reveals_fire_once_and_never_reverse() {
    let t0 = Instant::now();
    let mut page = Page::new(20);

    page.scroll_to(page.section_top(SectionKind::Footer));
    page.update_triggers(t0);
    assert!(page.has_fired(Reveal::Footer));

    // Scrolling back up and down again does not restart the animation.
    page.scroll_to(0);
    page.update_triggers(t0 + Duration::from_secs(5));
    page.scroll_to(page.max_offset());
    page.update_triggers(t0 + Duration::from_secs(10));

    assert_eq!(page.reveal_progress(Reveal::Footer, t0 + Duration::from_secs(10)), 1.0);
    assert_eq!(page.reveal_progress(Reveal::Footer, t0), 0.0);
}

#[test]
fn parallax_heading_moves_faster_than_background() {
    let mut page = Page::new(20);
    assert_eq!(page.hero_parallax().heading, 0.0);

    page.scroll_to(10);
    let p = page.hero_parallax();
    assert!((p.background - 2.0).abs() < 1e-4);
    assert!((p.heading - 4.0).abs() < 1e-4);

    page.scroll_to(60);
    let p = page.hero_parallax();
    assert!((p.heading - 8.0).abs() < 1e-4);
}

#[test]
fn resize_keeps_relative_position() {
    let mut page = Page::new(20);
    page.scroll_to(40);
    page.resize(10);
    assert_eq!(page.offset(), 20);
    assert_eq!(page.current_section(), SectionKind::Letter);
}
