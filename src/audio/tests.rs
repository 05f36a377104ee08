use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::*;
use crate::config::AudioSettings;
use crate::error::PlaybackError;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Select(usize),
    Pause,
    Resume,
    Quit(Duration),
}

/// Records calls; refuses to start anything while `refuse` is set.
struct FakeBackend {
    calls: Rc<RefCell<Vec<Call>>>,
    refuse: Rc<Cell<bool>>,
}

impl AudioBackend for FakeBackend {
    fn select(&mut self, index: usize) -> Result<(), PlaybackError> {
        self.calls.borrow_mut().push(Call::Select(index));
        if self.refuse.get() {
            return Err(PlaybackError::NoOutputDevice("test".into()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push(Call::Pause);
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.calls.borrow_mut().push(Call::Resume);
        Ok(())
    }

    fn quit(&mut self, fade_out: Duration) {
        self.calls.borrow_mut().push(Call::Quit(fade_out));
    }
}

fn player(tracks: usize, refuse: bool, settings: AudioSettings) -> (VinylPlayer, Rc<RefCell<Vec<Call>>>) {
    let (p, calls, _refuse) = player_with_switch(tracks, refuse, settings);
    (p, calls)
}

/// Like `player`, plus the switch that makes the backend start refusing later.
fn player_with_switch(
    tracks: usize,
    refuse: bool,
    settings: AudioSettings,
) -> (VinylPlayer, Rc<RefCell<Vec<Call>>>, Rc<Cell<bool>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let refuse = Rc::new(Cell::new(refuse));
    let backend = FakeBackend {
        calls: calls.clone(),
        refuse: refuse.clone(),
    };
    (
        VinylPlayer::new(Box::new(backend), tracks, &settings),
        calls,
        refuse,
    )
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn autoplay_waits_for_the_start_flag() {
    let t0 = Instant::now();
    let (mut p, calls) = player(2, false, AudioSettings::default());

    assert_eq!(p.autoplay(t0), AutoplayOutcome::Skipped);
    assert!(calls.borrow().is_empty());

    p.start_flag().set(true);
    assert_eq!(p.autoplay(t0), AutoplayOutcome::Started);
    assert_eq!(
        p.state(),
        &PlaybackState {
            current_track_index: 0,
            is_playing: true,
            has_ever_played: true,
        }
    );

    // Only ever one attempt.
    assert_eq!(p.autoplay(t0), AutoplayOutcome::Skipped);
    assert_eq!(*calls.borrow(), vec![Call::Select(0)]);
}

#[test]
fn blocked_autoplay_stays_paused_and_manual_play_still_works() {
    let t0 = Instant::now();
    let settings = AudioSettings {
        allow_autoplay: false,
        ..AudioSettings::default()
    };
    let (mut p, calls) = player(2, false, settings);
    p.start_flag().set(true);

    assert_eq!(p.autoplay(t0), AutoplayOutcome::Blocked);
    assert!(!p.state().is_playing);
    assert!(!p.state().has_ever_played);
    assert!(calls.borrow().is_empty());
    assert_eq!(p.autoplay(t0), AutoplayOutcome::Skipped);

    p.toggle_play(t0).unwrap();
    assert!(p.state().is_playing);
    assert!(p.state().has_ever_played);
    assert_eq!(*calls.borrow(), vec![Call::Select(0)]);
}

#[test]
fn autoplay_without_output_device_is_blocked() {
    let t0 = Instant::now();
    let (mut p, _calls) = player(1, true, AudioSettings::default());
    p.start_flag().set(true);

    assert_eq!(p.autoplay(t0), AutoplayOutcome::Blocked);
    assert_eq!(p.state(), &PlaybackState::default());
}

#[test]
fn selecting_a_track_switches_and_plays_it() {
    let t0 = Instant::now();
    let (mut p, calls) = player(3, false, AudioSettings::default());

    p.select_track(2, t0).unwrap();
    p.select_track(1, t0).unwrap();
    assert_eq!(p.state().current_track_index, 1);
    assert!(p.state().is_playing);
    assert_eq!(*calls.borrow(), vec![Call::Select(2), Call::Select(1)]);
}

#[test]
fn switching_tracks_mid_play_starts_the_new_one_from_zero() {
    let t0 = Instant::now();
    let (mut p, calls) = player(2, false, AudioSettings::default());

    p.select_track(0, t0).unwrap();
    assert_eq!(p.position(t0 + ms(30_000)), ms(30_000));

    p.select_track(1, t0 + ms(30_000)).unwrap();
    assert_eq!(p.position(t0 + ms(31_000)), ms(1000));
    assert_eq!(p.state().current_track_index, 1);
    assert!(p.state().is_playing);
    assert_eq!(*calls.borrow(), vec![Call::Select(0), Call::Select(1)]);
}

#[test]
fn failed_selection_does_not_keep_the_old_position() {
    let t0 = Instant::now();
    let (mut p, calls, refuse) = player_with_switch(2, false, AudioSettings::default());
    p.select_track(0, t0).unwrap();

    // The output device goes away between the two selections.
    refuse.set(true);
    assert!(p.select_track(1, t0 + ms(30_000)).is_err());
    assert_eq!(p.state().current_track_index, 1);
    assert!(!p.state().is_playing);
    assert_eq!(p.position(t0 + ms(40_000)), Duration::ZERO);
    assert_eq!(*calls.borrow(), vec![Call::Select(0), Call::Select(1)]);
}

#[test]
fn selecting_a_missing_track_changes_nothing() {
    let t0 = Instant::now();
    let (mut p, calls) = player(2, false, AudioSettings::default());

    assert!(matches!(
        p.select_track(5, t0),
        Err(PlaybackError::MissingTrack(5))
    ));
    assert_eq!(p.state(), &PlaybackState::default());
    assert!(calls.borrow().is_empty());
}

#[test]
fn toggle_pauses_and_resumes_without_rewinding() {
    let t0 = Instant::now();
    let (mut p, calls) = player(2, false, AudioSettings::default());

    p.select_track(1, t0).unwrap();
    p.toggle_play(t0 + ms(3000)).unwrap();
    assert!(!p.state().is_playing);
    assert_eq!(p.position(t0 + ms(10_000)), ms(3000));

    p.toggle_play(t0 + ms(10_000)).unwrap();
    assert!(p.state().is_playing);
    assert_eq!(p.position(t0 + ms(11_000)), ms(4000));
    assert_eq!(
        *calls.borrow(),
        vec![Call::Select(1), Call::Pause, Call::Resume]
    );
}

#[test]
fn next_and_previous_wrap_around() {
    let t0 = Instant::now();
    let (mut p, _calls) = player(3, false, AudioSettings::default());

    p.prev_track(t0).unwrap();
    assert_eq!(p.state().current_track_index, 2);
    p.next_track(t0).unwrap();
    assert_eq!(p.state().current_track_index, 0);
}

#[test]
fn disc_only_spins_while_playing() {
    let t0 = Instant::now();
    let settings = AudioSettings {
        spin_rpm: 15.0,
        ..AudioSettings::default()
    };
    let (mut p, _calls) = player(1, false, settings);
    assert_eq!(p.spin_angle(t0 + ms(5000)), 0.0);

    p.select_track(0, t0).unwrap();
    // 15 rpm: a quarter turn per second.
    assert!((p.spin_angle(t0 + ms(1000)) - 90.0).abs() < 0.01);

    p.toggle_play(t0 + ms(1000)).unwrap();
    assert!((p.spin_angle(t0 + ms(9000)) - 90.0).abs() < 0.01);
}

#[test]
fn quit_fades_only_when_playing() {
    let t0 = Instant::now();
    let (mut p, calls) = player(1, false, AudioSettings::default());
    p.select_track(0, t0).unwrap();
    p.quit();
    assert_eq!(calls.borrow().last(), Some(&Call::Quit(ms(500))));

    let (mut idle, calls) = player(1, false, AudioSettings::default());
    idle.quit();
    assert_eq!(*calls.borrow(), vec![Call::Quit(Duration::ZERO)]);
}
