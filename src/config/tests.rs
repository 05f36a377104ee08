use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::error::SettingsError;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_valentine_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("VALENTINE_CONFIG_PATH", "/tmp/valentine-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/valentine-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("valentine")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("valentine")
            .join("config.toml")
    );
}

#[test]
fn defaults_validate_and_match_the_original_timeline() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.loader.smoothing_ms, 500);
    assert_eq!(s.loader.photo_cycle_ms, 300);
    let t = &s.transition;
    assert_eq!(
        t.counter_fade_ms + t.wipe_delay_ms + t.wipe_ms + t.container_delay_ms + t.container_fade_ms,
        2000
    );
    let target = s.countdown_target().unwrap();
    assert_eq!(target.to_rfc3339(), "2026-02-14T20:00:00+06:00");
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[loader]
smoothing_ms = 0
photo_cycle_ms = 150

[transition]
wipe_ms = 600

[audio]
allow_autoplay = false
quit_fade_out_ms = 123

[countdown]
target = "2027-02-14T20:00:00+01:00"

[grain]
enabled = false
density = 0.5

[content]
gallery_dir = "pics"
hero_image = "hero.png"
letter = ["one", "two"]
signature = "me"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VALENTINE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VALENTINE__AUDIO__QUIT_FADE_OUT_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.loader.smoothing_ms, 0);
    assert_eq!(s.loader.photo_cycle_ms, 150);
    assert_eq!(s.transition.wipe_ms, 600);
    // Untouched keys keep their defaults.
    assert_eq!(s.transition.counter_fade_ms, 400);
    assert!(!s.audio.allow_autoplay);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert!(!s.grain.enabled);
    assert_eq!(s.grain.density, 0.5);
    assert_eq!(s.content.gallery_dir, "pics");
    assert_eq!(s.content.hero_image.as_deref(), Some("hero.png"));
    assert_eq!(s.content.letter, vec!["one".to_string(), "two".to_string()]);
    assert_eq!(s.content.signature, "me");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
quit_fade_out_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VALENTINE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("VALENTINE__AUDIO__QUIT_FADE_OUT_MS", "0");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 0);
}

#[test]
fn validate_rejects_bad_target_and_ranges() {
    let mut s = Settings::default();
    s.countdown.target = "next tuesday".to_string();
    assert!(matches!(s.validate(), Err(SettingsError::InvalidTarget(_))));

    let mut s = Settings::default();
    s.grain.density = 1.5;
    assert!(matches!(
        s.validate(),
        Err(SettingsError::OutOfRange { field: "grain.density", .. })
    ));

    let mut s = Settings::default();
    s.countdown.tick_ms = 0;
    assert!(matches!(
        s.validate(),
        Err(SettingsError::OutOfRange { field: "countdown.tick_ms", .. })
    ));

    let mut s = Settings::default();
    s.loader.photo_cycle_ms = 0;
    assert!(s.validate().is_err());
}
