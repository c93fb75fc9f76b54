use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::station::Artwork;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
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
fn resolve_config_path_prefers_airwave_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("AIRWAVE_CONFIG_PATH", "/tmp/airwave-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/airwave-test-config.toml")
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
            .join("airwave")
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
            .join("airwave")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[station]
name = "Test FM"
url = "http://radio.example:8000/live"
description = "Around the clock"
artwork = "file:///tmp/test-fm.png"

[audio]
volume = 0.5
connect_timeout_secs = 3
quit_fade_out_ms = 0
user_agent = "test-agent"

[mpris]
enabled = false
identity = "testfm"

[logging]
filter = "airwave=debug"
file = "/tmp/airwave.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("AIRWAVE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("AIRWAVE__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.station.name, "Test FM");
    assert_eq!(s.station.url, "http://radio.example:8000/live");
    assert_eq!(s.station.description, "Around the clock");
    assert_eq!(s.station.artwork, Some(Artwork::new("file:///tmp/test-fm.png")));
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.audio.connect_timeout_secs, 3);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.audio.user_agent, "test-agent");
    assert!(!s.mpris.enabled);
    assert_eq!(s.mpris.identity, "testfm");
    assert_eq!(s.logging.filter, "airwave=debug");
    assert_eq!(
        s.logging.file,
        Some(std::path::PathBuf::from("/tmp/airwave.log"))
    );
    assert!(s.validate().is_ok());

    let station = s.station.to_station();
    assert!(station.is_configured());
    assert_eq!(station.description, "Around the clock");
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

    let _g1 = EnvGuard::set("AIRWAVE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("AIRWAVE__AUDIO__QUIT_FADE_OUT_MS", "0");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 0);
}

#[test]
fn missing_sections_use_defaults() {
    let s: Settings = toml::from_str("[station]\nname = \"Only Name\"\n").unwrap();
    assert_eq!(s.station.name, "Only Name");
    assert_eq!(s.station.url, StationSettings::default().url);
    assert!(s.station.artwork.is_none());
    assert!(s.mpris.enabled);
    assert_eq!(s.logging.filter, "info");
    assert!(s.logging.file.is_none());
}

#[test]
fn validate_rejects_bad_audio_settings() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.volume = 3.0;
    assert!(s.validate().is_err());

    s.audio.volume = 1.0;
    s.audio.connect_timeout_secs = 0;
    assert!(s.validate().is_err());
}
