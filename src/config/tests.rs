use super::load::{default_config_path, default_log_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
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
fn resolve_config_path_prefers_baise_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("BAISE_CONFIG_PATH", "/tmp/baise-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/baise-test-config.toml")
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
            .join("baise")
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
            .join("baise")
            .join("config.toml")
    );
}

#[test]
fn default_log_dir_falls_back_to_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/baise")
    );
}

#[test]
fn defaults_match_the_documented_values() {
    let s = Settings::default();
    assert_eq!(s.audio.initial_volume, 25);
    assert_eq!(s.controls.volume_step, 5);
    assert_eq!(s.controls.rewind_restart_secs, 5);
    assert_eq!(
        s.library.extensions,
        vec!["wav".to_string(), "mp3".to_string(), "ogg".to_string()]
    );
    assert!(s.library.directory.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
directory = "/srv/music"
extensions = ["mp3"]
follow_links = false
artist = "Someone"

[audio]
initial_volume = 60

[controls]
volume_step = 10
rewind_restart_secs = 3
tick_ms = 50
handle_radius = 2.0

[ui]
header_text = "hello"

[log]
filter = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BAISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("BAISE__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(
        s.library.directory,
        Some(std::path::PathBuf::from("/srv/music"))
    );
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.artist, "Someone");
    assert_eq!(s.audio.initial_volume, 60);
    assert_eq!(s.controls.volume_step, 10);
    assert_eq!(s.controls.rewind_restart_secs, 3);
    assert_eq!(s.controls.tick_ms, 50);
    assert_eq!(s.controls.handle_radius, 2.0);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.log.filter, "debug");
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
initial_volume = 40
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BAISE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("BAISE__AUDIO__INITIAL_VOLUME", "70");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 70);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec![" . ".to_string()];
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.handle_radius = 0.0;
    assert!(s.validate().is_err());
}
