use crate::config;

/// Load and validate settings.
///
/// Config is optional: any failure falls back to defaults, and the reason is
/// returned so the caller can log or surface it.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
