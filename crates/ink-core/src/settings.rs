//! Global settings loaded from TOML, following the same OnceLock pattern as the
//! pinyin table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

const MAX_COOLDOWN_MS: u64 = 10_000;
const MAX_SPEECH_RATE: f32 = 10.0;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub practice: PracticeSettings,
    pub speech: SpeechSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PracticeSettings {
    pub advance_delay_ms: u64,
    pub advance_cooldown_ms: u64,
    pub wrong_feedback_ms: u64,
}

impl PracticeSettings {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn advance_cooldown(&self) -> Duration {
        Duration::from_millis(self.advance_cooldown_ms)
    }

    pub fn wrong_feedback(&self) -> Duration {
        Duration::from_millis(self.wrong_feedback_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub rate: f32,
    pub chinese_language_tag: String,
    pub english_language_tag: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be positive",
                ));
            }
        };
    }
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must not be empty",
                ));
            }
        };
    }

    check_positive!(practice.advance_delay_ms);
    check_positive!(practice.advance_cooldown_ms);
    check_positive!(practice.wrong_feedback_ms);
    if s.practice.advance_cooldown_ms > MAX_COOLDOWN_MS {
        return Err(invalid(
            "practice.advance_cooldown_ms",
            "must not exceed 10000",
        ));
    }

    if !(s.speech.rate > 0.0 && s.speech.rate <= MAX_SPEECH_RATE) {
        return Err(invalid("speech.rate", "must be in (0, 10]"));
    }
    check_non_empty!(speech.chinese_language_tag);
    check_non_empty!(speech.english_language_tag);

    Ok(())
}
