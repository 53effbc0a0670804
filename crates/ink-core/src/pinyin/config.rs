use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::unicode::is_han;

#[derive(Deserialize)]
struct PinyinConfig {
    #[serde(default)]
    syllables: BTreeMap<String, String>,
    #[serde(default)]
    phrases: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PinyinTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[syllables] key must be a single Han character: {0}")]
    InvalidKey(String),
    #[error("[phrases] key must be two or more Han characters: {0}")]
    InvalidPhrase(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("phrase {phrase} has {chars} characters but {readings} readings")]
    ReadingCount {
        phrase: String,
        chars: usize,
        readings: usize,
    },
    #[error("pinyin table already initialized")]
    AlreadyInitialized,
}

/// Reading overrides layered over the dictionary transliteration.
#[derive(Debug, Default)]
pub struct PinyinOverrides {
    /// Single character → toned syllable.
    pub syllables: HashMap<char, String>,
    /// Word → one toned syllable per character.
    pub phrases: HashMap<String, Vec<String>>,
}

impl PinyinOverrides {
    pub fn len(&self) -> usize {
        self.syllables.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty() && self.phrases.is_empty()
    }

    /// Length in characters of the longest phrase.
    pub fn longest_phrase(&self) -> usize {
        self.phrases
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Parse TOML text into reading overrides.
///
/// `[syllables]` keys are one Han character each. `[phrases]` keys are words
/// whose reading differs from the per-character default (`"银行" = "yín háng"`);
/// the value carries one space-separated syllable per character.
pub fn parse_pinyin_toml(toml_str: &str) -> Result<PinyinOverrides, PinyinTableError> {
    let config: PinyinConfig =
        toml::from_str(toml_str).map_err(|e| PinyinTableError::Parse(e.to_string()))?;

    let mut overrides = PinyinOverrides::default();

    for (key, value) in config.syllables {
        let mut chars = key.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) if is_han(c) => c,
            _ => return Err(PinyinTableError::InvalidKey(key)),
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(PinyinTableError::EmptyValue(key));
        }
        overrides.syllables.insert(c, value.to_string());
    }

    for (key, value) in config.phrases {
        let chars = key.chars().count();
        if chars < 2 || !key.chars().all(is_han) {
            return Err(PinyinTableError::InvalidPhrase(key));
        }
        let readings: Vec<String> = value.split_whitespace().map(str::to_string).collect();
        if readings.is_empty() {
            return Err(PinyinTableError::EmptyValue(key));
        }
        if readings.len() != chars {
            return Err(PinyinTableError::ReadingCount {
                phrase: key,
                chars,
                readings: readings.len(),
            });
        }
        overrides.phrases.insert(key, readings);
    }

    Ok(overrides)
}
