//! Practice content: word and sentence records plus the practice mode and
//! learning direction that decide how they are drilled.
//!
//! Records arrive as JSON from the content service. `parse_items` reads the
//! tagged form (`"kind": "word" | "sentence"`); `parse_words` and
//! `parse_sentences` accept the untagged arrays the REST endpoints return.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown direction: {0} (expected \"en\" or \"zh\")")]
    UnknownDirection(String),
    #[error("unknown practice mode: {0} (expected \"spelling\" or \"dictation\")")]
    UnknownMode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordItem {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    /// Target-language token.
    pub word: String,
    /// Translation shown as the prompt.
    pub meaning: String,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub example_translation: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceItem {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub zh: String,
    pub en: String,
    /// Stored toned display string; may be empty.
    #[serde(default)]
    pub pinyin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PracticeItem {
    Word(WordItem),
    Sentence(SentenceItem),
}

impl PracticeItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Word(w) => &w.id,
            Self::Sentence(s) => &s.id,
        }
    }

    /// Text the learner has to produce.
    pub fn target_text(&self, direction: Direction) -> &str {
        match (self, direction) {
            (Self::Word(w), _) => &w.word,
            (Self::Sentence(s), Direction::LearnEnglish) => &s.en,
            (Self::Sentence(s), Direction::LearnChinese) => &s.zh,
        }
    }

    /// Text shown to the learner as the cue (the translation).
    pub fn prompt_text(&self, direction: Direction) -> &str {
        match (self, direction) {
            (Self::Word(w), _) => &w.meaning,
            (Self::Sentence(s), Direction::LearnEnglish) => &s.zh,
            (Self::Sentence(s), Direction::LearnChinese) => &s.en,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Word(w) if !w.category.is_empty() => Some(&w.category),
            _ => None,
        }
    }
}

impl From<WordItem> for PracticeItem {
    fn from(w: WordItem) -> Self {
        Self::Word(w)
    }
}

impl From<SentenceItem> for PracticeItem {
    fn from(s: SentenceItem) -> Self {
        Self::Sentence(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    /// Target shown; the learner copies it.
    #[default]
    Spelling,
    /// Target hidden and spoken; the learner writes it from audio or memory.
    Dictation,
}

/// Who is learning what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Chinese speaker learning English. Answers are English words.
    #[default]
    #[serde(rename = "en")]
    LearnEnglish,
    /// English speaker learning Chinese. Answers are pinyin syllables.
    #[serde(rename = "zh")]
    LearnChinese,
}

impl FromStr for Direction {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::LearnEnglish),
            "zh" | "chinese" => Ok(Self::LearnChinese),
            _ => Err(ContentError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LearnEnglish => "en",
            Self::LearnChinese => "zh",
        })
    }
}

impl FromStr for PracticeMode {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spelling" => Ok(Self::Spelling),
            "dictation" => Ok(Self::Dictation),
            _ => Err(ContentError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spelling => "spelling",
            Self::Dictation => "dictation",
        })
    }
}

/// Ids come from several stores: some send strings, seeded content sends numbers.
fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Parse a tagged array of practice items.
pub fn parse_items(json: &str) -> Result<Vec<PracticeItem>, ContentError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse the untagged word list returned by the vocabulary endpoint.
pub fn parse_words(json: &str) -> Result<Vec<PracticeItem>, ContentError> {
    let words: Vec<WordItem> = serde_json::from_str(json)?;
    Ok(words.into_iter().map(PracticeItem::Word).collect())
}

/// Parse the untagged sentence list returned by the sentence endpoint.
pub fn parse_sentences(json: &str) -> Result<Vec<PracticeItem>, ContentError> {
    let sentences: Vec<SentenceItem> = serde_json::from_str(json)?;
    Ok(sentences.into_iter().map(PracticeItem::Sentence).collect())
}

/// Read and parse a tagged item file.
pub fn load_items(path: &Path) -> Result<Vec<PracticeItem>, ContentError> {
    let json = std::fs::read_to_string(path)?;
    let items = parse_items(&json)?;
    tracing::debug!(path = %path.display(), count = items.len(), "loaded practice items");
    Ok(items)
}

/// Keep the words filed under `category`. Sentences carry no category and
/// are dropped.
pub fn filter_by_category(items: Vec<PracticeItem>, category: &str) -> Vec<PracticeItem> {
    items
        .into_iter()
        .filter(|item| item.category() == Some(category))
        .collect()
}
