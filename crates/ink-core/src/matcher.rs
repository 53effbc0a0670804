//! Answer matching for spelling and dictation practice.
//!
//! A `Target` is the answer key for one item in one learning direction. The
//! learner's slots are normalized the same way as the key and compared for
//! exact equality; there is no partial credit.

use serde::Serialize;
use tracing::debug;

use crate::content::{Direction, PracticeItem};
use crate::normalize::{normalize, normalize_pinyin};
use crate::pinyin::Transliterator;

/// Feedback state of the current answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    #[default]
    Idle,
    Correct,
    Wrong,
}

/// Answer key for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// English word typed as a whole into a single slot.
    Word(String),
    /// English sentence, one slot per word.
    Sentence(Vec<String>),
    /// Toneless pinyin, one slot per syllable.
    Pinyin(Vec<String>),
}

impl Target {
    pub fn for_item(
        item: &PracticeItem,
        direction: Direction,
        transliterator: &dyn Transliterator,
    ) -> Self {
        let text = item.target_text(direction);
        let target = match (item, direction) {
            (PracticeItem::Word(_), Direction::LearnEnglish) => Self::Word(text.to_string()),
            (PracticeItem::Sentence(_), Direction::LearnEnglish) => {
                Self::Sentence(sentence_words(text))
            }
            (_, Direction::LearnChinese) => Self::Pinyin(transliterator.to_syllables(text)),
        };
        // An item with nothing to split still needs one slot to answer into.
        match target {
            Self::Sentence(ref words) | Self::Pinyin(ref words) if words.is_empty() => {
                Self::Word(text.to_string())
            }
            other => other,
        }
    }

    /// Number of input slots the learner fills.
    pub fn slot_count(&self) -> usize {
        match self {
            Self::Word(_) => 1,
            Self::Sentence(tokens) | Self::Pinyin(tokens) => tokens.len(),
        }
    }

    /// The expected answer as one display string.
    pub fn answer(&self) -> String {
        match self {
            Self::Word(w) => w.clone(),
            Self::Sentence(tokens) | Self::Pinyin(tokens) => tokens.join(" "),
        }
    }

    /// Expected text of one slot.
    pub fn slot_answer(&self, slot: usize) -> Option<&str> {
        match self {
            Self::Word(w) => (slot == 0).then_some(w.as_str()),
            Self::Sentence(tokens) | Self::Pinyin(tokens) => tokens.get(slot).map(String::as_str),
        }
    }
}

/// Words of an English sentence, split on whitespace with edge punctuation
/// trimmed ("Hello," → "Hello").
pub fn sentence_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn english_key(text: &str) -> String {
    normalize(text)
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}

/// Per-slot outcome alongside the overall verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReport {
    pub verdict: Verdict,
    /// One flag per expected slot.
    pub slots: Vec<bool>,
}

/// Compare the learner's slots against the answer key.
pub fn check<S: AsRef<str>>(target: &Target, input: &[S]) -> Verdict {
    if input.iter().all(|s| s.as_ref().trim().is_empty()) {
        return Verdict::Wrong;
    }
    let matched = match target {
        Target::Word(word) => {
            let typed: String = input.iter().map(|s| s.as_ref()).collect();
            let expected = normalize(word);
            !expected.is_empty() && normalize(&typed) == expected
        }
        Target::Sentence(words) if words.len() == input.len() => words
            .iter()
            .zip(input)
            .all(|(w, typed)| english_key(w) == english_key(typed.as_ref())),
        Target::Sentence(words) => {
            // Slot count drifted (e.g. the whole sentence typed into one box).
            let typed: String = input.iter().map(|s| english_key(s.as_ref())).collect();
            let expected: String = words.iter().map(|w| english_key(w)).collect();
            typed == expected
        }
        Target::Pinyin(syllables) => {
            let typed: String = input.iter().map(|s| s.as_ref()).collect();
            let expected: String = syllables.iter().map(|s| normalize_pinyin(s)).collect();
            normalize_pinyin(&typed) == expected
        }
    };
    let verdict = if matched {
        Verdict::Correct
    } else {
        Verdict::Wrong
    };
    debug!(?verdict, slots = input.len(), "checked answer");
    verdict
}

/// Like `check`, also reporting which slots hold the expected token.
pub fn check_slots<S: AsRef<str>>(target: &Target, input: &[S]) -> SlotReport {
    let verdict = check(target, input);
    let typed = |i: usize| input.get(i).map(|s| s.as_ref()).unwrap_or("");
    let slots = match target {
        Target::Word(_) => vec![verdict == Verdict::Correct],
        Target::Sentence(words) => words
            .iter()
            .enumerate()
            .map(|(i, w)| !typed(i).trim().is_empty() && english_key(typed(i)) == english_key(w))
            .collect(),
        Target::Pinyin(syllables) => syllables
            .iter()
            .enumerate()
            .map(|(i, s)| {
                !typed(i).trim().is_empty() && normalize_pinyin(typed(i)) == normalize_pinyin(s)
            })
            .collect(),
    };
    SlotReport { verdict, slots }
}
