use std::sync::OnceLock;

use pinyin::ToPinyin;
use tracing::debug;

use super::config::{parse_pinyin_toml, PinyinOverrides, PinyinTableError};
use super::Transliterator;
use crate::normalize::fold_tone_marks;
use crate::unicode::{is_han, is_punctuation};

pub(super) const DEFAULT_TOML: &str = include_str!("default_pinyin.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Returns the embedded default override table.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Dictionary transliterator with a layer of TOML reading overrides.
///
/// Every Han character gets the dictionary's first reading unless a
/// `[syllables]` entry replaces it, and `[phrases]` entries replace the
/// readings of whole words.
pub struct PinyinTable {
    overrides: PinyinOverrides,
    longest_phrase: usize,
}

enum Piece<'a> {
    /// Han character with a known toned reading.
    Syllable(&'a str),
    /// Han character with no reading.
    Unknown(char),
    /// Run of non-Han, non-punctuation characters (Latin words, digits).
    Word(String),
    Punct(char),
}

impl PinyinTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), PinyinTableError> {
        // Validate eagerly
        parse_pinyin_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| PinyinTableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static PinyinTable {
        static INSTANCE: OnceLock<PinyinTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            Self::from_toml(toml_str).expect("pinyin TOML must be valid")
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, PinyinTableError> {
        let overrides = parse_pinyin_toml(toml_str)?;
        let longest_phrase = overrides.longest_phrase();
        Ok(Self {
            overrides,
            longest_phrase,
        })
    }

    /// Number of override entries.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Toned reading of a single character out of context.
    pub fn lookup(&self, c: char) -> Option<&str> {
        self.overrides
            .syllables
            .get(&c)
            .map(String::as_str)
            .or_else(|| c.to_pinyin().map(|p| p.with_tone()))
    }

    /// Pairs every character of `text` with its toned reading in context.
    /// Non-Han characters and Han characters with no reading pair with `None`.
    pub fn annotate(&self, text: &str) -> Vec<(char, Option<&str>)> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            if let Some(readings) = self.phrase_at(&chars[i..]) {
                out.extend(
                    chars[i..]
                        .iter()
                        .zip(readings)
                        .map(|(c, r)| (*c, Some(r.as_str()))),
                );
                i += readings.len();
                continue;
            }
            let c = chars[i];
            let reading = if is_han(c) { self.lookup(c) } else { None };
            out.push((c, reading));
            i += 1;
        }
        out
    }

    /// Readings of the longest phrase starting at the head of `chars`.
    fn phrase_at(&self, chars: &[char]) -> Option<&[String]> {
        let run = chars
            .iter()
            .take(self.longest_phrase)
            .take_while(|c| is_han(**c))
            .count();
        (2..=run).rev().find_map(|len| {
            let key: String = chars[..len].iter().collect();
            self.overrides.phrases.get(&key).map(Vec::as_slice)
        })
    }

    fn pieces(&self, text: &str) -> Vec<Piece<'_>> {
        let mut pieces = Vec::new();
        let mut word = String::new();
        for (c, reading) in self.annotate(text) {
            let is_word_char = !c.is_whitespace() && !is_han(c) && !is_punctuation(c);
            if is_word_char {
                word.push(c);
                continue;
            }
            if !word.is_empty() {
                pieces.push(Piece::Word(std::mem::take(&mut word)));
            }
            if is_han(c) {
                match reading {
                    Some(s) => pieces.push(Piece::Syllable(s)),
                    None => {
                        debug!(%c, "no pinyin for character");
                        pieces.push(Piece::Unknown(c));
                    }
                }
            } else if is_punctuation(c) {
                pieces.push(Piece::Punct(c));
            }
        }
        if !word.is_empty() {
            pieces.push(Piece::Word(word));
        }
        pieces
    }
}

impl Transliterator for PinyinTable {
    fn to_syllables(&self, text: &str) -> Vec<String> {
        self.pieces(text)
            .into_iter()
            .filter_map(|piece| match piece {
                Piece::Syllable(s) => Some(fold_tone_marks(s).to_lowercase()),
                Piece::Unknown(c) => Some(c.to_string()),
                Piece::Word(w) => Some(w.to_lowercase()),
                Piece::Punct(_) => None,
            })
            .collect()
    }

    fn to_display(&self, text: &str) -> String {
        let mut tokens: Vec<String> = Vec::new();
        for piece in self.pieces(text) {
            match piece {
                Piece::Syllable(s) => tokens.push(s.to_string()),
                Piece::Unknown(c) => tokens.push(c.to_string()),
                Piece::Word(w) => tokens.push(w),
                Piece::Punct(p) => match tokens.last_mut() {
                    Some(last) => last.push(p),
                    None => tokens.push(p.to_string()),
                },
            }
        }
        tokens.join(" ")
    }
}
