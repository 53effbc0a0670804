//! Chinese-to-pinyin transliteration.
//!
//! The matcher only depends on the `Transliterator` trait; `PinyinTable` is
//! the shipped implementation, backed by the `pinyin` dictionary plus an
//! embedded TOML override table that can be replaced at startup.

mod config;
mod table;

pub use config::{parse_pinyin_toml, PinyinOverrides, PinyinTableError};
pub use table::{default_toml, PinyinTable};

/// Converts Chinese text into pinyin.
pub trait Transliterator: Send + Sync {
    /// Ordered toneless syllables, one per Han character. These size the
    /// input buffer and form the answer key.
    fn to_syllables(&self, text: &str) -> Vec<String>;

    /// Space-separated reading with tone marks, for display.
    fn to_display(&self, text: &str) -> String;
}

impl<T: Transliterator + ?Sized> Transliterator for &T {
    fn to_syllables(&self, text: &str) -> Vec<String> {
        (**self).to_syllables(text)
    }

    fn to_display(&self, text: &str) -> String {
        (**self).to_display(text)
    }
}
