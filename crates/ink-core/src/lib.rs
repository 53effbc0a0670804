//! Core of the InkWords practice engine: content model, answer
//! normalization, pinyin transliteration and answer matching.

pub mod content;
pub mod matcher;
pub mod normalize;
pub mod pinyin;
pub mod settings;
pub mod speech;
pub mod unicode;

pub use content::{Direction, PracticeItem, PracticeMode, SentenceItem, WordItem};
pub use matcher::{check, check_slots, SlotReport, Target, Verdict};
pub use normalize::{fold_tone_marks, normalize, normalize_pinyin};
pub use pinyin::{PinyinTable, Transliterator};
pub use speech::{NullSpeaker, RecordingSpeaker, Speaker, Utterance};
