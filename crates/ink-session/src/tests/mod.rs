mod simulator;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ink_core::{
    Direction, PracticeItem, PracticeMode, RecordingSpeaker, SentenceItem, Transliterator,
    WordItem,
};

use super::{PracticeEvent, PracticeResponse, PracticeSession, SessionConfig};

/// Deterministic transliterator: one syllable per known character, unknown
/// characters dropped.
pub(super) struct FakeTransliterator {
    readings: HashMap<char, (&'static str, &'static str)>,
}

impl FakeTransliterator {
    pub fn new() -> Self {
        let readings = HashMap::from([
            ('你', ("ni", "nǐ")),
            ('好', ("hao", "hǎo")),
            ('吗', ("ma", "ma")),
            ('猫', ("mao", "māo")),
            ('绿', ("lv", "lǜ")),
            ('茶', ("cha", "chá")),
        ]);
        Self { readings }
    }
}

impl Transliterator for FakeTransliterator {
    fn to_syllables(&self, text: &str) -> Vec<String> {
        text.chars()
            .filter_map(|c| self.readings.get(&c))
            .map(|(plain, _)| plain.to_string())
            .collect()
    }

    fn to_display(&self, text: &str) -> String {
        text.chars()
            .filter_map(|c| self.readings.get(&c))
            .map(|(_, toned)| *toned)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub(super) fn word(id: &str, word: &str, meaning: &str) -> PracticeItem {
    PracticeItem::Word(WordItem {
        id: id.to_string(),
        word: word.to_string(),
        meaning: meaning.to_string(),
        pronunciation: String::new(),
        example: String::new(),
        example_translation: String::new(),
        category: String::new(),
    })
}

pub(super) fn sentence(id: &str, zh: &str, en: &str) -> PracticeItem {
    PracticeItem::Sentence(SentenceItem {
        id: id.to_string(),
        zh: zh.to_string(),
        en: en.to_string(),
        pinyin: String::new(),
    })
}

pub(super) fn english_words() -> Vec<PracticeItem> {
    vec![
        word("1", "cat", "猫"),
        word("2", "Serendipity", "意外发现"),
        word("3", "tea", "茶"),
    ]
}

pub(super) fn test_config(mode: PracticeMode, direction: Direction) -> SessionConfig {
    SessionConfig {
        mode,
        direction,
        advance_delay: Duration::from_millis(1000),
        advance_cooldown: Duration::from_millis(500),
        wrong_feedback: Duration::from_millis(1500),
        speech_rate: 0.9,
        chinese_language_tag: "zh-CN".to_string(),
        english_language_tag: "en-US".to_string(),
    }
}

pub(super) fn make_session_with(
    items: Vec<PracticeItem>,
    mode: PracticeMode,
    direction: Direction,
) -> (PracticeSession, Arc<RecordingSpeaker>) {
    let speaker = Arc::new(RecordingSpeaker::new());
    let session = PracticeSession::new(
        items,
        Arc::new(FakeTransliterator::new()),
        speaker.clone(),
        test_config(mode, direction),
    )
    .unwrap();
    (session, speaker)
}

pub(super) fn make_session(
    items: Vec<PracticeItem>,
    direction: Direction,
) -> PracticeSession {
    make_session_with(items, PracticeMode::Spelling, direction).0
}

/// Fill every slot in order, returning the response to the last keystroke.
pub(super) fn type_answer(
    session: &mut PracticeSession,
    tokens: &[&str],
    now: Instant,
) -> Vec<PracticeResponse> {
    tokens
        .iter()
        .enumerate()
        .map(|(slot, text)| session.handle(PracticeEvent::input(slot, text), now))
        .collect()
}

pub(super) fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
