//! Stateful practice session: input buffer, verdicts and item navigation.
//!
//! `PracticeSession` owns the state of one practice run and processes each
//! event, returning a `PracticeResponse` the UI turns into feedback,
//! confetti and timers. It never sleeps: delays come back as
//! `TimerRequest`s which the host answers with the matching `*Due` event.

pub(crate) mod types;

mod event_handlers;
mod navigation;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Instant;

use ink_core::{Direction, PracticeItem, PracticeMode, Speaker, Target, Transliterator, Verdict};

pub use types::{
    PracticeEvent, PracticeResponse, Prompt, SessionConfig, SessionStats, SideEffects, TimerKind,
    TimerRequest,
};

use types::{ItemHistory, ItemState};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot start a practice session without items")]
    Empty,
}

/// Stateful practice session over an ordered list of items.
pub struct PracticeSession {
    items: Vec<PracticeItem>,
    transliterator: Arc<dyn Transliterator>,
    speaker: Arc<dyn Speaker>,
    config: SessionConfig,

    index: usize,
    current: ItemState,
    history: Vec<ItemHistory>,

    /// Generation of the advance timer currently armed.
    pending_advance: Option<u64>,
    /// Generation of the clear-feedback timer currently armed.
    pending_clear: Option<u64>,
    /// Bumped for every timer handed out; stale `*Due` events never match.
    generation: u64,
    /// When the index last moved forward, for the reentrancy guard.
    last_advance: Option<Instant>,

    stats: SessionStats,
}

impl PracticeSession {
    /// Start a session on the first item. In dictation mode the first item is
    /// spoken right away.
    pub fn new(
        items: Vec<PracticeItem>,
        transliterator: Arc<dyn Transliterator>,
        speaker: Arc<dyn Speaker>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let Some(first) = items.first() else {
            return Err(SessionError::Empty);
        };
        let target = Target::for_item(first, config.direction, transliterator.as_ref());
        let history = vec![ItemHistory::default(); items.len()];
        let mut session = Self {
            items,
            transliterator,
            speaker,
            config,
            index: 0,
            current: ItemState::new(target),
            history,
            pending_advance: None,
            pending_clear: None,
            generation: 0,
            last_advance: None,
            stats: SessionStats::default(),
        };
        if session.config.mode == PracticeMode::Dictation {
            session.speak_current();
        }
        Ok(session)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_item(&self) -> &PracticeItem {
        &self.items[self.index]
    }

    pub fn feedback(&self) -> Verdict {
        self.current.feedback
    }

    pub fn buffer(&self) -> &[String] {
        &self.current.buffer
    }

    pub fn target(&self) -> &Target {
        &self.current.target
    }

    pub fn mode(&self) -> PracticeMode {
        self.config.mode
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn can_next(&self) -> bool {
        self.index + 1 < self.items.len()
    }

    pub fn can_previous(&self) -> bool {
        self.index > 0
    }

    /// True once the last item has been answered correctly.
    pub fn is_complete(&self) -> bool {
        !self.can_next() && self.current.feedback == Verdict::Correct
    }

    /// True while a correct answer waits for its scheduled advance.
    pub fn is_advance_pending(&self) -> bool {
        self.pending_advance.is_some()
    }

    pub fn prompt(&self) -> Prompt {
        let item = self.current_item();
        let direction = self.config.direction;
        let spelling = self.config.mode == PracticeMode::Spelling;
        let reading = (spelling && direction == Direction::LearnChinese).then(|| self.reading());
        Prompt {
            cue: item.prompt_text(direction).to_string(),
            target: spelling.then(|| item.target_text(direction).to_string()),
            reading,
            slot_count: self.current.buffer.len(),
        }
    }

    /// Toned reading of the current Chinese target, preferring the stored one.
    fn reading(&self) -> String {
        let item = self.current_item();
        match item {
            PracticeItem::Sentence(s) if !s.pinyin.trim().is_empty() => s.pinyin.clone(),
            _ => self
                .transliterator
                .to_display(item.target_text(Direction::LearnChinese)),
        }
    }

    /// The expected answer in its display form.
    fn answer_display(&self) -> String {
        match self.config.direction {
            Direction::LearnChinese => self.reading(),
            Direction::LearnEnglish => self
                .current_item()
                .target_text(Direction::LearnEnglish)
                .to_string(),
        }
    }

    pub fn set_mode(&mut self, mode: PracticeMode) -> PracticeResponse {
        self.config.mode = mode;
        self.reload_current()
    }

    pub fn set_direction(&mut self, direction: Direction) -> PracticeResponse {
        self.config.direction = direction;
        self.reload_current()
    }
}
