use std::time::Duration;

use ink_core::settings::{settings, Settings};
use ink_core::{Direction, PracticeMode, Target, Verdict};

/// Input the host feeds into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeEvent {
    /// Replace the text of one slot.
    Input { slot: usize, text: String },
    /// Explicit check (Enter / check button).
    Submit,
    Next,
    Previous,
    /// Timer for a scheduled advance fired.
    AdvanceDue { generation: u64 },
    /// Timer for clearing a wrong verdict fired.
    ClearFeedbackDue { generation: u64 },
    /// Speak the current target.
    Speak,
    /// Show the expected answer.
    Reveal,
}

impl PracticeEvent {
    pub fn input(slot: usize, text: &str) -> Self {
        Self::Input {
            slot,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Advance,
    ClearFeedback,
}

/// Request for the host to send the matching `*Due` event after `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub kind: TimerKind,
    pub after: Duration,
    pub generation: u64,
}

impl TimerRequest {
    /// The event to deliver once the timer fires.
    pub fn due_event(&self) -> PracticeEvent {
        match self.kind {
            TimerKind::Advance => PracticeEvent::AdvanceDue {
                generation: self.generation,
            },
            TimerKind::ClearFeedback => PracticeEvent::ClearFeedbackDue {
                generation: self.generation,
            },
        }
    }
}

/// Orthogonal side-effects that accompany a response. They stand in for the
/// UI callbacks (confetti, error cue, statistics refresh).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SideEffects {
    /// The current item was just answered correctly.
    pub correct_input: bool,
    /// A submission was wrong.
    pub error: bool,
    /// The input buffer changed (typed, cleared or rebuilt).
    pub input_state_changed: bool,
    /// The last item was answered correctly.
    pub session_complete: bool,
    /// The speaker was asked to speak.
    pub spoke: bool,
}

/// Response from `handle`, returned to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeResponse {
    /// False when the event was ignored (disabled control, stale timer,
    /// cooldown, out-of-range slot).
    pub consumed: bool,
    pub verdict: Verdict,
    pub index: usize,
    pub advanced: bool,
    /// Per-slot marks after an explicit check.
    pub slots: Option<Vec<bool>>,
    pub timer: Option<TimerRequest>,
    pub revealed: Option<String>,
    pub side_effects: SideEffects,
}

impl PracticeResponse {
    pub(crate) fn not_consumed(verdict: Verdict, index: usize) -> Self {
        Self {
            consumed: false,
            verdict,
            index,
            advanced: false,
            slots: None,
            timer: None,
            revealed: None,
            side_effects: SideEffects::default(),
        }
    }

    pub(crate) fn consumed(verdict: Verdict, index: usize) -> Self {
        Self {
            consumed: true,
            ..Self::not_consumed(verdict, index)
        }
    }
}

/// What the learner sees for the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Translation cue.
    pub cue: String,
    /// Target text; hidden in dictation mode.
    pub target: Option<String>,
    /// Toned pinyin of the target; only when learning Chinese in spelling mode.
    pub reading: Option<String>,
    pub slot_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub mode: PracticeMode,
    pub direction: Direction,
    pub advance_delay: Duration,
    pub advance_cooldown: Duration,
    pub wrong_feedback: Duration,
    pub speech_rate: f32,
    pub chinese_language_tag: String,
    pub english_language_tag: String,
}

impl SessionConfig {
    pub fn from_settings(s: &Settings, mode: PracticeMode, direction: Direction) -> Self {
        Self {
            mode,
            direction,
            advance_delay: s.practice.advance_delay(),
            advance_cooldown: s.practice.advance_cooldown(),
            wrong_feedback: s.practice.wrong_feedback(),
            speech_rate: s.speech.rate,
            chinese_language_tag: s.speech.chinese_language_tag.clone(),
            english_language_tag: s.speech.english_language_tag.clone(),
        }
    }

    pub(crate) fn language_tag(&self) -> &str {
        match self.direction {
            Direction::LearnEnglish => &self.english_language_tag,
            Direction::LearnChinese => &self.chinese_language_tag,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_settings(settings(), PracticeMode::default(), Direction::default())
    }
}

/// Running totals for one session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Explicit submissions.
    pub checks: u32,
    /// Distinct items answered correctly.
    pub correct: u32,
    /// Wrong submissions.
    pub wrong: u32,
    /// Items solved with no wrong submission and no reveal beforehand.
    pub first_try: u32,
    /// Distinct items whose answer was revealed.
    pub revealed: u32,
}

/// Per-item editing state, rebuilt whenever the current item changes.
pub(crate) struct ItemState {
    pub(crate) target: Target,
    pub(crate) buffer: Vec<String>,
    pub(crate) feedback: Verdict,
    pub(crate) wrong_submissions: u32,
}

impl ItemState {
    pub(crate) fn new(target: Target) -> Self {
        let buffer = vec![String::new(); target.slot_count()];
        Self {
            target,
            buffer,
            feedback: Verdict::Idle,
            wrong_submissions: 0,
        }
    }

    pub(crate) fn is_filled(&self) -> bool {
        self.buffer.iter().all(|s| !s.trim().is_empty())
    }
}

/// Per-item flags that survive navigation.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ItemHistory {
    pub(crate) solved: bool,
    pub(crate) revealed: bool,
}
