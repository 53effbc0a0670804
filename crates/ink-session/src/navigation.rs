use std::time::Instant;

use tracing::debug;

use ink_core::{PracticeMode, Target, Verdict};

use super::types::{ItemState, PracticeResponse, TimerKind, TimerRequest};
use super::PracticeSession;

impl PracticeSession {
    /// Rebuild the editing state for `self.index`. Any armed timer goes stale.
    fn load_item(&mut self) {
        let item = &self.items[self.index];
        let target = Target::for_item(item, self.config.direction, self.transliterator.as_ref());
        self.current = ItemState::new(target);
        self.pending_advance = None;
        self.pending_clear = None;
    }

    /// Enter the item at `self.index`: rebuild state, speak in dictation mode.
    fn enter_item(&mut self) -> PracticeResponse {
        self.load_item();
        let mut resp = PracticeResponse::consumed(Verdict::Idle, self.index);
        resp.side_effects.input_state_changed = true;
        if self.config.mode == PracticeMode::Dictation {
            self.speak_current();
            resp.side_effects.spoke = true;
        }
        resp
    }

    pub(super) fn reload_current(&mut self) -> PracticeResponse {
        debug!(
            index = self.index,
            mode = %self.config.mode,
            direction = %self.config.direction,
            "reloading item"
        );
        self.enter_item()
    }

    /// Whether an advance at `now` falls inside the cooldown window of the
    /// previous one.
    pub(super) fn in_cooldown(&self, now: Instant) -> bool {
        self.last_advance
            .is_some_and(|at| now.saturating_duration_since(at) < self.config.advance_cooldown)
    }

    /// Move to the next item. Callers check `can_next` and the cooldown.
    pub(super) fn advance(&mut self, now: Instant) -> PracticeResponse {
        debug_assert!(self.can_next());
        self.index += 1;
        self.last_advance = Some(now);
        debug!(index = self.index, "advanced");
        let mut resp = self.enter_item();
        resp.advanced = true;
        resp
    }

    pub(super) fn retreat(&mut self) -> PracticeResponse {
        debug_assert!(self.can_previous());
        self.index -= 1;
        debug!(index = self.index, "went back");
        self.enter_item()
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(super) fn arm_advance(&mut self) -> TimerRequest {
        let generation = self.next_generation();
        self.pending_advance = Some(generation);
        TimerRequest {
            kind: TimerKind::Advance,
            after: self.config.advance_delay,
            generation,
        }
    }

    pub(super) fn arm_clear_feedback(&mut self) -> TimerRequest {
        let generation = self.next_generation();
        self.pending_clear = Some(generation);
        TimerRequest {
            kind: TimerKind::ClearFeedback,
            after: self.config.wrong_feedback,
            generation,
        }
    }

    /// Record a correct answer for the current item and schedule the advance.
    /// The last item schedules nothing and completes the session.
    pub(super) fn mark_correct(&mut self, resp: &mut PracticeResponse) {
        self.current.feedback = Verdict::Correct;
        self.pending_clear = None;
        resp.verdict = Verdict::Correct;
        resp.side_effects.correct_input = true;

        let history = &mut self.history[self.index];
        if !history.solved {
            history.solved = true;
            self.stats.correct += 1;
            if self.current.wrong_submissions == 0 && !history.revealed {
                self.stats.first_try += 1;
            }
        }

        if self.can_next() {
            resp.timer = Some(self.arm_advance());
        } else {
            debug!("last item answered, session complete");
            resp.side_effects.session_complete = true;
        }
    }

    pub(super) fn mark_wrong(&mut self, resp: &mut PracticeResponse) {
        self.current.feedback = Verdict::Wrong;
        self.current.wrong_submissions += 1;
        self.stats.wrong += 1;
        resp.verdict = Verdict::Wrong;
        resp.side_effects.error = true;
        resp.timer = Some(self.arm_clear_feedback());
    }

    pub(super) fn speak_current(&self) {
        let text = self.current_item().target_text(self.config.direction);
        if text.trim().is_empty() {
            return;
        }
        self.speaker
            .speak(text, self.config.language_tag(), self.config.speech_rate);
    }
}
