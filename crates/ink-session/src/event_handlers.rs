use std::time::Instant;

use tracing::{debug, debug_span, warn};

use ink_core::matcher::{check, check_slots};
use ink_core::Verdict;

use super::types::{PracticeEvent, PracticeResponse};
use super::PracticeSession;

impl PracticeSession {
    fn ignored(&self) -> PracticeResponse {
        PracticeResponse::not_consumed(self.current.feedback, self.index)
    }

    fn consumed(&self) -> PracticeResponse {
        PracticeResponse::consumed(self.current.feedback, self.index)
    }

    /// Process one event at time `now`. Returns what the host should show
    /// and which timer, if any, to arm.
    pub fn handle(&mut self, event: PracticeEvent, now: Instant) -> PracticeResponse {
        let _span = debug_span!("handle", ?event, index = self.index).entered();

        match event {
            PracticeEvent::Input { slot, text } => self.handle_input(slot, text),
            PracticeEvent::Submit => self.handle_submit(),
            PracticeEvent::Next => self.handle_next(now),
            PracticeEvent::Previous => {
                if !self.can_previous() {
                    return self.ignored();
                }
                self.retreat()
            }
            PracticeEvent::AdvanceDue { generation } => self.handle_advance_due(generation, now),
            PracticeEvent::ClearFeedbackDue { generation } => {
                if self.pending_clear != Some(generation) {
                    debug!(generation, "stale clear-feedback timer");
                    return self.ignored();
                }
                self.pending_clear = None;
                self.current.feedback = Verdict::Idle;
                self.consumed()
            }
            PracticeEvent::Speak => {
                self.speak_current();
                let mut resp = self.consumed();
                resp.side_effects.spoke = true;
                resp
            }
            PracticeEvent::Reveal => self.handle_reveal(),
        }
    }

    fn handle_input(&mut self, slot: usize, text: String) -> PracticeResponse {
        if slot >= self.current.buffer.len() {
            warn!(slot, slots = self.current.buffer.len(), "input for missing slot");
            return self.ignored();
        }
        // The answer is locked in until the advance happens.
        if self.current.feedback == Verdict::Correct {
            return self.ignored();
        }

        self.current.buffer[slot] = text;
        if self.current.feedback == Verdict::Wrong {
            self.current.feedback = Verdict::Idle;
            self.pending_clear = None;
        }

        let mut resp = self.consumed();
        resp.side_effects.input_state_changed = true;

        // Complete and correct answers are accepted without an explicit submit;
        // incomplete or wrong ones wait for Submit.
        if self.current.is_filled()
            && check(&self.current.target, self.current.buffer.as_slice()) == Verdict::Correct
        {
            self.mark_correct(&mut resp);
        }
        resp
    }

    fn handle_submit(&mut self) -> PracticeResponse {
        if self.current.feedback == Verdict::Correct {
            debug!("submit ignored, already correct");
            return self.ignored();
        }

        self.stats.checks += 1;
        let report = check_slots(&self.current.target, self.current.buffer.as_slice());
        let mut resp = self.consumed();
        match report.verdict {
            Verdict::Correct => self.mark_correct(&mut resp),
            _ => self.mark_wrong(&mut resp),
        }
        resp.slots = Some(report.slots);
        resp
    }

    fn handle_next(&mut self, now: Instant) -> PracticeResponse {
        if !self.can_next() {
            return self.ignored();
        }
        if self.in_cooldown(now) {
            debug!("next ignored, inside advance cooldown");
            return self.ignored();
        }
        self.advance(now)
    }

    fn handle_advance_due(&mut self, generation: u64, now: Instant) -> PracticeResponse {
        if self.pending_advance != Some(generation) {
            debug!(generation, "stale advance timer");
            return self.ignored();
        }
        if self.in_cooldown(now) {
            // Too close to the previous advance: re-arm rather than drop, so the
            // correct answer still moves on once the window has passed.
            debug!("advance deferred, inside cooldown");
            let mut resp = self.ignored();
            let mut timer = self.arm_advance();
            if let Some(at) = self.last_advance {
                timer.after = self
                    .config
                    .advance_cooldown
                    .saturating_sub(now.saturating_duration_since(at));
            }
            resp.timer = Some(timer);
            return resp;
        }
        self.pending_advance = None;
        self.advance(now)
    }

    fn handle_reveal(&mut self) -> PracticeResponse {
        let answer = self.answer_display();
        let history = &mut self.history[self.index];
        if !history.revealed {
            history.revealed = true;
            if !history.solved {
                self.stats.revealed += 1;
            }
        }
        let mut resp = self.consumed();
        resp.revealed = Some(answer);
        resp
    }
}
