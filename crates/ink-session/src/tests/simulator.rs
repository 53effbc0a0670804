use std::time::{Duration, Instant};

use ink_core::{Direction, PracticeMode, Verdict};

use super::*;
use crate::{PracticeEvent, PracticeResponse, TimerRequest};

/// Headless host for integration tests.
///
/// Owns a virtual clock and the timers the session asked for, and delivers
/// the matching `*Due` events the way a UI event loop would.
pub(super) struct HeadlessPractice {
    pub session: PracticeSession,
    clock: Instant,
    timers: Vec<(Instant, TimerRequest)>,
    /// Every response seen, in order.
    pub log: Vec<PracticeResponse>,
}

impl HeadlessPractice {
    pub fn new(session: PracticeSession) -> Self {
        Self {
            session,
            clock: Instant::now(),
            timers: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn send(&mut self, event: PracticeEvent) -> PracticeResponse {
        let resp = self.session.handle(event, self.clock);
        if let Some(timer) = resp.timer {
            self.timers.push((self.clock + timer.after, timer));
        }
        self.log.push(resp.clone());
        resp
    }

    pub fn wait(&mut self, duration: Duration) {
        let until = self.clock + duration;
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, (at, _))| *at <= until)
                .min_by_key(|(_, (at, _))| *at)
                .map(|(i, _)| i);
            let Some(i) = next else { break };
            let (at, timer) = self.timers.remove(i);
            self.clock = self.clock.max(at);
            self.send(timer.due_event());
        }
        self.clock = until;
    }

    /// Fill every slot and let pending timers fire.
    pub fn answer(&mut self, tokens: &[&str]) {
        for (slot, text) in tokens.iter().enumerate() {
            self.send(PracticeEvent::input(slot, text));
        }
        self.wait(ms(2000));
    }

    pub fn advances(&self) -> usize {
        self.log.iter().filter(|r| r.advanced).count()
    }

    pub fn confetti(&self) -> usize {
        self.log
            .iter()
            .filter(|r| r.side_effects.correct_input)
            .count()
    }
}

fn chinese_sentences() -> Vec<ink_core::PracticeItem> {
    vec![
        sentence("s1", "你好", "Hello"),
        sentence("s2", "你好吗", "How are you?"),
        sentence("s3", "绿茶", "Green tea"),
    ]
}

#[test]
fn full_run_through_chinese_sentences() {
    let (session, _) =
        make_session_with(chinese_sentences(), PracticeMode::Spelling, Direction::LearnChinese);
    let mut host = HeadlessPractice::new(session);

    host.answer(&["nǐ", "hǎo"]);
    assert_eq!(host.session.index(), 1);
    host.answer(&["ni", "hao", "ma"]);
    assert_eq!(host.session.index(), 2);
    host.answer(&["lü", "chá"]);

    assert!(host.session.is_complete());
    assert_eq!(host.advances(), 2);
    assert_eq!(host.confetti(), 3);
    assert_eq!(
        host.log
            .iter()
            .filter(|r| r.side_effects.session_complete)
            .count(),
        1
    );
    let stats = host.session.stats();
    assert_eq!(stats.correct, 3);
    assert_eq!(stats.first_try, 3);
}

#[test]
fn english_sentence_with_punctuation() {
    let items = vec![
        sentence("s1", "你好吗", "How are you?"),
        sentence("s2", "谢谢", "Thank you, doctor."),
    ];
    let session = make_session(items, Direction::LearnEnglish);
    let mut host = HeadlessPractice::new(session);

    host.answer(&["how", "ARE", "you?"]);
    assert_eq!(host.session.index(), 1);
    host.answer(&["Thank", "you", "doctor"]);
    assert!(host.session.is_complete());
}

#[test]
fn wrong_then_correct_advances_once() {
    let session = make_session(english_words(), Direction::LearnEnglish);
    let mut host = HeadlessPractice::new(session);

    host.send(PracticeEvent::input(0, "kat"));
    let wrong = host.send(PracticeEvent::Submit);
    assert_eq!(wrong.verdict, Verdict::Wrong);
    host.wait(ms(200));
    host.send(PracticeEvent::input(0, "cat"));
    host.send(PracticeEvent::Submit);
    host.send(PracticeEvent::Submit);
    host.wait(ms(3000));

    assert_eq!(host.session.index(), 1);
    assert_eq!(host.advances(), 1);
    assert_eq!(host.session.feedback(), Verdict::Idle);
}

#[test]
fn mashing_next_during_advance_skips_at_most_one() {
    let session = make_session(english_words(), Direction::LearnEnglish);
    let mut host = HeadlessPractice::new(session);

    host.send(PracticeEvent::input(0, "cat"));
    host.wait(ms(999));
    for _ in 0..5 {
        host.send(PracticeEvent::Next);
    }
    host.wait(ms(2000));

    assert_eq!(host.session.index(), 1);
    assert_eq!(host.advances(), 1);
}

#[test]
fn dictation_run_speaks_every_item() {
    let (session, speaker) =
        make_session_with(english_words(), PracticeMode::Dictation, Direction::LearnEnglish);
    let mut host = HeadlessPractice::new(session);

    host.answer(&["cat"]);
    host.answer(&["serendipity"]);
    host.answer(&["TEA"]);

    assert!(host.session.is_complete());
    let texts: Vec<String> = speaker.take().into_iter().map(|u| u.text).collect();
    assert_eq!(texts, ["cat", "Serendipity", "tea"]);
}
