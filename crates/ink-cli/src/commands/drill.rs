//! Interactive practice over stdin.
//!
//! Timers the session requests are fulfilled at once on a virtual clock, so a
//! correct answer moves straight on to the next prompt. Each typed line moves
//! the clock one advance cooldown forward, so deliberate navigation is never
//! mistaken for a repeated trigger.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use ink_core::content::{filter_by_category, load_items, ContentError};
use ink_core::settings::settings;
use ink_core::{Direction, PinyinTable, PracticeMode, Speaker, Verdict};
use ink_session::{
    PracticeEvent, PracticeResponse, PracticeSession, SessionConfig, SessionError, SessionStats,
};

use super::practice_ops::split_answer;

#[derive(Debug, thiserror::Error)]
pub enum DrillError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("no items in category {0:?}")]
    EmptyCategory(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Prints what a speech engine would say.
struct ConsoleSpeaker;

impl Speaker for ConsoleSpeaker {
    fn speak(&self, text: &str, language_tag: &str, rate: f32) {
        eprintln!("[say {language_tag} x{rate}] {text}");
    }
}

pub fn drill(
    file: &Path,
    direction: Direction,
    mode: PracticeMode,
    category: Option<&str>,
) -> Result<SessionStats, DrillError> {
    let mut items = load_items(file)?;
    if let Some(category) = category {
        items = filter_by_category(items, category);
        if items.is_empty() {
            return Err(DrillError::EmptyCategory(category.to_string()));
        }
    }
    let config = SessionConfig::from_settings(settings(), mode, direction);
    let mut session = PracticeSession::new(
        items,
        Arc::new(PinyinTable::global()),
        Arc::new(ConsoleSpeaker),
        config,
    )?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_drill(&mut session, stdin.lock(), &mut out)
}

/// Drive `session` from `input` line by line until it completes, the input
/// ends or the learner quits.
pub fn run_drill<R: BufRead, W: Write>(
    session: &mut PracticeSession,
    input: R,
    out: &mut W,
) -> Result<SessionStats, DrillError> {
    let line_gap = session.config().advance_cooldown;
    let mut driver = Driver {
        session,
        clock: Instant::now(),
        line_gap,
        out,
    };
    driver.show_prompt()?;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        driver.clock += driver.line_gap;
        match line {
            ":q" | ":quit" => break,
            ":n" | ":next" => driver.navigate(PracticeEvent::Next)?,
            ":p" | ":prev" => driver.navigate(PracticeEvent::Previous)?,
            ":s" | ":speak" => {
                driver.send(PracticeEvent::Speak);
            }
            ":r" | ":reveal" => {
                let resp = driver.send(PracticeEvent::Reveal);
                if let Some(answer) = resp.revealed {
                    writeln!(driver.out, "  answer: {answer}")?;
                }
            }
            ":h" | ":help" => {
                writeln!(
                    driver.out,
                    "  :next  :prev  :speak  :reveal  :quit, anything else is an answer"
                )?;
            }
            answer => driver.answer(answer)?,
        }
        if driver.session.is_complete() {
            break;
        }
    }

    let stats = driver.session.stats();
    writeln!(
        driver.out,
        "done: {} of {} correct ({} first try), {} wrong checks, {} revealed",
        stats.correct,
        driver.session.len(),
        stats.first_try,
        stats.wrong,
        stats.revealed
    )?;
    Ok(stats)
}

struct Driver<'a, W: Write> {
    session: &'a mut PracticeSession,
    clock: Instant,
    line_gap: Duration,
    out: &'a mut W,
}

impl<W: Write> Driver<'_, W> {
    fn send(&mut self, event: PracticeEvent) -> PracticeResponse {
        self.session.handle(event, self.clock)
    }

    /// Fire every timer the response asked for, including re-armed ones.
    /// Returns true when the index moved forward.
    fn settle(&mut self, resp: &PracticeResponse) -> bool {
        let mut advanced = resp.advanced;
        let mut timer = resp.timer;
        while let Some(t) = timer {
            self.clock += t.after;
            debug!(kind = ?t.kind, generation = t.generation, "firing timer");
            let due = self.send(t.due_event());
            advanced |= due.advanced;
            timer = due.timer;
        }
        advanced
    }

    fn navigate(&mut self, event: PracticeEvent) -> Result<(), DrillError> {
        let resp = self.send(event);
        if !resp.consumed {
            writeln!(self.out, "  (not available)")?;
            return Ok(());
        }
        self.settle(&resp);
        self.show_prompt()
    }

    fn answer(&mut self, line: &str) -> Result<(), DrillError> {
        let slots = split_answer(line, self.session.buffer().len());
        let mut last = None;
        for (slot, text) in slots.into_iter().enumerate() {
            last = Some(self.send(PracticeEvent::Input { slot, text }));
        }
        let resp = match last {
            Some(resp) if resp.verdict == Verdict::Correct => resp,
            _ => self.send(PracticeEvent::Submit),
        };

        match resp.verdict {
            Verdict::Correct => writeln!(self.out, "  \u{2713} correct")?,
            _ => {
                let marks: Vec<&str> = resp
                    .slots
                    .iter()
                    .flatten()
                    .map(|ok| if *ok { "\u{2713}" } else { "\u{2717}" })
                    .collect();
                writeln!(self.out, "  \u{2717} wrong [{}]", marks.join(" "))?;
            }
        }
        if self.settle(&resp) {
            self.show_prompt()?;
        }
        Ok(())
    }

    fn show_prompt(&mut self) -> Result<(), DrillError> {
        let prompt = self.session.prompt();
        writeln!(
            self.out,
            "[{}/{}] {}",
            self.session.index() + 1,
            self.session.len(),
            prompt.cue
        )?;
        if let Some(target) = &prompt.target {
            writeln!(self.out, "  {target}")?;
        }
        if let Some(reading) = &prompt.reading {
            writeln!(self.out, "  {reading}")?;
        }
        if prompt.slot_count > 1 {
            writeln!(self.out, "  ({} slots)", prompt.slot_count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ink_core::{NullSpeaker, PracticeItem, SentenceItem, WordItem};

    use super::*;

    fn word(word: &str, meaning: &str) -> PracticeItem {
        PracticeItem::Word(WordItem {
            id: word.to_string(),
            word: word.to_string(),
            meaning: meaning.to_string(),
            pronunciation: String::new(),
            example: String::new(),
            example_translation: String::new(),
            category: String::new(),
        })
    }

    fn session(items: Vec<PracticeItem>, direction: Direction) -> PracticeSession {
        let config = SessionConfig::from_settings(settings(), PracticeMode::Spelling, direction);
        PracticeSession::new(
            items,
            Arc::new(PinyinTable::global()),
            Arc::new(NullSpeaker),
            config,
        )
        .unwrap()
    }

    fn run(session: &mut PracticeSession, input: &str) -> (SessionStats, String) {
        let mut out = Vec::new();
        let stats = run_drill(session, Cursor::new(input.to_string()), &mut out).unwrap();
        (stats, String::from_utf8(out).unwrap())
    }

    #[test]
    fn correct_answers_walk_through_items() {
        let mut s = session(vec![word("cat", "猫"), word("tea", "茶")], Direction::LearnEnglish);
        let (stats, out) = run(&mut s, "cat\nTea\n");
        assert_eq!(stats.correct, 2);
        assert!(s.is_complete());
        assert!(out.contains("[1/2] 猫"));
        assert!(out.contains("[2/2] 茶"));
        assert!(out.contains("done: 2 of 2 correct"));
    }

    #[test]
    fn wrong_answer_stays_on_item() {
        let mut s = session(vec![word("cat", "猫"), word("tea", "茶")], Direction::LearnEnglish);
        let (stats, out) = run(&mut s, "dog\n:q\n");
        assert_eq!(stats.wrong, 1);
        assert_eq!(s.index(), 0);
        assert_eq!(s.feedback(), Verdict::Idle);
        assert!(out.contains("\u{2717} wrong [\u{2717}]"));
    }

    #[test]
    fn pinyin_answer_may_omit_spaces() {
        let items = vec![PracticeItem::Sentence(SentenceItem {
            id: "s1".into(),
            zh: "你好".into(),
            en: "Hello".into(),
            pinyin: String::new(),
        })];
        let mut s = session(items, Direction::LearnChinese);
        let (stats, out) = run(&mut s, "nihao\n");
        assert_eq!(stats.correct, 1);
        assert!(out.contains("nǐ hǎo"));
        assert!(out.contains("(2 slots)"));
    }

    #[test]
    fn consecutive_next_commands_each_move() {
        let items = vec![word("a", "一"), word("b", "二"), word("c", "三")];
        let mut s = session(items, Direction::LearnEnglish);
        let (_, out) = run(&mut s, ":next\n:next\n");
        assert_eq!(s.index(), 2);
        assert!(!out.contains("(not available)"));
        assert!(out.contains("[3/3] 三"));
    }

    #[test]
    fn next_right_after_auto_advance_moves() {
        let items = vec![word("a", "一"), word("b", "二"), word("c", "三")];
        let mut s = session(items, Direction::LearnEnglish);
        let (stats, out) = run(&mut s, "a\n:next\n");
        assert_eq!(stats.correct, 1);
        assert_eq!(s.index(), 2);
        assert!(!out.contains("(not available)"));
    }

    #[test]
    fn commands_navigate_and_reveal() {
        let mut s = session(vec![word("cat", "猫"), word("tea", "茶")], Direction::LearnEnglish);
        let (stats, out) = run(&mut s, ":next\n:reveal\n:prev\n:prev\n");
        assert_eq!(stats.revealed, 1);
        assert_eq!(s.index(), 0);
        assert!(out.contains("answer: tea"));
        assert!(out.contains("(not available)"));
    }
}
