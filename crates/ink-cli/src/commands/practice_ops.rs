use serde::Serialize;
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use ink_core::unicode::{contains_han, is_han};
use ink_core::{
    check_slots, normalize, normalize_pinyin, Direction, PinyinTable, PracticeItem, SentenceItem,
    Target, Transliterator, Verdict, WordItem,
};

pub fn normalize_text(text: &str, pinyin: bool) {
    if pinyin {
        println!("{}", normalize_pinyin(text));
    } else {
        println!("{}", normalize(text));
    }
}

#[derive(Debug, Serialize)]
struct PinyinReport<'a> {
    text: &'a str,
    syllables: Vec<String>,
    display: String,
}

pub fn pinyin(text: &str, json: bool) {
    let table = PinyinTable::global();
    if json {
        let report = PinyinReport {
            text,
            syllables: table.to_syllables(text),
            display: table.to_display(text),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("JSON serialization failed")
        );
    } else {
        let (reading, chars) = aligned_reading(table, text);
        println!("{reading}");
        println!("{chars}");
        println!("syllables: {}", table.to_syllables(text).join(" "));
    }
}

/// Two lines, reading above text, each Han character under its syllable.
/// Runs of other characters form a single cell with no reading.
pub fn aligned_reading(table: &PinyinTable, text: &str) -> (String, String) {
    let mut cells: Vec<(String, String)> = Vec::new();
    let mut run = String::new();
    for (c, reading) in table.annotate(text) {
        if (is_han(c) || c.is_whitespace()) && !run.is_empty() {
            cells.push((String::new(), std::mem::take(&mut run)));
        }
        if is_han(c) {
            cells.push((reading.unwrap_or("").to_string(), c.to_string()));
        } else if !c.is_whitespace() {
            run.push(c);
        }
    }
    if !run.is_empty() {
        cells.push((String::new(), run));
    }

    let mut top = Vec::with_capacity(cells.len());
    let mut bottom = Vec::with_capacity(cells.len());
    for (reading, chars) in &cells {
        let width = reading.width().max(chars.width());
        top.push(pad(reading, width));
        bottom.push(pad(chars, width));
    }
    (
        top.join(" ").trim_end().to_string(),
        bottom.join(" ").trim_end().to_string(),
    )
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    let mut out = String::with_capacity(s.len() + fill);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(fill));
    out
}

/// Split one typed line across `slot_count` slots. Extra tokens are kept
/// together in the last slot; missing ones are left empty.
pub fn split_answer(line: &str, slot_count: usize) -> Vec<String> {
    let line = line.trim();
    if slot_count <= 1 {
        return vec![line.to_string()];
    }
    let mut tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if tokens.len() > slot_count {
        let tail = tokens.split_off(slot_count - 1).join(" ");
        tokens.push(tail);
    }
    tokens.resize(slot_count, String::new());
    tokens
}

/// Answer key for free-standing target text.
pub fn target_for_text(direction: Direction, text: &str, table: &dyn Transliterator) -> Target {
    let item = match direction {
        Direction::LearnEnglish if text.split_whitespace().nth(1).is_none() => {
            PracticeItem::Word(WordItem {
                id: String::new(),
                word: text.trim().to_string(),
                meaning: String::new(),
                pronunciation: String::new(),
                example: String::new(),
                example_translation: String::new(),
                category: String::new(),
            })
        }
        Direction::LearnEnglish => PracticeItem::Sentence(SentenceItem {
            id: String::new(),
            zh: String::new(),
            en: text.to_string(),
            pinyin: String::new(),
        }),
        Direction::LearnChinese => PracticeItem::Sentence(SentenceItem {
            id: String::new(),
            zh: text.to_string(),
            en: String::new(),
            pinyin: String::new(),
        }),
    };
    Target::for_item(&item, direction, table)
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub verdict: Verdict,
    pub slots: Vec<bool>,
    pub expected: String,
}

pub fn check_answer(
    direction: Direction,
    target: &str,
    inputs: &[String],
    table: &dyn Transliterator,
) -> CheckReport {
    if direction == Direction::LearnChinese && !contains_han(target) {
        warn!(target, "Chinese target has no Han characters");
    }
    let target = target_for_text(direction, target, table);
    let inputs = match inputs {
        [single] => split_answer(single, target.slot_count()),
        many => many.to_vec(),
    };
    let report = check_slots(&target, inputs.as_slice());
    CheckReport {
        verdict: report.verdict,
        slots: report.slots,
        expected: target.answer(),
    }
}

/// Prints the verdict and returns the process exit code: 0 when correct,
/// 2 when wrong.
pub fn check(direction: Direction, target: &str, inputs: &[String], json: bool) -> i32 {
    let report = check_answer(direction, target, inputs, PinyinTable::global());
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("JSON serialization failed")
        );
    } else {
        let marks: Vec<&str> = report
            .slots
            .iter()
            .map(|ok| if *ok { "\u{2713}" } else { "\u{2717}" })
            .collect();
        match report.verdict {
            Verdict::Correct => println!("correct"),
            _ => println!("wrong  [{}]  expected: {}", marks.join(" "), report.expected),
        }
    }
    if report.verdict == Verdict::Correct {
        0
    } else {
        2
    }
}
