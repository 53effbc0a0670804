use std::fs;
use std::process;

use ink_core::pinyin::{self, PinyinTable};
use ink_core::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: practice.advance_delay_ms={}, practice.advance_cooldown_ms={}, practice.wrong_feedback_ms={}, speech.rate={}",
        s.practice.advance_delay_ms,
        s.practice.advance_cooldown_ms,
        s.practice.wrong_feedback_ms,
        s.speech.rate
    );
}

pub fn pinyin_export() {
    print!("{}", pinyin::default_toml());
}

pub fn pinyin_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let overrides = die!(pinyin::parse_pinyin_toml(&content), "Error: {}");
    println!(
        "OK: {} character overrides, {} phrases",
        overrides.syllables.len(),
        overrides.phrases.len()
    );
}

/// Install user-supplied settings and pinyin table before anything reads the
/// globals.
pub fn install_overrides(settings_file: Option<&str>, pinyin_file: Option<&str>) {
    if let Some(file) = settings_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error in {file}: {}");
    }
    if let Some(file) = pinyin_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(PinyinTable::init_custom(content), "Error in {file}: {}");
    }
}
