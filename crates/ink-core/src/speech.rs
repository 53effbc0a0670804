//! Text-to-speech seam. Synthesis belongs to the host platform; the engine
//! only says what to speak, in which language, at which rate.

use std::sync::Mutex;

pub trait Speaker: Send + Sync {
    /// Fire-and-forget.
    fn speak(&self, text: &str, language_tag: &str, rate: f32);
}

/// Speaker for hosts without speech output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&self, _text: &str, _language_tag: &str, _rate: f32) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language_tag: String,
    pub rate: f32,
}

/// Keeps every request in memory.
#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<Utterance>>,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded utterances.
    pub fn take(&self) -> Vec<Utterance> {
        match self.spoken.lock() {
            Ok(mut spoken) => std::mem::take(&mut *spoken),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str, language_tag: &str, rate: f32) {
        let utterance = Utterance {
            text: text.to_string(),
            language_tag: language_tag.to_string(),
            rate,
        };
        match self.spoken.lock() {
            Ok(mut spoken) => spoken.push(utterance),
            Err(poisoned) => poisoned.into_inner().push(utterance),
        }
    }
}
