/*!
 * Mock speech backends for testing.
 *
 * - `MockSpeaker` records every sentence it is asked to speak
 * - `MockRecognizer` hands out scripted transcripts in order
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::errors::SpeechError;
use crate::speech::{Recognizer, Speaker};

/// One recorded `speak` call
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenLine {
    pub text: String,
    pub language: String,
    pub rate: f32,
}

/// Speaker that records calls instead of producing audio
#[derive(Debug, Clone, Default)]
pub struct MockSpeaker {
    spoken: Arc<Mutex<Vec<SpokenLine>>>,
    failing: bool,
}

impl MockSpeaker {
    /// Create a speaker that always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a speaker whose every call fails
    pub fn failing() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
            failing: true,
        }
    }

    /// Everything spoken so far; clones share the same log
    pub fn spoken(&self) -> Vec<SpokenLine> {
        self.spoken.lock().clone()
    }
}

#[async_trait]
impl Speaker for MockSpeaker {
    async fn speak(&self, text: &str, language: &str, rate: f32) -> Result<(), SpeechError> {
        if self.failing {
            return Err(SpeechError::CommandFailed("mock speaker failure".to_string()));
        }

        self.spoken.lock().push(SpokenLine {
            text: text.to_string(),
            language: language.to_string(),
            rate,
        });
        Ok(())
    }
}

/// Recognizer returning scripted transcripts, then `NoSpeech`
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    transcripts: Arc<Mutex<VecDeque<String>>>,
    languages: Arc<Mutex<Vec<String>>>,
    available: bool,
}

impl MockRecognizer {
    /// Create a recognizer that returns `transcripts` one per call
    pub fn with_transcripts<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcripts: Arc::new(Mutex::new(transcripts.into_iter().map(Into::into).collect())),
            languages: Arc::new(Mutex::new(Vec::new())),
            available: true,
        }
    }

    /// Create a recognizer that reports the capability as missing
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::with_transcripts(Vec::<String>::new())
        }
    }

    /// Languages requested so far
    pub fn requested_languages(&self) -> Vec<String> {
        self.languages.lock().clone()
    }
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::with_transcripts(Vec::<String>::new())
    }
}

#[async_trait]
impl Recognizer for MockRecognizer {
    async fn recognize(&self, language: &str) -> Result<String, SpeechError> {
        if !self.available {
            return Err(SpeechError::Unavailable("mock recognizer unavailable".to_string()));
        }

        self.languages.lock().push(language.to_string());
        self.transcripts.lock().pop_front().ok_or(SpeechError::NoSpeech)
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
