/*!
 * Speech backends for the drill.
 *
 * The drill only needs two capabilities:
 * - `Speaker`: read a sentence aloud in a language at a rate
 * - `Recognizer`: turn the user's speech into a transcript
 *
 * Both are traits so the session and its tests never depend on a concrete
 * speech engine. `command` runs external programs; `mock` records calls.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::SpeechError;

/// Text-to-speech backend
#[async_trait]
pub trait Speaker: Send + Sync + Debug {
    /// Speak `text` and return once playback has finished
    ///
    /// # Arguments
    /// * `text` - The sentence to read
    /// * `language` - Language tag such as `en-US`
    /// * `rate` - Rate multiplier, 1.0 being normal speed
    async fn speak(&self, text: &str, language: &str, rate: f32) -> Result<(), SpeechError>;
}

/// Speech-to-text backend
#[async_trait]
pub trait Recognizer: Send + Sync + Debug {
    /// Listen once and return the transcript
    ///
    /// # Returns
    /// * `Err(SpeechError::Unavailable)` when no recognizer can be used
    async fn recognize(&self, language: &str) -> Result<String, SpeechError>;

    /// Whether `recognize` can succeed at all
    fn is_available(&self) -> bool {
        true
    }
}

/// Recognizer used when none is configured
#[derive(Debug, Default)]
pub struct UnavailableRecognizer;

#[async_trait]
impl Recognizer for UnavailableRecognizer {
    async fn recognize(&self, _language: &str) -> Result<String, SpeechError> {
        Err(SpeechError::Unavailable(
            "no speech recognition command configured".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}

pub mod command;
pub mod mock;

pub use command::{CommandRecognizer, CommandSpeaker};
pub use mock::{MockRecognizer, MockSpeaker};
