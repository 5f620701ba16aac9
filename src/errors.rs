/*!
 * Error types for the subdrill application.
 *
 * The subtitle parser itself never fails; these cover everything around it:
 * speech backends, the practice session and the application shell.
 */

use thiserror::Error;

/// Errors from text-to-speech and speech-to-text backends
#[derive(Error, Debug)]
pub enum SpeechError {
    /// The capability is not available (no backend configured or installed)
    #[error("Speech capability unavailable: {0}")]
    Unavailable(String),

    /// The backend ran but reported failure
    #[error("Speech command failed: {0}")]
    CommandFailed(String),

    /// The backend did not finish in time
    #[error("Speech command timed out after {0} seconds")]
    Timeout(u64),

    /// Recognition finished without producing a transcript
    #[error("No speech was recognized")]
    NoSpeech,

    /// I/O error while talking to the backend
    #[error("Speech I/O error: {0}")]
    Io(String),
}

/// Errors from practice session transitions
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// A load was attempted with nothing to practice
    #[error("No valid subtitles found in the file")]
    NoSubtitles,

    /// A transition that needs a loaded file was attempted on an empty session
    #[error("No subtitles loaded")]
    NoCueLoaded,

    /// Jump target outside the loaded cues
    #[error("Sentence index {index} out of range (0..{total})")]
    IndexOutOfRange {
        /// Requested zero-based index
        index: usize,
        /// Number of loaded cues
        total: usize,
    },

    /// The current sentence was already checked
    #[error("Answer already checked for this sentence")]
    AlreadyAnswered,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a speech backend
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Error from the practice session
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<std::io::Error> for SpeechError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}
