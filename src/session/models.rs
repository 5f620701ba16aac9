/*!
 * Value types produced by the practice session.
 */

use serde::Serialize;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeState {
    /// No subtitles loaded
    Empty,
    /// A sentence is selected and waiting for an answer
    Ready,
    /// The current sentence has been checked
    Answered,
}

impl PracticeState {
    /// Get a human-readable status string
    pub fn status_display(&self) -> &'static str {
        match self {
            PracticeState::Empty => "No subtitles loaded",
            PracticeState::Ready => "Listening",
            PracticeState::Answered => "Answered",
        }
    }
}

/// Outcome of checking one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    /// Whether the answer matched
    pub correct: bool,
    /// The cue text
    pub expected: String,
    /// What the user typed or dictated
    pub given: String,
}

/// Position of the current sentence, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    /// Percentage of the file reached so far
    pub fn completion_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.position as f64 / self.total as f64) * 100.0
    }

    pub fn is_first(&self) -> bool {
        self.position <= 1
    }

    pub fn is_last(&self) -> bool {
        self.position >= self.total
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sentence {} of {}", self.position, self.total)
    }
}

/// Compare a transcript with the expected text, ignoring case and
/// surrounding whitespace
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}
