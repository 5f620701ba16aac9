/*!
 * Practice session state machine.
 *
 * The session owns the loaded cues and the user's place in them. Every
 * change goes through one of the transitions below:
 *
 * | from          | transition        | to       |
 * |---------------|-------------------|----------|
 * | any           | `load` (non-empty)| Ready    |
 * | Ready/Answered| `next`/`back`/`jump_to` | Ready |
 * | Ready         | `submit`          | Answered |
 * | any           | `reset`           | Empty    |
 */

use log::{debug, info};

use crate::errors::SessionError;
use crate::session::models::{answers_match, AnswerResult, PracticeState, Progress};
use crate::subtitle_processor::Cue;

/// Drill state for one loaded subtitle file
#[derive(Debug, Clone)]
pub struct PracticeSession {
    cues: Vec<Cue>,
    current: usize,
    input: String,
    state: PracticeState,
    last_result: Option<AnswerResult>,
}

impl Default for PracticeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PracticeSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            cues: Vec::new(),
            current: 0,
            input: String::new(),
            state: PracticeState::Empty,
            last_result: None,
        }
    }

    /// Replace the loaded cues and start at the first one.
    ///
    /// Loading nothing is an error and leaves the current session as it was.
    pub fn load(&mut self, cues: Vec<Cue>) -> Result<(), SessionError> {
        if cues.is_empty() {
            return Err(SessionError::NoSubtitles);
        }

        info!("Loaded {} sentences", cues.len());
        self.cues = cues;
        self.move_to(0);
        Ok(())
    }

    /// Drop the loaded cues
    pub fn reset(&mut self) {
        self.cues.clear();
        self.current = 0;
        self.input.clear();
        self.last_result = None;
        self.state = PracticeState::Empty;
    }

    /// Move to the next sentence; `Ok(false)` when already on the last one
    pub fn next(&mut self) -> Result<bool, SessionError> {
        self.ensure_loaded()?;

        if self.current + 1 >= self.cues.len() {
            return Ok(false);
        }

        self.move_to(self.current + 1);
        Ok(true)
    }

    /// Move to the previous sentence; `Ok(false)` when already on the first one
    pub fn back(&mut self) -> Result<bool, SessionError> {
        self.ensure_loaded()?;

        if self.current == 0 {
            return Ok(false);
        }

        self.move_to(self.current - 1);
        Ok(true)
    }

    /// Jump to a zero-based sentence index
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_loaded()?;

        if index >= self.cues.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                total: self.cues.len(),
            });
        }

        self.move_to(index);
        Ok(())
    }

    /// Record typed or dictated input for the current sentence.
    ///
    /// Allowed after checking too; an already recorded result is kept.
    pub fn set_input(&mut self, input: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_loaded()?;
        self.input = input.into();
        Ok(())
    }

    /// Check the current input against the current sentence
    pub fn submit(&mut self) -> Result<AnswerResult, SessionError> {
        let cue = match self.state {
            PracticeState::Empty => return Err(SessionError::NoCueLoaded),
            PracticeState::Answered => return Err(SessionError::AlreadyAnswered),
            PracticeState::Ready => &self.cues[self.current],
        };

        let result = AnswerResult {
            correct: answers_match(&self.input, cue.text()),
            expected: cue.text().to_string(),
            given: self.input.clone(),
        };

        debug!(
            "Sentence {} checked: {}",
            cue.sequence(),
            if result.correct { "correct" } else { "incorrect" }
        );

        self.state = PracticeState::Answered;
        self.last_result = Some(result.clone());
        Ok(result)
    }

    pub fn state(&self) -> PracticeState {
        self.state
    }

    /// The selected cue, if anything is loaded
    pub fn current_cue(&self) -> Option<&Cue> {
        match self.state {
            PracticeState::Empty => None,
            _ => self.cues.get(self.current),
        }
    }

    /// Zero-based index of the selected cue
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Result of the last check on the current sentence
    pub fn last_result(&self) -> Option<&AnswerResult> {
        self.last_result.as_ref()
    }

    /// Current position, or `None` for an empty session
    pub fn progress(&self) -> Option<Progress> {
        match self.state {
            PracticeState::Empty => None,
            _ => Some(Progress {
                position: self.current + 1,
                total: self.cues.len(),
            }),
        }
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    fn ensure_loaded(&self) -> Result<(), SessionError> {
        if self.state == PracticeState::Empty {
            return Err(SessionError::NoCueLoaded);
        }
        Ok(())
    }

    // Selecting a sentence always starts a fresh attempt
    fn move_to(&mut self, index: usize) {
        self.current = index;
        self.input.clear();
        self.last_result = None;
        self.state = PracticeState::Ready;
    }
}
