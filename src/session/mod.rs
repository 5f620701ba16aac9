/*!
 * Practice session state for the dictation drill.
 *
 * This module provides:
 * - The session state machine (Empty, Ready, Answered)
 * - Navigation between sentences
 * - Answer checking and progress reporting
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::PracticeSession;
pub use models::{answers_match, AnswerResult, PracticeState, Progress};
