/*!
 * # SUBDRILL - dictation practice with subtitle files
 *
 * A Rust library for turning subtitle files into a listening drill.
 *
 * ## Features
 *
 * - Parse SRT subtitle files into ordered, cleaned sentences
 * - Strip markup, sound cues and speaker notes from subtitle text
 * - Speak sentences through an external text-to-speech program
 * - Check typed or dictated answers
 * - Configurable speech language and rate
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: SRT parsing and subtitle collections
 * - `session`: Practice state machine:
 *   - `session::manager`: Navigation and answer checking
 *   - `session::models`: States, results and progress
 * - `speech`: Text-to-speech and speech-to-text backends:
 *   - `speech::command`: External program backends
 *   - `speech::mock`: Recording backends for tests
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller and drill loop
 * - `file_utils`: File system operations
 * - `language_utils`: Language tag utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod session;
pub mod speech;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, DrillCommand};
pub use errors::{AppError, SessionError, SpeechError};
pub use language_utils::{get_language_name, language_codes_match, normalize_language_tag};
pub use session::{AnswerResult, PracticeSession, PracticeState, Progress};
pub use subtitle_processor::{Cue, SubtitleCollection, parse_srt_string};
