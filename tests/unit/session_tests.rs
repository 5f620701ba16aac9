/*!
 * Tests for the practice session state machine
 */

use subdrill::errors::SessionError;
use subdrill::session::{PracticeSession, PracticeState, Progress};
use subdrill::subtitle_processor::parse_srt_string;
use crate::common;

fn loaded_session() -> PracticeSession {
    let mut session = PracticeSession::new();
    session.load(parse_srt_string(common::THREE_CUES_SRT)).unwrap();
    session
}

/// Test that a new session starts empty
#[test]
fn test_new_session_shouldBeEmpty() {
    let session = PracticeSession::default();

    assert_eq!(session.state(), PracticeState::Empty);
    assert!(session.current_cue().is_none());
    assert!(session.progress().is_none());
    assert!(session.is_empty());
    assert_eq!(session.state().status_display(), "No subtitles loaded");
}

/// Test loading cues selects the first one
#[test]
fn test_load_withCues_shouldSelectFirstSentence() {
    let session = loaded_session();

    assert_eq!(session.state(), PracticeState::Ready);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.len(), 3);
    assert_eq!(session.current_cue().unwrap().text(), "This is a test subtitle.");
    assert_eq!(session.progress(), Some(Progress { position: 1, total: 3 }));
    assert_eq!(session.input(), "");
}

/// Test that loading nothing is rejected and keeps the previous session
#[test]
fn test_load_withNoCues_shouldFailAndKeepSession() {
    let mut session = loaded_session();
    session.next().unwrap();
    session.set_input("typed").unwrap();

    let result = session.load(Vec::new());

    assert_eq!(result, Err(SessionError::NoSubtitles));
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.input(), "typed");
    assert_eq!(session.len(), 3);
}

/// Test that loading nothing into an empty session leaves it empty
#[test]
fn test_load_withNoCuesOnEmptySession_shouldStayEmpty() {
    let mut session = PracticeSession::new();

    assert_eq!(session.load(parse_srt_string("garbage")), Err(SessionError::NoSubtitles));
    assert_eq!(session.state(), PracticeState::Empty);
}

/// Test forward and backward navigation within bounds
#[test]
fn test_next_and_back_withinBounds_shouldMove() {
    let mut session = loaded_session();

    assert_eq!(session.next(), Ok(true));
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.next(), Ok(true));
    assert_eq!(session.current_index(), 2);
    assert_eq!(session.back(), Ok(true));
    assert_eq!(session.current_index(), 1);
}

/// Test that navigation stops at both ends
#[test]
fn test_next_and_back_atBoundaries_shouldNotMove() {
    let mut session = loaded_session();

    assert_eq!(session.back(), Ok(false));
    assert_eq!(session.current_index(), 0);

    session.jump_to(2).unwrap();
    session.set_input("kept").unwrap();
    assert_eq!(session.next(), Ok(false));
    assert_eq!(session.current_index(), 2);
    assert_eq!(session.input(), "kept");
}

/// Test that moving clears input and the last result
#[test]
fn test_navigation_afterAnswer_shouldClearInputAndResult() {
    let mut session = loaded_session();
    session.set_input("this is a test subtitle.").unwrap();
    session.submit().unwrap();
    assert_eq!(session.state(), PracticeState::Answered);

    session.next().unwrap();

    assert_eq!(session.state(), PracticeState::Ready);
    assert_eq!(session.input(), "");
    assert!(session.last_result().is_none());
}

/// Test jumping to a valid and an invalid index
#[test]
fn test_jump_to_withIndex_shouldValidateRange() {
    let mut session = loaded_session();

    assert_eq!(session.jump_to(2), Ok(()));
    assert_eq!(session.current_cue().unwrap().text(), "For testing purposes.");
    assert_eq!(
        session.jump_to(3),
        Err(SessionError::IndexOutOfRange { index: 3, total: 3 })
    );
    assert_eq!(session.current_index(), 2);
}

/// Test that jumping to the current sentence starts a fresh attempt
#[test]
fn test_jump_to_withCurrentIndex_shouldReset() {
    let mut session = loaded_session();
    session.set_input("wrong").unwrap();
    session.submit().unwrap();

    session.jump_to(0).unwrap();

    assert_eq!(session.state(), PracticeState::Ready);
    assert_eq!(session.input(), "");
}

/// Test checking a correct answer
#[test]
fn test_submit_withMatchingInput_shouldBeCorrect() {
    let mut session = loaded_session();
    session.set_input("  THIS IS A TEST SUBTITLE.  ").unwrap();

    let result = session.submit().unwrap();

    assert!(result.correct);
    assert_eq!(result.expected, "This is a test subtitle.");
    assert_eq!(result.given, "  THIS IS A TEST SUBTITLE.  ");
    assert_eq!(session.last_result(), Some(&result));
}

/// Test checking a wrong answer
#[test]
fn test_submit_withWrongInput_shouldBeIncorrect() {
    let mut session = loaded_session();
    session.set_input("This is a test").unwrap();

    let result = session.submit().unwrap();

    assert!(!result.correct);
    assert_eq!(session.state(), PracticeState::Answered);
}

/// Test that an empty answer is checked like any other
#[test]
fn test_submit_withEmptyInput_shouldBeIncorrect() {
    let mut session = loaded_session();
    assert!(!session.submit().unwrap().correct);
}

/// Test that a sentence can only be checked once
#[test]
fn test_submit_twice_shouldReportAlreadyAnswered() {
    let mut session = loaded_session();
    session.submit().unwrap();

    session.set_input("second try").unwrap();

    assert_eq!(session.submit(), Err(SessionError::AlreadyAnswered));
    assert_eq!(session.input(), "second try");
    assert!(session.last_result().is_some());
}

/// Test that transitions on an empty session fail
#[test]
fn test_transitions_onEmptySession_shouldReportNoCue() {
    let mut session = PracticeSession::new();

    assert_eq!(session.next(), Err(SessionError::NoCueLoaded));
    assert_eq!(session.back(), Err(SessionError::NoCueLoaded));
    assert_eq!(session.jump_to(0), Err(SessionError::NoCueLoaded));
    assert_eq!(session.set_input("x"), Err(SessionError::NoCueLoaded));
    assert_eq!(session.submit(), Err(SessionError::NoCueLoaded));
}

/// Test reset drops everything
#[test]
fn test_reset_afterLoad_shouldReturnToEmpty() {
    let mut session = loaded_session();
    session.next().unwrap();

    session.reset();

    assert_eq!(session.state(), PracticeState::Empty);
    assert!(session.cues().is_empty());
    assert!(session.progress().is_none());
}

/// Test loading a second file replaces the first
#[test]
fn test_load_twice_shouldReplaceCues() {
    let mut session = loaded_session();
    session.jump_to(2).unwrap();

    session.load(parse_srt_string(common::TWO_CUES_SRT)).unwrap();

    assert_eq!(session.len(), 2);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.current_cue().unwrap().text(), "Hello there.");
}

/// Test progress reporting through a file
#[test]
fn test_progress_atLastSentence_shouldReportLast() {
    let mut session = loaded_session();
    session.jump_to(2).unwrap();

    let progress = session.progress().unwrap();

    assert!(progress.is_last());
    assert!(!progress.is_first());
    assert_eq!(progress.to_string(), "Sentence 3 of 3");
    assert_eq!(progress.completion_percentage(), 100.0);
}
