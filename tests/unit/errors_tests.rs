/*!
 * Tests for error types and conversions
 */

use subdrill::errors::{AppError, SessionError, SpeechError};

#[test]
fn test_sessionError_noSubtitles_shouldMatchUserMessage() {
    assert_eq!(SessionError::NoSubtitles.to_string(), "No valid subtitles found in the file");
}

#[test]
fn test_sessionError_indexOutOfRange_shouldShowIndexAndTotal() {
    let display = SessionError::IndexOutOfRange { index: 7, total: 3 }.to_string();
    assert!(display.contains('7'));
    assert!(display.contains('3'));
}

#[test]
fn test_speechError_timeout_shouldShowSeconds() {
    let display = SpeechError::Timeout(30).to_string();
    assert!(display.contains("timed out"));
    assert!(display.contains("30"));
}

#[test]
fn test_speechError_fromIoError_shouldBecomeIo() {
    let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let error: SpeechError = io_error.into();
    assert!(matches!(error, SpeechError::Io(ref msg) if msg.contains("pipe closed")));
}

#[test]
fn test_appError_fromSessionError_shouldWrap() {
    let error: AppError = SessionError::AlreadyAnswered.into();
    assert!(matches!(error, AppError::Session(SessionError::AlreadyAnswered)));
    assert!(error.to_string().contains("Answer already checked"));
}

#[test]
fn test_appError_fromSpeechError_shouldWrap() {
    let error: AppError = SpeechError::NoSpeech.into();
    assert!(matches!(error, AppError::Speech(SpeechError::NoSpeech)));
    assert!(error.to_string().starts_with("Speech error"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.srt");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(ref msg) if msg.contains("missing.srt")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref msg) if msg == "something odd"));
}

#[test]
fn test_errors_withQuestionMark_shouldConvertThroughLayers() {
    fn inner() -> Result<(), SessionError> {
        Err(SessionError::NoCueLoaded)
    }

    fn outer() -> Result<(), AppError> {
        inner()?;
        Ok(())
    }

    fn top() -> anyhow::Result<()> {
        outer()?;
        Ok(())
    }

    let error = top().unwrap_err();
    assert!(error.to_string().contains("No subtitles loaded"));
}
