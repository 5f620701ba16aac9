/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subdrill::app_config::{Config, LogLevel, SPEECH_RATES, validate_rate};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.language, "en-US");
    assert_eq!(config.speech.rate, 1.0);
    assert_eq!(config.speech.command, "espeak-ng");
    assert_eq!(config.speech.args, vec!["-v", "{voice}", "-s", "{wpm}", "{text}"]);
    assert_eq!(config.speech.timeout_secs, 30);
    assert!(config.recognition.command.is_none());
    assert_eq!(config.recognition.args, vec!["{language}"]);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.language = "xx-YY".to_string();
    assert!(config.validate().is_err());
    config.language = "fr-FR".to_string();
    assert!(config.validate().is_ok());

    config.speech.rate = 1.5;
    assert!(config.validate().is_err());
    config.speech.rate = 0.5;
    assert!(config.validate().is_ok());

    config.speech.command = "  ".to_string();
    assert!(config.validate().is_err());
    config.speech.command = "say".to_string();

    config.recognition.timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test the offered speech rates and their validation
#[test]
fn test_validate_rate_withOfferedRates_shouldAcceptAll() {
    for rate in SPEECH_RATES {
        assert!(validate_rate(rate).is_ok(), "{} should be accepted", rate);
    }

    assert!(validate_rate(0.4).is_err());
    assert!(validate_rate(1.01).is_err());
    assert!(validate_rate(f32::NAN).is_err());
}

/// Test that a partial JSON file gets defaults for missing fields
#[test]
fn test_config_deserialization_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{ "language": "de-DE", "speech": { "rate": 0.7 }, "log_level": "debug" }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.language, "de-DE");
    assert_eq!(config.speech.rate, 0.7);
    assert_eq!(config.speech.command, "espeak-ng");
    assert_eq!(config.recognition.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.language, "en-US");

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(written["speech"]["command"], "espeak-ng");
    assert!(written["recognition"]["command"].is_null());
    Ok(())
}

/// Test that saved settings are loaded back
#[test]
fn test_save_then_load_withCustomValues_shouldKeepValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("custom.json");

    let mut config = Config::default();
    config.language = "ja-JP".to_string();
    config.speech.rate = 0.6;
    config.recognition.command = Some("whisper-cli".to_string());
    config.save(&path)?;

    let loaded = Config::load_or_create(&path)?;

    assert_eq!(loaded.language, "ja-JP");
    assert_eq!(loaded.speech.rate, 0.6);
    assert_eq!(loaded.recognition.command.as_deref(), Some("whisper-cli"));
    Ok(())
}

/// Test that a corrupt config file is reported
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let result = Config::load_or_create(&path);

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Failed to parse config file"));
    Ok(())
}
