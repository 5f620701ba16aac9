//! Application configuration module
//!
//! Loads, validates and saves the drill settings: speech language, speech
//! rate and the external speech programs.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use log::warn;

/// Speech rates offered by the drill, slowest first
pub const SPEECH_RATES: [f32; 6] = [0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language tag handed to the speech backends (e.g. "en-US")
    #[serde(default = "default_language")]
    pub language: String,

    /// Text-to-speech settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Speech-to-text settings
    #[serde(default)]
    pub recognition: RecognitionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text-to-speech program configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    // @field: Playback rate multiplier
    #[serde(default = "default_rate")]
    pub rate: f32,

    // @field: Program to run
    #[serde(default = "default_speech_command")]
    pub command: String,

    // @field: Argument templates; {text} {language} {voice} {rate} {wpm}
    #[serde(default = "default_speech_args")]
    pub args: Vec<String>,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            command: default_speech_command(),
            args: default_speech_args(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Speech-to-text program configuration
///
/// Without a command, voice input is reported as unavailable.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecognitionConfig {
    // @field: Program printing a transcript on stdout
    #[serde(default)]
    pub command: Option<String>,

    // @field: Argument templates; {language} {voice}
    #[serde(default = "default_recognition_args")]
    pub args: Vec<String>,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: default_recognition_args(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_rate() -> f32 {
    1.0
}

fn default_speech_command() -> String {
    "espeak-ng".to_string()
}

fn default_speech_args() -> Vec<String> {
    ["-v", "{voice}", "-s", "{wpm}", "{text}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_recognition_args() -> Vec<String> {
    vec!["{language}".to_string()]
}

fn default_timeout_secs() -> u64 {
    30
}

/// Check a speech rate against the supported range
pub fn validate_rate(rate: f32) -> Result<()> {
    let min = SPEECH_RATES[0];
    let max = SPEECH_RATES[SPEECH_RATES.len() - 1];
    if !(min..=max).contains(&rate) {
        return Err(anyhow!("Speech rate {} must be between {} and {}", rate, min, max));
    }
    Ok(())
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::normalize_language_tag(&self.language)?;
        validate_rate(self.speech.rate)?;

        if self.speech.command.trim().is_empty() {
            return Err(anyhow!("Speech command must not be empty"));
        }

        if self.speech.timeout_secs == 0 || self.recognition.timeout_secs == 0 {
            return Err(anyhow!("Speech timeouts must be at least one second"));
        }

        Ok(())
    }

    /// Load configuration from a JSON file, writing the defaults there first
    /// if the file does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            speech: SpeechConfig::default(),
            recognition: RecognitionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
