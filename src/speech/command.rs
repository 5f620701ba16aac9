/*!
 * Speech backends that shell out to external programs.
 *
 * Arguments are configured as templates. Placeholders are replaced in a
 * single pass, so a sentence containing `{rate}` is passed through as is:
 * - `{text}`: the sentence
 * - `{language}`: the language tag as configured (`en-US`)
 * - `{voice}`: the tag lowercased (`en-us`), as espeak-style engines expect
 * - `{rate}`: the rate multiplier (`0.8`)
 * - `{wpm}`: the rate as words per minute, 175 at normal speed
 */

use async_trait::async_trait;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use crate::app_config::{RecognitionConfig, SpeechConfig};
use crate::errors::SpeechError;
use crate::speech::{Recognizer, Speaker};

// @const: Words per minute at rate 1.0
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(text|language|voice|rate|wpm)\}").unwrap()
});

/// Expand argument templates for one invocation
pub fn expand_args(templates: &[String], text: &str, language: &str, rate: f32) -> Vec<String> {
    let voice = language.to_lowercase();
    let rate_str = rate.to_string();
    let wpm = ((BASE_WORDS_PER_MINUTE * rate).round() as u32).to_string();

    templates
        .iter()
        .map(|template| {
            PLACEHOLDER_REGEX
                .replace_all(template, |caps: &Captures| match &caps[1] {
                    "text" => text.to_string(),
                    "language" => language.to_string(),
                    "voice" => voice.clone(),
                    "rate" => rate_str.clone(),
                    _ => wpm.clone(),
                })
                .into_owned()
        })
        .collect()
}

// @runs: Program with a timeout, capturing output
async fn run_command(program: &str, args: &[String], timeout_secs: u64) -> Result<Output, SpeechError> {
    debug!("Running speech command: {} {:?}", program, args);

    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null()).kill_on_drop(true);
    let output_future = command.output();

    let timeout_duration = Duration::from_secs(timeout_secs);
    let output = tokio::select! {
        result = output_future => {
            result.map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    SpeechError::Unavailable(format!("speech program not found: {}", program))
                }
                _ => SpeechError::Io(format!("failed to run {}: {}", program, e)),
            })?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(SpeechError::Timeout(timeout_secs));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("Speech command {} failed: {}", program, stderr.trim());
        return Err(SpeechError::CommandFailed(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        )));
    }

    Ok(output)
}

/// Text-to-speech through an external program such as `espeak-ng` or `say`
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    timeout_secs: u64,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout_secs: u64) -> Self {
        Self {
            program: program.into(),
            args,
            timeout_secs,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone(), config.timeout_secs)
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str, language: &str, rate: f32) -> Result<(), SpeechError> {
        let args = expand_args(&self.args, text, language, rate);
        run_command(&self.program, &args, self.timeout_secs).await?;
        Ok(())
    }
}

/// Speech-to-text through an external program that prints the transcript
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    timeout_secs: u64,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout_secs: u64) -> Self {
        Self {
            program: program.into(),
            args,
            timeout_secs,
        }
    }

    /// `None` when no recognition command is configured
    pub fn from_config(config: &RecognitionConfig) -> Option<Self> {
        let program = config.command.as_deref()?.trim();
        if program.is_empty() {
            return None;
        }
        Some(Self::new(program, config.args.clone(), config.timeout_secs))
    }
}

#[async_trait]
impl Recognizer for CommandRecognizer {
    async fn recognize(&self, language: &str) -> Result<String, SpeechError> {
        let args = expand_args(&self.args, "", language, 1.0);
        let output = run_command(&self.program, &args, self.timeout_secs).await?;

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            return Err(SpeechError::NoSpeech);
        }

        Ok(transcript)
    }
}
