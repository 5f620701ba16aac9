use anyhow::anyhow;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::app_config::{self, Config};
use crate::errors::{AppError, SessionError, SpeechError};
use crate::language_utils;
use crate::session::{AnswerResult, PracticeSession};
use crate::speech::{CommandRecognizer, CommandSpeaker, Recognizer, Speaker, UnavailableRecognizer};
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for the dictation drill

const HELP_TEXT: &str = "\
Type what you hear and press Enter to check it.
  <Enter> or :p     play the sentence again
  :n / :b           next / previous sentence
  :j N              jump to sentence N
  :v                answer by voice
  :r RATE           speech rate (0.5 - 1.0)
  :l TAG            speech language (e.g. fr-FR)
  :h                show this help
  :q                quit";

/// One line of interactive input
#[derive(Debug, Clone, PartialEq)]
pub enum DrillCommand {
    Play,
    Next,
    Back,
    Jump(NonZeroUsize),
    Voice,
    Rate(f32),
    Language(String),
    Help,
    Quit,
    /// Anything that is not a command is an answer
    Answer(String),
}

impl FromStr for DrillCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Self::Play);
        }

        let Some(command) = trimmed.strip_prefix(':') else {
            return Ok(Self::Answer(trimmed.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.next();

        match (name.as_str(), argument) {
            ("p" | "play", None) => Ok(Self::Play),
            ("n" | "next", None) => Ok(Self::Next),
            ("b" | "back", None) => Ok(Self::Back),
            ("v" | "voice", None) => Ok(Self::Voice),
            ("h" | "help", None) => Ok(Self::Help),
            ("q" | "quit", None) => Ok(Self::Quit),
            ("j" | "jump", Some(arg)) => {
                let position: usize = arg
                    .parse()
                    .map_err(|_| anyhow!("Not a sentence number: {}", arg))?;
                NonZeroUsize::new(position)
                    .map(Self::Jump)
                    .ok_or_else(|| anyhow!("Sentence numbers start at 1"))
            }
            ("r" | "rate", Some(arg)) => {
                let rate: f32 = arg.parse().map_err(|_| anyhow!("Not a speech rate: {}", arg))?;
                Ok(Self::Rate(rate))
            }
            ("l" | "lang" | "language", Some(arg)) => Ok(Self::Language(arg.to_string())),
            _ => Err(anyhow!("Unknown command: {} (type :h for help)", trimmed)),
        }
    }
}

/// Main application controller for the dictation drill
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Drill state
    session: PracticeSession,
    speaker: Box<dyn Speaker>,
    recognizer: Box<dyn Recognizer>,
}

impl Controller {
    /// Create a controller with the speech programs named in the config
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let speaker = Box::new(CommandSpeaker::from_config(&config.speech));
        let recognizer: Box<dyn Recognizer> = match CommandRecognizer::from_config(&config.recognition) {
            Some(recognizer) => Box::new(recognizer),
            None => Box::new(UnavailableRecognizer),
        };

        Self::with_backends(config, speaker, recognizer)
    }

    /// Create a controller with explicit speech backends
    pub fn with_backends(
        config: Config,
        speaker: Box<dyn Speaker>,
        recognizer: Box<dyn Recognizer>,
    ) -> Result<Self, AppError> {
        config.validate().map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            config,
            session: PracticeSession::new(),
            speaker,
            recognizer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &PracticeSession {
        &self.session
    }

    /// Read and parse a subtitle file and start practicing it.
    ///
    /// A file with no usable subtitles is rejected exactly like an
    /// unparseable one, and the previous session is kept.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, AppError> {
        let path = path.as_ref();
        let collection = SubtitleCollection::from_srt_file(path)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        debug!("{}", collection);
        self.load_collection(collection)
    }

    /// Parse in-memory subtitle content and start practicing it
    pub fn load_str(&mut self, content: &str) -> Result<usize, AppError> {
        let collection = SubtitleCollection::from_srt_string("<memory>".into(), content);
        self.load_collection(collection)
    }

    fn load_collection(&mut self, collection: SubtitleCollection) -> Result<usize, AppError> {
        if collection.is_empty() {
            warn!("No valid subtitles found in {:?}", collection.source_file);
        }

        let count = collection.len();
        self.session.load(collection.into_entries())?;
        Ok(count)
    }

    /// Speak the current sentence with the configured language and rate
    pub async fn play_current(&self) -> Result<(), AppError> {
        let cue = self.session.current_cue().ok_or(SessionError::NoCueLoaded)?;
        self.speaker
            .speak(cue.text(), &self.config.language, self.config.speech.rate)
            .await?;
        Ok(())
    }

    /// Listen for an answer and store the transcript as the current input
    pub async fn dictate(&mut self) -> Result<String, AppError> {
        if self.session.current_cue().is_none() {
            return Err(SessionError::NoCueLoaded.into());
        }

        let transcript = self.recognizer.recognize(&self.config.language).await?;
        self.session.set_input(transcript.clone())?;
        Ok(transcript)
    }

    /// Record `text` as the answer and check it
    pub fn answer(&mut self, text: &str) -> Result<AnswerResult, AppError> {
        self.session.set_input(text)?;
        Ok(self.session.submit()?)
    }

    /// Check whatever input is currently recorded
    pub fn check_answer(&mut self) -> Result<AnswerResult, AppError> {
        Ok(self.session.submit()?)
    }

    pub fn next(&mut self) -> Result<bool, AppError> {
        Ok(self.session.next()?)
    }

    pub fn back(&mut self) -> Result<bool, AppError> {
        Ok(self.session.back()?)
    }

    /// Jump to a sentence by its 1-based position
    pub fn jump_to_sentence(&mut self, position: NonZeroUsize) -> Result<(), AppError> {
        Ok(self.session.jump_to(position.get() - 1)?)
    }

    /// Change the speech language; returns the tag in canonical case
    pub fn set_language(&mut self, tag: &str) -> Result<String, AppError> {
        let normalized = language_utils::normalize_language_tag(tag)
            .map_err(|e| AppError::Config(e.to_string()))?;
        if !language_utils::language_codes_match(&self.config.language, &normalized) {
            info!("Speech language changed from {} to {}", self.config.language, normalized);
        } else {
            debug!("Speech language set to {}", normalized);
        }
        self.config.language = normalized.clone();
        Ok(normalized)
    }

    /// Change the speech rate
    pub fn set_rate(&mut self, rate: f32) -> Result<(), AppError> {
        app_config::validate_rate(rate).map_err(|e| AppError::Config(e.to_string()))?;
        self.config.speech.rate = rate;
        Ok(())
    }

    /// Forget the loaded file
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Load a file and run the drill on stdin/stdout
    pub async fn run_interactive<P: AsRef<Path>>(
        &mut self,
        path: P,
        start: Option<NonZeroUsize>,
    ) -> Result<(), AppError> {
        let count = self.load_file(path)?;
        if let Some(position) = start {
            self.jump_to_sentence(position)?;
        }

        let progress_bar = ProgressBar::new(count as u64);
        let template_result = ProgressStyle::default_bar()
            .template("[{bar:30.cyan/blue}] {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("[{bar:30}] {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run_with_io(stdin, &mut stdout, &progress_bar).await
    }

    /// Run the drill loop over any line source and output.
    ///
    /// Returns when the input ends or the user quits. Speech failures are
    /// reported and the drill goes on.
    pub async fn run_with_io<R, W>(
        &mut self,
        reader: R,
        out: &mut W,
        progress_bar: &ProgressBar,
    ) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        if self.session.current_cue().is_none() {
            return Err(SessionError::NoCueLoaded.into());
        }

        writeln!(out, "{}", HELP_TEXT)?;
        if !self.recognizer.is_available() {
            writeln!(out, "Voice answers are off: set a recognition command in the config.")?;
        }
        self.announce(out, progress_bar).await?;

        let mut lines = reader.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match line.parse::<DrillCommand>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };

            match command {
                DrillCommand::Quit => break,
                DrillCommand::Help => writeln!(out, "{}", HELP_TEXT)?,
                DrillCommand::Play => self.play_and_report(out).await?,
                DrillCommand::Next => {
                    if self.next()? {
                        self.announce(out, progress_bar).await?;
                    } else {
                        writeln!(out, "This is the last sentence.")?;
                    }
                }
                DrillCommand::Back => {
                    if self.back()? {
                        self.announce(out, progress_bar).await?;
                    } else {
                        writeln!(out, "This is the first sentence.")?;
                    }
                }
                DrillCommand::Jump(position) => match self.jump_to_sentence(position) {
                    Ok(()) => self.announce(out, progress_bar).await?,
                    Err(_) => writeln!(
                        out,
                        "There is no sentence {} (1 - {}).",
                        position,
                        self.session.len()
                    )?,
                },
                DrillCommand::Rate(rate) => match self.set_rate(rate) {
                    Ok(()) => writeln!(out, "Speech rate: {}x", rate)?,
                    Err(e) => writeln!(out, "{}", e)?,
                },
                DrillCommand::Language(tag) => match self.set_language(&tag) {
                    Ok(normalized) => writeln!(out, "Speech language: {}", normalized)?,
                    Err(e) => {
                        writeln!(out, "{}", e)?;
                        let known: Vec<String> = language_utils::SUPPORTED_LANGUAGES
                            .iter()
                            .map(|(code, name)| format!("{} ({})", code, name))
                            .collect();
                        writeln!(out, "Try one of: {}", known.join(", "))?;
                    }
                },
                DrillCommand::Voice => match self.dictate().await {
                    Ok(transcript) => {
                        writeln!(out, "Heard: {}", transcript)?;
                        self.check_and_report(out, None)?;
                    }
                    Err(AppError::Speech(SpeechError::Unavailable(reason))) => {
                        writeln!(out, "Speech recognition is not available: {}", reason)?;
                    }
                    Err(AppError::Speech(e)) => writeln!(out, "Voice input failed: {}", e)?,
                    Err(e) => return Err(e),
                },
                DrillCommand::Answer(text) => self.check_and_report(out, Some(&text))?,
            }
        }

        progress_bar.finish_and_clear();
        Ok(())
    }

    // @shows: Progress line, then plays the sentence
    async fn announce<W: Write>(&self, out: &mut W, progress_bar: &ProgressBar) -> Result<(), AppError> {
        if let Some(progress) = self.session.progress() {
            progress_bar.set_position(progress.position as u64);
            progress_bar.set_message(format!("{} ({:.0}%)", progress, progress.completion_percentage()));
            writeln!(out, "{}", progress)?;
        }
        self.play_and_report(out).await
    }

    async fn play_and_report<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        match self.play_current().await {
            Ok(()) => Ok(()),
            Err(AppError::Speech(e)) => {
                warn!("Could not play sentence: {}", e);
                writeln!(out, "Could not play audio: {}", e)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn check_and_report<W: Write>(&mut self, out: &mut W, text: Option<&str>) -> Result<(), AppError> {
        let result = match text {
            Some(text) => self.answer(text),
            None => self.check_answer(),
        };

        match result {
            Ok(result) => {
                if result.correct {
                    writeln!(out, "Well done! You can now move to the next sentence.")?;
                } else {
                    writeln!(out, "Not quite. Check the correct answer below.")?;
                }
                writeln!(out, "Correct answer: {}", result.expected)?;
                Ok(())
            }
            Err(AppError::Session(SessionError::AlreadyAnswered)) => {
                writeln!(out, "Already checked. Use :n for the next sentence or :j N to jump.")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
