// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use subdrill::app_config::{self, Config};
use subdrill::app_controller::Controller;
use subdrill::file_utils::{FileManager, FileType};
use subdrill::language_utils;
use subdrill::subtitle_processor::{SubtitleCollection, format_timestamp};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Practice dictation with a subtitle file (default command)
    #[command(alias = "drill")]
    Practice(PracticeArgs),

    /// Parse a subtitle file and print its sentences
    Parse {
        /// Subtitle file to parse
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Print the sentences as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Count the sentences of every .srt file under a directory
    Scan {
        /// Directory to search
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Generate shell completions for subdrill
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct PracticeArgs {
    /// Subtitle file to practice with
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Speech language tag (e.g. 'en-US', 'fr-FR')
    #[arg(short, long)]
    language: Option<String>,

    /// Speech rate between 0.5 and 1.0
    #[arg(short, long)]
    rate: Option<f32>,

    /// Sentence number to start from
    #[arg(long)]
    start: Option<NonZeroUsize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// SUBDRILL - dictation practice with subtitle files
///
/// Speaks each line of a subtitle file and checks what you type back.
#[derive(Parser, Debug)]
#[command(name = "subdrill")]
#[command(version = "0.1.0")]
#[command(about = "Dictation practice with subtitle files")]
#[command(long_about = "subdrill reads an .srt subtitle file, speaks every line with a text-to-speech
program and checks what you type (or say) against the original text.

EXAMPLES:
    subdrill episode.srt                        # Practice using default config
    subdrill practice -l fr-FR -r 0.7 film.srt  # French, slower speech
    subdrill practice --start 12 episode.srt    # Start at sentence 12
    subdrill parse --json episode.srt           # Print parsed sentences as JSON
    subdrill scan ~/subtitles                   # Count sentences in every .srt file
    subdrill completions bash > subdrill.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SPEECH:
    Text-to-speech runs the configured program (espeak-ng by default). Voice answers
    need a speech-to-text program set in the 'recognition' section of the config.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file to practice with
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Speech language tag (e.g. 'en-US', 'fr-FR')
    #[arg(short, long)]
    language: Option<String>,

    /// Speech rate between 0.5 and 1.0
    #[arg(short, long)]
    rate: Option<f32>,

    /// Sentence number to start from
    #[arg(long)]
    start: Option<NonZeroUsize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for a level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subdrill", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Parse { input_path, json }) => run_parse(&input_path, json),
        Some(Commands::Scan { dir }) => run_scan(&dir),
        Some(Commands::Practice(args)) => run_practice(args).await,
        None => {
            // Bare INPUT_PATH means practice
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let practice_args = PracticeArgs {
                input_path,
                language: cli.language,
                rate: cli.rate,
                start: cli.start,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_practice(practice_args).await
        }
    }
}

async fn run_practice(options: PracticeArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(language) = &options.language {
        config.language = language.clone();
    }

    if let Some(rate) = options.rate {
        config.speech.rate = rate;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    if !FileManager::file_exists(&options.input_path) {
        return Err(anyhow!("Input file does not exist: {:?}", options.input_path));
    }

    if FileManager::detect_file_type(&options.input_path)? != FileType::Subtitle {
        warn!("{:?} does not look like an SRT file, trying anyway", options.input_path);
    }

    let language_name = language_utils::get_language_name(&config.language)
        .unwrap_or_else(|_| config.language.clone());
    info!("Practicing {:?} in {} at {}x", options.input_path, language_name, config.speech.rate);

    let mut controller = Controller::with_config(config)?;
    controller.run_interactive(&options.input_path, options.start).await?;

    info!("Practice finished");
    Ok(())
}

fn run_parse(input_path: &Path, json: bool) -> Result<()> {
    let collection = SubtitleCollection::from_srt_file(input_path)?;
    if collection.is_empty() {
        warn!("No valid subtitles found in {:?}", input_path);
    }

    let mut stdout = std::io::stdout();
    if json {
        let output = serde_json::to_string_pretty(collection.entries())
            .context("Failed to serialize subtitles to JSON")?;
        writeln!(stdout, "{}", output)?;
        return Ok(());
    }

    for cue in collection.entries() {
        writeln!(stdout, "{}", cue)?;
    }
    writeln!(
        stdout,
        "{} sentences, {} of speech",
        collection.len(),
        format_timestamp(collection.total_duration_ms())
    )?;
    Ok(())
}

fn run_scan(dir: &Path) -> Result<()> {
    if !FileManager::dir_exists(dir) {
        return Err(anyhow!("Directory does not exist: {:?}", dir));
    }

    let files = FileManager::find_files(dir, "srt")?;
    if files.is_empty() {
        warn!("No .srt files found in {:?}", dir);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    for file in &files {
        match SubtitleCollection::from_srt_file(file) {
            Ok(collection) => writeln!(stdout, "{:>6}  {}", collection.len(), file.display())?,
            Err(e) => warn!("Skipping {:?}: {:#}", file, e),
        }
    }
    Ok(())
}
