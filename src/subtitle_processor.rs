use std::fmt;
use std::path::{Path, PathBuf};
use regex::{Captures, Regex};
use once_cell::sync::Lazy;
use anyhow::Result;
use serde::Serialize;
use log::debug;
use crate::file_utils::FileManager;

// @module: Subtitle parsing and cleaning

// @const: SRT time range, searched anywhere in the (trimmed) second line of a block
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3}) --> ([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})").unwrap()
});

// @const: A single SRT timestamp, whole string
static SINGLE_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})$").unwrap()
});

// @const: Markup stripped from cue text, applied in this order
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static BRACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").unwrap());
static BRACKET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static PAREN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A timed line of dialogue parsed from a subtitle file.
///
/// Cues are only built by the parser and never change afterwards, so the
/// fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    sequence: usize,
    text: String,
    start_time: u64,
    end_time: u64,
}

impl Cue {
    /// Declared sequence number of the cue in its file
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    /// Cleaned single-line text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start offset in milliseconds
    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// End offset in milliseconds
    pub fn end_time(&self) -> u64 {
        self.end_time
    }

    /// Length of the cue; zero when the file has end before start
    pub fn duration_ms(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#{} [{} --> {}] {}",
            self.sequence,
            format_timestamp(self.start_time),
            format_timestamp(self.end_time),
            self.text
        )
    }
}

/// Parse SRT content into cues, sorted by sequence number.
///
/// Malformed blocks are skipped; this never fails. An empty result means
/// nothing in the content was usable.
pub fn parse_srt_string(content: &str) -> Vec<Cue> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.strip_prefix('\u{feff}').unwrap_or(&normalized);

    let mut cues = Vec::new();
    let mut skipped = 0;

    for (block_idx, block) in normalized.trim().split("\n\n").enumerate() {
        match parse_block(block) {
            Ok(cue) => cues.push(cue),
            Err(reason) => {
                skipped += 1;
                debug!("Skipping subtitle block {}: {}", block_idx + 1, reason);
            }
        }
    }

    // Stable, so duplicate sequence numbers keep file order
    cues.sort_by_key(|cue| cue.sequence);

    debug!("Parsed {} cues ({} blocks skipped)", cues.len(), skipped);
    cues
}

// @returns: Cue, or why the block was dropped
fn parse_block(block: &str) -> std::result::Result<Cue, &'static str> {
    let lines: Vec<&str> = block
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 3 {
        return Err("fewer than 3 non-empty lines");
    }

    let sequence: usize = lines[0]
        .trim()
        .parse()
        .map_err(|_| "sequence number is not an integer")?;

    let caps = TIMESTAMP_REGEX
        .captures(lines[1].trim())
        .ok_or("time range does not match HH:MM:SS,mmm --> HH:MM:SS,mmm")?;

    let text = clean_text(&lines[2..].join(" "));
    if text.is_empty() {
        return Err("no text left after removing markup");
    }

    let start_time = captures_to_ms(&caps, 1).ok_or("start time out of range")?;
    let end_time = captures_to_ms(&caps, 5).ok_or("end time out of range")?;

    Ok(Cue {
        sequence,
        text,
        start_time,
        end_time,
    })
}

/// Remove styling tags, `{...}` codes, `[...]` sound descriptions and
/// `(...)` stage directions, then collapse whitespace.
///
/// Running it on its own output changes nothing.
pub fn clean_text(raw: &str) -> String {
    let text = TAG_REGEX.replace_all(raw, "");
    let text = BRACE_REGEX.replace_all(&text, "");
    let text = BRACKET_REGEX.replace_all(&text, "");
    let text = PAREN_REGEX.replace_all(&text, "");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");
    text.trim().to_string()
}

/// Parse a single `HH:MM:SS,mmm` timestamp to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Option<u64> {
    let caps = SINGLE_TIMESTAMP_REGEX.captures(timestamp.trim())?;
    captures_to_ms(&caps, 1)
}

/// Format milliseconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

// Groups hold fixed-width ASCII digits
fn captures_to_ms(caps: &Captures, start_idx: usize) -> Option<u64> {
    let field = |offset: usize| -> Option<u64> {
        caps.get(start_idx + offset)?.as_str().parse().ok()
    };

    let hours = field(0)?;
    let minutes = field(1)?;
    let seconds = field(2)?;
    let millis = field(3)?;

    Some(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

/// Cues parsed from one subtitle file
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    entries: Vec<Cue>,
}

impl SubtitleCollection {
    /// Parse in-memory content; `source_file` is only kept for reporting
    pub fn from_srt_string(source_file: PathBuf, content: &str) -> Self {
        SubtitleCollection {
            source_file,
            entries: parse_srt_string(content),
        }
    }

    /// Read and parse a subtitle file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Only I/O failures are
    /// errors; a readable file with nothing usable gives an empty collection.
    pub fn from_srt_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;

        Ok(Self::from_srt_string(path.to_path_buf(), &content))
    }

    pub fn entries(&self) -> &[Cue] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Cue> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total span from the first cue start to the last cue end
    pub fn total_duration_ms(&self) -> u64 {
        let start = self.entries.iter().map(Cue::start_time).min().unwrap_or(0);
        let end = self.entries.iter().map(Cue::end_time).max().unwrap_or(0);
        end.saturating_sub(start)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        writeln!(f, "Duration: {}", format_timestamp(self.total_duration_ms()))?;
        Ok(())
    }
}
