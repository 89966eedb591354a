/*!
 * Core data structures shared by every stage of the subtitle pipeline.
 *
 * Transcript types mirror what the speech-to-text step produces (times in
 * seconds), subtitle types carry integer millisecond times ready for output.
 */

use serde::{Deserialize, Serialize};

use crate::subtitle_writer::SubtitleFormat;
use crate::validation::timecodes::TimingIssue;

// @const: Milliseconds per second
const MS_PER_SECOND: f64 = 1000.0;

/// Converts a time in seconds to whole milliseconds, rounding to nearest.
/// Negative and non-finite values map to zero.
pub fn seconds_to_ms(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * MS_PER_SECOND).round() as u64
}

/// Information about the source video, supplied by the acquisition step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video id (11 characters for YouTube)
    pub id: String,
    /// Video title
    pub title: String,
    /// Duration in seconds
    pub duration: f64,
    /// Channel name
    pub uploader: String,
    /// Upload date in YYYYMMDD format
    pub upload_date: String,
}

/// A single word with its own timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    // @field: Word text, Whisper names it "word"
    #[serde(alias = "word")]
    pub text: String,

    // @field: Start in seconds
    pub start: f64,

    // @field: End in seconds
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// A transcribed stretch of speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    // @field: Segment index from the transcriber (0-based)
    #[serde(default)]
    pub id: usize,

    // @field: Start in seconds
    pub start: f64,

    // @field: End in seconds
    pub end: f64,

    // @field: Transcribed text
    pub text: String,

    // @field: Word-level timestamps, may be empty
    #[serde(default)]
    pub words: Vec<Word>,
}

impl TranscriptionSegment {
    /// Creates a segment without word-level timing
    pub fn new(id: usize, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            text: text.into(),
            words: Vec::new(),
        }
    }

    /// Attaches word-level timing to the segment
    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = words;
        self
    }
}

/// Complete output of the transcription step and sole input of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Detected or requested language code
    #[serde(default)]
    pub language: String,

    /// Total audio duration in seconds
    #[serde(default)]
    pub duration: f64,

    /// Segments in ascending start order
    pub segments: Vec<TranscriptionSegment>,
}

/// A single timed subtitle cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtitle {
    /// Sequence number, 1-based
    pub index: usize,
    /// Start time in ms
    pub start_time: u64,
    /// End time in ms
    pub end_time: u64,
    /// Text before line wrapping
    pub text: String,
    /// Wrapped display lines
    pub lines: Vec<String>,
}

impl Subtitle {
    pub fn new(index: usize, start_time: u64, end_time: u64, text: String, lines: Vec<String>) -> Self {
        Self {
            index,
            start_time,
            end_time,
            text,
            lines,
        }
    }

    /// Total characters across all lines
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(|line| line.chars().count()).sum()
    }

    /// Duration in ms, zero when the end precedes the start
    pub fn duration_ms(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// Characters per second, or 0 for a zero-length cue
    pub fn cps(&self) -> f64 {
        let duration_ms = self.duration_ms();
        if duration_ms == 0 {
            return 0.0;
        }
        self.char_count() as f64 / (duration_ms as f64 / MS_PER_SECOND)
    }
}

/// A complete subtitle track ready for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleFile {
    /// Output format
    pub format: SubtitleFormat,
    /// Language code
    pub language: String,
    /// Id of the source video
    pub video_id: String,
    /// Cues in ascending time order
    pub subtitles: Vec<Subtitle>,
}

/// Timing judgment for a single cue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingValidation {
    /// `duration_ok && gap_ok`
    pub is_valid: bool,
    /// Duration lies within the configured bounds
    pub duration_ok: bool,
    /// Gap from the previous cue is large enough
    pub gap_ok: bool,
    /// Problems found
    pub issues: Vec<TimingIssue>,
}

/// Aggregate compliance status of a subtitle track
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComplianceReport {
    pub total_subtitles: usize,
    /// Cues whose timing validation failed
    pub timing_issues: usize,
    /// Cues over the CPS limit
    pub cps_warnings: usize,
    /// Over-long lines plus cues with too many lines
    pub line_length_issues: usize,
    /// True when there are no blocking issues
    pub is_compliant: bool,
    /// Non-blocking findings
    pub warnings: Vec<String>,
    /// Blocking findings
    pub errors: Vec<String>,
}
