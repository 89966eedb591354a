use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

use crate::errors::ConfigError;
use crate::subtitle_writer::SubtitleFormat;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Subtitle timing and readability thresholds
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Settings of the speech-to-text step
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Thresholds used by every stage of subtitle processing.
///
/// A single value is built per run and handed explicitly to each component.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessingConfig {
    /// Maximum characters per line
    #[serde(default = "default_max_chars_per_line")]
    pub max_chars_per_line: usize,

    /// Maximum number of lines per subtitle
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Minimum subtitle duration in milliseconds
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Maximum subtitle duration in milliseconds
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,

    /// Minimum gap between consecutive subtitles in milliseconds
    #[serde(default = "default_min_gap_ms")]
    pub min_gap_ms: u64,

    /// Reading speed limit for adult content
    #[serde(default = "default_max_cps_adult")]
    pub max_cps_adult: f64,

    /// Reading speed limit for children's content
    #[serde(default = "default_max_cps_children")]
    pub max_cps_children: f64,

    /// Whether the content targets children
    #[serde(default)]
    pub is_children_content: bool,
}

impl ProcessingConfig {
    // @returns: CPS limit for the configured audience
    pub fn max_cps(&self) -> f64 {
        if self.is_children_content {
            self.max_cps_children
        } else {
            self.max_cps_adult
        }
    }

    /// Check that the thresholds are usable together
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chars_per_line == 0 {
            return Err(ConfigError::ZeroLimit { field: "max_chars_per_line" });
        }
        if self.max_lines == 0 {
            return Err(ConfigError::ZeroLimit { field: "max_lines" });
        }
        if self.max_duration_ms == 0 {
            return Err(ConfigError::ZeroLimit { field: "max_duration_ms" });
        }
        if self.min_duration_ms > self.max_duration_ms {
            return Err(ConfigError::DurationBounds {
                min: self.min_duration_ms,
                max: self.max_duration_ms,
            });
        }
        for (field, value) in [
            ("max_cps_adult", self.max_cps_adult),
            ("max_cps_children", self.max_cps_children),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidCps { field, value });
            }
        }
        Ok(())
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_chars_per_line: default_max_chars_per_line(),
            max_lines: default_max_lines(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            min_gap_ms: default_min_gap_ms(),
            max_cps_adult: default_max_cps_adult(),
            max_cps_children: default_max_cps_children(),
            is_children_content: false,
        }
    }
}

/// Settings of the external speech-to-text step.
///
/// Only `language` is read here. The other fields are carried in `conf.json`
/// for the transcriber that produces the transcript JSON.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranscriptionConfig {
    // @field: Whisper model name, passed through to the transcriber
    #[serde(default = "default_model_name")]
    pub model_name: String,

    // @field: Language code, None for auto-detect.
    // Also overrides the language reported by the transcript.
    #[serde(default)]
    pub language: Option<String>,

    // @field: Request word-level timestamps, passed through to the transcriber
    #[serde(default = "default_true")]
    pub word_timestamps: bool,

    // @field: "auto", "cuda" or "cpu", passed through to the transcriber
    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            language: None,
            word_timestamps: true,
            device: default_device(),
        }
    }
}

/// Output generation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Subtitle format
    #[serde(default)]
    pub format: SubtitleFormat,

    /// Directory for subtitles and reports, next to each transcript when None
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Prefix the file with a UTF-8 byte order mark
    #[serde(default)]
    pub include_bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: SubtitleFormat::default(),
            output_path: None,
            include_bom: false,
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
    // @returns: Matching filter for the log facade
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

fn default_max_chars_per_line() -> usize {
    42
}

fn default_max_lines() -> usize {
    2
}

fn default_min_duration_ms() -> u64 {
    833 // 5/6 of a second, 20 frames at 24fps
}

fn default_max_duration_ms() -> u64 {
    7000
}

fn default_min_gap_ms() -> u64 {
    83 // 2 frames at 24fps
}

fn default_max_cps_adult() -> f64 {
    20.0
}

fn default_max_cps_children() -> f64 {
    17.0
}

fn default_model_name() -> String {
    "turbo".to_string()
}

fn default_device() -> String {
    "auto".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.processing.validate()?;

        if let Some(language) = &self.transcription.language {
            crate::language_utils::validate_language_code(language)?;
        }

        if !matches!(self.transcription.device.as_str(), "auto" | "cuda" | "cpu") {
            return Err(anyhow!("Unsupported transcription device: {}", self.transcription.device));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            processing: ProcessingConfig::default(),
            transcription: TranscriptionConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
