use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Result, Context, anyhow};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{Subtitle, SubtitleFile};

// @module: Subtitle track serialization

// @const: UTF-8 byte order mark
const UTF8_BOM: &str = "\u{feff}";

/// Supported subtitle output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    // @format: SubRip
    #[default]
    Srt,
    // @format: WebVTT
    Vtt,
}

impl SubtitleFormat {
    // @returns: File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for SubtitleFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            _ => Err(anyhow!("Invalid subtitle format: {}", s)),
        }
    }
}

/// Renders subtitle tracks to SRT or WebVTT text
pub struct SubtitleWriter;

impl SubtitleWriter {
    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_srt_timestamp(ms: u64) -> String {
        Self::format_timestamp(ms, ',')
    }

    /// Format a timestamp in milliseconds to WebVTT format (HH:MM:SS.mmm)
    pub fn format_vtt_timestamp(ms: u64) -> String {
        Self::format_timestamp(ms, '.')
    }

    fn format_timestamp(ms: u64, millis_separator: char) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, seconds, millis_separator, millis)
    }

    /// Escape characters WebVTT reserves in cue payloads
    pub fn escape_vtt_text(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Render a whole track in the file's own format
    pub fn render(file: &SubtitleFile) -> String {
        match file.format {
            SubtitleFormat::Srt => Self::to_srt(&file.subtitles),
            SubtitleFormat::Vtt => Self::to_vtt(&file.subtitles),
        }
    }

    /// Render cues as SubRip text
    pub fn to_srt(subtitles: &[Subtitle]) -> String {
        let mut out = String::new();
        for subtitle in subtitles {
            out.push_str(&format!("{}\n", subtitle.index));
            out.push_str(&format!(
                "{} --> {}\n",
                Self::format_srt_timestamp(subtitle.start_time),
                Self::format_srt_timestamp(subtitle.end_time)
            ));
            for line in &subtitle.lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Render cues as WebVTT text
    pub fn to_vtt(subtitles: &[Subtitle]) -> String {
        let mut out = String::from("WEBVTT\n\n");
        for subtitle in subtitles {
            out.push_str(&format!("{}\n", subtitle.index));
            out.push_str(&format!(
                "{} --> {}\n",
                Self::format_vtt_timestamp(subtitle.start_time),
                Self::format_vtt_timestamp(subtitle.end_time)
            ));
            for line in &subtitle.lines {
                out.push_str(&Self::escape_vtt_text(line));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Write a track to disk, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(file: &SubtitleFile, path: P, include_bom: bool) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut output = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        if include_bom {
            output.write_all(UTF8_BOM.as_bytes())?;
        }
        output
            .write_all(Self::render(file).as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        debug!("Wrote {} {} cues to {}", file.subtitles.len(), file.format, path.display());
        Ok(())
    }
}
