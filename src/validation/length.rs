/*!
 * Line length and reading speed checks for subtitle cues.
 *
 * - Lines longer than `max_chars_per_line` and cues with more than
 *   `max_lines` lines are blocking issues
 * - Reading speed above the audience's CPS limit is a warning
 */

use crate::app_config::ProcessingConfig;
use crate::models::Subtitle;

/// Types of layout issues
#[derive(Debug, Clone, PartialEq)]
pub enum LengthIssue {
    /// A line is longer than allowed
    LineTooLong {
        line_number: usize,
        length: usize,
        max_length: usize,
    },
    /// The cue uses more lines than allowed
    TooManyLines {
        line_count: usize,
        max_lines: usize,
    },
}

impl std::fmt::Display for LengthIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthIssue::LineTooLong { line_number, length, max_length } => {
                write!(f, "Line {} too long: {} chars > {}", line_number, length, max_length)
            }
            LengthIssue::TooManyLines { line_count, max_lines } => {
                write!(f, "Too many lines: {} > {}", line_count, max_lines)
            }
        }
    }
}

/// Reading speed above the limit
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingSpeedWarning {
    pub cps: f64,
    pub max_cps: f64,
}

impl std::fmt::Display for ReadingSpeedWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Reading speed too high: {:.1} CPS (max: {:.1})", self.cps, self.max_cps)
    }
}

/// All layout issues of a cue, one per over-long line plus one for too many lines
pub fn check_lines(cue: &Subtitle, config: &ProcessingConfig) -> Vec<LengthIssue> {
    let mut issues: Vec<LengthIssue> = cue
        .lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let length = line.chars().count();
            (length > config.max_chars_per_line).then_some(LengthIssue::LineTooLong {
                line_number: i + 1,
                length,
                max_length: config.max_chars_per_line,
            })
        })
        .collect();

    if cue.lines.len() > config.max_lines {
        issues.push(LengthIssue::TooManyLines {
            line_count: cue.lines.len(),
            max_lines: config.max_lines,
        });
    }
    issues
}

/// Reading speed warning for a cue over the audience's CPS limit
pub fn check_reading_speed(cue: &Subtitle, config: &ProcessingConfig) -> Option<ReadingSpeedWarning> {
    let cps = cue.cps();
    let max_cps = config.max_cps();
    (cps > max_cps).then_some(ReadingSpeedWarning { cps, max_cps })
}
