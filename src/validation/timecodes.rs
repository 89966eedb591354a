/*!
 * Timing validation for subtitle cues.
 *
 * This module checks that each cue:
 * - Stays on screen for at least the minimum and at most the maximum duration
 * - Is separated from the previous cue by at least the minimum gap
 *
 * Reading speed is checked in `length.rs` and only ever produces warnings.
 */

use serde::Serialize;

use crate::app_config::ProcessingConfig;
use crate::models::{Subtitle, TimingValidation};

/// Types of timing issues
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimingIssue {
    /// Duration is too short
    DurationTooShort {
        duration_ms: u64,
        min_duration_ms: u64,
    },
    /// Duration is too long
    DurationTooLong {
        duration_ms: u64,
        max_duration_ms: u64,
    },
    /// Gap after the previous cue is too small
    GapTooShort {
        prev_index: usize,
        gap_ms: u64,
        min_gap_ms: u64,
    },
    /// Starts before the previous cue ends
    OverlapsPrevious {
        prev_index: usize,
        overlap_ms: u64,
    },
}

impl std::fmt::Display for TimingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingIssue::DurationTooShort { duration_ms, min_duration_ms } => {
                write!(f, "Duration too short: {}ms < {}ms", duration_ms, min_duration_ms)
            }
            TimingIssue::DurationTooLong { duration_ms, max_duration_ms } => {
                write!(f, "Duration too long: {}ms > {}ms", duration_ms, max_duration_ms)
            }
            TimingIssue::GapTooShort { prev_index, gap_ms, min_gap_ms } => {
                write!(
                    f,
                    "Gap after subtitle {} too short: {}ms < {}ms",
                    prev_index, gap_ms, min_gap_ms
                )
            }
            TimingIssue::OverlapsPrevious { prev_index, overlap_ms } => {
                write!(f, "Overlaps subtitle {} by {}ms", prev_index, overlap_ms)
            }
        }
    }
}

/// Judge the timing of `cue` against `previous` and the configured limits
pub fn validate(cue: &Subtitle, previous: Option<&Subtitle>, config: &ProcessingConfig) -> TimingValidation {
    let mut issues = Vec::new();

    let duration_ms = cue.duration_ms();
    if duration_ms < config.min_duration_ms {
        issues.push(TimingIssue::DurationTooShort {
            duration_ms,
            min_duration_ms: config.min_duration_ms,
        });
    }
    if duration_ms > config.max_duration_ms {
        issues.push(TimingIssue::DurationTooLong {
            duration_ms,
            max_duration_ms: config.max_duration_ms,
        });
    }
    let duration_ok = issues.is_empty();

    let mut gap_ok = true;
    if let Some(prev) = previous {
        if cue.start_time < prev.end_time {
            gap_ok = false;
            issues.push(TimingIssue::OverlapsPrevious {
                prev_index: prev.index,
                overlap_ms: prev.end_time - cue.start_time,
            });
        } else {
            let gap_ms = cue.start_time - prev.end_time;
            if gap_ms < config.min_gap_ms {
                gap_ok = false;
                issues.push(TimingIssue::GapTooShort {
                    prev_index: prev.index,
                    gap_ms,
                    min_gap_ms: config.min_gap_ms,
                });
            }
        }
    }

    TimingValidation {
        is_valid: duration_ok && gap_ok,
        duration_ok,
        gap_ok,
        issues,
    }
}

/// Validate every cue against its predecessor in track order
pub fn validate_all(cues: &[Subtitle], config: &ProcessingConfig) -> Vec<TimingValidation> {
    cues.iter()
        .enumerate()
        .map(|(i, cue)| validate(cue, i.checked_sub(1).map(|p| &cues[p]), config))
        .collect()
}
