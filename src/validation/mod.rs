/*!
 * Validation module for subtitle compliance.
 *
 * This module checks generated subtitle tracks against broadcast rules:
 * - Timing validation (duration bounds, minimum gap, overlaps)
 * - Layout validation (line length, line count)
 * - Reading speed (characters per second, advisory only)
 *
 * # Architecture
 *
 * - `timecodes`: Per-cue timing judgments
 * - `length`: Line layout and reading speed checks
 * - `service`: Aggregates all checks into a compliance report
 */

pub mod timecodes;
pub mod length;
pub mod service;

// Re-export main types
pub use service::{aggregate, validate_cue, ComplianceValidator};
pub use timecodes::TimingIssue;
