/*!
 * # SubSync - Subtitle synthesis and compliance validation
 *
 * A Rust library that turns timestamped speech transcripts into broadcast-style
 * subtitle tracks and checks them against readability rules.
 *
 * ## Features
 *
 * - Balanced line wrapping within character and line limits
 * - Splitting of long segments at sentence, clause or word boundaries
 * - Word-level timestamps when the transcript carries them
 * - Duration and gap repair between cues
 * - Compliance report with timing, layout and reading speed checks
 * - SRT and WebVTT output
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `models`: Transcript and subtitle data structures
 * - `synthesis`: From transcript segments to timed cues:
 *   - `synthesis::wrapper`: Line wrapping
 *   - `synthesis::cue_builder`: Segment to cue mapping and splitting
 *   - `synthesis::timing`: Timing normalization
 * - `validation`: Compliance checks and reporting
 * - `pipeline`: Runs synthesis and validation in order
 * - `subtitle_writer`: SRT and WebVTT serialization
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod models;
pub mod pipeline;
pub mod subtitle_writer;
pub mod synthesis;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::{Config, ProcessingConfig};
pub use app_controller::Controller;
pub use errors::{ConfigError, SubSyncError, TranscriptionError};
pub use models::{ComplianceReport, Subtitle, SubtitleFile, TimingValidation, TranscriptionResult, TranscriptionSegment, Word};
pub use pipeline::{PipelineOutput, SubtitlePipeline};
pub use subtitle_writer::{SubtitleFormat, SubtitleWriter};
pub use validation::ComplianceValidator;
