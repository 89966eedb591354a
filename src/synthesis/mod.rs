/*!
 * Subtitle synthesis: from transcript segments to timed, wrapped cues.
 *
 * - `wrapper`: Splits text into display lines
 * - `cue_builder`: Maps segments to cues, splitting segments that are too long
 * - `timing`: Repairs durations and gaps between cues
 */

pub mod wrapper;
pub mod cue_builder;
pub mod timing;

pub use cue_builder::CueBuilder;
pub use timing::{NormalizationStats, TimingNormalizer};
pub use wrapper::wrap;
