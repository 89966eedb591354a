/*!
 * Pipeline orchestrator for subtitle synthesis.
 *
 * The pipeline runs three stages over a transcript:
 * 1. Cue building: segments to wrapped, timed cues
 * 2. Timing normalization: duration and gap repair
 * 3. Compliance validation: per-cue judgments and a track report
 *
 * Input-shape problems abort before any stage runs. Rule violations never
 * abort; they are carried in the report next to a usable subtitle file.
 */

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::app_config::ProcessingConfig;
use crate::errors::TranscriptionError;
use crate::language_utils::output_language_tag;
use crate::models::{ComplianceReport, SubtitleFile, TimingValidation, TranscriptionResult};
use crate::subtitle_writer::SubtitleFormat;
use crate::synthesis::{CueBuilder, NormalizationStats, TimingNormalizer};
use crate::validation::ComplianceValidator;

/// Result of a complete pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The generated subtitle track
    pub file: SubtitleFile,

    /// Aggregate compliance report
    pub report: ComplianceReport,

    /// Timing judgment per cue, in cue order
    pub validations: Vec<TimingValidation>,

    /// What the timing normalizer changed
    pub normalization: NormalizationStats,

    /// Wall time of the run
    pub duration: Duration,
}

impl PipelineOutput {
    /// One-line description of the run
    pub fn summary(&self) -> String {
        format!(
            "{} subtitles | {} timing issues | {} line length issues | {} CPS warnings | {} | {:.1}ms",
            self.report.total_subtitles,
            self.report.timing_issues,
            self.report.line_length_issues,
            self.report.cps_warnings,
            if self.report.is_compliant { "compliant" } else { "NOT compliant" },
            self.duration.as_secs_f64() * 1000.0
        )
    }
}

/// Sequences cue building, timing normalization and validation
pub struct SubtitlePipeline {
    config: ProcessingConfig,
}

impl SubtitlePipeline {
    /// Create a pipeline with the given thresholds
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Thresholds used by this pipeline
    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Turn a transcript into a subtitle track and its compliance report
    pub fn run(
        &self,
        transcription: &TranscriptionResult,
        video_id: &str,
        format: SubtitleFormat,
    ) -> Result<PipelineOutput, TranscriptionError> {
        let start_time = Instant::now();

        check_input(transcription)?;

        let cues = CueBuilder::new(&self.config).build(&transcription.segments);
        if cues.is_empty() {
            return Err(TranscriptionError::NoSpeech {
                segment_count: transcription.segments.len(),
            });
        }
        debug!(
            "Built {} cues from {} segments",
            cues.len(),
            transcription.segments.len()
        );

        let (mut cues, normalization) = TimingNormalizer::new(&self.config).normalize_with_stats(&cues);
        for (i, cue) in cues.iter_mut().enumerate() {
            cue.index = i + 1;
        }

        let (validations, report) = ComplianceValidator::new(&self.config).validate_track(&cues);

        let output = PipelineOutput {
            file: SubtitleFile {
                format,
                language: output_language_tag(&transcription.language),
                video_id: video_id.to_string(),
                subtitles: cues,
            },
            report,
            validations,
            normalization,
            duration: start_time.elapsed(),
        };

        info!("Subtitles for '{}': {}", video_id, output.summary());
        Ok(output)
    }
}

/// Reject transcripts the pipeline cannot work with
pub fn check_input(transcription: &TranscriptionResult) -> Result<(), TranscriptionError> {
    if transcription.segments.is_empty() {
        return Err(TranscriptionError::EmptyTranscript);
    }

    let mut previous_start: Option<f64> = None;
    for segment in &transcription.segments {
        let timing_valid = segment.start.is_finite()
            && segment.end.is_finite()
            && segment.start >= 0.0
            && segment.start <= segment.end;
        if !timing_valid {
            return Err(TranscriptionError::InvalidSegmentTiming {
                segment_id: segment.id,
                start: segment.start,
                end: segment.end,
            });
        }

        if let Some(previous_start) = previous_start {
            if segment.start < previous_start {
                return Err(TranscriptionError::SegmentOutOfOrder {
                    segment_id: segment.id,
                    start: segment.start,
                    previous_start,
                });
            }
        }
        previous_start = Some(segment.start);
    }

    Ok(())
}
