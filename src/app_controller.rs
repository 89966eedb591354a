use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::SubSyncError;
use crate::file_utils::FileManager;
use crate::language_utils::output_language_tag;
use crate::models::{ComplianceReport, TranscriptionResult};
use crate::pipeline::{PipelineOutput, SubtitlePipeline};
use crate::subtitle_writer::SubtitleWriter;

// @module: Application controller for subtitle generation

/// Outcome counts of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    // @field: Transcripts turned into subtitle files
    pub processed: usize,
    // @field: Transcripts whose output already existed
    pub skipped: usize,
    // @field: Transcripts that could not be processed
    pub failed: usize,
    // @field: Processed transcripts whose track is not compliant
    pub non_compliant: usize,
}

/// Main application controller for subtitle generation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Video id forced from the command line
    video_id: Option<String>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self { config, video_id: None })
    }

    /// Use this video id instead of the metadata sidecar or file name
    pub fn with_video_id(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the pipeline over an in-memory transcript
    pub fn generate(&self, transcription: &TranscriptionResult, video_id: &str) -> Result<PipelineOutput, SubSyncError> {
        let mut transcription = transcription.clone();
        if let Some(language) = &self.config.transcription.language {
            transcription.language = language.clone();
        }

        let pipeline = SubtitlePipeline::new(self.config.processing.clone());
        let output = pipeline.run(&transcription, video_id, self.config.output.format)?;
        Ok(output)
    }

    /// Run the pipeline over a transcript file without writing anything
    pub fn check(&self, input_file: &Path) -> Result<PipelineOutput> {
        let transcription = FileManager::load_transcript(input_file)?;
        let video_id = self.resolve_video_id(input_file)?;
        self.generate(&transcription, &video_id)
            .with_context(|| format!("Failed to process transcript: {:?}", input_file))
    }

    /// Generate subtitles and a compliance report for one transcript file.
    ///
    /// Files go to `output.output_path` when configured, otherwise to `output_dir`.
    /// Returns `None` when the output already exists and `force_overwrite` is off.
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<ComplianceReport>> {
        let start_time = Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let transcription = FileManager::load_transcript(&input_file)?;
        let language = output_language_tag(
            self.config.transcription.language.as_deref().unwrap_or(&transcription.language),
        );

        let output_dir = self.config.output.output_path.clone().unwrap_or(output_dir);
        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &language,
            self.config.output.format.extension(),
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, subtitles already exist (use -f to force overwrite): {:?}", output_path);
            return Ok(None);
        }

        let video_id = self.resolve_video_id(&input_file)?;
        let output = self
            .generate(&transcription, &video_id)
            .with_context(|| format!("Failed to process transcript: {:?}", input_file))?;

        SubtitleWriter::write_to_file(&output.file, &output_path, self.config.output.include_bom)?;
        let report_path = FileManager::report_path_for(&input_file, &output_dir, &output.file.language);
        FileManager::write_json(&report_path, &output.report)?;
        debug!("Compliance report written to {:?}", report_path);

        for warning in &output.report.warnings {
            debug!("{}", warning);
        }
        for issue in &output.report.errors {
            warn!("{}", issue);
        }

        info!(
            "Success: {} ({} subtitles, {})",
            output_path.display(),
            output.report.total_subtitles,
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output.report))
    }

    /// Process every transcript in a directory tree.
    /// Transcripts that already have subtitles are skipped.
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let transcripts = FileManager::find_transcripts(&input_dir)?;
        if transcripts.is_empty() {
            return Err(anyhow!("No transcript files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(transcripts.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for transcript in &transcripts {
            let file_name = transcript
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = self.output_dir_for(transcript, &input_dir);
            match self.run(transcript.clone(), output_dir, force_overwrite) {
                Ok(Some(report)) => {
                    summary.processed += 1;
                    if !report.is_compliant {
                        summary.non_compliant += 1;
                    }
                }
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors, {} not compliant ({})",
            summary.processed,
            summary.skipped,
            summary.failed,
            summary.non_compliant,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    // @returns: Output directory for a transcript found during a folder run
    fn output_dir_for(&self, transcript: &Path, input_dir: &Path) -> PathBuf {
        transcript
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input_dir.to_path_buf())
    }

    // @returns: Video id from the command line, the metadata sidecar or the file name
    fn resolve_video_id(&self, input_file: &Path) -> Result<String> {
        if let Some(video_id) = &self.video_id {
            return Ok(video_id.clone());
        }

        if let Some(metadata) = FileManager::load_metadata(input_file)? {
            debug!("Using metadata for '{}' ({})", metadata.title, metadata.id);
            return Ok(metadata.id);
        }

        Ok(input_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
