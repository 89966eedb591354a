use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::{TranscriptionResult, VideoMetadata};

// @module: File and directory utilities

// @const: Suffix of video metadata sidecar files
pub const METADATA_SUFFIX: &str = "info.json";

// @const: Suffix of compliance report files
pub const REPORT_SUFFIX: &str = "report.json";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path `<stem>.<language>.<extension>` inside output_dir
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        language: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();
        let output_filename = format!("{}.{}.{}", stem.to_string_lossy(), language, extension);
        output_dir.as_ref().join(output_filename)
    }

    // @returns: Path of the metadata sidecar next to a transcript, `<stem>.info.json`
    pub fn metadata_path_for<P: AsRef<Path>>(transcript_file: P) -> PathBuf {
        let transcript_file = transcript_file.as_ref();
        let stem = transcript_file.file_stem().unwrap_or_default();
        transcript_file.with_file_name(format!("{}.{}", stem.to_string_lossy(), METADATA_SUFFIX))
    }

    // @returns: Path of the compliance report that accompanies a subtitle file
    pub fn report_path_for<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        language: &str,
    ) -> PathBuf {
        Self::generate_output_path(input_file, output_dir, language, REPORT_SUFFIX)
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let extension = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Transcript JSON files in a directory tree, leaving out metadata sidecars and reports
    pub fn find_transcripts<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let files = Self::find_files(dir, "json")?;
        Ok(files
            .into_iter()
            .filter(|path| {
                let name = path.file_name().unwrap_or_default().to_string_lossy().to_lowercase();
                !name.ends_with(&format!(".{}", METADATA_SUFFIX)) && !name.ends_with(&format!(".{}", REPORT_SUFFIX))
            })
            .collect())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Deserialize a JSON file
    pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        serde_json::from_reader(BufReader::new(file)).with_context(|| format!("Failed to parse JSON file: {:?}", path))
    }

    /// Load a transcript produced by the speech-to-text step
    pub fn load_transcript<P: AsRef<Path>>(path: P) -> Result<TranscriptionResult> {
        Self::read_json(path)
    }

    /// Load the metadata sidecar of a transcript, if there is one
    pub fn load_metadata<P: AsRef<Path>>(transcript_file: P) -> Result<Option<VideoMetadata>> {
        let path = Self::metadata_path_for(transcript_file);
        if !Self::file_exists(&path) {
            return Ok(None);
        }
        Self::read_json(&path).map(Some)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Serialize a value as pretty JSON into a file
    pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
        Self::write_to_file(path, &json)
    }
}
