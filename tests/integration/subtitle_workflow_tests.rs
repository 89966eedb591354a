/*!
 * Integration tests for the transcript to subtitle file workflow
 */

use anyhow::Result;
use std::fs;

use subsync::app_config::Config;
use subsync::app_controller::Controller;
use subsync::errors::SubSyncError;
use subsync::subtitle_writer::SubtitleFormat;
use crate::common;

/// Test that a transcript file produces an SRT file and a report next to it
#[test]
fn test_run_withTranscriptFile_shouldWriteSubtitlesAndReport() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let controller = Controller::with_config(Config::default())?;

    let report = controller
        .run(input, temp_dir.path().to_path_buf(), false)?
        .expect("transcript should be processed");

    assert_eq!(report.total_subtitles, 4);
    assert!(report.is_compliant, "unexpected errors: {:?}", report.errors);

    let srt = fs::read_to_string(temp_dir.path().join("talk.en.srt"))?;
    assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,417\nWelcome to the show.\n\n2\n"));
    assert!(srt.contains("4\n"));

    let report_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("talk.en.report.json"))?)?;
    assert_eq!(report_json["total_subtitles"], 4);
    assert_eq!(report_json["is_compliant"], true);
    Ok(())
}

#[test]
fn test_run_withVttFormatAndBom_shouldWriteWebVtt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let mut config = Config::default();
    config.output.format = SubtitleFormat::Vtt;
    config.output.include_bom = true;
    let controller = Controller::with_config(config)?;

    controller.run(input, temp_dir.path().join("out"), false)?;

    let content = fs::read_to_string(temp_dir.path().join("out/talk.en.vtt"))?;
    assert!(content.starts_with("\u{feff}WEBVTT\n\n"));
    assert!(content.contains("00:00:00.000 --> 00:00:02.417"));
    Ok(())
}

#[test]
fn test_run_withOutputPath_shouldPreferItOverOutputDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let mut config = Config::default();
    config.output.output_path = Some(temp_dir.path().join("configured"));
    let controller = Controller::with_config(config)?;

    controller.run(input, temp_dir.path().join("ignored"), false)?;

    assert!(temp_dir.path().join("configured/talk.en.srt").exists());
    assert!(temp_dir.path().join("configured/talk.en.report.json").exists());
    assert!(!temp_dir.path().join("ignored").exists());
    Ok(())
}

#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let existing = common::create_test_file(temp_dir.path(), "talk.en.srt", "old content")?;
    let controller = Controller::with_config(Config::default())?;

    let skipped = controller.run(input.clone(), temp_dir.path().to_path_buf(), false)?;
    assert!(skipped.is_none());
    assert_eq!(fs::read_to_string(&existing)?, "old content");

    let forced = controller.run(input, temp_dir.path().to_path_buf(), true)?;
    assert!(forced.is_some());
    assert!(fs::read_to_string(&existing)?.starts_with("1\n"));
    Ok(())
}

#[test]
fn test_run_withLanguageOverride_shouldNameOutputAfterIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let mut config = Config::default();
    config.transcription.language = Some("fre".to_string());
    let controller = Controller::with_config(config)?;

    controller.run(input, temp_dir.path().to_path_buf(), false)?;

    assert!(temp_dir.path().join("talk.fr.srt").exists());
    assert!(temp_dir.path().join("talk.fr.report.json").exists());
    Ok(())
}

#[test]
fn test_run_withStrictLimits_shouldStillWriteFileAndReportIssues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = r#"{"language": "en", "segments": [
        {"id": 0, "start": 0.0, "end": 3.0, "text": "Supercalifragilisticexpialidocious"}
    ]}"#;
    let input = common::create_test_file(temp_dir.path(), "word.json", json)?;
    let mut config = Config::default();
    config.processing.max_chars_per_line = 20;
    let controller = Controller::with_config(config)?;

    let report = controller.run(input, temp_dir.path().to_path_buf(), false)?.unwrap();

    assert!(!report.is_compliant);
    assert_eq!(report.line_length_issues, 1);
    assert!(report.errors[0].starts_with("Subtitle 1: Line 1 too long: 34 chars > 20"));
    assert!(temp_dir.path().join("word.en.srt").exists());
    Ok(())
}

#[test]
fn test_run_withEmptyTranscript_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "empty.json", r#"{"language": "en", "segments": []}"#)?;
    let controller = Controller::with_config(Config::default())?;

    let error = controller.run(input, temp_dir.path().to_path_buf(), false).unwrap_err();

    assert!(format!("{:#}", error).contains("no segments"));
    assert!(!temp_dir.path().join("empty.en.srt").exists());
    Ok(())
}

#[test]
fn test_run_withMissingInput_shouldFail() {
    let controller = Controller::with_config(Config::default()).unwrap();
    let result = controller.run("does/not/exist.json".into(), ".".into(), false);
    assert!(result.is_err());
}

#[test]
fn test_check_withMetadataSidecar_shouldUseVideoIdAndWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    common::create_test_metadata(temp_dir.path(), "talk", "abcdefghijk")?;
    let controller = Controller::with_config(Config::default())?;

    let output = controller.check(&input)?;

    assert_eq!(output.file.video_id, "abcdefghijk");
    assert_eq!(output.file.language, "en");
    assert!(output.summary().starts_with("4 subtitles"));
    assert!(!temp_dir.path().join("talk.en.srt").exists());
    Ok(())
}

#[test]
fn test_check_withVideoIdOverride_shouldPreferOverride() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    common::create_test_metadata(temp_dir.path(), "talk", "abcdefghijk")?;
    let controller = Controller::with_config(Config::default())?.with_video_id("forced");

    assert_eq!(controller.check(&input)?.file.video_id, "forced");
    Ok(())
}

#[test]
fn test_generate_withOutOfOrderSegments_shouldReturnTranscriptionError() {
    let controller = Controller::with_config(Config::default()).unwrap();
    let transcript = common::transcript("en", &[(2.0, 3.0, "Second"), (1.0, 1.5, "First")]);

    let result = controller.generate(&transcript, "vid");

    assert!(matches!(result, Err(SubSyncError::Transcription(_))));
}

#[test]
fn test_withConfig_withInvalidThresholds_shouldFail() {
    let mut config = Config::default();
    config.processing.min_duration_ms = 10_000;
    assert!(Controller::with_config(config).is_err());
}
