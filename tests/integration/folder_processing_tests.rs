/*!
 * Integration tests for processing a directory of transcripts
 */

use anyhow::Result;

use subsync::app_config::Config;
use subsync::app_controller::{Controller, FolderSummary};
use crate::common;

#[test]
fn test_runFolder_withNestedTranscripts_shouldProcessEachNextToItself() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_transcript(temp_dir.path(), "one.json")?;
    common::create_test_transcript(temp_dir.path(), "season/two.json")?;
    common::create_test_metadata(temp_dir.path(), "one", "videoone123")?;
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false)?;

    assert_eq!(
        summary,
        FolderSummary {
            processed: 2,
            skipped: 0,
            failed: 0,
            non_compliant: 0,
        }
    );
    assert!(temp_dir.path().join("one.en.srt").exists());
    assert!(temp_dir.path().join("season/two.en.srt").exists());
    assert!(temp_dir.path().join("season/two.en.report.json").exists());
    Ok(())
}

#[test]
fn test_runFolder_withOutputPath_shouldWriteEveryTrackAndReportThere() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_dir = temp_dir.path().join("transcripts");
    common::create_test_transcript(&input_dir, "one.json")?;
    common::create_test_transcript(&input_dir, "season/two.json")?;
    let output_dir = temp_dir.path().join("subtitles");
    let mut config = Config::default();
    config.output.output_path = Some(output_dir.clone());
    let controller = Controller::with_config(config)?;

    let summary = controller.run_folder(input_dir.clone(), false)?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 0);
    for name in ["one.en.srt", "one.en.report.json", "two.en.srt", "two.en.report.json"] {
        assert!(output_dir.join(name).exists(), "missing {}", name);
    }
    assert!(!input_dir.join("one.en.srt").exists());
    assert!(!input_dir.join("season/two.en.report.json").exists());
    Ok(())
}

#[test]
fn test_runFolder_runTwice_shouldSkipExistingOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_transcript(temp_dir.path(), "one.json")?;
    let controller = Controller::with_config(Config::default())?;

    controller.run_folder(temp_dir.path().to_path_buf(), false)?;
    // Reports from the first run must not be picked up as transcripts
    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false)?;

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    Ok(())
}

#[test]
fn test_runFolder_withBrokenTranscript_shouldCountFailureAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_transcript(temp_dir.path(), "good.json")?;
    common::create_test_file(temp_dir.path(), "bad.json", r#"{"segments": []}"#)?;
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), true)?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
    Ok(())
}

#[test]
fn test_runFolder_withNonCompliantTrack_shouldCountIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let mut config = Config::default();
    config.processing.max_chars_per_line = 5;
    config.processing.max_lines = 1;
    let controller = Controller::with_config(config)?;

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false)?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.non_compliant, 1);
    Ok(())
}

#[test]
fn test_runFolder_withEmptyDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    assert!(controller.run_folder(temp_dir.path().to_path_buf(), false).is_err());
    assert!(controller.run_folder(temp_dir.path().join("missing"), false).is_err());
    Ok(())
}
