/*!
 * Tests for application configuration
 */

use subsync::app_config::{Config, LogLevel, ProcessingConfig};
use subsync::errors::ConfigError;
use subsync::subtitle_writer::SubtitleFormat;

/// Test that the default processing thresholds follow broadcast guidelines
#[test]
fn test_processingConfig_withDefaults_shouldMatchBroadcastGuidelines() {
    let config = ProcessingConfig::default();

    assert_eq!(config.max_chars_per_line, 42);
    assert_eq!(config.max_lines, 2);
    assert_eq!(config.min_duration_ms, 833);
    assert_eq!(config.max_duration_ms, 7000);
    assert_eq!(config.min_gap_ms, 83);
    assert_eq!(config.max_cps_adult, 20.0);
    assert_eq!(config.max_cps_children, 17.0);
    assert!(!config.is_children_content);
    assert!(config.validate().is_ok());
}

#[test]
fn test_maxCps_withChildrenContent_shouldUseChildrenLimit() {
    let mut config = ProcessingConfig::default();
    assert_eq!(config.max_cps(), 20.0);

    config.is_children_content = true;
    assert_eq!(config.max_cps(), 17.0);
}

#[test]
fn test_validate_withZeroLineLimits_shouldFail() {
    let mut config = ProcessingConfig::default();
    config.max_chars_per_line = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroLimit { field: "max_chars_per_line" }));

    let mut config = ProcessingConfig::default();
    config.max_lines = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroLimit { field: "max_lines" }));
}

#[test]
fn test_validate_withInvertedDurationBounds_shouldFail() {
    let mut config = ProcessingConfig::default();
    config.min_duration_ms = 8000;

    assert_eq!(
        config.validate(),
        Err(ConfigError::DurationBounds { min: 8000, max: 7000 })
    );
}

#[test]
fn test_validate_withNonPositiveCps_shouldFail() {
    let mut config = ProcessingConfig::default();
    config.max_cps_children = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidCps { field: "max_cps_children", .. })
    ));

    let mut config = ProcessingConfig::default();
    config.max_cps_adult = f64::NAN;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidCps { field: "max_cps_adult", .. })
    ));
}

#[test]
fn test_config_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "processing": { "max_chars_per_line": 37, "is_children_content": true },
        "output": { "format": "vtt" },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.processing.max_chars_per_line, 37);
    assert_eq!(config.processing.max_lines, 2);
    assert_eq!(config.processing.min_gap_ms, 83);
    assert!(config.processing.is_children_content);
    assert_eq!(config.output.format, SubtitleFormat::Vtt);
    assert!(!config.output.include_bom);
    assert_eq!(config.transcription.model_name, "turbo");
    assert!(config.transcription.word_timestamps);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_withEmptyJson_shouldEqualDefault() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_serializeRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.processing.max_lines = 3;
    config.transcription.language = Some("fr".to_string());

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, config);
}

#[test]
fn test_config_validate_withUnknownLanguage_shouldFail() {
    let mut config = Config::default();
    config.transcription.language = Some("xx".to_string());
    assert!(config.validate().is_err());

    config.transcription.language = Some("de".to_string());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_withUnknownDevice_shouldFail() {
    let mut config = Config::default();
    config.transcription.device = "tpu".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_withTranscriberSettings_shouldKeepThemThroughSaveAndLoad() {
    let json = r#"{"transcription": {"model_name": "large-v3", "word_timestamps": false, "device": "cuda"},
                   "output": {"output_path": "subs"}}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.transcription.model_name, "large-v3");
    assert!(!config.transcription.word_timestamps);
    assert_eq!(config.transcription.device, "cuda");
    assert_eq!(config.transcription.language, None);
    assert_eq!(config.output.output_path, Some(std::path::PathBuf::from("subs")));
    assert!(config.validate().is_ok());

    let saved = serde_json::to_string(&config).unwrap();
    let reloaded: Config = serde_json::from_str(&saved).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_config_validate_withBadThresholds_shouldFail() {
    let mut config = Config::default();
    config.processing.max_lines = 0;
    let error = config.validate().unwrap_err();
    assert!(format!("{:#}", error).contains("max_lines"));
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
