/*!
 * Compliance service that runs every check over a subtitle track.
 *
 * Timing and line-length problems are blocking and land in `errors`; reading
 * speed overages are advisory and land in `warnings`. Both lists follow cue
 * order.
 */

use log::{debug, warn};

use crate::app_config::ProcessingConfig;
use crate::models::{ComplianceReport, Subtitle, TimingValidation};

use super::length::{check_lines, check_reading_speed};
use super::timecodes::{validate, validate_all};

/// Validates subtitle tracks against a processing configuration
pub struct ComplianceValidator<'a> {
    config: &'a ProcessingConfig,
}

impl<'a> ComplianceValidator<'a> {
    pub fn new(config: &'a ProcessingConfig) -> Self {
        Self { config }
    }

    /// Timing judgment for one cue given the cue before it
    pub fn validate_cue(&self, cue: &Subtitle, previous: Option<&Subtitle>) -> TimingValidation {
        validate(cue, previous, self.config)
    }

    /// Per-cue timing judgments and the aggregate report for a whole track
    pub fn validate_track(&self, cues: &[Subtitle]) -> (Vec<TimingValidation>, ComplianceReport) {
        let validations = validate_all(cues, self.config);
        let report = self.aggregate(cues, &validations);
        (validations, report)
    }

    /// Fold per-cue judgments and layout checks into a report.
    ///
    /// `validations` pairs with `cues` by position; extra entries on either
    /// side are ignored.
    pub fn aggregate(&self, cues: &[Subtitle], validations: &[TimingValidation]) -> ComplianceReport {
        let mut report = ComplianceReport {
            total_subtitles: cues.len(),
            ..Default::default()
        };

        for (cue, validation) in cues.iter().zip(validations) {
            if !validation.is_valid {
                report.timing_issues += 1;
                report
                    .errors
                    .extend(validation.issues.iter().map(|issue| format!("Subtitle {}: {}", cue.index, issue)));
            }

            let layout_issues = check_lines(cue, self.config);
            report.line_length_issues += layout_issues.len();
            report
                .errors
                .extend(layout_issues.iter().map(|issue| format!("Subtitle {}: {}", cue.index, issue)));

            if let Some(speed) = check_reading_speed(cue, self.config) {
                report.cps_warnings += 1;
                report.warnings.push(format!("Subtitle {}: {}", cue.index, speed));
            }
        }

        report.is_compliant = report.timing_issues == 0 && report.line_length_issues == 0;

        debug!(
            "Compliance: {} subtitles, {} timing issues, {} line length issues, {} CPS warnings",
            report.total_subtitles, report.timing_issues, report.line_length_issues, report.cps_warnings
        );
        if !report.is_compliant {
            warn!("Subtitle track is not compliant: {} blocking issue(s)", report.errors.len());
        }

        report
    }
}

/// Timing judgment for `cue`
pub fn validate_cue(cue: &Subtitle, previous: Option<&Subtitle>, config: &ProcessingConfig) -> TimingValidation {
    ComplianceValidator::new(config).validate_cue(cue, previous)
}

/// Aggregate report for `cues` and their timing judgments
pub fn aggregate(cues: &[Subtitle], validations: &[TimingValidation], config: &ProcessingConfig) -> ComplianceReport {
    ComplianceValidator::new(config).aggregate(cues, validations)
}
