/*!
 * Timing normalization for subtitle cues.
 *
 * A single left-to-right pass over cues sorted by start time. Per cue it
 * caps a too-long duration at the maximum and pulls the end back so the gap
 * to the next cue is at least the minimum. Only then does it raise a
 * too-short duration toward the minimum, borrowing time from the next cue
 * when that cue can spare it.
 *
 * Cues are never dropped, merged or reordered and no adjustment creates an
 * overlap. Whatever cannot be repaired is left for the validator to report.
 * Running the pass on its own output changes nothing.
 */

use log::{debug, warn};

use crate::app_config::ProcessingConfig;
use crate::models::Subtitle;

/// Counters describing what a normalization pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    /// Cues whose end was moved later to reach the minimum duration
    pub extended: usize,
    /// Cues that reached the minimum by delaying the next cue's start
    pub borrowed: usize,
    /// Cues capped at the maximum duration
    pub capped: usize,
    /// Cues shortened to respect the minimum gap
    pub gap_trimmed: usize,
    /// Cues still shorter than the minimum after the pass
    pub unresolved: usize,
}

/// Adjusts cue timing to the duration and gap limits of a configuration
pub struct TimingNormalizer<'a> {
    config: &'a ProcessingConfig,
}

impl<'a> TimingNormalizer<'a> {
    pub fn new(config: &'a ProcessingConfig) -> Self {
        Self { config }
    }

    /// Return a normalized copy of `cues`
    pub fn normalize(&self, cues: &[Subtitle]) -> Vec<Subtitle> {
        self.normalize_with_stats(cues).0
    }

    /// Return a normalized copy of `cues` together with what was changed
    pub fn normalize_with_stats(&self, cues: &[Subtitle]) -> (Vec<Subtitle>, NormalizationStats) {
        let mut out = cues.to_vec();
        out.sort_by_key(|cue| cue.start_time);

        let mut stats = NormalizationStats::default();
        for i in 0..out.len() {
            self.apply_duration_ceiling(&mut out[i], &mut stats);
            self.apply_gap(&mut out, i, &mut stats);
            // The floor runs last so a gap trim can never undo it
            self.apply_duration_floor(&mut out, i, &mut stats);

            if out[i].duration_ms() < self.config.min_duration_ms {
                stats.unresolved += 1;
                warn!(
                    "Subtitle {} remains {}ms long, below the {}ms minimum",
                    out[i].index,
                    out[i].duration_ms(),
                    self.config.min_duration_ms
                );
            }
        }

        debug!(
            "Timing normalization: {} cues, {} extended, {} borrowed, {} capped, {} gap-trimmed, {} unresolved",
            out.len(),
            stats.extended,
            stats.borrowed,
            stats.capped,
            stats.gap_trimmed,
            stats.unresolved
        );

        (out, stats)
    }

    fn apply_duration_floor(&self, cues: &mut [Subtitle], i: usize, stats: &mut NormalizationStats) {
        let min_duration = self.config.min_duration_ms;
        let min_gap = self.config.min_gap_ms;

        let cue = &cues[i];
        if cue.duration_ms() >= min_duration {
            return;
        }
        let start = cue.start_time;
        let current_end = cue.end_time;
        let target_end = start + min_duration;

        let Some(next) = cues.get(i + 1) else {
            cues[i].end_time = target_end;
            stats.extended += 1;
            return;
        };

        let limit = next.start_time.saturating_sub(min_gap);
        if target_end <= limit {
            cues[i].end_time = target_end;
            stats.extended += 1;
            return;
        }

        // Delay the next cue so the gap is exactly the minimum
        let next_start = target_end + min_gap;
        let next_keeps_floor = next.end_time >= next_start + min_duration;
        let order_kept = cues
            .get(i + 2)
            .is_none_or(|after| next_start <= after.start_time);

        if next_keeps_floor && order_kept {
            cues[i + 1].start_time = next_start;
            cues[i].end_time = target_end;
            stats.borrowed += 1;
        } else if limit > current_end {
            cues[i].end_time = limit;
            stats.extended += 1;
        }
    }

    fn apply_duration_ceiling(&self, cue: &mut Subtitle, stats: &mut NormalizationStats) {
        if cue.duration_ms() > self.config.max_duration_ms {
            cue.end_time = cue.start_time + self.config.max_duration_ms;
            stats.capped += 1;
        }
    }

    fn apply_gap(&self, cues: &mut [Subtitle], i: usize, stats: &mut NormalizationStats) {
        let Some(next_start) = cues.get(i + 1).map(|next| next.start_time) else {
            return;
        };

        let cue = &mut cues[i];
        let latest_end = next_start.saturating_sub(self.config.min_gap_ms).max(cue.start_time);
        if cue.end_time > latest_end {
            cue.end_time = latest_end;
            stats.gap_trimmed += 1;
        }
    }
}

/// Normalize `cues` with `config`
pub fn normalize(cues: &[Subtitle], config: &ProcessingConfig) -> Vec<Subtitle> {
    TimingNormalizer::new(config).normalize(cues)
}
