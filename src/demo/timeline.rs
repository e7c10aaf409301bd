//! Synthetic confidence history for charting

use serde::Serialize;

use super::profile::Confidence;

/// Fixed x-axis labels for the confidence history chart.
pub const TIMELINE_LABELS: [&str; 6] = ["08:00", "09:00", "10:00", "11:00", "12:00", "13:00"];

/// Lowest starting point of a ramp, as a ratio.
const RAMP_FLOOR: f64 = 0.3;
/// How far below the target a ramp starts, as a ratio.
const RAMP_SPAN: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSample {
    pub label: String,
    pub confidence: f64,
}

/// Ramp from slightly below `target` up to exactly `target`, one sample per label.
pub fn synthesize(target: Confidence) -> Vec<TimelineSample> {
    let target = target.ratio();
    let start = (target - RAMP_SPAN).max(RAMP_FLOOR);
    let last = (TIMELINE_LABELS.len() - 1) as f64;

    TIMELINE_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let progress = i as f64 / last;
            TimelineSample {
                label: (*label).to_string(),
                confidence: round2(start + (target - start) * progress),
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_to_80() {
        let samples = synthesize(Confidence::from(80));
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[0].confidence, 0.6);
        assert_eq!(samples[5].confidence, 0.8);
        assert_eq!(samples[0].label, "08:00");
        assert_eq!(samples[5].label, "13:00");
    }

    #[test]
    fn test_ramp_is_non_decreasing_above_floor() {
        for c in 30..=100u8 {
            let samples = synthesize(Confidence::from(c));
            assert!(
                samples.windows(2).all(|w| w[0].confidence <= w[1].confidence),
                "c={} {:?}",
                c,
                samples
            );
            assert_eq!(samples[5].confidence, f64::from(c) / 100.0);
        }
    }

    #[test]
    fn test_low_targets_start_at_floor() {
        let samples = synthesize(Confidence::from(40));
        assert_eq!(samples[0].confidence, 0.3);
        assert_eq!(samples[5].confidence, 0.4);
    }

    #[test]
    fn test_synthesize_is_repeatable() {
        let target = Confidence::from(67);
        assert_eq!(synthesize(target), synthesize(target));
    }
}
