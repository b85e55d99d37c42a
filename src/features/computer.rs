use super::mapping::{FeatureMapping, FeatureName, FeatureValue};
use super::statistics::{first_difference, mean, percentage, population_std_dev, round2};
use crate::error::{CtgError, Result};
use crate::extraction::CtgSignals;
use tracing::debug;

/// Beat-to-beat change (bpm) above which short-term variability is abnormal
pub const ABNORMAL_SHORT_TERM_BPM: f64 = 25.0;

/// Distance from baseline (bpm) above which long-term variability is abnormal
pub const ABNORMAL_LONG_TERM_BPM: f64 = 20.0;

/// Event counts with no detector yet; always emitted as `NotComputed`
pub const EVENT_FEATURES: [FeatureName; 7] = [
    FeatureName::Accelerations,
    FeatureName::UterineContractions,
    FeatureName::FetalMovements,
    FeatureName::LightDecelerations,
    FeatureName::SevereDecelerations,
    FeatureName::ProlongedDecelerations,
    FeatureName::RepetitiveDecelerations,
];

/// Compute the classifier feature record from calibrated traces
///
/// Only `fhr` drives the statistics today. `uc` and `time` are part of the
/// signature for the event detectors listed in [`EVENT_FEATURES`].
pub fn compute_features(fhr: &[f64], _uc: &[f64], _time: &[f64]) -> Result<FeatureMapping> {
    let _span = tracing::debug_span!("compute_features").entered();

    if fhr.len() < 2 {
        return Err(CtgError::features_input(format!(
            "FHR signal needs at least 2 samples, got {}",
            fhr.len()
        )));
    }
    if let Some(i) = fhr.iter().position(|v| !v.is_finite()) {
        return Err(CtgError::features_input(format!(
            "FHR sample {} is not finite",
            i
        )));
    }

    let baseline = mean(fhr);
    let diffs = first_difference(fhr);

    let long_term = population_std_dev(fhr, baseline);
    let short_term = diffs.iter().map(|d| d.abs()).sum::<f64>() / diffs.len() as f64;
    let abnormal_short = diffs
        .iter()
        .filter(|d| d.abs() > ABNORMAL_SHORT_TERM_BPM)
        .count();
    let abnormal_long = fhr
        .iter()
        .filter(|v| (*v - baseline).abs() > ABNORMAL_LONG_TERM_BPM)
        .count();

    debug!(
        "FHR baseline={:.2} ltv={:.2} stv={:.2} over {} samples",
        baseline,
        long_term,
        short_term,
        fhr.len()
    );

    let mut mapping = FeatureMapping::placeholder();
    let computed = [
        (FeatureName::Baseline, baseline),
        (FeatureName::LongTermVariability, long_term),
        (FeatureName::ShortTermVariability, short_term),
        (
            FeatureName::AbnormalShortTermPct,
            percentage(abnormal_short, diffs.len()),
        ),
        (
            FeatureName::AbnormalLongTermPct,
            percentage(abnormal_long, fhr.len()),
        ),
    ];
    for (name, value) in computed {
        mapping.set(name, FeatureValue::Computed(round2(value)));
    }
    for name in EVENT_FEATURES {
        mapping.set(name, FeatureValue::NotComputed);
    }

    Ok(mapping)
}

/// [`compute_features`] over an extractor result
pub fn compute_from_signals(signals: &CtgSignals) -> Result<FeatureMapping> {
    compute_features(&signals.fhr, &signals.uc, &signals.time)
}
