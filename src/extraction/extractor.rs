use super::calibration::CalibrationConfig;
use super::preprocess::{intensity_grid, normalize_polarity};
use super::trace::{count_gaps, fill_gaps, trace_positions};
use super::types::{CtgSignals, TraceRegion};
use crate::error::{CtgError, Result, Stage};
use image::DynamicImage;
use ndarray::{s, ArrayView2};

/// Recovers calibrated FHR and UC traces from strip images
///
/// Holds a validated calibration; every call is independent and leaves no
/// state behind, so one extractor can be shared across threads.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    config: CalibrationConfig,
}

impl SignalExtractor {
    pub fn new(config: CalibrationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Convert a decoded image to intensities, then extract
    pub fn extract_image(&self, image: &DynamicImage) -> Result<CtgSignals> {
        let grid = intensity_grid(image)?;
        self.extract(grid.view())
    }

    /// Extract both traces from a single-channel intensity grid
    ///
    /// Steps:
    /// 1. Normalize polarity so ink is bright
    /// 2. Split into the FHR band (above the split row) and the UC band
    /// 3. Locate the trace in every column and fill gaps
    /// 4. Flip so larger values sit higher on the paper, then calibrate
    pub fn extract(&self, grid: ArrayView2<'_, u8>) -> Result<CtgSignals> {
        let _span = tracing::debug_span!("extract").entered();

        let (height, width) = grid.dim();
        if height == 0 || width == 0 {
            return Err(CtgError::EmptyImage {
                stage: Stage::Extraction,
                width,
                height,
            });
        }

        let scale = self.config.scale(height);
        scale.check(&self.config, width)?;

        let split = self.config.split_row(height);
        if split == 0 || split >= height {
            return Err(CtgError::InvalidParameter {
                name: "top_ratio",
                value: self.config.top_ratio,
                reason: "leaves an empty trace region for this image height",
            });
        }
        tracing::debug!("Splitting {}x{} grid at row {}", width, height, split);

        let normalized = normalize_polarity(grid);
        let fhr_px = self.isolate(TraceRegion::Fhr, normalized.slice(s![..split, ..]));
        let uc_px = self.isolate(TraceRegion::Uc, normalized.slice(s![split.., ..]));

        let signals = CtgSignals {
            fhr: fhr_px.iter().map(|&px| scale.fhr(px)).collect(),
            uc: uc_px.iter().map(|&px| scale.uc(px)).collect(),
            time: scale.time_axis(width),
        };

        tracing::info!(
            "Extracted {} samples covering {:.1}s",
            signals.len(),
            signals.duration_secs()
        );

        Ok(signals)
    }

    /// Gap-filled trace heights above the bottom edge of `region`, in pixels
    fn isolate(&self, kind: TraceRegion, region: ArrayView2<'_, u8>) -> Vec<f64> {
        let _span = tracing::debug_span!("isolate", region = %kind).entered();

        let region_height = region.nrows() as f64;
        let positions = trace_positions(region, self.config.ink_threshold);

        let gaps = count_gaps(&positions);
        if gaps == positions.len() {
            tracing::warn!("{} region has no ink, trace rests on its lower edge", kind);
        } else {
            tracing::debug!("{} region: {} of {} columns without ink", kind, gaps, positions.len());
        }

        fill_gaps(&positions, region_height)
            .into_iter()
            .map(|row| region_height - row)
            .collect()
    }
}

/// Extract calibrated traces from `grid` using `config`
pub fn extract(grid: ArrayView2<'_, u8>, config: &CalibrationConfig) -> Result<CtgSignals> {
    SignalExtractor::new(config.clone())?.extract(grid)
}
