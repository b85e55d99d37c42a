use crate::error::{CtgError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Physical height of paper assumed to fill the image vertically
pub const DEFAULT_PAPER_HEIGHT_CM: f64 = 10.0;

/// Paper and scanner calibration for one strip layout
///
/// Defaults match standard CTG paper: 30 bpm/cm, 25 toco units/cm, 2 cm/min,
/// FHR grid starting at 50 bpm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Fraction of image height (from the top) holding the FHR trace
    pub top_ratio: f64,
    pub bpm_per_cm: f64,
    pub toco_per_cm: f64,
    pub paper_speed_cm_per_min: f64,
    /// FHR value at the bottom edge of the FHR band
    pub fhr_baseline_floor: f64,
    pub paper_height_cm: f64,
    /// Normalized intensities strictly above this are ink
    pub ink_threshold: u8,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            top_ratio: 0.55,
            bpm_per_cm: 30.0,
            toco_per_cm: 25.0,
            paper_speed_cm_per_min: 2.0,
            fhr_baseline_floor: 50.0,
            paper_height_cm: DEFAULT_PAPER_HEIGHT_CM,
            ink_threshold: 50,
        }
    }
}

/// Individually set knobs layered over a profile, e.g. from command-line flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationOverrides {
    pub top_ratio: Option<f64>,
    pub bpm_per_cm: Option<f64>,
    pub toco_per_cm: Option<f64>,
    pub paper_speed_cm_per_min: Option<f64>,
    pub fhr_baseline_floor: Option<f64>,
    pub paper_height_cm: Option<f64>,
    pub ink_threshold: Option<u8>,
}

/// Pixel-to-unit factors derived from a calibration and an image height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    pub px_per_cm: f64,
    pub bpm_per_px: f64,
    pub toco_per_px: f64,
    pub px_per_sec: f64,
    pub fhr_floor: f64,
}

impl PixelScale {
    pub fn fhr(&self, flipped_px: f64) -> f64 {
        self.fhr_floor + flipped_px * self.bpm_per_px
    }

    pub fn uc(&self, flipped_px: f64) -> f64 {
        flipped_px * self.toco_per_px
    }

    /// Reject scales whose derived factors are zero or non-finite for an
    /// image `columns` wide
    pub fn check(&self, config: &CalibrationConfig, columns: usize) -> Result<()> {
        let usable = |v: f64| v.is_finite() && v > 0.0;

        if !usable(self.px_per_cm) {
            return Err(CtgError::InvalidParameter {
                name: "paper_height_cm",
                value: config.paper_height_cm,
                reason: "gives an unusable pixel density for this image height",
            });
        }
        if !usable(self.bpm_per_px) {
            return Err(CtgError::InvalidParameter {
                name: "bpm_per_cm",
                value: config.bpm_per_cm,
                reason: "gives an unusable FHR scale for this image height",
            });
        }
        if !usable(self.toco_per_px) {
            return Err(CtgError::InvalidParameter {
                name: "toco_per_cm",
                value: config.toco_per_cm,
                reason: "gives an unusable UC scale for this image height",
            });
        }

        let last_column = columns.saturating_sub(1) as f64;
        if !usable(self.px_per_sec)
            || !usable(1.0 / self.px_per_sec)
            || !(last_column / self.px_per_sec).is_finite()
        {
            return Err(CtgError::InvalidParameter {
                name: "paper_speed_cm_per_min",
                value: config.paper_speed_cm_per_min,
                reason: "gives a time axis outside the representable range",
            });
        }

        Ok(())
    }

    /// Elapsed seconds at each of `columns` columns
    pub fn time_axis(&self, columns: usize) -> Vec<f64> {
        (0..columns).map(|i| i as f64 / self.px_per_sec).collect()
    }
}

impl CalibrationConfig {
    /// Load a JSON calibration profile; absent fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read calibration from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse calibration in {}", path.display()))?;
        Ok(config)
    }

    /// Replace the fields set in `overrides`, keeping the rest
    pub fn with_overrides(mut self, overrides: &CalibrationOverrides) -> Self {
        if let Some(v) = overrides.top_ratio {
            self.top_ratio = v;
        }
        if let Some(v) = overrides.bpm_per_cm {
            self.bpm_per_cm = v;
        }
        if let Some(v) = overrides.toco_per_cm {
            self.toco_per_cm = v;
        }
        if let Some(v) = overrides.paper_speed_cm_per_min {
            self.paper_speed_cm_per_min = v;
        }
        if let Some(v) = overrides.fhr_baseline_floor {
            self.fhr_baseline_floor = v;
        }
        if let Some(v) = overrides.paper_height_cm {
            self.paper_height_cm = v;
        }
        if let Some(v) = overrides.ink_threshold {
            self.ink_threshold = v;
        }
        self
    }

    /// Check every knob lies in its domain
    pub fn validate(&self) -> Result<()> {
        if !(self.top_ratio > 0.0 && self.top_ratio < 1.0) {
            return Err(CtgError::InvalidParameter {
                name: "top_ratio",
                value: self.top_ratio,
                reason: "must lie strictly between 0 and 1",
            });
        }

        let knobs = [
            ("bpm_per_cm", self.bpm_per_cm),
            ("toco_per_cm", self.toco_per_cm),
            ("paper_speed_cm_per_min", self.paper_speed_cm_per_min),
            ("fhr_baseline_floor", self.fhr_baseline_floor),
            ("paper_height_cm", self.paper_height_cm),
        ];
        for (name, value) in knobs {
            if !value.is_finite() || value <= 0.0 {
                return Err(CtgError::InvalidParameter {
                    name,
                    value,
                    reason: "must be a positive finite number",
                });
            }
        }

        Ok(())
    }

    /// First row of the UC band
    pub fn split_row(&self, height: usize) -> usize {
        (self.top_ratio * height as f64).round() as usize
    }

    pub fn scale(&self, image_height: usize) -> PixelScale {
        let px_per_cm = image_height as f64 / self.paper_height_cm;
        PixelScale {
            px_per_cm,
            bpm_per_px: self.bpm_per_cm / px_per_cm,
            toco_per_px: self.toco_per_cm / px_per_cm,
            px_per_sec: (self.paper_speed_cm_per_min / 60.0) * px_per_cm,
            fhr_floor: self.fhr_baseline_floor,
        }
    }
}
