use ndarray::Array2;
use serde::Serialize;
use std::fmt;

/// Single-channel intensity grid, indexed `[row, column]` with the origin at top-left
pub type IntensityGrid = Array2<u8>;

/// Horizontal band of the strip carrying one trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceRegion {
    /// Fetal heart rate, upper band
    Fhr,
    /// Uterine contractions, lower band
    Uc,
}

impl fmt::Display for TraceRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceRegion::Fhr => f.write_str("FHR"),
            TraceRegion::Uc => f.write_str("UC"),
        }
    }
}

/// Calibrated traces recovered from one strip image
///
/// All three vectors have one entry per image column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtgSignals {
    /// Fetal heart rate in beats per minute
    pub fhr: Vec<f64>,
    /// Uterine pressure in toco units
    pub uc: Vec<f64>,
    /// Elapsed seconds for each column, starting at 0
    pub time: Vec<f64>,
}

impl CtgSignals {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Strip duration covered by the image, in seconds
    pub fn duration_secs(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }
}
