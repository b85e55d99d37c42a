mod calibration;
mod extractor;
mod preprocess;
mod trace;
pub mod types;

pub use calibration::{
    CalibrationConfig, CalibrationOverrides, PixelScale, DEFAULT_PAPER_HEIGHT_CM,
};
pub use extractor::{extract, SignalExtractor};
pub use preprocess::{intensity_grid, mean_intensity, normalize_polarity, INTENSITY_MIDPOINT};
pub use trace::{fill_gaps, trace_positions};
pub use types::{CtgSignals, IntensityGrid, TraceRegion};
