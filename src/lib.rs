//! Cardiotocograph strip digitization.
//!
//! Recovers the fetal heart rate and uterine contraction traces from a
//! scanned CTG strip, calibrates them into physical units and derives the
//! fixed feature record consumed by a CTG classifier.

pub mod classifier;
pub mod error;
pub mod extraction;
pub mod features;
pub mod pipeline;
pub mod record;
pub mod source;

#[cfg(test)]
mod test_utils;

pub use error::{CtgError, ErrorKind, Result, Stage};
pub use extraction::{extract, CalibrationConfig, CtgSignals, SignalExtractor};
pub use features::{compute_features, FeatureMapping, FeatureName, FeatureValue};
pub use pipeline::{Analysis, CtgPipeline};
pub use record::ScanRecord;
