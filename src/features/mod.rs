mod computer;
mod mapping;
pub mod statistics;

pub use computer::{
    compute_features, compute_from_signals, ABNORMAL_LONG_TERM_BPM, ABNORMAL_SHORT_TERM_BPM,
    EVENT_FEATURES,
};
pub use mapping::{FeatureMapping, FeatureName, FeatureValue, FEATURE_COUNT};
