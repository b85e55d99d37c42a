use std::fmt;
use thiserror::Error;

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Source,
    Extraction,
    Features,
    Classification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Source => "image source",
            Stage::Extraction => "signal extraction",
            Stage::Features => "feature computation",
            Stage::Classification => "classification",
        };
        f.write_str(name)
    }
}

/// Coarse error category, independent of the variant carrying the details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    InvalidParameter,
    InvalidInput,
    Classifier,
}

/// Errors raised while turning a strip image into features
#[derive(Debug, Error)]
pub enum CtgError {
    /// Image bytes could not be decoded
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Image or grid has no pixels
    #[error("image is empty ({width}x{height}) during {stage}")]
    EmptyImage {
        stage: Stage,
        width: usize,
        height: usize,
    },

    /// Calibration knob outside its domain
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Signal unusable for the requested computation
    #[error("invalid input to {stage}: {reason}")]
    InvalidInput { stage: Stage, reason: String },

    /// Attached model failed to produce a prediction
    #[error("classifier failed: {0}")]
    Classifier(#[source] anyhow::Error),
}

impl CtgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CtgError::Decode(_) | CtgError::EmptyImage { .. } => ErrorKind::Decode,
            CtgError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            CtgError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CtgError::Classifier(_) => ErrorKind::Classifier,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            CtgError::Decode(_) => Stage::Source,
            CtgError::EmptyImage { stage, .. } | CtgError::InvalidInput { stage, .. } => *stage,
            CtgError::InvalidParameter { .. } => Stage::Extraction,
            CtgError::Classifier(_) => Stage::Classification,
        }
    }

    pub(crate) fn features_input(reason: impl Into<String>) -> Self {
        CtgError::InvalidInput {
            stage: Stage::Features,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CtgError>;
