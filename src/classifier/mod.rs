mod input;
mod label;

pub use input::{load_schema, ModelInput};
pub use label::{Classification, Prediction};

use crate::error::{CtgError, Result};
use crate::features::FeatureMapping;

/// Trait for pretrained CTG classifiers
/// Allows plugging in any backend (tree ensembles, ONNX graphs, remote services)
pub trait Classifier: Send + Sync {
    /// Column names the model expects, in input order
    fn feature_columns(&self) -> &[String];

    /// Raw class value for one aligned input row
    fn predict(&self, input: &ModelInput) -> anyhow::Result<i64>;
}

/// Align `features` to the model's columns and classify them
pub fn classify(classifier: &dyn Classifier, features: &FeatureMapping) -> Result<Prediction> {
    let _span = tracing::debug_span!("classify").entered();

    let input = ModelInput::align(features, classifier.feature_columns());
    tracing::debug!("Model input has {} columns", input.len());

    let value = classifier.predict(&input).map_err(CtgError::Classifier)?;
    let prediction = Prediction::from_value(value);

    tracing::info!("Prediction: {} ({})", prediction.label, prediction.value);
    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::features::compute_features;
    use anyhow::Context;
    use std::error::Error as _;

    /// Flags anything with a baseline above a cut-off as suspect
    struct BaselineCutoff {
        columns: Vec<String>,
        cutoff: f64,
    }

    impl Classifier for BaselineCutoff {
        fn feature_columns(&self) -> &[String] {
            &self.columns
        }

        fn predict(&self, input: &ModelInput) -> anyhow::Result<i64> {
            let baseline = input
                .value("Baseline value (SisPorto)")
                .context("baseline column missing")?;
            Ok(if baseline > self.cutoff { 2 } else { 1 })
        }
    }

    fn model(columns: &[&str]) -> BaselineCutoff {
        BaselineCutoff {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            cutoff: 160.0,
        }
    }

    #[test]
    fn test_classify_maps_label() {
        let features = compute_features(&[170.0, 172.0, 171.0], &[], &[]).unwrap();
        let prediction = classify(&model(&["Baseline value (SisPorto)"]), &features).unwrap();
        assert_eq!(prediction.value, 2);
        assert_eq!(prediction.label, Classification::Suspect);
    }

    #[test]
    fn test_model_error_is_wrapped() {
        let features = compute_features(&[140.0, 141.0], &[], &[]).unwrap();
        let err = classify(&model(&["Histogram width"]), &features).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Classifier);
        assert!(err.to_string().contains("baseline column missing"));
        assert!(err.source().is_some());
    }
}
