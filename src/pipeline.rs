use crate::classifier::{classify, Classifier, Prediction};
use crate::error::Result;
use crate::extraction::{CalibrationConfig, CtgSignals, SignalExtractor};
use crate::features::{compute_from_signals, FeatureMapping};
use crate::record::ScanRecord;
use chrono::Local;
use image::DynamicImage;

/// Everything derived from one strip image
#[derive(Debug, Clone)]
pub struct Analysis {
    pub signals: CtgSignals,
    pub features: FeatureMapping,
    pub prediction: Option<Prediction>,
}

impl Analysis {
    /// Persistence record stamped with the current local time
    pub fn to_record(&self, image_url: impl Into<String>) -> ScanRecord {
        ScanRecord::new(
            self.features.clone(),
            self.prediction,
            image_url,
            Local::now(),
        )
    }
}

/// Image to features, optionally on to a class label
pub struct CtgPipeline {
    extractor: SignalExtractor,
    classifier: Option<Box<dyn Classifier>>,
}

impl CtgPipeline {
    pub fn new(config: CalibrationConfig) -> Result<Self> {
        Ok(Self {
            extractor: SignalExtractor::new(config)?,
            classifier: None,
        })
    }

    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn extractor(&self) -> &SignalExtractor {
        &self.extractor
    }

    /// Run every stage; nothing is returned unless all of them succeed
    pub fn analyze(&self, image: &DynamicImage) -> Result<Analysis> {
        let _span = tracing::info_span!("analyze").entered();

        let signals = self.extractor.extract_image(image)?;
        let features = compute_from_signals(&signals)?;

        let prediction = match &self.classifier {
            Some(classifier) => Some(classify(classifier.as_ref(), &features)?),
            None => None,
        };

        Ok(Analysis {
            signals,
            features,
            prediction,
        })
    }
}
