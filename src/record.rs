//! Record handed to the persistence layer for each processed strip.

use crate::classifier::{Classification, Prediction};
use crate::features::FeatureMapping;
use chrono::{DateTime, Local};
use serde::Serialize;

/// One processed scan: features plus the metadata stored alongside them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    /// `YYYY-MM-DD`
    pub scanned_date: String,
    /// `HH:MM:SS`
    pub scan_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_value: Option<i64>,
    pub features: FeatureMapping,
    pub image_url: String,
    pub created_at: DateTime<Local>,
}

impl ScanRecord {
    pub fn new(
        features: FeatureMapping,
        prediction: Option<Prediction>,
        image_url: impl Into<String>,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            scanned_date: created_at.format("%Y-%m-%d").to_string(),
            scan_time: created_at.format("%H:%M:%S").to_string(),
            classification: prediction.map(|p| p.label),
            prediction_value: prediction.map(|p| p.value),
            features,
            image_url: image_url.into(),
            created_at,
        }
    }
}
