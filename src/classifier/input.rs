use crate::features::FeatureMapping;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One row of classifier input, ordered by the model's column schema
///
/// Columns the feature record does not produce are filled with 0; fields the
/// model does not use are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInput {
    pub columns: Vec<String>,
    pub values: Vec<f64>,
}

impl ModelInput {
    pub fn align(features: &FeatureMapping, columns: &[String]) -> Self {
        let values = columns
            .iter()
            .map(|column| {
                features.get_column(column).map(|v| v.as_f64()).unwrap_or_else(|| {
                    tracing::debug!("Column {:?} not produced, filling with 0", column);
                    0.0
                })
            })
            .collect();

        Self {
            columns: columns.to_vec(),
            values,
        }
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read a model column schema: a JSON array of column names
pub fn load_schema<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model schema from {}", path.display()))?;
    let columns: Vec<String> = serde_json::from_str(&contents)
        .with_context(|| format!("Model schema in {} is not a list of names", path.display()))?;
    Ok(columns)
}
