use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

pub const FEATURE_COUNT: usize = 12;

/// Named fields of the classifier's input record, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureName {
    Baseline,
    LongTermVariability,
    ShortTermVariability,
    AbnormalShortTermPct,
    AbnormalLongTermPct,
    Accelerations,
    UterineContractions,
    FetalMovements,
    LightDecelerations,
    SevereDecelerations,
    ProlongedDecelerations,
    RepetitiveDecelerations,
}

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::Baseline,
        FeatureName::LongTermVariability,
        FeatureName::ShortTermVariability,
        FeatureName::AbnormalShortTermPct,
        FeatureName::AbnormalLongTermPct,
        FeatureName::Accelerations,
        FeatureName::UterineContractions,
        FeatureName::FetalMovements,
        FeatureName::LightDecelerations,
        FeatureName::SevereDecelerations,
        FeatureName::ProlongedDecelerations,
        FeatureName::RepetitiveDecelerations,
    ];

    /// Column name the classifier was trained with
    pub fn column(self) -> &'static str {
        match self {
            FeatureName::Baseline => "Baseline value (SisPorto)",
            FeatureName::LongTermVariability => "Mean value of long-term variability (SisPorto)",
            FeatureName::ShortTermVariability => "Mean value of short-term variability (SisPorto)",
            FeatureName::AbnormalShortTermPct => {
                "Percentage time with abnormal short-term variability (SisPorto)"
            }
            FeatureName::AbnormalLongTermPct => {
                "Percentage time with abnormal long-term variability (SisPorto)"
            }
            FeatureName::Accelerations => "Accelerations (SisPorto)",
            FeatureName::UterineContractions => "Uterine contractions (SisPorto)",
            FeatureName::FetalMovements => "Fetal movements (SisPorto)",
            FeatureName::LightDecelerations => "Light decelerations (raw)",
            FeatureName::SevereDecelerations => "Severe decelerations (raw)",
            FeatureName::ProlongedDecelerations => "Prolonged decelerations (raw)",
            FeatureName::RepetitiveDecelerations => "Repetitive decelerations (raw)",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.column() == column)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Value of a single feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Computed(f64),
    /// Event detector not implemented yet; presented to consumers as 0
    NotComputed,
}

impl FeatureValue {
    pub fn as_f64(self) -> f64 {
        match self {
            FeatureValue::Computed(v) => v,
            FeatureValue::NotComputed => 0.0,
        }
    }

    pub fn is_computed(self) -> bool {
        matches!(self, FeatureValue::Computed(_))
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            FeatureValue::Computed(v) => serializer.serialize_f64(v),
            FeatureValue::NotComputed => serializer.serialize_u8(0),
        }
    }
}

/// Fixed-schema feature record: always all twelve fields, always in order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMapping {
    values: [FeatureValue; FEATURE_COUNT],
}

impl FeatureMapping {
    /// Mapping with every field marked not computed
    pub fn placeholder() -> Self {
        Self {
            values: [FeatureValue::NotComputed; FEATURE_COUNT],
        }
    }

    pub(crate) fn set(&mut self, name: FeatureName, value: FeatureValue) {
        self.values[name.index()] = value;
    }

    pub fn get(&self, name: FeatureName) -> FeatureValue {
        self.values[name.index()]
    }

    /// Looks a field up by its classifier column name
    pub fn get_column(&self, column: &str) -> Option<FeatureValue> {
        FeatureName::from_column(column).map(|name| self.get(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, FeatureValue)> + '_ {
        FeatureName::ALL.into_iter().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Values in field order, placeholders as 0
    pub fn to_vector(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.as_f64()).collect()
    }
}

impl Serialize for FeatureMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.column(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_and_ordered() {
        for (i, name) in FeatureName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
            assert_eq!(FeatureName::from_column(name.column()), Some(*name));
        }
        assert_eq!(FeatureName::from_column("Histogram width"), None);
    }

    #[test]
    fn test_serializes_in_schema_order() {
        let mut mapping = FeatureMapping::placeholder();
        mapping.set(FeatureName::Baseline, FeatureValue::Computed(132.5));

        let json = serde_json::to_string(&mapping).unwrap();
        assert!(json.starts_with(r#"{"Baseline value (SisPorto)":132.5,"#));
        assert!(json.ends_with(r#""Repetitive decelerations (raw)":0}"#));

        let positions: Vec<usize> = FeatureName::ALL
            .iter()
            .map(|n| json.find(n.column()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_placeholder_reads_as_zero() {
        let mapping = FeatureMapping::placeholder();
        assert_eq!(mapping.to_vector(), vec![0.0; FEATURE_COUNT]);
        assert!(!mapping.get(FeatureName::Accelerations).is_computed());
        assert_eq!(
            mapping.get_column("Fetal movements (SisPorto)"),
            Some(FeatureValue::NotComputed)
        );
    }
}
