use serde::Serialize;
use std::fmt;

/// Clinical class reported to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Normal,
    Suspect,
    Pathologic,
    Unknown,
}

impl Classification {
    pub fn from_value(value: i64) -> Self {
        match value {
            1 => Classification::Normal,
            2 => Classification::Suspect,
            3 => Classification::Pathologic,
            _ => Classification::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Normal => "Normal",
            Classification::Suspect => "Suspect",
            Classification::Pathologic => "Pathologic",
            Classification::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw model output together with its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub value: i64,
    pub label: Classification,
}

impl Prediction {
    pub fn from_value(value: i64) -> Self {
        Self {
            value,
            label: Classification::from_value(value),
        }
    }
}
