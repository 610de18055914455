use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A single value from a color scale's domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Number(f32),
    Timestamp(NaiveDateTime),
    Category(String),
}

impl DomainValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            DomainValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            DomainValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Name of the value kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            DomainValue::Number(_) => "number",
            DomainValue::Timestamp(_) => "timestamp",
            DomainValue::Category(_) => "category",
        }
    }
}

impl Display for DomainValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainValue::Number(v) => write!(f, "{v}"),
            DomainValue::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S")),
            DomainValue::Category(v) => write!(f, "{v}"),
        }
    }
}

impl From<f32> for DomainValue {
    fn from(value: f32) -> Self {
        DomainValue::Number(value)
    }
}

impl From<NaiveDateTime> for DomainValue {
    fn from(value: NaiveDateTime) -> Self {
        DomainValue::Timestamp(value)
    }
}

impl From<&str> for DomainValue {
    fn from(value: &str) -> Self {
        DomainValue::Category(value.to_string())
    }
}

impl From<String> for DomainValue {
    fn from(value: String) -> Self {
        DomainValue::Category(value)
    }
}
