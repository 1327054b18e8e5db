use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::RealVector;

/// A per-item value as projected into reports.
///
/// Heterogeneous associations (scores, labels, flags, vectors) are
/// converted into this type when they share one annotation projection.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Int(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    Vector(RealVector),
}

impl AnnotationValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnnotationValue::Int(i) => Some(*i as f64),
            AnnotationValue::Number(n) => Some(*n),
            AnnotationValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            AnnotationValue::Text(_) | AnnotationValue::Vector(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnnotationValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::Int(i) => write!(f, "{i}"),
            AnnotationValue::Number(n) => write!(f, "{n}"),
            AnnotationValue::Text(s) => write!(f, "{s}"),
            AnnotationValue::Boolean(b) => write!(f, "{b}"),
            AnnotationValue::Vector(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for AnnotationValue {
    fn from(v: i64) -> Self {
        AnnotationValue::Int(v)
    }
}

impl From<i32> for AnnotationValue {
    fn from(v: i32) -> Self {
        AnnotationValue::Int(v.into())
    }
}

impl From<u32> for AnnotationValue {
    fn from(v: u32) -> Self {
        AnnotationValue::Int(v.into())
    }
}

impl From<f64> for AnnotationValue {
    fn from(v: f64) -> Self {
        AnnotationValue::Number(v)
    }
}

impl From<bool> for AnnotationValue {
    fn from(v: bool) -> Self {
        AnnotationValue::Boolean(v)
    }
}

impl From<String> for AnnotationValue {
    fn from(v: String) -> Self {
        AnnotationValue::Text(v)
    }
}

impl From<&str> for AnnotationValue {
    fn from(v: &str) -> Self {
        AnnotationValue::Text(v.to_owned())
    }
}

impl From<RealVector> for AnnotationValue {
    fn from(v: RealVector) -> Self {
        AnnotationValue::Vector(v)
    }
}
