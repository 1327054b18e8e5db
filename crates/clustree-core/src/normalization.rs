//! Reversible feature normalization.
//!
//! Algorithms run on normalized vectors; reports restore model vectors
//! into data space before printing them.

use std::fmt::Debug;

use clustree_common::{NormalizationError, RealVector};

pub trait Normalization: Debug + Send + Sync {
    fn normalize(&self, vector: &RealVector) -> Result<RealVector, NormalizationError>;

    /// Map a normalized vector back into data space.
    fn restore(&self, vector: &RealVector) -> Result<RealVector, NormalizationError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityNormalization;

impl Normalization for IdentityNormalization {
    fn normalize(&self, vector: &RealVector) -> Result<RealVector, NormalizationError> {
        Ok(vector.clone())
    }

    fn restore(&self, vector: &RealVector) -> Result<RealVector, NormalizationError> {
        Ok(vector.clone())
    }
}

/// Per-dimension linear scaling of `[min, max]` onto `[0, 1]`.
///
/// A dimension with `min == max` normalizes to `0` and restores to `min`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxNormalization {
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl MinMaxNormalization {
    pub fn new(mins: Vec<f64>, maxs: Vec<f64>) -> Result<Self, NormalizationError> {
        if mins.len() != maxs.len() {
            return Err(NormalizationError::DimensionMismatch {
                expected: mins.len(),
                actual: maxs.len(),
            });
        }
        Ok(Self { mins, maxs })
    }

    /// Fit bounds to the observed range of `data`.
    ///
    /// Returns `None` for empty input.
    pub fn fit(data: &[RealVector]) -> Result<Option<Self>, NormalizationError> {
        let Some(first) = data.first() else {
            return Ok(None);
        };
        let mut mins = first.values().to_vec();
        let mut maxs = mins.clone();
        for vector in &data[1..] {
            check_dimensions(mins.len(), vector)?;
            for (d, &v) in vector.values().iter().enumerate() {
                mins[d] = mins[d].min(v);
                maxs[d] = maxs[d].max(v);
            }
        }
        Ok(Some(Self { mins, maxs }))
    }

    pub fn dim(&self) -> usize {
        self.mins.len()
    }
}

impl Normalization for MinMaxNormalization {
    fn normalize(&self, vector: &RealVector) -> Result<RealVector, NormalizationError> {
        check_dimensions(self.dim(), vector)?;
        vector
            .values()
            .iter()
            .enumerate()
            .map(|(d, &v)| {
                let v = finite(d, v)?;
                let range = self.maxs[d] - self.mins[d];
                Ok(if range > 0.0 {
                    (v - self.mins[d]) / range
                } else {
                    0.0
                })
            })
            .collect()
    }

    fn restore(&self, vector: &RealVector) -> Result<RealVector, NormalizationError> {
        check_dimensions(self.dim(), vector)?;
        vector
            .values()
            .iter()
            .enumerate()
            .map(|(d, &v)| Ok(finite(d, v)? * (self.maxs[d] - self.mins[d]) + self.mins[d]))
            .collect()
    }
}

fn check_dimensions(expected: usize, vector: &RealVector) -> Result<(), NormalizationError> {
    if vector.dim() != expected {
        return Err(NormalizationError::DimensionMismatch {
            expected,
            actual: vector.dim(),
        });
    }
    Ok(())
}

fn finite(dimension: usize, value: f64) -> Result<f64, NormalizationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NormalizationError::NonNumeric { dimension })
    }
}
