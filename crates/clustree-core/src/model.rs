//! Descriptive cluster models.
//!
//! A model summarizes a cluster (its mean, its covariance, ...). Every model
//! can suggest a short label; reporting is an optional capability exposed
//! through [`Model::as_text_writeable`] and checked before use.

use std::any::Any;
use std::borrow::Cow;
use std::fmt::Debug;

use clustree_common::{Matrix, RealVector, ReportError};

use crate::report::{ReportSink, TextWriteable};

pub trait Model: Debug + Send + Sync {
    fn suggested_label(&self) -> Cow<'_, str>;

    /// Concrete type name, used in report headers.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_text_writeable(&self) -> Option<&dyn TextWriteable> {
        None
    }

    /* down-cast hook */
    fn as_any(&self) -> &dyn Any;
}

fn write_model_class(model: &dyn Model, out: &mut dyn ReportSink) -> Result<(), ReportError> {
    out.comment_print_ln(&format!("Model class: {}", model.type_name()))?;
    Ok(())
}

/// Model without payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseModel;

impl Model for BaseModel {
    fn suggested_label(&self) -> Cow<'_, str> {
        Cow::Borrowed("Cluster")
    }

    fn as_text_writeable(&self) -> Option<&dyn TextWriteable> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TextWriteable for BaseModel {
    fn write_to_text(&self, out: &mut dyn ReportSink) -> Result<(), ReportError> {
        write_model_class(self, out)
    }
}

/// Cluster represented by its mean (k-means and friends).
#[derive(Debug, Clone, PartialEq)]
pub struct MeanModel {
    pub mean: RealVector,
}

impl MeanModel {
    pub fn new(mean: RealVector) -> Self {
        Self { mean }
    }
}

impl Model for MeanModel {
    fn suggested_label(&self) -> Cow<'_, str> {
        Cow::Borrowed("MeanCluster")
    }

    fn as_text_writeable(&self) -> Option<&dyn TextWriteable> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TextWriteable for MeanModel {
    fn write_to_text(&self, out: &mut dyn ReportSink) -> Result<(), ReportError> {
        write_model_class(self, out)?;
        let mean = out.normalization_restore(&self.mean)?;
        out.comment_print_ln(&format!("Mean: {mean}"))?;
        Ok(())
    }
}

/// Gaussian mixture component: mean and full covariance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct EmModel {
    pub mean: RealVector,
    pub covariance: Matrix,
}

impl EmModel {
    pub fn new(mean: RealVector, covariance: Matrix) -> Self {
        Self { mean, covariance }
    }
}

impl Model for EmModel {
    fn suggested_label(&self) -> Cow<'_, str> {
        Cow::Borrowed("EMCluster")
    }

    fn as_text_writeable(&self) -> Option<&dyn TextWriteable> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TextWriteable for EmModel {
    fn write_to_text(&self, out: &mut dyn ReportSink) -> Result<(), ReportError> {
        write_model_class(self, out)?;
        let mean = out.normalization_restore(&self.mean)?;
        out.comment_print_ln(&format!("Mean: {mean}"))?;
        out.comment_print_ln(&format!("Covariance Matrix: {}", self.covariance))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TextWriterStream;

    #[test]
    fn labels() {
        assert_eq!(BaseModel.suggested_label(), "Cluster");
        assert_eq!(MeanModel::new(RealVector::zeros(2)).suggested_label(), "MeanCluster");
        let em = EmModel::new(RealVector::zeros(2), Matrix::identity(2));
        assert_eq!(em.suggested_label(), "EMCluster");
    }

    #[test]
    fn type_name_dispatches_to_concrete_type() {
        let model: Box<dyn Model> = Box::new(BaseModel);
        assert!(model.type_name().ends_with("BaseModel"));
        assert!(model.as_any().downcast_ref::<BaseModel>().is_some());
    }

    #[test]
    fn em_fragment() {
        let em = EmModel::new(RealVector::from([1.0, 2.0]), Matrix::identity(2));
        let mut out = TextWriterStream::new(String::new());
        em.write_to_text(&mut out).unwrap();
        let text = out.finish().unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("# Model class: ") && lines[0].ends_with("EmModel"));
        assert_eq!(lines[1], "# Mean: 1 2");
        assert_eq!(lines[2], "# Covariance Matrix: [[1, 0], [0, 1]]");
    }
}
