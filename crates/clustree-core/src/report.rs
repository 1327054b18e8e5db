//! Text report output.
//!
//! A [`ReportSink`] accepts inline comment fragments and line ends, and can
//! restore normalized vectors.
//! [`TextWriterStream`] is the stock sink writing `# `-prefixed lines into
//! any [`fmt::Write`].

use std::fmt;
use std::sync::Arc;

use clustree_common::{NormalizationError, RealVector, ReportError};

use crate::normalization::Normalization;

pub trait ReportSink {
    /// Append inline text to the current comment line.
    fn comment_print(&mut self, text: &str) -> fmt::Result;

    /// Terminate the current comment line.
    fn comment_end_line(&mut self) -> fmt::Result;

    fn comment_print_ln(&mut self, text: &str) -> fmt::Result {
        self.comment_print(text)?;
        self.comment_end_line()
    }

    /// Undo the normalization the analyzed data went through.
    fn normalization_restore(&self, vector: &RealVector) -> Result<RealVector, NormalizationError> {
        Ok(vector.clone())
    }

    /// Whether model fragments should be appended to cluster reports.
    fn include_model(&self) -> bool {
        true
    }
}

/// Something that can describe itself to a [`ReportSink`].
pub trait TextWriteable {
    fn write_to_text(&self, out: &mut dyn ReportSink) -> Result<(), ReportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWriterConfig {
    pub comment_prefix: String,
    pub include_model: bool,
}

impl Default for TextWriterConfig {
    fn default() -> Self {
        Self {
            comment_prefix: "# ".to_string(),
            include_model: true,
        }
    }
}

impl TextWriterConfig {
    /// No comment prefix; lines are written as-is.
    pub fn plain() -> Self {
        Self {
            comment_prefix: String::new(),
            ..Default::default()
        }
    }
}

pub struct TextWriterStream<W> {
    inner: W,
    config: TextWriterConfig,
    normalization: Option<Arc<dyn Normalization>>,
    line: String,
}

impl<W: fmt::Write> TextWriterStream<W> {
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, TextWriterConfig::default())
    }

    pub fn with_config(inner: W, config: TextWriterConfig) -> Self {
        Self {
            inner,
            config,
            normalization: None,
            line: String::new(),
        }
    }

    pub fn with_normalization(mut self, normalization: Arc<dyn Normalization>) -> Self {
        self.normalization = Some(normalization);
        self
    }

    pub fn config(&self) -> &TextWriterConfig {
        &self.config
    }

    /// Flush a pending partial line and hand back the writer.
    pub fn finish(mut self) -> Result<W, fmt::Error> {
        if !self.line.is_empty() {
            self.comment_end_line()?;
        }
        Ok(self.inner)
    }
}

impl<W: fmt::Write> ReportSink for TextWriterStream<W> {
    fn comment_print(&mut self, text: &str) -> fmt::Result {
        self.line.push_str(text);
        Ok(())
    }

    fn comment_end_line(&mut self) -> fmt::Result {
        self.inner.write_str(&self.config.comment_prefix)?;
        self.inner.write_str(&self.line)?;
        self.inner.write_char('\n')?;
        self.line.clear();
        Ok(())
    }

    fn normalization_restore(&self, vector: &RealVector) -> Result<RealVector, NormalizationError> {
        match &self.normalization {
            Some(normalization) => normalization.restore(vector),
            None => Ok(vector.clone()),
        }
    }

    fn include_model(&self) -> bool {
        self.config.include_model
    }
}

impl<W: fmt::Debug> fmt::Debug for TextWriterStream<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextWriterStream")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .field("normalization", &self.normalization)
            .field("line", &self.line)
            .finish()
    }
}
