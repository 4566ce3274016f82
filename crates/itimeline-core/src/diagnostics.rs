//! Optional visibility into what validation dropped.
//!
//! Rendering never fails because of bad tag content: invalid options fall
//! back to the widget's defaults and invalid event lines are skipped. Callers
//! that want to know what was discarded can collect [`Rejection`]s into a
//! [`Diagnostics`] value; the rendered output is the same either way.

use thiserror::Error;

/// Why an event line (or part of it) was not used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line did not split into 2 or 3 `|`-separated fields.
    #[error("expected 2 or 3 `|`-separated fields, found {0}")]
    FieldCount(usize),

    /// The date field held more than one `/`.
    #[error("expected `start` or `start/end`, found {0} dates")]
    DateCount(usize),

    /// The start date did not parse.
    #[error("invalid start date {0:?}")]
    InvalidStart(String),

    /// The end date did not parse.
    #[error("invalid end date {0:?}")]
    InvalidEnd(String),
}

/// A single dropped option or event line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A recognized option had a value its validator refused.
    #[error("option `{name}`: invalid {kind} value {value:?}")]
    InvalidOption {
        name: &'static str,
        kind: &'static str,
        value: String,
    },

    /// An event line was dropped.
    #[error("line {number}: {reason}")]
    Line {
        /// 1-based line number within the expanded tag body.
        number: usize,
        text: String,
        reason: LineError,
    },

    /// An event line was kept as a point event because its end date did not parse.
    #[error("line {number}: invalid end date {value:?}, kept as a point event")]
    DegradedEnd { number: usize, value: String },
}

impl Rejection {
    /// Returns `true` if a whole event line was dropped.
    pub fn drops_line(&self) -> bool {
        matches!(self, Self::Line { .. })
    }
}

/// Collected rejections, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Rejection>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rejection: Rejection) {
        self.entries.push(rejection);
    }

    pub fn entries(&self) -> &[Rejection] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rejection> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Rejection;
    type IntoIter = std::slice::Iter<'a, Rejection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
