//! Content expansion seam.
//!
//! Wiki engines expand templates and transclusions inside a tag body before
//! the body is split into event lines. That machinery belongs to the host;
//! this crate only sees it through [`ContentExpander`]. Any
//! `Fn(&str) -> String` closure is an expander too.

use std::borrow::Cow;

/// Expands host markup (templates, transclusions) inside a tag body.
pub trait ContentExpander {
    fn expand<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Leaves the body untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExpansion;

impl ContentExpander for NoExpansion {
    fn expand<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

impl<F> ContentExpander for F
where
    F: Fn(&str) -> String,
{
    fn expand<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Owned(self(text))
    }
}
