//! The render payload handed to the client-side timeline.

use serde::Serialize;
use thiserror::Error;

use crate::event::TimelineEvent;
use crate::options::TimelineOptions;

/// Errors that can occur while serializing a payload.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize timeline payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Options and events for one timeline. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPayload {
    options: TimelineOptions,
    events: Vec<TimelineEvent>,
}

impl RenderPayload {
    pub fn new(options: TimelineOptions, events: Vec<TimelineEvent>) -> Self {
        Self { options, events }
    }

    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Serializes the whole payload as compact JSON.
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes only the options, as compact JSON.
    pub fn options_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string(&self.options)?)
    }
}
