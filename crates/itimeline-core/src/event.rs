//! Event lines in the tag body.
//!
//! Each non-blank line of an `<itimeline>` body describes one event:
//!
//! ```text
//! start|body
//! start/end|body
//! start|group|body
//! start/end|group|body
//! ```
//!
//! Dates use the same format as datetime options (see
//! [`crate::validate::datetime`]). Lines that do not fit are skipped.
//!
//! # Example
//!
//! ```
//! use itimeline_core::event::parse_line;
//!
//! let event = parse_line("2024-01-01/2024-02-01|Phase 1|Build").unwrap();
//! assert_eq!(event.start.as_str(), "2024-01-01T00:00:00Z");
//! assert_eq!(event.group.as_deref(), Some("Phase 1"));
//! assert_eq!(event.body, "Build");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::{Diagnostics, LineError, Rejection};
use crate::expand::ContentExpander;
use crate::validate::IsoDateTime;

/// One accepted timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub start: IsoDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<IsoDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub body: String,
}

impl TimelineEvent {
    /// Returns `true` if the event spans an interval rather than a point in time.
    pub fn is_range(&self) -> bool {
        self.end.is_some()
    }
}

/// What to do with a line whose end date does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndDatePolicy {
    /// Keep the line as a point event without an end.
    #[default]
    Degrade,
    /// Drop the whole line.
    RejectLine,
}

enum LineOutcome {
    Accepted(TimelineEvent),
    Degraded(TimelineEvent, String),
    Rejected(LineError),
}

/// Splits tag bodies into [`TimelineEvent`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventParser {
    end_dates: EndDatePolicy,
}

impl EventParser {
    pub fn new(end_dates: EndDatePolicy) -> Self {
        Self { end_dates }
    }

    pub fn end_dates(&self) -> EndDatePolicy {
        self.end_dates
    }

    /// Parses a single line, returning `None` if it is not a valid event.
    pub fn parse_line(&self, line: &str) -> Option<TimelineEvent> {
        match self.check_line(line) {
            LineOutcome::Accepted(event) | LineOutcome::Degraded(event, _) => Some(event),
            LineOutcome::Rejected(_) => None,
        }
    }

    /// Expands `raw_body` and parses each line, keeping valid events in order.
    pub fn parse_events(
        &self,
        raw_body: &str,
        expander: &dyn ContentExpander,
    ) -> Vec<TimelineEvent> {
        self.parse_events_with(raw_body, expander, &mut Diagnostics::new())
    }

    /// Like [`EventParser::parse_events`], recording skipped lines in `diagnostics`.
    pub fn parse_events_with(
        &self,
        raw_body: &str,
        expander: &dyn ContentExpander,
        diagnostics: &mut Diagnostics,
    ) -> Vec<TimelineEvent> {
        let expanded = expander.expand(raw_body);
        let mut events = Vec::new();

        for (index, line) in expanded.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let number = index + 1;

            match self.check_line(line) {
                LineOutcome::Accepted(event) => events.push(event),
                LineOutcome::Degraded(event, value) => {
                    debug!(line = number, end = %value, "Dropping invalid end date");
                    diagnostics.push(Rejection::DegradedEnd { number, value });
                    events.push(event);
                }
                LineOutcome::Rejected(reason) => {
                    debug!(line = number, %reason, "Skipping event line");
                    diagnostics.push(Rejection::Line {
                        number,
                        text: line.to_string(),
                        reason,
                    });
                }
            }
        }

        events
    }

    fn check_line(&self, line: &str) -> LineOutcome {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        let (dates, group, body) = match fields.as_slice() {
            [dates, body] => (*dates, None, *body),
            [dates, group, body] => (*dates, Some(*group), *body),
            _ => return LineOutcome::Rejected(LineError::FieldCount(fields.len())),
        };

        let parts: Vec<&str> = dates.split('/').map(str::trim).collect();
        let (start, end) = match parts.as_slice() {
            [start] => (*start, None),
            [start, end] => (*start, Some(*end)),
            _ => return LineOutcome::Rejected(LineError::DateCount(parts.len())),
        };

        let Some(start_at) = IsoDateTime::parse(start) else {
            return LineOutcome::Rejected(LineError::InvalidStart(start.to_string()));
        };

        let mut event = TimelineEvent {
            start: start_at,
            end: None,
            group: group.filter(|g| !g.is_empty()).map(str::to_string),
            body: body.to_string(),
        };

        match end {
            None => LineOutcome::Accepted(event),
            Some(raw) => match IsoDateTime::parse(raw) {
                Some(end_at) => {
                    event.end = Some(end_at);
                    LineOutcome::Accepted(event)
                }
                None => match self.end_dates {
                    EndDatePolicy::Degrade => LineOutcome::Degraded(event, raw.to_string()),
                    EndDatePolicy::RejectLine => {
                        LineOutcome::Rejected(LineError::InvalidEnd(raw.to_string()))
                    }
                },
            },
        }
    }
}

/// Parses a single line with the default end-date policy.
pub fn parse_line(line: &str) -> Option<TimelineEvent> {
    EventParser::default().parse_line(line)
}

/// Parses a whole tag body with the default end-date policy.
pub fn parse_events(raw_body: &str, expander: &dyn ContentExpander) -> Vec<TimelineEvent> {
    EventParser::default().parse_events(raw_body, expander)
}
