//! Validation and markup for the `<itimeline>` wiki tag.
//!
//! Tag attributes go through the option registry ([`options`]), the tag body
//! through the event line parser ([`event`]), and the results are assembled
//! into a [`RenderPayload`] and container markup by a per-page
//! [`RenderContext`]. Nothing here fails a page render: bad input is dropped
//! and, if asked, reported through [`Diagnostics`].

pub mod args;
pub mod diagnostics;
pub mod event;
pub mod expand;
pub mod options;
pub mod payload;
pub mod render;
pub mod tag;
pub mod tracing;
pub mod validate;

pub use args::TagArguments;
pub use diagnostics::{Diagnostics, LineError, Rejection};
pub use event::{EndDatePolicy, EventParser, TimelineEvent, parse_events, parse_line};
pub use expand::{ContentExpander, NoExpansion};
pub use options::{
    OptionKind, OptionSpec, OptionValue, REGISTRY, TimelineOptions, build_options,
    build_options_with, validate_argument,
};
pub use payload::{RenderError, RenderPayload};
pub use render::{OutputMode, RenderContext, RenderOptions, TagReport};
pub use tag::{TagMatch, find_tags, parse_attributes, render_page};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use validate::{IntegerRules, IsoDateTime, Locale, TimelineStyle};
