//! Per-page rendering of `<itimeline>` tags.
//!
//! A [`RenderContext`] lives for exactly one page render. It owns the
//! element-id counter, so ids are unique within a page and two pages rendered
//! side by side never interfere, and it collects the page-scoped config blobs
//! and diagnostics produced along the way.
//!
//! The emitted container is what the client script looks for:
//!
//! ```text
//! <div id="itimeline-1" class="itimeline">
//! <div class="itl-event"><div class="itl-start">...</div><div class="itl-body">...</div></div>
//! <div class="itl-config">{"selectable":false,...}</div>
//! </div>
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::args::TagArguments;
use crate::diagnostics::Diagnostics;
use crate::event::{EndDatePolicy, EventParser, TimelineEvent};
use crate::expand::ContentExpander;
use crate::options::build_options_with;
use crate::payload::{RenderError, RenderPayload};

/// Class on the container element.
pub const CONTAINER_CLASS: &str = "itimeline";
/// Class on each event element.
pub const EVENT_CLASS: &str = "itl-event";
pub const START_CLASS: &str = "itl-start";
pub const END_CLASS: &str = "itl-end";
pub const GROUP_CLASS: &str = "itl-group";
pub const BODY_CLASS: &str = "itl-body";
/// Class on the element holding the serialized options.
pub const CONFIG_CLASS: &str = "itl-config";

/// Where the client finds the timeline data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Events and options are written as child elements of the container.
    #[default]
    Inline,
    /// The container is empty; the payload is registered as page config keyed by its id.
    ConfigVars,
}

/// Settings for a render context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output mode.
    pub mode: OutputMode,
    /// Prefix for element ids (`{prefix}-{n}`).
    pub id_prefix: String,
    /// Handling of event lines with an unparseable end date.
    pub end_dates: EndDatePolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::Inline,
            id_prefix: CONTAINER_CLASS.to_string(),
            end_dates: EndDatePolicy::Degrade,
        }
    }
}

impl RenderOptions {
    /// Builder: set output mode.
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: set id prefix.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Builder: set end-date policy.
    pub fn with_end_dates(mut self, policy: EndDatePolicy) -> Self {
        self.end_dates = policy;
        self
    }
}

/// Diagnostics for one rendered tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagReport {
    pub element_id: String,
    pub events: usize,
    pub diagnostics: Diagnostics,
}

/// State for rendering the tags of one page.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    options: RenderOptions,
    counter: u32,
    config_vars: BTreeMap<String, String>,
    reports: Vec<TagReport>,
}

impl RenderContext {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Returns the next element id. The counter starts at zero and is
    /// incremented before use, so the first id is `{prefix}-1`.
    pub fn next_element_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.options.id_prefix, self.counter)
    }

    /// Page-scoped config blobs registered in [`OutputMode::ConfigVars`], keyed by element id.
    pub fn config_vars(&self) -> &BTreeMap<String, String> {
        &self.config_vars
    }

    pub fn config_var(&self, element_id: &str) -> Option<&str> {
        self.config_vars.get(element_id).map(String::as_str)
    }

    /// One report per rendered tag, in render order.
    pub fn reports(&self) -> &[TagReport] {
        &self.reports
    }

    /// Validates a tag's arguments and body into a payload, without emitting markup.
    pub fn build_payload(
        &self,
        args: &TagArguments,
        body: Option<&str>,
        expander: &dyn ContentExpander,
        diagnostics: &mut Diagnostics,
    ) -> RenderPayload {
        let options = build_options_with(args, diagnostics);
        let events = match body {
            Some(body) => EventParser::new(self.options.end_dates).parse_events_with(
                body,
                expander,
                diagnostics,
            ),
            None => Vec::new(),
        };
        RenderPayload::new(options, events)
    }

    /// Renders one tag occurrence to markup.
    ///
    /// This never fails: if the payload cannot be serialized the tag degrades
    /// to an empty container and a warning is logged.
    pub fn render_tag(
        &mut self,
        args: &TagArguments,
        body: Option<&str>,
        expander: &dyn ContentExpander,
    ) -> String {
        let element_id = self.next_element_id();
        let mut diagnostics = Diagnostics::new();
        let payload = self.build_payload(args, body, expander, &mut diagnostics);

        let markup = match self.emit(&element_id, &payload) {
            Ok(markup) => markup,
            Err(e) => {
                warn!(element_id = %element_id, error = %e, "Rendering empty timeline");
                container(&element_id, "")
            }
        };

        debug!(
            element_id = %element_id,
            events = payload.events().len(),
            options = payload.options().len(),
            rejected = diagnostics.len(),
            "Rendered timeline"
        );

        self.reports.push(TagReport {
            element_id,
            events: payload.events().len(),
            diagnostics,
        });

        markup
    }

    fn emit(&mut self, element_id: &str, payload: &RenderPayload) -> Result<String, RenderError> {
        match self.options.mode {
            OutputMode::Inline => inline_markup(element_id, payload),
            OutputMode::ConfigVars => {
                let json = payload.to_json()?;
                self.config_vars.insert(element_id.to_string(), json);
                Ok(container(element_id, ""))
            }
        }
    }
}

/// Builds the inline container: one child per event plus the options blob.
pub fn inline_markup(element_id: &str, payload: &RenderPayload) -> Result<String, RenderError> {
    let mut inner = String::from("\n");
    for event in payload.events() {
        inner.push_str(&event_markup(event));
        inner.push('\n');
    }
    inner.push_str(&element(CONFIG_CLASS, &payload.options_json()?));
    inner.push('\n');

    Ok(container(element_id, &inner))
}

/// Builds the element for a single event.
pub fn event_markup(event: &TimelineEvent) -> String {
    let mut inner = element(START_CLASS, event.start.as_str());
    if let Some(ref end) = event.end {
        inner.push_str(&element(END_CLASS, end.as_str()));
    }
    if let Some(ref group) = event.group {
        inner.push_str(&element(GROUP_CLASS, group));
    }
    inner.push_str(&element(BODY_CLASS, &event.body));

    format!("<div class=\"{}\">{}</div>", EVENT_CLASS, inner)
}

fn element(class: &str, text: &str) -> String {
    format!("<div class=\"{}\">{}</div>", class, escape_text(text))
}

fn container(element_id: &str, inner: &str) -> String {
    format!(
        "<div id=\"{}\" class=\"{}\">{}</div>",
        escape_attr(element_id),
        CONTAINER_CLASS,
        inner
    )
}

/// Escapes text content. The client reads `innerText`, so escaped JSON round-trips.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes an attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::NoExpansion;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut ctx = RenderContext::default();
        assert_eq!(ctx.next_element_id(), "itimeline-1");
        assert_eq!(ctx.next_element_id(), "itimeline-2");
    }

    #[test]
    fn contexts_do_not_share_counters() {
        let mut first = RenderContext::default();
        let mut second = RenderContext::default();
        assert_eq!(first.next_element_id(), "itimeline-1");
        assert_eq!(first.next_element_id(), "itimeline-2");
        assert_eq!(second.next_element_id(), "itimeline-1");
    }

    #[test]
    fn custom_prefix() {
        let mut ctx = RenderContext::new(RenderOptions::default().with_id_prefix("tl"));
        assert_eq!(ctx.next_element_id(), "tl-1");
    }

    #[test]
    fn inline_markup_snapshot() {
        let mut ctx = RenderContext::default();
        let args = TagArguments::new().with("height", "300px");
        let body = "2024-01-01|Launch\n2024-01-01/2024-02-01|Phase 1|Build & test";
        let markup = ctx.render_tag(&args, Some(body), &NoExpansion);

        insta::assert_snapshot!(markup, @r#"
        <div id="itimeline-1" class="itimeline">
        <div class="itl-event"><div class="itl-start">2024-01-01T00:00:00Z</div><div class="itl-body">Launch</div></div>
        <div class="itl-event"><div class="itl-start">2024-01-01T00:00:00Z</div><div class="itl-end">2024-02-01T00:00:00Z</div><div class="itl-group">Phase 1</div><div class="itl-body">Build &amp; test</div></div>
        <div class="itl-config">{"height":"300px","selectable":false,"timeChangeable":false}</div>
        </div>
        "#);
    }

    #[test]
    fn markup_escapes_html_in_bodies() {
        let event = crate::event::parse_line("2024-01-01|<script>x</script>").unwrap();
        let markup = event_markup(&event);
        assert!(markup.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!markup.contains("<script>"));
    }

    #[test]
    fn quotes_are_escaped_only_in_attributes() {
        assert_eq!(escape_text(r#"say "hi" & 'bye'"#), r#"say "hi" &amp; 'bye'"#);
        assert_eq!(escape_attr(r#"a"b'c"#), "a&quot;b&#x27;c");
    }

    #[test]
    fn config_vars_mode_registers_payload() {
        let mut ctx = RenderContext::new(RenderOptions::default().with_mode(OutputMode::ConfigVars));
        let markup = ctx.render_tag(&TagArguments::new(), Some("2024-01-01|Launch"), &NoExpansion);

        assert_eq!(markup, r#"<div id="itimeline-1" class="itimeline"></div>"#);
        let json: serde_json::Value =
            serde_json::from_str(ctx.config_var("itimeline-1").unwrap()).unwrap();
        assert_eq!(json["events"][0]["body"], "Launch");
        assert_eq!(json["options"]["selectable"], false);
        assert_eq!(ctx.config_vars().len(), 1);
    }

    #[test]
    fn self_closing_tag_has_no_events() {
        let mut ctx = RenderContext::default();
        let markup = ctx.render_tag(&TagArguments::new(), None, &NoExpansion);
        assert!(!markup.contains(EVENT_CLASS));
        assert!(markup.contains(CONFIG_CLASS));
        assert_eq!(ctx.reports()[0].events, 0);
    }

    #[test]
    fn reports_collect_rejections_per_tag() {
        let mut ctx = RenderContext::default();
        ctx.render_tag(
            &TagArguments::new().with("zoommin", "soon"),
            Some("2024-01-01|Ok\nbroken"),
            &NoExpansion,
        );
        ctx.render_tag(&TagArguments::new(), Some("2024-01-01|Ok"), &NoExpansion);

        let reports = ctx.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].element_id, "itimeline-1");
        assert_eq!(reports[0].events, 1);
        assert_eq!(reports[0].diagnostics.len(), 2);
        assert!(reports[1].diagnostics.is_empty());
    }

    #[test]
    fn strict_end_dates_drop_the_line() {
        let mut ctx =
            RenderContext::new(RenderOptions::default().with_end_dates(EndDatePolicy::RejectLine));
        ctx.render_tag(&TagArguments::new(), Some("2024-01-01/oops|Bad"), &NoExpansion);
        assert_eq!(ctx.reports()[0].events, 0);
        assert!(ctx.reports()[0].diagnostics.entries()[0].drops_line());
    }

    #[test]
    fn render_options_deserialize_with_defaults() {
        let options: RenderOptions =
            serde_json::from_str(r#"{"mode":"config-vars","end_dates":"reject-line"}"#).unwrap();
        assert_eq!(options.mode, OutputMode::ConfigVars);
        assert_eq!(options.end_dates, EndDatePolicy::RejectLine);
        assert_eq!(options.id_prefix, "itimeline");
    }
}
