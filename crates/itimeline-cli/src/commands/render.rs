//! `itimeline render`

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use itimeline_core::{NoExpansion, OutputMode, RenderContext, RenderOptions, render_page};

use crate::error::CliResult;

#[derive(Serialize)]
struct JsonOutput<'a> {
    html: &'a str,
    config: &'a BTreeMap<String, String>,
}

/// Renders `page` and returns what `render` prints.
///
/// Plain output is the rendered page. In config-vars mode the page is
/// followed by the page-scoped config map as JSON. With `json`, both are
/// wrapped into a single object `{"html": ..., "config": {...}}`.
pub fn render(page: &str, options: RenderOptions, json: bool) -> CliResult<String> {
    let mode = options.mode;
    let mut ctx = RenderContext::new(options);
    let html = render_page(&mut ctx, page, &NoExpansion);

    let events: usize = ctx.reports().iter().map(|r| r.events).sum();
    info!(timelines = ctx.reports().len(), events, "Rendered page");

    if json {
        let output = JsonOutput {
            html: &html,
            config: ctx.config_vars(),
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    match mode {
        OutputMode::Inline => Ok(html),
        OutputMode::ConfigVars => {
            let config = serde_json::to_string_pretty(ctx.config_vars())?;
            Ok(format!("{}\n{}\n", html.trim_end(), config))
        }
    }
}
