//! Locating `<itimeline>` tags in page text.
//!
//! This is a small stand-in for a wiki engine's tag hook: it finds each
//! `<itimeline ...>body</itimeline>` (or self-closing `<itimeline ... />`),
//! parses its attributes and hands it to [`RenderContext::render_tag`].
//! Unterminated tags are left as they are.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::args::TagArguments;
use crate::expand::ContentExpander;
use crate::render::RenderContext;

/// Regex for a whole tag occurrence.
///
/// Group 1 holds the attribute text; group 2 the body, absent for self-closing tags.
/// Quoted attribute values may contain `>` and `/>`.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?is)<itimeline((?:\s+(?:"[^"]*"|'[^']*'|[^>"'/]|/[^>])*)?)"#,
        r#"\s*(?:/>|>(.*?)</itimeline\s*>)"#,
    ))
    .expect("Invalid tag regex")
});

/// Regex for a single attribute: `name="v"`, `name='v'`, `name=v` or bare `name`.
static ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_:.-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`/]+)))?"#)
        .expect("Invalid attribute regex")
});

/// A tag occurrence found in page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch<'a> {
    /// Byte range of the whole tag within the page.
    pub range: std::ops::Range<usize>,
    pub args: TagArguments,
    /// Tag body, `None` for self-closing tags.
    pub body: Option<&'a str>,
}

/// Parses attribute text into arguments. Bare attributes get an empty value.
pub fn parse_attributes(text: &str) -> TagArguments {
    ATTR_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            Some((name, value))
        })
        .collect()
}

fn to_match<'a>(caps: &Captures<'a>) -> TagMatch<'a> {
    let whole = caps.get(0).map_or(0..0, |m| m.range());
    let args = caps
        .get(1)
        .map(|m| parse_attributes(m.as_str()))
        .unwrap_or_default();
    TagMatch {
        range: whole,
        args,
        body: caps.get(2).map(|m| m.as_str()),
    }
}

/// Finds every tag occurrence in `page`, in document order.
pub fn find_tags(page: &str) -> Vec<TagMatch<'_>> {
    TAG_REGEX
        .captures_iter(page)
        .map(|caps| to_match(&caps))
        .collect()
}

/// Replaces every tag in `page` with its rendered markup.
///
/// Tags are rendered in document order, so element ids follow the order in
/// which the timelines appear on the page.
pub fn render_page(ctx: &mut RenderContext, page: &str, expander: &dyn ContentExpander) -> String {
    let rendered = TAG_REGEX.replace_all(page, |caps: &Captures<'_>| {
        let tag = to_match(caps);
        ctx.render_tag(&tag.args, tag.body, expander)
    });
    debug!(tags = ctx.reports().len(), "Rendered page");
    rendered.into_owned()
}
