//! `itimeline options` and `itimeline locales`

use itimeline_core::options::FIXED_OVERRIDES;
use itimeline_core::{Locale, OptionKind, REGISTRY};

fn describe(kind: OptionKind) -> String {
    match kind {
        OptionKind::Integer(rules) => {
            let sign = if rules.allow_negative { "any" } else { "non-negative" };
            let zero = if rules.allow_zero { "" } else { ", non-zero" };
            format!("integer ({}{})", sign, zero)
        }
        OptionKind::Style => "style (box, dot)".to_string(),
        other => other.as_str().to_string(),
    }
}

/// Lists every recognized option with its kind.
pub fn options() -> String {
    let width = REGISTRY.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();

    for spec in REGISTRY {
        let pinned = FIXED_OVERRIDES.iter().any(|(name, _)| *name == spec.name);
        out.push_str(&format!("{:<width$}  {}", spec.name, describe(spec.kind)));
        if pinned {
            out.push_str(" [always false]");
        }
        out.push('\n');
    }
    out
}

/// Lists supported locale tags, one per line.
pub fn locales() -> String {
    Locale::ALL
        .iter()
        .map(|l| format!("{}\n", l.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_line<'a>(out: &'a str, name: &str) -> &'a str {
        out.lines()
            .find(|l| l.split_whitespace().next() == Some(name))
            .unwrap()
    }

    #[test]
    fn options_lists_every_registry_entry() {
        let out = options();
        assert_eq!(out.lines().count(), REGISTRY.len());
        assert!(find_line(&out, "zoomMin").ends_with("integer (non-negative)"));
        assert!(find_line(&out, "style").ends_with("style (box, dot)"));
        assert!(find_line(&out, "selectable").ends_with("boolean [always false]"));
        assert!(find_line(&out, "height").ends_with("css-size"));
    }

    #[test]
    fn locales_lists_every_tag() {
        let out = locales();
        assert_eq!(out.lines().count(), Locale::ALL.len());
        assert!(out.lines().any(|l| l == "fr_CA"));
    }
}
