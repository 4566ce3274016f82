//! The option registry and the validated option set.
//!
//! Every recognized tag attribute is declared once in [`REGISTRY`] together
//! with the validator that checks it. [`build_options`] runs the whole
//! registry against a tag's arguments and keeps only the values that pass;
//! anything else is left to the timeline widget's own defaults.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::args::TagArguments;
use crate::diagnostics::{Diagnostics, Rejection};
use crate::validate::{self, IntegerRules, IsoDateTime, Locale, TimelineStyle};

/// The validator applied to an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    CssSize,
    DateTime,
    Integer(IntegerRules),
    Locale,
    Style,
}

impl OptionKind {
    /// Returns the kind name used in diagnostics and listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::CssSize => "css-size",
            Self::DateTime => "datetime",
            Self::Integer(_) => "integer",
            Self::Locale => "locale",
            Self::Style => "style",
        }
    }

    /// Runs this kind's validator against a raw value.
    pub fn validate(&self, raw: &str) -> Option<OptionValue> {
        match self {
            Self::Boolean => validate::boolean(raw).map(OptionValue::Bool),
            Self::CssSize => validate::css_size(raw).map(OptionValue::Size),
            Self::DateTime => validate::datetime(raw).map(OptionValue::DateTime),
            Self::Integer(rules) => validate::integer(raw, *rules).map(OptionValue::Integer),
            Self::Locale => validate::locale(raw).map(OptionValue::Locale),
            Self::Style => validate::style(raw).map(OptionValue::Style),
        }
    }
}

/// A registry entry: the option name as the widget spells it, and its validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
}

impl OptionSpec {
    pub const fn new(name: &'static str, kind: OptionKind) -> Self {
        Self { name, kind }
    }
}

const BOOLEAN: OptionKind = OptionKind::Boolean;
const CSS_SIZE: OptionKind = OptionKind::CssSize;
const DATETIME: OptionKind = OptionKind::DateTime;
const COUNT: OptionKind = OptionKind::Integer(IntegerRules::NON_NEGATIVE);

/// Every option a tag may set.
pub const REGISTRY: &[OptionSpec] = &[
    OptionSpec::new("animate", BOOLEAN),
    OptionSpec::new("animateZoom", BOOLEAN),
    OptionSpec::new("axisOnTop", BOOLEAN),
    OptionSpec::new("end", DATETIME),
    OptionSpec::new("eventMargin", COUNT),
    OptionSpec::new("eventMarginAxis", COUNT),
    OptionSpec::new("groupMinHeight", COUNT),
    OptionSpec::new("groupsOnRight", BOOLEAN),
    OptionSpec::new("groupsWidth", CSS_SIZE),
    OptionSpec::new("height", CSS_SIZE),
    OptionSpec::new("locale", OptionKind::Locale),
    OptionSpec::new("max", DATETIME),
    OptionSpec::new("min", DATETIME),
    OptionSpec::new("minHeight", COUNT),
    OptionSpec::new("moveable", BOOLEAN),
    OptionSpec::new("selectable", BOOLEAN),
    OptionSpec::new("showCurrentTime", BOOLEAN),
    OptionSpec::new("showMajorLabels", BOOLEAN),
    OptionSpec::new("showMinorLabels", BOOLEAN),
    OptionSpec::new("showNavigation", BOOLEAN),
    OptionSpec::new("stack", BOOLEAN),
    OptionSpec::new("stackEvents", BOOLEAN),
    OptionSpec::new("start", DATETIME),
    OptionSpec::new("style", OptionKind::Style),
    OptionSpec::new("timeChangeable", BOOLEAN),
    OptionSpec::new("width", CSS_SIZE),
    OptionSpec::new("zoomMax", COUNT),
    OptionSpec::new("zoomMin", COUNT),
    OptionSpec::new("zoomable", BOOLEAN),
];

/// Options forced off on every timeline: item selection and editing are not
/// supported by the embedding. Applied after user values, so they always win.
pub const FIXED_OVERRIDES: &[(&str, bool)] = &[("selectable", false), ("timeChangeable", false)];

/// Looks up a registry entry by name, ignoring case.
pub fn lookup(name: &str) -> Option<&'static OptionSpec> {
    REGISTRY
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// A validated, normalized option value.
///
/// Serializes as a bare JSON value (`true`, `600`, `"100%"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Size(String),
    DateTime(IsoDateTime),
    Locale(Locale),
    Style(TimelineStyle),
}

/// Validated options keyed by their declared (camel-case) name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimelineOptions {
    values: BTreeMap<&'static str, OptionValue>,
}

impl TimelineOptions {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    fn insert(&mut self, name: &'static str, value: OptionValue) {
        self.values.insert(name, value);
    }
}

/// Validates a single argument.
///
/// Returns `None` if the argument is absent or its value is invalid; the
/// caller then leaves any prior default untouched.
pub fn validate_argument(args: &TagArguments, name: &str, kind: OptionKind) -> Option<OptionValue> {
    args.get(name).and_then(|raw| kind.validate(raw))
}

/// Builds the option set for one tag.
pub fn build_options(args: &TagArguments) -> TimelineOptions {
    build_options_with(args, &mut Diagnostics::new())
}

/// Builds the option set for one tag, recording refused values in `diagnostics`.
pub fn build_options_with(args: &TagArguments, diagnostics: &mut Diagnostics) -> TimelineOptions {
    let mut options = TimelineOptions::default();

    for spec in REGISTRY {
        let Some(raw) = args.get(spec.name) else {
            continue;
        };

        match spec.kind.validate(raw) {
            Some(value) => {
                options.insert(spec.name, value);
            }
            None => {
                debug!(
                    option = spec.name,
                    value = raw,
                    kind = spec.kind.as_str(),
                    "Dropping invalid option"
                );
                diagnostics.push(Rejection::InvalidOption {
                    name: spec.name,
                    kind: spec.kind.as_str(),
                    value: raw.to_string(),
                });
            }
        }
    }

    for &(name, value) in FIXED_OVERRIDES {
        options.insert(name, OptionValue::Bool(value));
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique_ignoring_case() {
        for (i, a) in REGISTRY.iter().enumerate() {
            for b in &REGISTRY[i + 1..] {
                assert!(
                    !a.name.eq_ignore_ascii_case(b.name),
                    "duplicate option {}",
                    a.name
                );
            }
        }
    }

    #[test]
    fn fixed_overrides_are_registered_booleans() {
        for (name, _) in FIXED_OVERRIDES {
            assert_eq!(lookup(name).map(|s| s.kind), Some(OptionKind::Boolean));
        }
    }

    #[test]
    fn validate_argument_absent_is_none() {
        let args = TagArguments::new();
        assert_eq!(validate_argument(&args, "height", OptionKind::CssSize), None);
    }

    #[test]
    fn validate_argument_uses_case_insensitive_lookup() {
        let args = TagArguments::new().with("showcurrenttime", "TRUE");
        assert_eq!(
            validate_argument(&args, "showCurrentTime", OptionKind::Boolean),
            Some(OptionValue::Bool(true))
        );
    }

    #[test]
    fn boolean_options_accept_only_literals() {
        let booleans = REGISTRY
            .iter()
            .filter(|s| s.kind == OptionKind::Boolean);

        for spec in booleans {
            for raw in ["true", "FALSE", "True"] {
                let args = TagArguments::new().with(spec.name, raw);
                assert!(
                    validate_argument(&args, spec.name, spec.kind).is_some(),
                    "{} refused {raw:?}",
                    spec.name
                );
            }
            for raw in ["1", "yes", "TRUE1", ""] {
                let args = TagArguments::new().with(spec.name, raw);
                assert_eq!(
                    validate_argument(&args, spec.name, spec.kind),
                    None,
                    "{} accepted {raw:?}",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn build_options_always_pins_fixed_overrides() {
        let empty = build_options(&TagArguments::new());
        assert_eq!(empty.len(), 2);
        assert_eq!(empty.get("selectable"), Some(&OptionValue::Bool(false)));
        assert_eq!(empty.get("timeChangeable"), Some(&OptionValue::Bool(false)));

        let args = TagArguments::new()
            .with("selectable", "true")
            .with("timechangeable", "true");
        let options = build_options(&args);
        assert_eq!(options.get("selectable"), Some(&OptionValue::Bool(false)));
        assert_eq!(options.get("timeChangeable"), Some(&OptionValue::Bool(false)));
    }

    #[test]
    fn build_options_keeps_valid_and_drops_invalid() {
        let args = TagArguments::new()
            .with("height", "300px")
            .with("width", "wide")
            .with("locale", "fr_CA")
            .with("style", "DOT")
            .with("zoommin", "86400000")
            .with("zoommax", "-1")
            .with("start", "2024-01-01")
            .with("unknown", "whatever");

        let mut diagnostics = Diagnostics::new();
        let options = build_options_with(&args, &mut diagnostics);

        assert_eq!(options.get("height"), Some(&OptionValue::Size("300px".into())));
        assert_eq!(options.get("locale"), Some(&OptionValue::Locale(Locale::FrCa)));
        assert_eq!(options.get("style"), Some(&OptionValue::Style(TimelineStyle::Dot)));
        assert_eq!(options.get("zoomMin"), Some(&OptionValue::Integer(86_400_000)));
        assert_eq!(
            options.get("start"),
            Some(&OptionValue::DateTime(
                IsoDateTime::parse("2024-01-01T00:00:00Z").unwrap()
            ))
        );
        assert!(!options.contains("width"));
        assert!(!options.contains("zoomMax"));
        assert!(!options.contains("unknown"));

        let refused: Vec<&str> = diagnostics
            .iter()
            .filter_map(|r| match r {
                Rejection::InvalidOption { name, .. } => Some(*name),
                _ => None,
            })
            .collect();
        assert_eq!(refused, vec!["width", "zoomMax"]);
    }

    #[test]
    fn options_serialize_as_plain_json_values() {
        let args = TagArguments::new()
            .with("animate", "false")
            .with("minheight", "200")
            .with("locale", "en_UK")
            .with("max", "2030-12-31 23:59");
        let json = serde_json::to_value(build_options(&args)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "animate": false,
                "locale": "en_UK",
                "max": "2030-12-31T23:59:00Z",
                "minHeight": 200,
                "selectable": false,
                "timeChangeable": false,
            })
        );
    }
}
