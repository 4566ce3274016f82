//! Typed validators for tag argument values.
//!
//! Each validator trims its input and returns the normalized value, or `None`
//! when the input does not match. Validators never panic; callers decide
//! whether a `None` keeps a default in place or drops an event line.
//!
//! # Example
//!
//! ```
//! use itimeline_core::validate;
//!
//! assert_eq!(validate::boolean(" TRUE "), Some(true));
//! assert_eq!(validate::css_size("-12.5px").as_deref(), Some("-12.5px"));
//! assert_eq!(
//!     validate::datetime("2024-03-05").unwrap().as_str(),
//!     "2024-03-05T00:00:00Z"
//! );
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Regex for CSS lengths: optional minus, integer or decimal magnitude, optional unit.
static CSS_SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^-?[0-9]+(?:\.[0-9]+)?(?:%|cm|mm|in|em|ex|pt|pc|px)?$")
        .expect("Invalid CSS size regex")
});

/// Regex for the accepted ISO-8601 subset.
///
/// Capture groups: 1 year, 2 month, 3 day, 4 hour, 5 minute, 6 second,
/// 7 `Z`, 8 offset sign, 9 offset hours, 10 offset minutes.
static DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([0-9]{4})-?(0[1-9]|1[0-2])-?(0[1-9]|[12][0-9]|3[01])",
        r"(?:[ T]([01][0-9]|2[0-3])(?::([0-5][0-9])(?::([0-5][0-9]))?)?",
        r"(?:(Z)|([+-])(0[0-9]|1[0-4])(?::?([0-5][0-9]))?)?)?$",
    ))
    .expect("Invalid datetime regex")
});

/// Regex for integers, with an optional leading minus sign.
static INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("Invalid integer regex"));

/// A datetime normalized to `YYYY-MM-DDTHH:MM:SS<tz>`.
///
/// The timezone is always explicit: either `Z` or `±HH:MM`. Browsers parse
/// datetimes without a designator as local time, so a missing zone becomes `Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IsoDateTime(String);

impl IsoDateTime {
    /// Parses and normalizes a datetime, returning `None` if it is malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = DATETIME_REGEX.captures(raw.trim())?;
        let part = |i: usize| caps.get(i).map_or("00", |m| m.as_str());

        let mut out = format!(
            "{}-{}-{}T{}:{}:{}",
            part(1),
            part(2),
            part(3),
            part(4),
            part(5),
            part(6)
        );

        match (caps.get(8), caps.get(9)) {
            (Some(sign), Some(hours)) => {
                out.push_str(sign.as_str());
                out.push_str(hours.as_str());
                out.push(':');
                out.push_str(part(10));
            }
            _ => out.push('Z'),
        }

        Some(Self(out))
    }

    /// Returns the normalized string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IsoDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Call-site rules for the integer validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerRules {
    /// Accept a leading `-`.
    pub allow_negative: bool,
    /// Accept a value of zero.
    pub allow_zero: bool,
}

impl IntegerRules {
    /// Zero or any positive integer.
    pub const NON_NEGATIVE: Self = Self {
        allow_negative: false,
        allow_zero: true,
    };

    /// Strictly positive integers.
    pub const POSITIVE: Self = Self {
        allow_negative: false,
        allow_zero: false,
    };

    /// Any integer.
    pub const ANY: Self = Self {
        allow_negative: true,
        allow_zero: true,
    };
}

impl Default for IntegerRules {
    fn default() -> Self {
        Self::NON_NEGATIVE
    }
}

/// Locales supported by the bundled timeline library.
///
/// Adding a locale means adding a variant here and an entry in [`Locale::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Ca,
    CaEs,
    En,
    EnUs,
    EnUk,
    Nl,
    NlNl,
    NlBe,
    Fi,
    FiFi,
    Fr,
    FrFr,
    FrBe,
    FrCa,
    De,
    DeDe,
    DeCh,
    Da,
    DaDk,
    Ru,
    RuRu,
    Es,
    EsEs,
    Tr,
    TrTr,
}

impl Locale {
    /// Every supported locale, in registry order.
    pub const ALL: [Locale; 25] = [
        Self::Ca,
        Self::CaEs,
        Self::En,
        Self::EnUs,
        Self::EnUk,
        Self::Nl,
        Self::NlNl,
        Self::NlBe,
        Self::Fi,
        Self::FiFi,
        Self::Fr,
        Self::FrFr,
        Self::FrBe,
        Self::FrCa,
        Self::De,
        Self::DeDe,
        Self::DeCh,
        Self::Da,
        Self::DaDk,
        Self::Ru,
        Self::RuRu,
        Self::Es,
        Self::EsEs,
        Self::Tr,
        Self::TrTr,
    ];

    /// Returns the locale tag as the timeline library spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ca => "ca",
            Self::CaEs => "ca_ES",
            Self::En => "en",
            Self::EnUs => "en_US",
            Self::EnUk => "en_UK",
            Self::Nl => "nl",
            Self::NlNl => "nl_NL",
            Self::NlBe => "nl_BE",
            Self::Fi => "fi",
            Self::FiFi => "fi_FI",
            Self::Fr => "fr",
            Self::FrFr => "fr_FR",
            Self::FrBe => "fr_BE",
            Self::FrCa => "fr_CA",
            Self::De => "de",
            Self::DeDe => "de_DE",
            Self::DeCh => "de_CH",
            Self::Da => "da",
            Self::DaDk => "da_DK",
            Self::Ru => "ru",
            Self::RuRu => "ru_RU",
            Self::Es => "es",
            Self::EsEs => "es_ES",
            Self::Tr => "tr",
            Self::TrTr => "tr_TR",
        }
    }

    /// Looks up a locale by its exact tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == tag)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Built-in event styles. Custom styles are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineStyle {
    Box,
    Dot,
}

impl TimelineStyle {
    pub const ALL: [TimelineStyle; 2] = [Self::Box, Self::Dot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for TimelineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TimelineStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Accepts `true` or `false` in any case.
pub fn boolean(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Accepts a CSS length such as `100%`, `-12.5px` or `0`, returned unchanged.
pub fn css_size(raw: &str) -> Option<String> {
    let raw = raw.trim();
    CSS_SIZE_REGEX.is_match(raw).then(|| raw.to_string())
}

/// Accepts a date with optional time and timezone. See [`IsoDateTime::parse`].
pub fn datetime(raw: &str) -> Option<IsoDateTime> {
    IsoDateTime::parse(raw)
}

/// Accepts an ASCII integer subject to `rules`. Values outside `i64` are rejected.
pub fn integer(raw: &str, rules: IntegerRules) -> Option<i64> {
    let raw = raw.trim();
    if !INTEGER_REGEX.is_match(raw) {
        return None;
    }

    let value: i64 = raw.parse().ok()?;
    if raw.starts_with('-') && !rules.allow_negative {
        return None;
    }
    if value == 0 && !rules.allow_zero {
        return None;
    }
    Some(value)
}

/// Accepts one of the supported locale tags, case-sensitively.
pub fn locale(raw: &str) -> Option<Locale> {
    Locale::from_tag(raw.trim())
}

/// Accepts `box` or `dot` in any case.
pub fn style(raw: &str) -> Option<TimelineStyle> {
    let raw = raw.trim();
    TimelineStyle::ALL
        .into_iter()
        .find(|style| raw.eq_ignore_ascii_case(style.as_str()))
}
