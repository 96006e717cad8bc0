use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Storage key format. Every stored date uses this form.
pub const CANONICAL_FORMAT: &str = "%d-%m-%Y";
/// Form-input format submitted by clients.
pub const WIRE_FORMAT: &str = "%Y-%m-%d";

const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// Calendar date used as the key of every attendance bucket and homework day.
///
/// Renders as `DD-MM-YYYY` but orders by the calendar, so a descending sort
/// of keys is always chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    pub fn today() -> Self {
        DateKey(Local::now().date_naive())
    }

    /// `YYYY-MM-DD` rendering for display and date inputs.
    pub fn iso(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }

    /// Parses either the wire form (`YYYY-MM-DD`) or a canonical key (`DD-MM-YYYY`).
    pub fn parse(raw: &str) -> Result<Self, DateError> {
        let t = raw.trim();
        let parsed = NaiveDate::parse_from_str(t, WIRE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(t, CANONICAL_FORMAT));
        Self::four_digit_year(parsed.ok(), raw)
    }

    pub fn parse_canonical(raw: &str) -> Result<Self, DateError> {
        let parsed = NaiveDate::parse_from_str(raw.trim(), CANONICAL_FORMAT);
        Self::four_digit_year(parsed.ok(), raw)
    }

    // Keys must render back as exactly DD-MM-YYYY.
    fn four_digit_year(date: Option<NaiveDate>, raw: &str) -> Result<Self, DateError> {
        match date {
            Some(d) if (MIN_YEAR..=MAX_YEAR).contains(&d.year()) => Ok(DateKey(d)),
            _ => Err(DateError::new(raw)),
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateKey::parse_canonical(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateError {
    pub input: String,
}

impl DateError {
    fn new(input: &str) -> Self {
        DateError {
            input: input.to_string(),
        }
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized date `{}`; expected YYYY-MM-DD or DD-MM-YYYY",
            self.input
        )
    }
}

impl std::error::Error for DateError {}

/// What to do with a submitted date that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatePolicy {
    #[default]
    FallbackToToday,
    Reject,
}

impl DatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePolicy::FallbackToToday => "fallbackToToday",
            DatePolicy::Reject => "reject",
        }
    }

    /// Turns an optional submitted date into a storage key.
    ///
    /// Missing or blank input resolves to `today` under either policy.
    pub fn resolve(&self, input: Option<&str>, today: DateKey) -> Result<DateKey, DateError> {
        let Some(raw) = input.filter(|s| !s.trim().is_empty()) else {
            return Ok(today);
        };
        match DateKey::parse(raw) {
            Ok(key) => Ok(key),
            Err(e) => match self {
                DatePolicy::FallbackToToday => {
                    log::warn!("event=date_fallback module=dates input_len={}", raw.len());
                    Ok(today)
                }
                DatePolicy::Reject => Err(e),
            },
        }
    }
}
