//! Best-effort normalization of report dates.
//!
//! Upstream dates arrive in two legacy shapes: a human date ("24 March 2024")
//! and a .NET JSON date (`/Date(1711234567000)/`). Both are rendered as ISO-8601
//! date-times; anything unrecognized is kept verbatim.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

const REPORT_DATE_FORMAT: &str = "%d %B %Y";
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const ISO_FORMAT_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const JSON_DATE_PREFIX: &str = "/Date(";
const JSON_DATE_SUFFIX: &str = ")/";

/// Time zone used to render upstream timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The process local time zone.
    #[default]
    Local,
    /// A fixed IANA time zone.
    Named(Tz),
}

impl DisplayZone {
    /// Builds a zone from an optional configured name.
    #[must_use]
    pub fn from_config(tz: Option<Tz>) -> Self {
        tz.map_or(Self::Local, Self::Named)
    }

    fn wall_clock(self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Named(tz) => instant.with_timezone(&tz).naive_local(),
        }
    }
}

/// Outcome of a lenient date normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    /// The input was recognized.
    Parsed(NaiveDateTime),
    /// The input was not recognized and is kept as-is.
    Raw(String),
}

impl NormalizedDate {
    /// Normalizes a `ReportDate` such as "24 March 2024".
    #[must_use]
    pub fn report_date(raw: &str) -> Self {
        NaiveDate::parse_from_str(raw, REPORT_DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map_or_else(|| Self::Raw(raw.to_string()), Self::Parsed)
    }

    /// Normalizes an `UpdatedDateUTC` such as `/Date(1711234567000)/`.
    #[must_use]
    pub fn updated_date(raw: &str, zone: DisplayZone) -> Self {
        extract_epoch_millis(raw)
            .and_then(|digits| digits.parse::<i64>().ok())
            .and_then(|millis| {
                let secs = millis.div_euclid(1000);
                // rem_euclid(1000) is in 0..1000, so the nanos fit in u32.
                let nanos = u32::try_from(millis.rem_euclid(1000) * 1_000_000).ok()?;
                DateTime::from_timestamp(secs, nanos)
            })
            .map_or_else(
                || Self::Raw(raw.to_string()),
                |instant| Self::Parsed(zone.wall_clock(instant)),
            )
    }

    /// Returns true when the input was recognized.
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Converts into the string placed on the wire.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Parsed(_) => self.to_string(),
            Self::Raw(raw) => raw,
        }
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole seconds print bare; otherwise six fractional digits.
            Self::Parsed(value) if value.nanosecond() == 0 => {
                write!(f, "{}", value.format(ISO_FORMAT))
            }
            Self::Parsed(value) => write!(f, "{}", value.format(ISO_FORMAT_MICROS)),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Finds the first `/Date(<digits>)/` in `raw` and returns the digits.
fn extract_epoch_millis(raw: &str) -> Option<&str> {
    raw.match_indices(JSON_DATE_PREFIX).find_map(|(idx, prefix)| {
        let rest = &raw[idx + prefix.len()..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        (end > 0 && rest[end..].starts_with(JSON_DATE_SUFFIX)).then(|| &rest[..end])
    })
}
