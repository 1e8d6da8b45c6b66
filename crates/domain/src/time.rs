//! Time periods written in configuration (`15s`, `500ms`, `1min`, `00:01:30`).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

static UNIT_PERIOD: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*(us|ms|s|sec|min|h|d)?$"));

/// Why a time period string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time period `{0}`")]
pub struct TimePeriodError(pub String);

/// A non-negative duration, kept at millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePeriod(Duration);

impl TimePeriod {
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Parse a period written as `<number>[unit]` or `[HH:]MM:SS`.
    ///
    /// A bare number is read as seconds. Sub-millisecond precision is
    /// truncated.
    ///
    /// # Errors
    ///
    /// Returns [`TimePeriodError`] when the text matches neither form.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn parse(text: &str) -> Result<Self, TimePeriodError> {
        let text = text.trim();
        let invalid = || TimePeriodError(text.to_string());

        if text.contains(':') {
            return parse_clock(text).ok_or_else(invalid);
        }

        let captures = UNIT_PERIOD
            .as_ref()
            .ok()
            .and_then(|pattern| pattern.captures(text))
            .ok_or_else(invalid)?;
        let value: f64 = captures[1].parse().map_err(|_| invalid())?;
        let millis = match captures.get(2).map(|m| m.as_str()) {
            Some("us") => value / 1_000.0,
            Some("ms") => value,
            Some("s" | "sec") | None => value * 1_000.0,
            Some("min") => value * 60_000.0,
            Some("h") => value * 3_600_000.0,
            Some("d") => value * 86_400_000.0,
            Some(_) => return Err(invalid()),
        };
        if !millis.is_finite() || millis > u64::MAX as f64 {
            return Err(invalid());
        }
        Ok(Self::from_millis(millis.trunc() as u64))
    }

    #[must_use]
    pub fn as_millis(self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

fn parse_clock(text: &str) -> Option<TimePeriod> {
    let parts: Vec<u64> = text
        .split(':')
        .map(|part| part.parse().ok())
        .collect::<Option<_>>()?;
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0, *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return None,
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    let secs = hours
        .checked_mul(3600)?
        .checked_add(minutes * 60 + seconds)?;
    // Kept representable in whole milliseconds.
    secs.checked_mul(1000)?;
    Some(TimePeriod::from_secs(secs))
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.as_millis();
        if millis % 1000 == 0 {
            write!(f, "{}s", millis / 1000)
        } else {
            write!(f, "{millis}ms")
        }
    }
}

impl FromStr for TimePeriod {
    type Err = TimePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimePeriod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_seconds() {
        assert_eq!(TimePeriod::parse("15s").unwrap(), TimePeriod::from_secs(15));
    }

    #[test]
    fn should_read_bare_number_as_seconds() {
        assert_eq!(TimePeriod::parse("60").unwrap(), TimePeriod::from_secs(60));
    }

    #[test]
    fn should_parse_every_unit() {
        assert_eq!(TimePeriod::parse("500ms").unwrap().as_millis(), 500);
        assert_eq!(TimePeriod::parse("2000us").unwrap().as_millis(), 2);
        assert_eq!(TimePeriod::parse("1min").unwrap().as_millis(), 60_000);
        assert_eq!(TimePeriod::parse("2h").unwrap().as_millis(), 7_200_000);
        assert_eq!(TimePeriod::parse("1d").unwrap().as_millis(), 86_400_000);
    }

    #[test]
    fn should_parse_fractional_value_with_space() {
        assert_eq!(TimePeriod::parse("1.5 s").unwrap().as_millis(), 1_500);
    }

    #[test]
    fn should_parse_clock_notation() {
        assert_eq!(TimePeriod::parse("01:30").unwrap(), TimePeriod::from_secs(90));
        assert_eq!(
            TimePeriod::parse("01:00:05").unwrap(),
            TimePeriod::from_secs(3605)
        );
    }

    #[test]
    fn should_reject_unknown_unit() {
        assert!(TimePeriod::parse("5 weeks").is_err());
    }

    #[test]
    fn should_reject_negative_value() {
        assert!(TimePeriod::parse("-5s").is_err());
    }

    #[test]
    fn should_reject_out_of_range_clock_field() {
        assert!(TimePeriod::parse("00:75").is_err());
    }

    #[test]
    fn should_reject_overflowing_clock() {
        assert_eq!(
            TimePeriod::parse("18446744073709551615:00:00"),
            Err(TimePeriodError("18446744073709551615:00:00".to_string()))
        );
        assert!(TimePeriod::parse("5124095576031:00:00").is_err());
    }

    #[test]
    fn should_display_whole_seconds_compactly() {
        assert_eq!(TimePeriod::from_secs(60).to_string(), "60s");
        assert_eq!(TimePeriod::from_millis(1500).to_string(), "1500ms");
    }

    #[test]
    fn should_serialize_as_milliseconds() {
        let json = serde_json::to_string(&TimePeriod::from_secs(15)).unwrap();
        assert_eq!(json, "15000");
    }
}
