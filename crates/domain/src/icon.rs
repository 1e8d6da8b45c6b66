//! Display icons (`mdi:air-filter`).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static ICON: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[\w\-]+:[\w\-]+$"));

/// An icon string that is neither empty nor `prefix:name`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid icon `{0}`, icons should be in the form `prefix:name` (e.g. `mdi:home`)")]
pub struct IconError(pub String);

/// Icons the compiler assigns by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinIcon(&'static str);

impl BuiltinIcon {
    /// Breezer climate entity and its filter sensor.
    pub const AIR_FILTER: Self = Self("mdi:air-filter");
    pub const VOLUME_HIGH: Self = Self("mdi:volume-high");
    pub const GIT: Self = Self("mdi:git");
    pub const CLOCK_FAST: Self = Self("mdi:clock-fast");
    pub const CLOCK_END: Self = Self("mdi:clock-end");
    pub const VALVE: Self = Self("mdi:valve");
    pub const WEATHER_WINDY: Self = Self("mdi:weather-windy");

    pub const ALL: &'static [Self] = &[
        Self::AIR_FILTER,
        Self::VOLUME_HIGH,
        Self::GIT,
        Self::CLOCK_FAST,
        Self::CLOCK_END,
        Self::VALVE,
        Self::WEATHER_WINDY,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

/// An icon reference in `prefix:name` form, or empty for "no icon".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Icon(String);

impl Icon {
    /// Validate an icon string.
    ///
    /// # Errors
    ///
    /// Returns [`IconError`] when `value` is neither empty nor `prefix:name`.
    pub fn parse(value: &str) -> Result<Self, IconError> {
        let well_formed = ICON.as_ref().is_ok_and(|pattern| pattern.is_match(value));
        if value.is_empty() || well_formed {
            Ok(Self(value.to_string()))
        } else {
            Err(IconError(value.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<BuiltinIcon> for Icon {
    fn from(icon: BuiltinIcon) -> Self {
        Self(icon.0.to_string())
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
