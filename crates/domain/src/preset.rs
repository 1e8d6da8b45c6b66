//! Presets: named operating profiles of the breezer.
//!
//! A preset maps a climate preset name to a mode, fan speed and target
//! temperature. Fan speed and temperature use `0` for "leave unchanged".

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::choice::enumerated;

/// Fan speeds a preset may request.
pub const FAN_SPEED_RANGE: RangeInclusive<u8> = 1..=6;

/// Target temperatures (°C) a preset may request.
pub const TARGET_TEMPERATURE_RANGE: RangeInclusive<u8> = 1..=25;

/// Value meaning "not set by this preset".
pub const UNSET: u8 = 0;

enumerated!(
    /// Climate preset names a breezer accepts.
    pub enum PresetName {
        Home => "home",
        Away => "away",
        Boost => "boost",
        Comfort => "comfort",
        Eco => "eco",
        Sleep => "sleep",
        Activity => "activity",
    }
);

impl PresetName {
    /// Firmware-side enumerator for the preset.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Home => "climate::CLIMATE_PRESET_HOME",
            Self::Away => "climate::CLIMATE_PRESET_AWAY",
            Self::Boost => "climate::CLIMATE_PRESET_BOOST",
            Self::Comfort => "climate::CLIMATE_PRESET_COMFORT",
            Self::Eco => "climate::CLIMATE_PRESET_ECO",
            Self::Sleep => "climate::CLIMATE_PRESET_SLEEP",
            Self::Activity => "climate::CLIMATE_PRESET_ACTIVITY",
        }
    }
}

enumerated!(
    /// Climate mode a preset switches to.
    pub enum PresetMode {
        Off => "off",
        Heat => "heat",
        FanOnly => "fan_only",
        /// Keep whatever mode the device is in.
        Auto => "auto",
    }
    default Auto
);

impl PresetMode {
    /// Modes that may be written in configuration; `auto` is only ever the default.
    pub const CONFIGURABLE: &'static [Self] = &[Self::Off, Self::Heat, Self::FanOnly];

    /// Firmware-side enumerator for the mode.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Off => "climate::CLIMATE_MODE_OFF",
            Self::Heat => "climate::CLIMATE_MODE_HEAT",
            Self::FanOnly => "climate::CLIMATE_MODE_FAN_ONLY",
            Self::Auto => "climate::CLIMATE_MODE_AUTO",
        }
    }
}

/// Why a preset entry is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    #[error("fan speed {0} is outside [0, 6]")]
    FanSpeed(u8),

    #[error("target temperature {0} is outside [0, 25]")]
    TargetTemperature(u8),
}

/// A compiled preset entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: PresetName,
    pub mode: PresetMode,
    pub fan_speed: u8,
    pub target_temperature: u8,
}

impl Preset {
    /// Create a builder for constructing a [`Preset`].
    #[must_use]
    pub fn builder(name: PresetName) -> PresetBuilder {
        PresetBuilder {
            name,
            mode: None,
            fan_speed: None,
            target_temperature: None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`PresetError`] when the fan speed or temperature is neither
    /// [`UNSET`] nor within its range.
    pub fn validate(&self) -> Result<(), PresetError> {
        if !in_range_or_unset(self.fan_speed, &FAN_SPEED_RANGE) {
            return Err(PresetError::FanSpeed(self.fan_speed));
        }
        if !in_range_or_unset(self.target_temperature, &TARGET_TEMPERATURE_RANGE) {
            return Err(PresetError::TargetTemperature(self.target_temperature));
        }
        Ok(())
    }

    #[must_use]
    pub fn has_fan_speed(&self) -> bool {
        self.fan_speed != UNSET
    }

    #[must_use]
    pub fn has_target_temperature(&self) -> bool {
        self.target_temperature != UNSET
    }
}

fn in_range_or_unset(value: u8, range: &RangeInclusive<u8>) -> bool {
    value == UNSET || range.contains(&value)
}

/// Step-by-step builder for [`Preset`]; unset options fall back to defaults.
#[derive(Debug)]
pub struct PresetBuilder {
    name: PresetName,
    mode: Option<PresetMode>,
    fan_speed: Option<u8>,
    target_temperature: Option<u8>,
}

impl PresetBuilder {
    #[must_use]
    pub fn mode(mut self, mode: Option<PresetMode>) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn fan_speed(mut self, fan_speed: Option<u8>) -> Self {
        self.fan_speed = fan_speed;
        self
    }

    #[must_use]
    pub fn target_temperature(mut self, target_temperature: Option<u8>) -> Self {
        self.target_temperature = target_temperature;
        self
    }

    /// Consume the builder, apply defaults, validate, and return a [`Preset`].
    ///
    /// # Errors
    ///
    /// Returns a [`PresetError`] if a value is out of range.
    pub fn build(self) -> Result<Preset, PresetError> {
        let preset = Preset {
            name: self.name,
            mode: self.mode.unwrap_or_default(),
            fan_speed: self.fan_speed.unwrap_or(UNSET),
            target_temperature: self.target_temperature.unwrap_or(UNSET),
        };
        preset.validate()?;
        Ok(preset)
    }
}
