//! Feature flags the firmware is built with.
//!
//! Flags are derived from the compiled block, never configured directly.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// A compile-time capability of the generated firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureFlag {
    /// Preset support is compiled in.
    EnablePresets,
    /// The firmware runs inside the host framework.
    Esphome,
}

impl FeatureFlag {
    /// Preprocessor symbol of the flag.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::EnablePresets => "TION_ENABLE_PRESETS",
            Self::Esphome => "TION_ESPHOME",
        }
    }

    /// Compiler argument defining the flag.
    #[must_use]
    pub fn build_flag(self) -> String {
        format!("-D{}", self.symbol())
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for FeatureFlag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// Set of flags emitted for one block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeSet<FeatureFlag>);

impl FeatureFlags {
    /// Flags for a block that has (or has not) declared presets.
    #[must_use]
    pub fn emit(has_presets: bool) -> Self {
        let mut flags = BTreeSet::new();
        if has_presets {
            flags.insert(FeatureFlag::EnablePresets);
        }
        flags.insert(FeatureFlag::Esphome);
        tracing::debug!(?flags, "emitted feature flags");
        Self(flags)
    }

    #[must_use]
    pub fn contains(&self, flag: FeatureFlag) -> bool {
        self.0.contains(&flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = FeatureFlag> + '_ {
        self.0.iter().copied()
    }

    /// Compiler arguments for every flag, in a stable order.
    #[must_use]
    pub fn build_flags(&self) -> Vec<String> {
        self.iter().map(FeatureFlag::build_flag).collect()
    }

    /// Union with the flags of another block.
    pub fn merge(&mut self, other: &Self) {
        self.0.extend(other.iter());
    }
}
