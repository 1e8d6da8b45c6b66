//! Preset table compiler.
//!
//! Turns the validated preset declarations of a block into a table keyed by
//! preset name and one `update_preset` call per declaration, in the order
//! the declarations were written.

use std::collections::BTreeMap;

use serde::Serialize;
use tion_domain::config::PresetDecl;
use tion_domain::error::ConfigError;
use tion_domain::id::Id;
use tion_domain::preset::{Preset, PresetName};

use crate::graph::{Arg, Directive};

/// Device method receiving each preset.
pub const UPDATE_PRESET: &str = "update_preset";

/// Compiled presets, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PresetTable(BTreeMap<PresetName, Preset>);

impl PresetTable {
    /// Insert or replace the preset of the same name.
    pub fn insert(&mut self, preset: Preset) {
        self.0.insert(preset.name, preset);
    }

    #[must_use]
    pub fn get(&self, name: PresetName) -> Option<&Preset> {
        self.0.get(&name)
    }

    #[must_use]
    pub fn contains(&self, name: PresetName) -> bool {
        self.0.contains_key(&name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.0.values()
    }
}

/// What the rest of the pipeline needs to know about the presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresetOutcome {
    /// At least one preset entry was declared.
    pub has_presets: bool,
    /// A preset named exactly `boost` was declared.
    pub has_boost: bool,
}

/// Result of compiling the `presets` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledPresets {
    pub table: PresetTable,
    pub outcome: PresetOutcome,
    pub directives: Vec<Directive>,
}

/// Compile preset declarations for `device`.
///
/// An absent `presets` key and an empty one both compile to an empty table
/// with `has_presets == false`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPreset`] if an entry violates the preset
/// ranges.
#[tracing::instrument(skip(decls), fields(count = decls.map_or(0, <[PresetDecl]>::len)))]
pub fn compile_presets(
    decls: Option<&[PresetDecl]>,
    device: &Id,
) -> Result<CompiledPresets, ConfigError> {
    let mut compiled = CompiledPresets::default();
    let Some(decls) = decls else {
        return Ok(compiled);
    };

    for decl in decls {
        let preset = Preset::builder(decl.name)
            .mode(decl.mode)
            .fan_speed(decl.fan_speed)
            .target_temperature(decl.target_temperature)
            .build()
            .map_err(ConfigError::InvalidPreset)?;

        compiled.directives.push(update_preset(device, &preset));
        compiled.table.insert(preset);
    }

    compiled.outcome = PresetOutcome {
        has_presets: !decls.is_empty(),
        has_boost: compiled.table.contains(PresetName::Boost),
    };
    tracing::debug!(
        presets = compiled.table.len(),
        has_boost = compiled.outcome.has_boost,
        "compiled presets"
    );
    Ok(compiled)
}

fn update_preset(device: &Id, preset: &Preset) -> Directive {
    Directive::call(
        device,
        UPDATE_PRESET,
        vec![
            Arg::Symbol(preset.name.symbol()),
            Arg::Symbol(preset.mode.symbol()),
            Arg::Int(i64::from(preset.fan_speed)),
            Arg::Int(i64::from(preset.target_temperature)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tion_domain::preset::{PresetError, PresetMode};

    fn device() -> Id {
        Id::parse("dev1").unwrap()
    }

    fn decl(name: PresetName) -> PresetDecl {
        PresetDecl {
            name,
            mode: None,
            fan_speed: None,
            target_temperature: None,
        }
    }

    #[test]
    fn should_compile_nothing_without_presets_key() {
        let compiled = compile_presets(None, &device()).unwrap();
        assert!(compiled.table.is_empty());
        assert!(!compiled.outcome.has_presets);
        assert!(compiled.directives.is_empty());
    }

    #[test]
    fn should_not_flag_presets_for_empty_mapping() {
        let compiled = compile_presets(Some(&[]), &device()).unwrap();
        assert!(!compiled.outcome.has_presets);
    }

    #[test]
    fn should_apply_defaults_to_empty_entry() {
        let compiled = compile_presets(Some(&[decl(PresetName::Eco)]), &device()).unwrap();
        let eco = compiled.table.get(PresetName::Eco).unwrap();
        assert_eq!(eco.mode, PresetMode::Auto);
        assert_eq!(eco.fan_speed, 0);
        assert_eq!(eco.target_temperature, 0);
        assert!(compiled.outcome.has_presets);
        assert!(!compiled.outcome.has_boost);
    }

    #[test]
    fn should_detect_boost_preset() {
        let boost = PresetDecl {
            fan_speed: Some(5),
            ..decl(PresetName::Boost)
        };
        let compiled = compile_presets(Some(&[boost]), &device()).unwrap();
        assert!(compiled.outcome.has_boost);
        assert_eq!(compiled.table.get(PresetName::Boost).unwrap().fan_speed, 5);
    }

    #[test]
    fn should_emit_one_call_per_entry_in_declaration_order() {
        let decls = [decl(PresetName::Sleep), decl(PresetName::Home)];
        let compiled = compile_presets(Some(&decls), &device()).unwrap();
        assert_eq!(
            compiled.directives,
            vec![
                Directive::call(
                    &device(),
                    UPDATE_PRESET,
                    vec![
                        Arg::Symbol("climate::CLIMATE_PRESET_SLEEP"),
                        Arg::Symbol("climate::CLIMATE_MODE_AUTO"),
                        Arg::Int(0),
                        Arg::Int(0),
                    ],
                ),
                Directive::call(
                    &device(),
                    UPDATE_PRESET,
                    vec![
                        Arg::Symbol("climate::CLIMATE_PRESET_HOME"),
                        Arg::Symbol("climate::CLIMATE_MODE_AUTO"),
                        Arg::Int(0),
                        Arg::Int(0),
                    ],
                ),
            ]
        );
    }

    #[test]
    fn should_overwrite_entry_of_same_name() {
        let first = PresetDecl {
            fan_speed: Some(2),
            ..decl(PresetName::Away)
        };
        let second = PresetDecl {
            fan_speed: Some(4),
            ..decl(PresetName::Away)
        };
        let compiled = compile_presets(Some(&[first, second]), &device()).unwrap();
        assert_eq!(compiled.table.len(), 1);
        assert_eq!(compiled.table.get(PresetName::Away).unwrap().fan_speed, 4);
    }

    #[test]
    fn should_reject_out_of_range_fan_speed() {
        let bad = PresetDecl {
            fan_speed: Some(9),
            ..decl(PresetName::Home)
        };
        assert_eq!(
            compile_presets(Some(&[bad]), &device()),
            Err(ConfigError::InvalidPreset(PresetError::FanSpeed(9)))
        );
    }
}
