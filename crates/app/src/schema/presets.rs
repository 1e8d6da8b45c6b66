//! `presets` mapping: preset name to (possibly empty) options.

use tion_domain::choice::Enumerated;
use tion_domain::config::PresetDecl;
use tion_domain::error::{SchemaError, SchemaReason};
use tion_domain::preset::{FAN_SPEED_RANGE, PresetMode, PresetName, TARGET_TEMPERATURE_RANGE};

use super::node::Node;

/// Validate the `presets` value, keeping declaration order.
///
/// Names are matched exactly: `Boost` is not the `boost` preset.
pub(crate) fn validate_presets(node: &Node<'_>) -> Result<Vec<PresetDecl>, SchemaError> {
    let mut decls = Vec::new();

    for (key, options) in node.mapping_or_empty()?.entries() {
        let name = PresetName::parse_exact(&key).ok_or_else(|| {
            options.error(SchemaReason::UnknownOption {
                value: key.clone(),
                options: PresetName::options(),
            })
        })?;
        decls.push(validate_preset(name, &options)?);
    }

    Ok(decls)
}

fn validate_preset(name: PresetName, node: &Node<'_>) -> Result<PresetDecl, SchemaError> {
    let mut fields = node.mapping_or_empty()?;
    let decl = PresetDecl {
        name,
        mode: fields
            .optional("mode")
            .map(|n| n.choice_of(PresetMode::CONFIGURABLE))
            .transpose()?,
        fan_speed: fields
            .optional("fan_speed")
            .map(|n| n.small_integer(FAN_SPEED_RANGE))
            .transpose()?,
        target_temperature: fields
            .optional("target_temperature")
            .map(|n| n.small_integer(TARGET_TEMPERATURE_RANGE))
            .transpose()?,
    };
    fields.finish()?;
    Ok(decl)
}
