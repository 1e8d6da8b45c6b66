//! Schema registry and validator.
//!
//! Validation is a pure function from the raw configuration tree to
//! [`TionConfig`]. It checks types, ranges, enumerations, icon and duration
//! syntax, identifier syntax and uniqueness inside the block, and rejects
//! keys the schema does not know. Host-wide identifier uniqueness is checked
//! later, when the builder claims identifiers.

mod document;
mod entity;
mod node;
mod presets;

use std::collections::HashSet;

use serde_yaml::Value;
use tion_domain::config::{DEFAULT_STATE_TIMEOUT, DEFAULT_UPDATE_INTERVAL, TionConfig};
use tion_domain::entity::EntityDescriptor;
use tion_domain::error::{ConfigPath, SchemaError, SchemaReason};
use tion_domain::icon::{BuiltinIcon, Icon};
use tion_domain::id::IdDecl;
use tion_domain::platform::Platform;

use crate::error::SourceError;

pub use document::{Document, validate_document};

use self::entity::{
    AIR_INTAKE, BOOST_TIME, BOOST_TIME_LEFT, BUZZER, EntitySchema, FILTER_TIME_LEFT,
    OUTDOOR_TEMPERATURE, PRODUCTIVITY, VERSION,
};
use self::node::{Fields, Node};
use self::presets::validate_presets;

/// Parse configuration source text into a tree.
///
/// # Errors
///
/// Returns [`SourceError::Yaml`] when the text is not well-formed YAML.
pub fn parse(text: &str) -> Result<Value, SourceError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Validate one device block given at the root of `tree`.
///
/// # Errors
///
/// Returns a [`SchemaError`] naming the first offending value.
pub fn validate(tree: &Value) -> Result<TionConfig, SchemaError> {
    validate_at(tree, ConfigPath::root())
}

/// Validate one device block located at `path` in a larger document.
///
/// # Errors
///
/// Returns a [`SchemaError`] naming the first offending value.
#[tracing::instrument(skip(tree, path), fields(path = %path))]
pub fn validate_at(tree: &Value, path: ConfigPath) -> Result<TionConfig, SchemaError> {
    let node = Node::new(tree, path);
    let mut fields = node.mapping()?;

    let platform: Platform = fields
        .optional("platform")
        .map(|n| n.choice())
        .transpose()?
        .unwrap_or_default();

    let id = match fields.optional("id") {
        Some(node) => IdDecl::Manual(node.id()?),
        None => IdDecl::auto(platform.to_string().as_str())
            .map_err(|err| node.error(SchemaReason::InvalidId(err)))?,
    };

    let config = TionConfig {
        id,
        platform,
        vport_id: fields.optional("vport_id").map(|n| n.id()).transpose()?,
        name: fields.optional("name").map(|n| n.string()).transpose()?,
        icon: match fields.optional("icon") {
            Some(node) => node.icon()?,
            None => Icon::from(BuiltinIcon::AIR_FILTER),
        },
        buzzer: entity(&mut fields, &BUZZER)?,
        outdoor_temperature: entity(&mut fields, &OUTDOOR_TEMPERATURE)?,
        version: entity(&mut fields, &VERSION)?,
        filter_time_left: entity(&mut fields, &FILTER_TIME_LEFT)?,
        boost_time: entity(&mut fields, &BOOST_TIME)?,
        boost_time_left: entity(&mut fields, &BOOST_TIME_LEFT)?,
        // Left unconsumed on other platforms so they surface as extra keys.
        air_intake: if platform.has_air_intake() {
            entity(&mut fields, &AIR_INTAKE)?
        } else {
            None
        },
        productivity: if platform.has_air_intake() {
            entity(&mut fields, &PRODUCTIVITY)?
        } else {
            None
        },
        presets: fields
            .optional("presets")
            .map(|n| validate_presets(&n))
            .transpose()?,
        state_timeout: fields
            .optional("state_timeout")
            .map(|n| n.positive_period())
            .transpose()?
            .unwrap_or(DEFAULT_STATE_TIMEOUT),
        update_interval: fields
            .optional("update_interval")
            .map(|n| n.positive_period())
            .transpose()?
            .unwrap_or(DEFAULT_UPDATE_INTERVAL),
    };
    fields.finish()?;

    check_unique_ids(&config, node.path())?;
    tracing::debug!(platform = %config.platform, "validated device block");
    Ok(config)
}

fn entity(
    fields: &mut Fields<'_>,
    schema: &EntitySchema,
) -> Result<Option<EntityDescriptor>, SchemaError> {
    fields
        .optional(schema.key)
        .map(|node| schema.validate(&node))
        .transpose()
}

/// Manual identifiers must not repeat inside a block.
fn check_unique_ids(config: &TionConfig, path: &ConfigPath) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    let declared = std::iter::once((None, &config.id)).chain(
        config
            .entities()
            .map(|(key, descriptor)| (Some(key), &descriptor.id)),
    );
    for (key, decl) in declared {
        let Some(id) = decl.manual() else {
            continue;
        };
        if !seen.insert(id) {
            let at = match key {
                Some(key) => path.key(key).key("id"),
                None => path.key("id"),
            };
            return Err(SchemaError::new(at, SchemaReason::DuplicateId(id.clone())));
        }
    }
    Ok(())
}
