//! The compilation pipeline of one device block.
//!
//! Stages run in a fixed order: builder, ungated entities, preset table,
//! boost entities, feature flags. A failing stage aborts the block and the
//! partial graph is dropped with it.

use serde_yaml::Value;
use tion_domain::config::{TionConfig, VPortConfig};
use tion_domain::error::{CompileError, ConfigError};

use crate::builder::build_device;
use crate::composer::{compose, compose_boost};
use crate::flags::FeatureFlags;
use crate::graph::ObjectGraph;
use crate::ports::{FrameCompatible, Host, VPort};
use crate::presets::compile_presets;
use crate::schema::validate;

/// Compile a validated block, binding API `A` to transport `P`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the block cannot be assembled (see
/// [`build_device`]).
#[tracing::instrument(skip_all, fields(vport = %vport.id))]
pub fn compile_block<P, A, H>(
    config: &TionConfig,
    vport: &VPortConfig,
    host: &mut H,
) -> Result<ObjectGraph, ConfigError>
where
    P: VPort,
    A: FrameCompatible<P::Frame>,
    H: Host + ?Sized,
{
    let mut device = build_device::<P, A, H>(config, vport, host)?;
    compose(&mut device, host, config);

    let presets = compile_presets(config.presets.as_deref(), device.id())?;
    device.emit(presets.directives);
    compose_boost(&mut device, host, config, presets.outcome);

    let flags = FeatureFlags::emit(presets.outcome.has_presets);
    let graph = device.finish(presets.table, flags);
    tracing::info!(
        device = %graph.device.id,
        entities = graph.entities.len(),
        presets = graph.presets.len(),
        "compiled device block"
    );
    Ok(graph)
}

/// Validate a raw block and compile it.
///
/// # Errors
///
/// Returns [`CompileError::Schema`] when validation fails and
/// [`CompileError::Config`] when assembly fails.
pub fn compile<P, A, H>(
    tree: &Value,
    vport: &VPortConfig,
    host: &mut H,
) -> Result<ObjectGraph, CompileError>
where
    P: VPort,
    A: FrameCompatible<P::Frame>,
    H: Host + ?Sized,
{
    let config = validate(tree)?;
    Ok(compile_block::<P, A, H>(&config, vport, host)?)
}
