//! Object graph builder.
//!
//! Instantiates the transport handle, the protocol API and the climate
//! device of one block, registers the device with the host and performs the
//! two-phase metadata exchange between transport and device.
//!
//! ## Binding
//!
//! Metadata flows in two phases so that neither side reads the other before
//! both exist:
//!
//! 1. **resolve**: [`Binding::resolve`] reads the transport kind tag and the
//!    API's state representation from the type parameters;
//! 2. **wire**: the transport learns the API and its state type, the device
//!    learns the transport kind.

use std::collections::HashSet;

use tion_domain::config::{TionConfig, VPortConfig};
use tion_domain::error::ConfigError;
use tion_domain::id::{Id, IdDecl};
use tion_domain::platform::{StateType, VPortKind};

use crate::flags::FeatureFlags;
use crate::graph::{
    ApiNode, Arg, Contract, DeviceNode, Directive, EntityNode, ObjectGraph, VPortNode,
};
use crate::ports::{FrameCompatible, FrameSpec, Host, VPort};
use crate::presets::PresetTable;
use crate::resolver::{ResolvedApi, resolve};

/// Base name of the generated protocol API identifier.
pub const API_ID_BASE: &str = "tion_vport_api";

/// Metadata exchanged between transport and device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub vport_kind: VPortKind,
    pub state_type: StateType,
}

impl Binding {
    /// Read both sides' declarations.
    #[must_use]
    pub fn resolve<P, A>() -> Self
    where
        P: VPort,
        A: FrameCompatible<P::Frame>,
    {
        Self {
            vport_kind: P::KIND,
            state_type: A::STATE_TYPE,
        }
    }

    /// Calls handing each side what it learnt from the other.
    #[must_use]
    pub fn wire(self, vport: &Id, api: &Id, device: &Id) -> Vec<Directive> {
        vec![
            Directive::call(vport, "set_api", vec![Arg::Ref(api.clone())]),
            Directive::call(vport, "set_state_type", vec![Arg::Symbol(self.state_type.0)]),
            Directive::call(
                device,
                "set_vport_type",
                vec![Arg::Symbol(self.vport_kind.symbol())],
            ),
        ]
    }
}

/// A device under construction.
///
/// Entities and directives are appended by the later stages; [`finish`]
/// seals the block into an [`ObjectGraph`].
///
/// [`finish`]: Self::finish
#[derive(Debug)]
pub struct DeviceHandle {
    vport: VPortNode,
    api: ApiNode,
    device: DeviceNode,
    entities: Vec<EntityNode>,
    directives: Vec<Directive>,
}

impl DeviceHandle {
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.device.id
    }

    #[must_use]
    pub fn device(&self) -> &DeviceNode {
        &self.device
    }

    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Append generated statements.
    pub fn emit(&mut self, directives: impl IntoIterator<Item = Directive>) {
        self.directives.extend(directives);
    }

    /// Record an entity wired into the device.
    pub fn attach(&mut self, entity: EntityNode) {
        self.entities.push(entity);
    }

    /// Seal the block.
    #[must_use]
    pub fn finish(self, presets: PresetTable, flags: FeatureFlags) -> ObjectGraph {
        ObjectGraph {
            vport: self.vport,
            api: self.api,
            device: self.device,
            entities: self.entities,
            presets,
            flags,
            directives: self.directives,
        }
    }
}

/// Build the transport, API and device of one block.
///
/// Every manual identifier of the block is claimed before any identifier is
/// generated, so generated names never steal a name the user wrote.
///
/// # Errors
///
/// Returns [`ConfigError`] when the block is compiled for another platform,
/// when the transport cannot be bound, or when a manual identifier is
/// already taken in the host.
#[tracing::instrument(skip_all, fields(platform = %A::PLATFORM, vport = %vport.id))]
pub fn build_device<P, A, H>(
    config: &TionConfig,
    vport: &VPortConfig,
    host: &mut H,
) -> Result<DeviceHandle, ConfigError>
where
    P: VPort,
    A: FrameCompatible<P::Frame>,
    H: Host + ?Sized,
{
    if config.platform != A::PLATFORM {
        return Err(ConfigError::PlatformMismatch {
            expected: A::PLATFORM,
            actual: config.platform,
        });
    }

    // (1) transport handle
    let port = P::bind(vport)?;
    claim_manual_ids(config, port.id(), host)?;

    // Only BLE transports wait for fresh state.
    let state_timeout = (P::KIND == VPortKind::Ble).then_some(config.state_timeout);
    let mut directives = Vec::new();
    if let Some(timeout) = state_timeout {
        directives.push(Directive::call(
            port.id(),
            "set_state_timeout",
            vec![Arg::Period(timeout)],
        ));
    }

    // (2) protocol API parameterised with the transport's frame format
    let api_base = IdDecl::auto(API_ID_BASE).map_err(ConfigError::GeneratedId)?;
    let api = resolve::<P, A>(host.materialise(&api_base), &port);
    directives.push(Directive::New {
        id: api.id().clone(),
        class: ResolvedApi::<P, A>::class_name(),
        args: vec![Arg::Ref(port.id().clone())],
    });

    // (3) device bound to the API
    let device_id = host.materialise(&config.id);
    directives.push(Directive::New {
        id: device_id.clone(),
        class: A::DEVICE_CLASS.to_string(),
        args: vec![Arg::Ref(api.id().clone())],
    });

    // (4) host contracts
    let component = host.register_component(&device_id, config.update_interval);
    directives.push(Directive::Register {
        id: device_id.clone(),
        contract: Contract::Polling {
            update_interval: config.update_interval,
        },
    });
    let climate = host.register_climate(&device_id);
    directives.push(Directive::Register {
        id: device_id.clone(),
        contract: Contract::Climate,
    });
    if let Some(name) = &config.name {
        directives.push(Directive::call(
            &device_id,
            "set_name",
            vec![Arg::Str(name.clone())],
        ));
    }
    directives.push(Directive::call(
        &device_id,
        "set_icon",
        vec![Arg::Str(config.icon.to_string())],
    ));

    // (5) resolve, then wire
    let binding = Binding::resolve::<P, A>();
    directives.extend(binding.wire(port.id(), api.id(), &device_id));
    tracing::debug!(
        device = %device_id,
        api = %api.id(),
        directives = directives.len(),
        "built device"
    );

    Ok(DeviceHandle {
        vport: VPortNode {
            id: port.id().clone(),
            kind: P::KIND,
            frame: <P::Frame as FrameSpec>::TYPE_NAME,
            state_timeout,
            state_type: Some(binding.state_type),
        },
        api: ApiNode {
            id: api.id().clone(),
            class: ResolvedApi::<P, A>::class_name(),
            vport: api.vport().clone(),
        },
        device: DeviceNode {
            id: device_id,
            class: A::DEVICE_CLASS,
            platform: A::PLATFORM,
            api: api.id().clone(),
            name: config.name.clone(),
            icon: config.icon.clone(),
            update_interval: config.update_interval,
            component,
            climate,
            vport_kind: Some(binding.vport_kind),
        },
        entities: Vec::new(),
        directives,
    })
}

/// Take the transport id and every manual id of the block, or none of them.
fn claim_manual_ids<H>(config: &TionConfig, vport: &Id, host: &mut H) -> Result<(), ConfigError>
where
    H: Host + ?Sized,
{
    let manual: Vec<&Id> = std::iter::once(&config.id)
        .chain(config.entities().map(|(_, descriptor)| &descriptor.id))
        .filter_map(IdDecl::manual)
        .collect();

    let mut seen = HashSet::from([vport]);
    for id in &manual {
        if host.contains(id) || !seen.insert(*id) {
            return Err(ConfigError::DuplicateId((*id).clone()));
        }
    }

    if !host.contains(vport) {
        host.insert(vport.clone());
    }
    for id in manual {
        host.insert(id.clone());
    }
    Ok(())
}
