//! Object graph: the compiled form of one device block.
//!
//! The graph lists every object the firmware will instantiate for the block
//! (transport, protocol API, climate device, auxiliary entities) and the
//! ordered [`Directive`]s that construct and wire them. Two compilations of
//! the same validated configuration against fresh hosts compare equal.

use serde::Serialize;
use tion_domain::entity::{EntityDescriptor, EntityKind};
use tion_domain::icon::Icon;
use tion_domain::id::Id;
use tion_domain::platform::{Platform, StateType, VPortKind};
use tion_domain::time::TimePeriod;

use crate::flags::FeatureFlags;
use crate::ports::{ComponentHandle, EntityHandle};
use crate::presets::PresetTable;

/// Argument of a generated call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Arg {
    Ref(Id),
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    StrList(Vec<&'static str>),
    Symbol(&'static str),
    Period(TimePeriod),
}

/// Host contract an object is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "contract", rename_all = "snake_case")]
pub enum Contract {
    Polling { update_interval: TimePeriod },
    Climate,
    Entity { kind: EntityKind },
}

/// One generated statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Directive {
    /// Instantiate `class` as `id` with constructor `args`.
    New {
        id: Id,
        class: String,
        args: Vec<Arg>,
    },
    /// Register `id` with the host.
    Register { id: Id, contract: Contract },
    /// Invoke `method` on `target`.
    Call {
        target: Id,
        method: &'static str,
        args: Vec<Arg>,
    },
}

impl Directive {
    #[must_use]
    pub fn call(target: &Id, method: &'static str, args: Vec<Arg>) -> Self {
        Self::Call {
            target: target.clone(),
            method,
            args,
        }
    }

    /// Method name when this is a call.
    #[must_use]
    pub fn method(&self) -> Option<&'static str> {
        match self {
            Self::Call { method, .. } => Some(method),
            _ => None,
        }
    }
}

/// The transport the device talks over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VPortNode {
    pub id: Id,
    pub kind: VPortKind,
    pub frame: &'static str,
    /// Set for BLE transports only.
    pub state_timeout: Option<TimePeriod>,
    /// Learnt from the protocol API during binding.
    pub state_type: Option<StateType>,
}

/// The protocol API, parameterised by the transport's frame format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiNode {
    pub id: Id,
    pub class: String,
    pub vport: Id,
}

/// The climate device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceNode {
    pub id: Id,
    pub class: &'static str,
    pub platform: Platform,
    pub api: Id,
    pub name: Option<String>,
    pub icon: Icon,
    pub update_interval: TimePeriod,
    pub component: ComponentHandle,
    pub climate: EntityHandle,
    /// Learnt from the transport during binding.
    pub vport_kind: Option<VPortKind>,
}

/// An auxiliary entity wired into the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityNode {
    pub id: Id,
    /// Configuration key the entity was declared under.
    pub key: &'static str,
    pub class: &'static str,
    /// Device the entity issues commands to, if any.
    pub parent: Option<Id>,
    /// Device setter that stores the entity.
    pub setter: &'static str,
    pub handle: EntityHandle,
    pub descriptor: EntityDescriptor,
}

/// Fully compiled device block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectGraph {
    pub vport: VPortNode,
    pub api: ApiNode,
    pub device: DeviceNode,
    pub entities: Vec<EntityNode>,
    pub presets: PresetTable,
    pub flags: FeatureFlags,
    pub directives: Vec<Directive>,
}

impl ObjectGraph {
    /// Entity declared under `key`, if it was built.
    #[must_use]
    pub fn entity(&self, key: &str) -> Option<&EntityNode> {
        self.entities.iter().find(|entity| entity.key == key)
    }

    /// Whether any directive calls `method`.
    #[must_use]
    pub fn calls(&self, method: &str) -> bool {
        self.directives
            .iter()
            .any(|directive| directive.method() == Some(method))
    }
}
