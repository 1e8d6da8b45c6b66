//! In-memory collaborators for pipeline tests.

use std::collections::HashSet;

use tion_domain::config::VPortConfig;
use tion_domain::entity::EntityKind;
use tion_domain::error::ConfigError;
use tion_domain::id::Id;
use tion_domain::platform::{Platform, StateType, VPortKind};
use tion_domain::time::TimePeriod;

use crate::ports::{
    ComponentHandle, EntityHandle, EntityRegistry, FrameCompatible, FrameSpec, IdentifierRegistry,
    ProtocolApi, VPort,
};

pub(crate) struct FakeBleFrame;

impl FrameSpec for FakeBleFrame {
    const TYPE_NAME: &'static str = "fake::ble_frame_t";
}

pub(crate) struct FakeBle {
    id: Id,
}

impl VPort for FakeBle {
    type Frame = FakeBleFrame;
    const KIND: VPortKind = VPortKind::Ble;

    fn bind(config: &VPortConfig) -> Result<Self, ConfigError> {
        if config.kind != Self::KIND {
            return Err(ConfigError::VPortKindMismatch {
                id: config.id.clone(),
                expected: Self::KIND,
                actual: config.kind,
            });
        }
        Ok(Self {
            id: config.id.clone(),
        })
    }

    fn id(&self) -> &Id {
        &self.id
    }
}

pub(crate) struct FakeUartFrame;

impl FrameSpec for FakeUartFrame {
    const TYPE_NAME: &'static str = "fake::uart_frame_t";
}

pub(crate) struct FakeUart {
    id: Id,
}

impl VPort for FakeUart {
    type Frame = FakeUartFrame;
    const KIND: VPortKind = VPortKind::Uart;

    fn bind(config: &VPortConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            id: config.id.clone(),
        })
    }

    fn id(&self) -> &Id {
        &self.id
    }
}

pub(crate) struct FakeApi;

impl ProtocolApi for FakeApi {
    const PLATFORM: Platform = Platform::Tion3s;
    const API_CLASS: &'static str = "fake::FakeApi";
    const DEVICE_CLASS: &'static str = "fake::FakeDevice";
    const STATE_TYPE: StateType = StateType("fake_state_t");
}

impl FrameCompatible<FakeBleFrame> for FakeApi {}
impl FrameCompatible<FakeUartFrame> for FakeApi {}

/// Records every identifier and registration it is handed.
#[derive(Default)]
pub(crate) struct FakeHost {
    pub ids: HashSet<Id>,
    pub components: Vec<(Id, TimePeriod)>,
    pub registered: Vec<(Id, EntityKind)>,
}

impl IdentifierRegistry for FakeHost {
    fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    fn insert(&mut self, id: Id) {
        self.ids.insert(id);
    }
}

impl EntityRegistry for FakeHost {
    fn register_component(&mut self, id: &Id, update_interval: TimePeriod) -> ComponentHandle {
        self.components.push((id.clone(), update_interval));
        ComponentHandle(self.components.len() - 1)
    }

    fn register_climate(&mut self, id: &Id) -> EntityHandle {
        self.register(id, EntityKind::Climate)
    }

    fn register(&mut self, id: &Id, kind: EntityKind) -> EntityHandle {
        self.registered.push((id.clone(), kind));
        EntityHandle {
            id: id.clone(),
            kind,
            slot: self.registered.len() - 1,
        }
    }
}

pub(crate) fn ble_vport() -> VPortConfig {
    VPortConfig {
        id: Id::parse("tion_ble").unwrap(),
        kind: VPortKind::Ble,
    }
}

pub(crate) fn uart_vport() -> VPortConfig {
    VPortConfig {
        id: Id::parse("tion_uart").unwrap(),
        kind: VPortKind::Uart,
    }
}
