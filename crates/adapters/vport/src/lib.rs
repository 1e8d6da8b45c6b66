//! # tion-adapter-vport
//!
//! Transports a breezer can be reached over.
//!
//! ## Provided transports
//!
//! | Transport | Kind | Frame format |
//! |-----------|------|--------------|
//! | [`BleVPort`] | `ble` | `tion::TionBleIO::frame_spec_type` |
//! | [`UartVPort`] | `uart` | `tion::TionUartIO::frame_spec_type` |
//!
//! Neither does any IO: they only declare what the protocol API must be
//! parameterised with and which kind tag the device learns.
//!
//! ## Dependency rule
//!
//! Depends on `tion-app` (port traits) and `tion-domain` only.

use tion_app::ports::{FrameSpec, VPort};
use tion_domain::config::VPortConfig;
use tion_domain::error::ConfigError;
use tion_domain::id::Id;
use tion_domain::platform::VPortKind;

/// Frames carried over a BLE GATT characteristic.
#[derive(Debug, Clone, Copy)]
pub struct BleFrame;

impl FrameSpec for BleFrame {
    const TYPE_NAME: &'static str = "tion::TionBleIO::frame_spec_type";
}

/// Frames carried over a UART line.
#[derive(Debug, Clone, Copy)]
pub struct UartFrame;

impl FrameSpec for UartFrame {
    const TYPE_NAME: &'static str = "tion::TionUartIO::frame_spec_type";
}

/// A declared BLE transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BleVPort {
    id: Id,
}

impl VPort for BleVPort {
    type Frame = BleFrame;
    const KIND: VPortKind = VPortKind::Ble;

    fn bind(config: &VPortConfig) -> Result<Self, ConfigError> {
        bind_kind(config, Self::KIND).map(|id| Self { id })
    }

    fn id(&self) -> &Id {
        &self.id
    }
}

/// A declared UART transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UartVPort {
    id: Id,
}

impl VPort for UartVPort {
    type Frame = UartFrame;
    const KIND: VPortKind = VPortKind::Uart;

    fn bind(config: &VPortConfig) -> Result<Self, ConfigError> {
        bind_kind(config, Self::KIND).map(|id| Self { id })
    }

    fn id(&self) -> &Id {
        &self.id
    }
}

fn bind_kind(config: &VPortConfig, expected: VPortKind) -> Result<Id, ConfigError> {
    if config.kind != expected {
        return Err(ConfigError::VPortKindMismatch {
            id: config.id.clone(),
            expected,
            actual: config.kind,
        });
    }
    tracing::trace!(vport = %config.id, kind = %expected, "bound transport");
    Ok(config.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(id: &str, kind: VPortKind) -> VPortConfig {
        VPortConfig {
            id: Id::parse(id).unwrap(),
            kind,
        }
    }

    #[test]
    fn should_bind_ble_declaration() {
        let port = BleVPort::bind(&declared("tion_ble", VPortKind::Ble)).unwrap();
        assert_eq!(port.id().as_str(), "tion_ble");
    }

    #[test]
    fn should_bind_uart_declaration() {
        let port = UartVPort::bind(&declared("tion_uart", VPortKind::Uart)).unwrap();
        assert_eq!(port.id().as_str(), "tion_uart");
    }

    #[test]
    fn should_refuse_declaration_of_other_kind() {
        let err = BleVPort::bind(&declared("tion_uart", VPortKind::Uart)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::VPortKindMismatch {
                id: Id::parse("tion_uart").unwrap(),
                expected: VPortKind::Ble,
                actual: VPortKind::Uart,
            }
        );
    }

    #[test]
    fn should_declare_distinct_frame_formats() {
        assert_ne!(BleFrame::TYPE_NAME, UartFrame::TYPE_NAME);
    }
}
