//! # tion-adapter-protocol
//!
//! Protocol API bases of the supported breezer families.
//!
//! ## Provided APIs
//!
//! | API | Platform | Device | Transports |
//! |-----|----------|--------|------------|
//! | [`TionApi3s`] | `tion_3s` | `tion::Tion3s` | BLE, UART |
//! | [`TionApiLt`] | `tion_lt` | `tion::TionLt` | BLE, UART |
//! | [`TionApiO2`] | `tion_o2` | `tion::TionO2` | UART |
//!
//! Which transports an API understands is expressed with
//! [`FrameCompatible`] impls: a pair without one cannot be compiled.
//!
//! ## Dependency rule
//!
//! Depends on `tion-app` (port traits), `tion-domain`, and
//! `tion-adapter-vport` for the frame formats it declares compatibility with.

use tion_adapter_vport::{BleFrame, UartFrame};
use tion_app::ports::{FrameCompatible, ProtocolApi};
use tion_domain::platform::{Platform, StateType};

/// Tion 3S: gate-controlled breezer with air intake selection.
#[derive(Debug, Clone, Copy)]
pub struct TionApi3s;

impl ProtocolApi for TionApi3s {
    const PLATFORM: Platform = Platform::Tion3s;
    const API_CLASS: &'static str = "dentra::tion::TionApi3s";
    const DEVICE_CLASS: &'static str = "tion::Tion3s";
    const STATE_TYPE: StateType = StateType("tion3s_state_t");
}

impl FrameCompatible<BleFrame> for TionApi3s {}
impl FrameCompatible<UartFrame> for TionApi3s {}

/// Tion Lite.
#[derive(Debug, Clone, Copy)]
pub struct TionApiLt;

impl ProtocolApi for TionApiLt {
    const PLATFORM: Platform = Platform::TionLt;
    const API_CLASS: &'static str = "dentra::tion::TionApiLt";
    const DEVICE_CLASS: &'static str = "tion::TionLt";
    const STATE_TYPE: StateType = StateType("tionlt_state_t");
}

impl FrameCompatible<BleFrame> for TionApiLt {}
impl FrameCompatible<UartFrame> for TionApiLt {}

/// Tion O2, wired over UART only.
#[derive(Debug, Clone, Copy)]
pub struct TionApiO2;

impl ProtocolApi for TionApiO2 {
    const PLATFORM: Platform = Platform::TionO2;
    const API_CLASS: &'static str = "dentra::tion::TionApiO2";
    const DEVICE_CLASS: &'static str = "tion::TionO2";
    const STATE_TYPE: StateType = StateType("tiono2_state_t");
}

impl FrameCompatible<UartFrame> for TionApiO2 {}

#[cfg(test)]
mod tests {
    use super::*;
    use tion_adapter_vport::{BleVPort, UartVPort};
    use tion_app::resolver::ResolvedApi;

    #[test]
    fn should_parameterise_3s_api_with_ble_frames() {
        assert_eq!(
            ResolvedApi::<BleVPort, TionApi3s>::class_name(),
            "tion::TionVPortApi<tion::TionBleIO::frame_spec_type, dentra::tion::TionApi3s>"
        );
    }

    #[test]
    fn should_parameterise_o2_api_with_uart_frames() {
        assert_eq!(
            ResolvedApi::<UartVPort, TionApiO2>::class_name(),
            "tion::TionVPortApi<tion::TionUartIO::frame_spec_type, dentra::tion::TionApiO2>"
        );
    }

    #[test]
    fn should_map_each_api_to_its_platform() {
        assert_eq!(TionApi3s::PLATFORM, Platform::Tion3s);
        assert_eq!(TionApiLt::PLATFORM, Platform::TionLt);
        assert_eq!(TionApiO2::PLATFORM, Platform::TionO2);
    }
}
