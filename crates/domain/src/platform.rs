//! Device platforms and transport kinds.

use serde::Serialize;

use crate::choice::enumerated;

enumerated!(
    /// Breezer model family; selects the device class and protocol API.
    pub enum Platform {
        Tion3s => "tion_3s",
        TionLt => "tion_lt",
        TionO2 => "tion_o2",
    }
    default Tion3s
);

impl Platform {
    /// Whether the model has a controllable air-intake gate and productivity counter.
    #[must_use]
    pub fn has_air_intake(self) -> bool {
        matches!(self, Self::Tion3s)
    }
}

enumerated!(
    /// Transport kind tag a vport declares; the device learns it during binding.
    pub enum VPortKind {
        Ble => "ble",
        Uart => "uart",
    }
);

impl VPortKind {
    /// Firmware-side enumerator for the kind.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Ble => "tion::TionVPortType::VPORT_BLE",
            Self::Uart => "tion::TionVPortType::VPORT_UART",
        }
    }
}

/// Name of the state structure a protocol API exchanges with its transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StateType(pub &'static str);

impl std::fmt::Display for StateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Enumerated;

    #[test]
    fn should_default_to_tion_3s() {
        assert_eq!(Platform::default(), Platform::Tion3s);
    }

    #[test]
    fn should_only_give_3s_an_air_intake() {
        assert!(Platform::Tion3s.has_air_intake());
        assert!(!Platform::TionLt.has_air_intake());
        assert!(!Platform::TionO2.has_air_intake());
    }

    #[test]
    fn should_parse_vport_kind() {
        assert_eq!(VPortKind::parse("UART"), Some(VPortKind::Uart));
    }

    #[test]
    fn should_map_vport_kind_to_firmware_symbol() {
        assert_eq!(VPortKind::Ble.symbol(), "tion::TionVPortType::VPORT_BLE");
    }
}
