//! Validated configuration: the typed form every compilation stage consumes.
//!
//! Values here have already passed the schema: ranges, enumerations, icon
//! and duration syntax are guaranteed. Optional sub-entities are `None`
//! when their key was absent, never a materialised default.

use crate::entity::EntityDescriptor;
use crate::error::ConfigError;
use crate::icon::Icon;
use crate::id::{Id, IdDecl};
use crate::platform::{Platform, VPortKind};
use crate::preset::{PresetMode, PresetName};
use crate::time::TimePeriod;

/// Default polling interval of the device.
pub const DEFAULT_UPDATE_INTERVAL: TimePeriod = TimePeriod::from_secs(60);

/// Default time to wait for fresh device state before reporting it stale.
pub const DEFAULT_STATE_TIMEOUT: TimePeriod = TimePeriod::from_secs(15);

/// One validated `tion` device block.
#[derive(Debug, Clone, PartialEq)]
pub struct TionConfig {
    pub id: IdDecl,
    pub platform: Platform,
    pub vport_id: Option<Id>,
    pub name: Option<String>,
    pub icon: Icon,
    pub buzzer: Option<EntityDescriptor>,
    pub outdoor_temperature: Option<EntityDescriptor>,
    pub version: Option<EntityDescriptor>,
    pub filter_time_left: Option<EntityDescriptor>,
    pub boost_time: Option<EntityDescriptor>,
    pub boost_time_left: Option<EntityDescriptor>,
    pub air_intake: Option<EntityDescriptor>,
    pub productivity: Option<EntityDescriptor>,
    pub presets: Option<Vec<PresetDecl>>,
    pub state_timeout: TimePeriod,
    pub update_interval: TimePeriod,
}

impl TionConfig {
    /// Declared optional entities with the key they were declared under.
    pub fn entities(&self) -> impl Iterator<Item = (&'static str, &EntityDescriptor)> {
        [
            ("buzzer", &self.buzzer),
            ("outdoor_temperature", &self.outdoor_temperature),
            ("version", &self.version),
            ("filter_time_left", &self.filter_time_left),
            ("boost_time", &self.boost_time),
            ("boost_time_left", &self.boost_time_left),
            ("air_intake", &self.air_intake),
            ("productivity", &self.productivity),
        ]
        .into_iter()
        .filter_map(|(key, descriptor)| descriptor.as_ref().map(|d| (key, d)))
    }
}

/// A preset as written in configuration, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetDecl {
    pub name: PresetName,
    pub mode: Option<PresetMode>,
    pub fan_speed: Option<u8>,
    pub target_temperature: Option<u8>,
}

/// A declared transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VPortConfig {
    pub id: Id,
    pub kind: VPortKind,
}

impl VPortConfig {
    /// Pick the vport a device block binds to.
    ///
    /// With an explicit `vport_id` the matching declaration is returned.
    /// Without one, the sole declared vport is used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the reference
    /// is unknown, or when none or several vports exist and no id was given.
    pub fn select<'a>(
        vports: &'a [VPortConfig],
        vport_id: Option<&Id>,
    ) -> Result<&'a VPortConfig, ConfigError> {
        match vport_id {
            Some(id) => vports
                .iter()
                .find(|vport| &vport.id == id)
                .ok_or_else(|| ConfigError::UnknownVPort(id.clone())),
            None => match vports {
                [] => Err(ConfigError::MissingVPort),
                [only] => Ok(only),
                _ => Err(ConfigError::AmbiguousVPort),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vport(id: &str, kind: VPortKind) -> VPortConfig {
        VPortConfig {
            id: Id::parse(id).unwrap(),
            kind,
        }
    }

    #[test]
    fn should_select_sole_vport_without_reference() {
        let vports = [vport("tion_ble", VPortKind::Ble)];
        let selected = VPortConfig::select(&vports, None).unwrap();
        assert_eq!(selected.id.as_str(), "tion_ble");
    }

    #[test]
    fn should_select_referenced_vport() {
        let vports = [
            vport("tion_ble", VPortKind::Ble),
            vport("tion_uart", VPortKind::Uart),
        ];
        let id = Id::parse("tion_uart").unwrap();
        let selected = VPortConfig::select(&vports, Some(&id)).unwrap();
        assert_eq!(selected.kind, VPortKind::Uart);
    }

    #[test]
    fn should_fail_on_unknown_reference() {
        let vports = [vport("tion_ble", VPortKind::Ble)];
        let id = Id::parse("nope").unwrap();
        assert_eq!(
            VPortConfig::select(&vports, Some(&id)),
            Err(ConfigError::UnknownVPort(id))
        );
    }

    #[test]
    fn should_fail_without_vports() {
        assert_eq!(VPortConfig::select(&[], None), Err(ConfigError::MissingVPort));
    }

    #[test]
    fn should_fail_when_several_vports_and_no_reference() {
        let vports = [
            vport("tion_ble", VPortKind::Ble),
            vport("tion_uart", VPortKind::Uart),
        ];
        assert_eq!(
            VPortConfig::select(&vports, None),
            Err(ConfigError::AmbiguousVPort)
        );
    }
}
