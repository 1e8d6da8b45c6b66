//! Sub-entity composer.
//!
//! Every optional capability of a breezer goes through the same
//! combinator, [`setup`]: an absent descriptor builds nothing and invokes
//! no setter; a present one instantiates the entity, registers it with the
//! host and hands it to the device.

use tion_domain::config::TionConfig;
use tion_domain::entity::{EntityDescriptor, EntityTraits};
use tion_domain::id::Id;

use crate::builder::DeviceHandle;
use crate::graph::{Arg, Contract, Directive, EntityNode};
use crate::ports::{EntityHandle, Host};
use crate::presets::PresetOutcome;

/// Where an entity plugs into the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Configuration key the entity is declared under.
    pub key: &'static str,
    /// Firmware class instantiated for it.
    pub class: &'static str,
    /// Device method storing the entity.
    pub setter: &'static str,
    /// Whether the entity issues commands to the device and is constructed with it.
    pub binds_parent: bool,
}

pub const BUZZER: Slot = Slot {
    key: "buzzer",
    class: "tion::TionSwitch",
    setter: "set_buzzer",
    binds_parent: true,
};

pub const OUTDOOR_TEMPERATURE: Slot = Slot {
    key: "outdoor_temperature",
    class: "sensor::Sensor",
    setter: "set_outdoor_temperature",
    binds_parent: false,
};

pub const FILTER_TIME_LEFT: Slot = Slot {
    key: "filter_time_left",
    class: "sensor::Sensor",
    setter: "set_filter_time_left",
    binds_parent: false,
};

pub const VERSION: Slot = Slot {
    key: "version",
    class: "text_sensor::TextSensor",
    setter: "set_version",
    binds_parent: false,
};

pub const AIR_INTAKE: Slot = Slot {
    key: "air_intake",
    class: "tion::Tion3sAirIntakeSelect",
    setter: "set_air_intake",
    binds_parent: true,
};

pub const PRODUCTIVITY: Slot = Slot {
    key: "productivity",
    class: "sensor::Sensor",
    setter: "set_airflow_counter",
    binds_parent: false,
};

pub const BOOST_TIME: Slot = Slot {
    key: "boost_time",
    class: "tion::TionBoostTimeNumber",
    setter: "set_boost_time",
    binds_parent: false,
};

pub const BOOST_TIME_LEFT: Slot = Slot {
    key: "boost_time_left",
    class: "sensor::Sensor",
    setter: "set_boost_time_left",
    binds_parent: false,
};

/// Build the entity declared for `slot`, if any, and wire it into `device`.
///
/// Returns `None`, with no side effect, when `descriptor` is absent.
pub fn setup<H>(
    device: &mut DeviceHandle,
    host: &mut H,
    slot: &Slot,
    descriptor: Option<&EntityDescriptor>,
) -> Option<EntityHandle>
where
    H: Host + ?Sized,
{
    let descriptor = descriptor?;
    let id = host.materialise(&descriptor.id);
    let kind = descriptor.kind();
    let parent = slot.binds_parent.then(|| device.id().clone());

    let mut directives = vec![Directive::New {
        id: id.clone(),
        class: slot.class.to_string(),
        args: parent.iter().cloned().map(Arg::Ref).collect(),
    }];
    let handle = host.register(&id, kind);
    directives.push(Directive::Register {
        id: id.clone(),
        contract: Contract::Entity { kind },
    });
    directives.extend(attributes(&id, descriptor));
    directives.push(Directive::call(device.id(), slot.setter, vec![Arg::Ref(id.clone())]));

    tracing::debug!(entity = %id, key = slot.key, %kind, "composed entity");
    device.emit(directives);
    device.attach(EntityNode {
        id,
        key: slot.key,
        class: slot.class,
        parent,
        setter: slot.setter,
        handle: handle.clone(),
        descriptor: descriptor.clone(),
    });
    Some(handle)
}

/// Compose the entities that need no preset.
#[tracing::instrument(skip_all, fields(device = %device.id()))]
pub fn compose<H>(device: &mut DeviceHandle, host: &mut H, config: &TionConfig)
where
    H: Host + ?Sized,
{
    setup(device, host, &BUZZER, config.buzzer.as_ref());
    setup(device, host, &OUTDOOR_TEMPERATURE, config.outdoor_temperature.as_ref());
    setup(device, host, &FILTER_TIME_LEFT, config.filter_time_left.as_ref());
    setup(device, host, &VERSION, config.version.as_ref());
    setup(device, host, &AIR_INTAKE, config.air_intake.as_ref());
    setup(device, host, &PRODUCTIVITY, config.productivity.as_ref());
}

/// Compose the boost entities, which only exist alongside a `boost` preset.
#[tracing::instrument(skip_all, fields(device = %device.id()))]
pub fn compose_boost<H>(
    device: &mut DeviceHandle,
    host: &mut H,
    config: &TionConfig,
    presets: PresetOutcome,
) where
    H: Host + ?Sized,
{
    let gated = [
        (&BOOST_TIME, config.boost_time.as_ref()),
        (&BOOST_TIME_LEFT, config.boost_time_left.as_ref()),
    ];
    let open = presets.has_presets && presets.has_boost;
    for (slot, descriptor) in gated {
        if open {
            setup(device, host, slot, descriptor);
        } else if descriptor.is_some() {
            tracing::warn!(
                key = slot.key,
                "skipping entity: it requires a preset named `boost`"
            );
        }
    }
}

fn attributes(id: &Id, descriptor: &EntityDescriptor) -> Vec<Directive> {
    let mut calls = Vec::new();
    let mut set = |method: &'static str, arg: Arg| calls.push(Directive::call(id, method, vec![arg]));

    if let Some(name) = &descriptor.name {
        set("set_name", Arg::Str(name.clone()));
    }
    if let Some(icon) = &descriptor.icon {
        set("set_icon", Arg::Str(icon.to_string()));
    }
    set(
        "set_entity_category",
        Arg::Symbol(descriptor.entity_category.symbol()),
    );
    if let Some(internal) = descriptor.internal {
        set("set_internal", Arg::Bool(internal));
    }
    if descriptor.disabled_by_default {
        set("set_disabled_by_default", Arg::Bool(true));
    }

    match &descriptor.traits {
        EntityTraits::Switch | EntityTraits::TextSensor => {}
        EntityTraits::Sensor(traits) => {
            if let Some(unit) = &traits.unit_of_measurement {
                set("set_unit_of_measurement", Arg::Str(unit.clone()));
            }
            set(
                "set_accuracy_decimals",
                Arg::Int(i64::from(traits.accuracy_decimals)),
            );
            if let Some(device_class) = traits.device_class {
                set("set_device_class", Arg::Str(device_class.to_string()));
            }
            if let Some(state_class) = traits.state_class {
                set("set_state_class", Arg::Symbol(state_class.symbol()));
            }
        }
        EntityTraits::Number(traits) => {
            set("traits.set_min_value", Arg::Float(traits.min_value));
            set("traits.set_max_value", Arg::Float(traits.max_value));
            set("traits.set_step", Arg::Float(traits.step));
            set(
                "traits.set_unit_of_measurement",
                Arg::Str(traits.unit_of_measurement.clone()),
            );
            set("traits.set_mode", Arg::Symbol(traits.mode.symbol()));
            if let Some(value) = traits.initial_value {
                set("set_initial_value", Arg::Float(value));
            }
        }
        EntityTraits::Select(traits) => {
            set("traits.set_options", Arg::StrList(traits.options.clone()));
        }
    }
    calls
}
