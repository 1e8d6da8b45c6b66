//! Sub-schemas of the optional entities a block may declare.
//!
//! Each [`EntitySchema`] fixes the per-key defaults (identifier base, icon,
//! unit, device class …); users may override the display attributes but
//! never the entity kind.

use tion_domain::entity::{
    DeviceClass, EntityCategory, EntityDescriptor, EntityTraits, NumberMode, NumberTraits,
    SelectTraits, SensorTraits, StateClass,
};
use tion_domain::error::{SchemaError, SchemaReason};
use tion_domain::icon::{BuiltinIcon, Icon};
use tion_domain::id::IdDecl;

use super::node::{Fields, Node};

/// Kind-specific part of an entity sub-schema.
#[derive(Debug, Clone, Copy)]
pub(crate) enum KindSchema {
    Switch {
        /// Message for the unsupported `inverted` key.
        inverted: &'static str,
    },
    Sensor {
        unit: &'static str,
        accuracy_decimals: u8,
        device_class: DeviceClass,
        state_class: StateClass,
    },
    TextSensor,
    Number {
        min: f64,
        max: f64,
        step: f64,
        unit: &'static str,
    },
    Select {
        options: &'static [&'static str],
    },
}

/// Defaults and constraints of one optional entity key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EntitySchema {
    pub key: &'static str,
    pub id_base: &'static str,
    pub icon: Option<BuiltinIcon>,
    pub entity_category: EntityCategory,
    pub kind: KindSchema,
}

pub(crate) const BUZZER: EntitySchema = EntitySchema {
    key: "buzzer",
    id_base: "tion_switch",
    icon: Some(BuiltinIcon::VOLUME_HIGH),
    entity_category: EntityCategory::Config,
    kind: KindSchema::Switch {
        inverted: "inverted mode is not supported",
    },
};

pub(crate) const OUTDOOR_TEMPERATURE: EntitySchema = EntitySchema {
    key: "outdoor_temperature",
    id_base: "sensor",
    icon: None,
    entity_category: EntityCategory::None,
    kind: KindSchema::Sensor {
        unit: "°C",
        accuracy_decimals: 0,
        device_class: DeviceClass::Temperature,
        state_class: StateClass::Measurement,
    },
};

pub(crate) const VERSION: EntitySchema = EntitySchema {
    key: "version",
    id_base: "text_sensor",
    icon: Some(BuiltinIcon::GIT),
    entity_category: EntityCategory::Diagnostic,
    kind: KindSchema::TextSensor,
};

pub(crate) const FILTER_TIME_LEFT: EntitySchema = EntitySchema {
    key: "filter_time_left",
    id_base: "sensor",
    icon: Some(BuiltinIcon::AIR_FILTER),
    entity_category: EntityCategory::None,
    kind: KindSchema::Sensor {
        unit: "d",
        accuracy_decimals: 0,
        device_class: DeviceClass::Duration,
        state_class: StateClass::Measurement,
    },
};

/// Boost duration control, in minutes.
pub(crate) const BOOST_TIME: EntitySchema = EntitySchema {
    key: "boost_time",
    id_base: "tion_boost_time_number",
    icon: Some(BuiltinIcon::CLOCK_FAST),
    entity_category: EntityCategory::Config,
    kind: KindSchema::Number {
        min: 1.0,
        max: 60.0,
        step: 1.0,
        unit: "min",
    },
};

pub(crate) const BOOST_TIME_LEFT: EntitySchema = EntitySchema {
    key: "boost_time_left",
    id_base: "sensor",
    icon: Some(BuiltinIcon::CLOCK_END),
    entity_category: EntityCategory::None,
    kind: KindSchema::Sensor {
        unit: "s",
        accuracy_decimals: 1,
        device_class: DeviceClass::Duration,
        state_class: StateClass::Measurement,
    },
};

pub(crate) const AIR_INTAKE: EntitySchema = EntitySchema {
    key: "air_intake",
    id_base: "tion_air_intake_select",
    icon: Some(BuiltinIcon::VALVE),
    entity_category: EntityCategory::Config,
    kind: KindSchema::Select {
        options: &["indoor", "mixed", "outdoor"],
    },
};

pub(crate) const PRODUCTIVITY: EntitySchema = EntitySchema {
    key: "productivity",
    id_base: "sensor",
    icon: Some(BuiltinIcon::WEATHER_WINDY),
    entity_category: EntityCategory::None,
    kind: KindSchema::Sensor {
        unit: "m³/h",
        accuracy_decimals: 0,
        device_class: DeviceClass::VolumeFlowRate,
        state_class: StateClass::Measurement,
    },
};

impl EntitySchema {
    /// Validate the sub-mapping declared under [`key`](Self::key).
    pub(crate) fn validate(&self, node: &Node<'_>) -> Result<EntityDescriptor, SchemaError> {
        let mut fields = node.mapping_or_empty()?;

        let id = match fields.optional("id") {
            Some(node) => IdDecl::Manual(node.id()?),
            None => IdDecl::auto(self.id_base)
                .map_err(|err| node.error(SchemaReason::InvalidId(err)))?,
        };
        let name = fields.optional("name").map(|n| n.string()).transpose()?;
        let icon = match fields.optional("icon") {
            Some(node) => Some(node.icon()?),
            None => self.icon.map(Icon::from),
        };
        let entity_category = match fields.optional("entity_category") {
            Some(node) => node.choice()?,
            None => self.entity_category,
        };
        let internal = fields.optional("internal").map(|n| n.boolean()).transpose()?;
        let disabled_by_default = fields
            .optional("disabled_by_default")
            .map(|n| n.boolean())
            .transpose()?
            .unwrap_or(false);

        let traits = self.traits(&mut fields)?;
        fields.finish()?;

        Ok(EntityDescriptor {
            id,
            name,
            icon,
            entity_category,
            internal,
            disabled_by_default,
            traits,
        })
    }

    fn traits(&self, fields: &mut Fields<'_>) -> Result<EntityTraits, SchemaError> {
        let traits = match self.kind {
            KindSchema::Switch { inverted } => {
                fields.reject("inverted", inverted)?;
                EntityTraits::Switch
            }
            KindSchema::Sensor {
                unit,
                accuracy_decimals,
                device_class,
                state_class,
            } => EntityTraits::Sensor(SensorTraits {
                unit_of_measurement: Some(
                    fields
                        .optional("unit_of_measurement")
                        .map(|n| n.string())
                        .transpose()?
                        .unwrap_or_else(|| unit.to_string()),
                ),
                accuracy_decimals: fields
                    .optional("accuracy_decimals")
                    .map(|n| n.small_integer(0..=u8::MAX))
                    .transpose()?
                    .unwrap_or(accuracy_decimals),
                device_class: Some(
                    fields
                        .optional("device_class")
                        .map(|n| n.choice())
                        .transpose()?
                        .unwrap_or(device_class),
                ),
                state_class: Some(
                    fields
                        .optional("state_class")
                        .map(|n| n.choice())
                        .transpose()?
                        .unwrap_or(state_class),
                ),
            }),
            KindSchema::TextSensor => EntityTraits::TextSensor,
            KindSchema::Number {
                min,
                max,
                step,
                unit,
            } => {
                let mut traits = NumberTraits {
                    min_value: min,
                    max_value: max,
                    step,
                    unit_of_measurement: fields
                        .optional("unit_of_measurement")
                        .map(|n| n.string())
                        .transpose()?
                        .unwrap_or_else(|| unit.to_string()),
                    mode: fields
                        .optional("mode")
                        .map(|n| n.choice::<NumberMode>())
                        .transpose()?
                        .unwrap_or_default(),
                    initial_value: None,
                };
                if let Some(node) = fields.optional("initial_value") {
                    traits.initial_value = Some(initial_value(&node, &traits)?);
                }
                EntityTraits::Number(traits)
            }
            KindSchema::Select { options } => EntityTraits::Select(SelectTraits {
                options: options.to_vec(),
            }),
        };
        Ok(traits)
    }
}

fn initial_value(node: &Node<'_>, traits: &NumberTraits) -> Result<f64, SchemaError> {
    let value = node.float()?;
    if !traits.contains(value) {
        return Err(node.error(SchemaReason::OutOfRange {
            value,
            min: traits.min_value,
            max: traits.max_value,
        }));
    }
    if !traits.is_on_step(value) {
        return Err(node.error(SchemaReason::OffStep {
            value,
            min: traits.min_value,
            step: traits.step,
        }));
    }
    Ok(value)
}
