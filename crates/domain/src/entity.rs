//! Entity descriptors: the optional controls and sensors attached to a breezer.
//!
//! A descriptor carries everything the configuration says about one entity:
//! its identity, display attributes and kind-specific traits. Descriptors are
//! produced by validation and consumed, unchanged, by the composer.

use serde::Serialize;

use crate::choice::enumerated;
use crate::icon::Icon;
use crate::id::IdDecl;

enumerated!(
    /// Host entity framework an entity belongs to.
    pub enum EntityKind {
        Climate => "climate",
        Switch => "switch",
        Sensor => "sensor",
        TextSensor => "text_sensor",
        Number => "number",
        Select => "select",
    }
);

enumerated!(
    /// Where the host surfaces the entity.
    pub enum EntityCategory {
        None => "none",
        Config => "config",
        Diagnostic => "diagnostic",
    }
    default None
);

impl EntityCategory {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::None => "ENTITY_CATEGORY_NONE",
            Self::Config => "ENTITY_CATEGORY_CONFIG",
            Self::Diagnostic => "ENTITY_CATEGORY_DIAGNOSTIC",
        }
    }
}

enumerated!(
    /// Physical quantity a sensor measures.
    pub enum DeviceClass {
        Duration => "duration",
        Temperature => "temperature",
        Humidity => "humidity",
        VolumeFlowRate => "volume_flow_rate",
        Volume => "volume",
        Power => "power",
        Energy => "energy",
        Voltage => "voltage",
        Current => "current",
        Pressure => "pressure",
        Timestamp => "timestamp",
    }
);

enumerated!(
    /// How a sensor's values accumulate.
    pub enum StateClass {
        Measurement => "measurement",
        Total => "total",
        TotalIncreasing => "total_increasing",
    }
);

impl StateClass {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Measurement => "sensor::STATE_CLASS_MEASUREMENT",
            Self::Total => "sensor::STATE_CLASS_TOTAL",
            Self::TotalIncreasing => "sensor::STATE_CLASS_TOTAL_INCREASING",
        }
    }
}

enumerated!(
    /// Presentation of a numeric control.
    pub enum NumberMode {
        Auto => "auto",
        Box => "box",
        Slider => "slider",
    }
    default Auto
);

impl NumberMode {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Auto => "number::NUMBER_MODE_AUTO",
            Self::Box => "number::NUMBER_MODE_BOX",
            Self::Slider => "number::NUMBER_MODE_SLIDER",
        }
    }
}

/// Attributes common to every entity kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDescriptor {
    #[serde(skip)]
    pub id: IdDecl,
    pub name: Option<String>,
    pub icon: Option<Icon>,
    pub entity_category: EntityCategory,
    pub internal: Option<bool>,
    pub disabled_by_default: bool,
    pub traits: EntityTraits,
}

impl EntityDescriptor {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.traits.kind()
    }
}

/// Kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityTraits {
    Switch,
    Sensor(SensorTraits),
    TextSensor,
    Number(NumberTraits),
    Select(SelectTraits),
}

impl EntityTraits {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Switch => EntityKind::Switch,
            Self::Sensor(_) => EntityKind::Sensor,
            Self::TextSensor => EntityKind::TextSensor,
            Self::Number(_) => EntityKind::Number,
            Self::Select(_) => EntityKind::Select,
        }
    }
}

/// Measurement attributes of a sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorTraits {
    pub unit_of_measurement: Option<String>,
    pub accuracy_decimals: u8,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
}

/// Bounds and presentation of a numeric control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberTraits {
    pub min_value: f64,
    pub max_value: f64,
    pub step: f64,
    pub unit_of_measurement: String,
    pub mode: NumberMode,
    pub initial_value: Option<f64>,
}

impl NumberTraits {
    /// Whether `value` lies in `[min_value, max_value]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    /// Whether `value` sits on the step grid anchored at `min_value`.
    #[must_use]
    pub fn is_on_step(&self, value: f64) -> bool {
        let steps = (value - self.min_value) / self.step;
        (steps - steps.round()).abs() < 1e-9
    }
}

/// Options of a select control, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectTraits {
    pub options: Vec<&'static str>,
}
