//! Typed cursor over the raw configuration tree.
//!
//! Every accessor either returns a typed value or a [`SchemaError`] carrying
//! the path of the value it was looking at.

use std::ops::RangeInclusive;

use serde_yaml::Value;
use tion_domain::choice::Enumerated;
use tion_domain::error::{ConfigPath, SchemaError, SchemaReason};
use tion_domain::icon::Icon;
use tion_domain::id::Id;
use tion_domain::time::TimePeriod;

/// A value in the configuration tree together with its location.
#[derive(Debug, Clone)]
pub(crate) struct Node<'a> {
    value: &'a Value,
    path: ConfigPath,
}

impl<'a> Node<'a> {
    pub(crate) fn new(value: &'a Value, path: ConfigPath) -> Self {
        Self { value, path }
    }

    pub(crate) fn value(&self) -> &'a Value {
        self.value
    }

    pub(crate) fn path(&self) -> &ConfigPath {
        &self.path
    }

    pub(crate) fn error(&self, reason: SchemaReason) -> SchemaError {
        SchemaError::new(self.path.clone(), reason)
    }

    fn wrong_type(&self, expected: &'static str) -> SchemaError {
        self.error(SchemaReason::WrongType {
            expected,
            actual: type_name(self.value),
        })
    }

    pub(crate) fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// A string scalar; numbers are accepted and rendered as written.
    pub(crate) fn string(&self) -> Result<String, SchemaError> {
        match self.value {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(number.to_string()),
            _ => Err(self.wrong_type("a string")),
        }
    }

    /// A boolean, also accepting the usual textual spellings.
    pub(crate) fn boolean(&self) -> Result<bool, SchemaError> {
        match self.value {
            Value::Bool(value) => Ok(*value),
            Value::String(text) => match text.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "enable" => Ok(true),
                "false" | "no" | "off" | "disable" => Ok(false),
                _ => Err(self.wrong_type("a boolean")),
            },
            _ => Err(self.wrong_type("a boolean")),
        }
    }

    /// An integer within `range`, both ends inclusive.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn integer(&self, range: RangeInclusive<i64>) -> Result<i64, SchemaError> {
        let value = match self.value {
            Value::Number(number) => number.as_i64().or_else(|| integral(number.as_f64()?)),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.wrong_type("an integer"))?;

        if !range.contains(&value) {
            return Err(self.error(SchemaReason::OutOfRange {
                value: value as f64,
                min: *range.start() as f64,
                max: *range.end() as f64,
            }));
        }
        Ok(value)
    }

    /// An integer that fits in a `u8` and lies within `range`.
    pub(crate) fn small_integer(&self, range: RangeInclusive<u8>) -> Result<u8, SchemaError> {
        let value = self.integer(i64::from(*range.start())..=i64::from(*range.end()))?;
        u8::try_from(value).map_err(|_| self.wrong_type("an integer"))
    }

    pub(crate) fn float(&self) -> Result<f64, SchemaError> {
        match self.value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.wrong_type("a number"))
    }

    /// A member of `E`, matched case-insensitively.
    pub(crate) fn choice<E: Enumerated>(&self) -> Result<E, SchemaError> {
        self.choice_of(E::ALL)
    }

    /// A member of `allowed`, matched case-insensitively.
    pub(crate) fn choice_of<E: Enumerated>(&self, allowed: &[E]) -> Result<E, SchemaError> {
        let text = self.string()?;
        E::parse(&text)
            .filter(|member| allowed.contains(member))
            .ok_or_else(|| {
                self.error(SchemaReason::UnknownOption {
                    value: text,
                    options: allowed.iter().map(|member| member.as_str()).collect(),
                })
            })
    }

    pub(crate) fn id(&self) -> Result<Id, SchemaError> {
        Id::parse(self.string()?).map_err(|err| self.error(SchemaReason::InvalidId(err)))
    }

    pub(crate) fn icon(&self) -> Result<Icon, SchemaError> {
        Icon::parse(&self.string()?).map_err(|err| self.error(SchemaReason::InvalidIcon(err)))
    }

    /// A time period; bare numbers are seconds.
    pub(crate) fn period(&self) -> Result<TimePeriod, SchemaError> {
        let text = self.string()?;
        TimePeriod::parse(&text).map_err(|_| self.error(SchemaReason::InvalidDuration(text)))
    }

    /// A time period strictly greater than zero.
    pub(crate) fn positive_period(&self) -> Result<TimePeriod, SchemaError> {
        let period = self.period()?;
        if period.is_zero() {
            return Err(self.error(SchemaReason::NonPositiveDuration));
        }
        Ok(period)
    }

    /// Elements of a sequence, each with its indexed path.
    pub(crate) fn sequence(&self) -> Result<Vec<Node<'a>>, SchemaError> {
        let Value::Sequence(items) = self.value else {
            return Err(self.wrong_type("a list"));
        };
        Ok(items
            .iter()
            .enumerate()
            .map(|(index, item)| Node::new(item, self.path.index(index)))
            .collect())
    }

    /// The keys of a mapping.
    pub(crate) fn mapping(&self) -> Result<Fields<'a>, SchemaError> {
        let Value::Mapping(mapping) = self.value else {
            return Err(self.wrong_type("a mapping"));
        };
        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Value::String(key) = key else {
                return Err(self.error(SchemaReason::WrongType {
                    expected: "a string key",
                    actual: type_name(key),
                }));
            };
            entries.push(Entry {
                key: key.clone(),
                value,
                consumed: false,
            });
        }
        Ok(Fields {
            path: self.path.clone(),
            entries,
        })
    }

    /// A mapping, treating `null` as an empty one.
    pub(crate) fn mapping_or_empty(&self) -> Result<Fields<'a>, SchemaError> {
        if self.is_null() {
            return Ok(Fields {
                path: self.path.clone(),
                entries: Vec::new(),
            });
        }
        self.mapping()
    }
}

#[derive(Debug)]
struct Entry<'a> {
    key: String,
    value: &'a Value,
    consumed: bool,
}

/// The keys of a mapping, consumed one by one.
///
/// Whatever is left when [`finish`](Self::finish) is called is an extra key.
#[derive(Debug)]
pub(crate) struct Fields<'a> {
    path: ConfigPath,
    entries: Vec<Entry<'a>>,
}

impl<'a> Fields<'a> {
    pub(crate) fn path(&self) -> &ConfigPath {
        &self.path
    }

    /// Take `key` if it is present.
    pub(crate) fn optional(&mut self, key: &str) -> Option<Node<'a>> {
        let entry = self.entries.iter_mut().find(|entry| entry.key == key)?;
        entry.consumed = true;
        Some(Node::new(entry.value, self.path.key(key)))
    }

    /// Take `key`, failing when it is absent.
    pub(crate) fn required(&mut self, key: &str) -> Result<Node<'a>, SchemaError> {
        let path = self.path.key(key);
        self.optional(key)
            .ok_or_else(|| SchemaError::new(path, SchemaReason::Required))
    }

    /// Fail if `key` is present.
    pub(crate) fn reject(&mut self, key: &str, message: &'static str) -> Result<(), SchemaError> {
        match self.optional(key) {
            Some(node) => Err(node.error(SchemaReason::Unsupported(message))),
            None => Ok(()),
        }
    }

    /// Take every remaining key, in declaration order.
    pub(crate) fn entries(mut self) -> Vec<(String, Node<'a>)> {
        let path = self.path.clone();
        self.entries
            .iter_mut()
            .filter(|entry| !entry.consumed)
            .map(|entry| {
                entry.consumed = true;
                (entry.key.clone(), Node::new(entry.value, path.key(&entry.key)))
            })
            .collect()
    }

    /// Fail on the first key no accessor has taken.
    pub(crate) fn finish(self) -> Result<(), SchemaError> {
        match self.entries.iter().find(|entry| !entry.consumed) {
            Some(entry) => Err(SchemaError::new(
                self.path.key(&entry.key),
                SchemaReason::ExtraKey,
            )),
            None => Ok(()),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < 9.0e15).then(|| value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tion_domain::preset::PresetMode;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    fn at<'a>(value: &'a Value, key: &str) -> Node<'a> {
        Node::new(value, ConfigPath::root().key(key))
    }

    #[test]
    fn should_read_integer_within_range() {
        let value = yaml("5");
        assert_eq!(at(&value, "fan_speed").integer(1..=6).unwrap(), 5);
    }

    #[test]
    fn should_reject_integer_outside_range_with_path() {
        let value = yaml("7");
        let err = at(&value, "fan_speed").integer(1..=6).unwrap_err();
        assert_eq!(err.path.to_string(), "fan_speed");
        assert!(matches!(err.reason, SchemaReason::OutOfRange { .. }));
    }

    #[test]
    fn should_reject_fractional_integer() {
        let value = yaml("2.5");
        let err = at(&value, "fan_speed").integer(1..=6).unwrap_err();
        assert!(matches!(
            err.reason,
            SchemaReason::WrongType {
                expected: "an integer",
                ..
            }
        ));
    }

    #[test]
    fn should_match_choice_case_insensitively() {
        let value = yaml("HEAT");
        assert_eq!(
            at(&value, "mode").choice::<PresetMode>().unwrap(),
            PresetMode::Heat
        );
    }

    #[test]
    fn should_reject_choice_outside_allowed_subset() {
        let value = yaml("auto");
        let err = at(&value, "mode")
            .choice_of(PresetMode::CONFIGURABLE)
            .unwrap_err();
        assert_eq!(
            err.reason,
            SchemaReason::UnknownOption {
                value: "auto".to_string(),
                options: vec!["off", "heat", "fan_only"],
            }
        );
    }

    #[test]
    fn should_accept_textual_booleans() {
        let value = yaml("\"yes\"");
        assert!(at(&value, "internal").boolean().unwrap());
    }

    #[test]
    fn should_reject_zero_period_where_positive_required() {
        let value = yaml("0s");
        let err = at(&value, "state_timeout").positive_period().unwrap_err();
        assert_eq!(err.reason, SchemaReason::NonPositiveDuration);
    }

    #[test]
    fn should_treat_null_as_empty_mapping() {
        let value = yaml("~");
        let fields = at(&value, "eco").mapping_or_empty().unwrap();
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn should_report_first_unconsumed_key_as_extra() {
        let value = yaml("{id: a, colour: red}");
        let mut fields = at(&value, "buzzer").mapping().unwrap();
        fields.optional("id");
        let err = fields.finish().unwrap_err();
        assert_eq!(err.path.to_string(), "buzzer.colour");
        assert_eq!(err.reason, SchemaReason::ExtraKey);
    }

    #[test]
    fn should_report_missing_required_key() {
        let value = yaml("{}");
        let mut fields = at(&value, "vport").mapping().unwrap();
        let err = fields.required("type").unwrap_err();
        assert_eq!(err.path.to_string(), "vport.type");
        assert_eq!(err.reason, SchemaReason::Required);
    }

    #[test]
    fn should_reject_present_unsupported_key() {
        let value = yaml("{inverted: true}");
        let mut fields = at(&value, "buzzer").mapping().unwrap();
        let err = fields
            .reject("inverted", "inverted mode is not supported")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration at `buzzer.inverted`: inverted mode is not supported"
        );
    }

    #[test]
    fn should_keep_declaration_order_of_entries() {
        let value = yaml("{sleep: ~, home: ~, away: ~}");
        let keys: Vec<String> = at(&value, "presets")
            .mapping()
            .unwrap()
            .entries()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["sleep", "home", "away"]);
    }

    #[test]
    fn should_index_sequence_paths() {
        let value = yaml("[a, b]");
        let items = Node::new(&value, ConfigPath::root().key("tion"))
            .sequence()
            .unwrap();
        assert_eq!(items[1].path().to_string(), "tion[1]");
    }
}
