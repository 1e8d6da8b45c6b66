//! Error types shared across the workspace.
//!
//! Two failure families exist. [`SchemaError`] reports a malformed
//! configuration document (wrong type, out-of-range value, unknown key …)
//! together with the path of the offending value. [`ConfigError`] reports a
//! document that is well-formed but cannot be assembled (identifier
//! collision, transport that the device cannot talk over …). Both abort the
//! enclosing configuration block and convert into [`CompileError`].

use std::fmt;

use serde::Serialize;

use crate::icon::IconError;
use crate::id::{Id, IdError};
use crate::platform::{Platform, VPortKind};
use crate::preset::PresetError;

/// Top-level error returned by a block compilation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One step in a [`ConfigPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside the configuration tree, e.g. `tion[0].presets.boost`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPath(Vec<PathSegment>);

impl ConfigPath {
    /// The document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Child path for a mapping key.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Child path for a sequence index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for ConfigPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A configuration value that does not satisfy the schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid configuration at `{path}`: {reason}")]
pub struct SchemaError {
    pub path: ConfigPath,
    pub reason: SchemaReason,
}

impl SchemaError {
    #[must_use]
    pub fn new(path: ConfigPath, reason: SchemaReason) -> Self {
        Self { path, reason }
    }
}

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaReason {
    #[error("expected {expected}, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("required key not provided")]
    Required,

    #[error("extra keys not allowed")]
    ExtraKey,

    #[error("value {value} is outside the range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("value {value} is not a multiple of the step {step} from {min}")]
    OffStep { value: f64, min: f64, step: f64 },

    #[error("unknown value `{value}`, valid options are: {}", .options.join(", "))]
    UnknownOption {
        value: String,
        options: Vec<&'static str>,
    },

    #[error("invalid identifier")]
    InvalidId(#[source] IdError),

    #[error("ID `{0}` redefined")]
    DuplicateId(Id),

    #[error(transparent)]
    InvalidIcon(IconError),

    #[error("invalid time period `{0}`")]
    InvalidDuration(String),

    #[error("time period must be positive")]
    NonPositiveDuration,

    #[error("{0}")]
    Unsupported(&'static str),
}

/// A well-formed configuration that cannot be assembled into an object graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("ID `{0}` redefined")]
    DuplicateId(Id),

    #[error("generated identifier is invalid")]
    GeneratedId(#[source] IdError),

    #[error("platform `{platform}` has no binding for a `{vport}` transport")]
    IncompatibleTransport { platform: Platform, vport: VPortKind },

    #[error("couldn't find a vport with ID `{0}`")]
    UnknownVPort(Id),

    #[error("no vport declared, a tion device needs a transport")]
    MissingVPort,

    #[error("several vports declared, set `vport_id` to pick one")]
    AmbiguousVPort,

    #[error("vport `{id}` is a `{actual}` transport, expected `{expected}`")]
    VPortKindMismatch {
        id: Id,
        expected: VPortKind,
        actual: VPortKind,
    },
    #[error("block declares platform `{actual}` but is compiled for `{expected}`")]
    PlatformMismatch { expected: Platform, actual: Platform },
    #[error("invalid preset")]
    InvalidPreset(#[source] PresetError),
}
