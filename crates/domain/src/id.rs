//! Object identifiers.
//!
//! Every object in the compiled graph is named by an [`Id`]. Identifiers
//! follow C identifier syntax because they end up as variable names in the
//! generated firmware. A configuration either names an object explicitly or
//! leaves the name to be generated from a base (see [`IdDecl`]).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Words that cannot be used as identifiers.
const RESERVED: &[&str] = &[
    "App", "auto", "bool", "break", "case", "char", "class", "const", "continue", "default",
    "delete", "do", "double", "else", "enum", "esphome", "false", "float", "for", "if", "int",
    "long", "namespace", "new", "nullptr", "private", "protected", "public", "return", "short",
    "signed", "sizeof", "static", "std", "struct", "switch", "template", "this", "true", "typedef",
    "union", "unsigned", "using", "virtual", "void", "volatile", "while",
];

/// Why a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier must not be empty")]
    Empty,

    #[error("identifier must start with a letter or an underscore, got `{0}`")]
    InvalidStart(char),

    #[error("identifier contains invalid character `{0}`")]
    InvalidChar(char),

    #[error("`{0}` is a reserved word")]
    Reserved(String),
}

/// A validated object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    ///
    /// Returns an [`IdError`] when `value` is empty, does not follow
    /// identifier syntax, or is a reserved word.
    pub fn parse(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        let mut chars = value.chars();
        let first = chars.next().ok_or(IdError::Empty)?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(IdError::InvalidStart(first));
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(IdError::InvalidChar(bad));
        }
        if RESERVED.contains(&value.as_str()) {
            return Err(IdError::Reserved(value));
        }
        Ok(Self(value))
    }

    /// The identifier followed by `_{n}`, used to disambiguate generated names.
    #[must_use]
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}_{n}", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How a configuration names an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdDecl {
    /// Named by the user; must be unique as written.
    Manual(Id),
    /// Left to the compiler; materialised from the base name, suffixed until unique.
    Auto(Id),
}

impl IdDecl {
    /// Generated identifier declaration for the given base name.
    ///
    /// # Errors
    ///
    /// Returns an [`IdError`] when `base` is not a valid identifier.
    pub fn auto(base: &str) -> Result<Self, IdError> {
        Id::parse(base).map(Self::Auto)
    }

    /// The identifier as written by the user, if any.
    #[must_use]
    pub fn manual(&self) -> Option<&Id> {
        match self {
            Self::Manual(id) => Some(id),
            Self::Auto(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_valid_identifier() {
        let id = Id::parse("tion_breezer_1").unwrap();
        assert_eq!(id.as_str(), "tion_breezer_1");
    }

    #[test]
    fn should_accept_leading_underscore() {
        assert!(Id::parse("_hidden").is_ok());
    }

    #[test]
    fn should_reject_empty_identifier() {
        assert_eq!(Id::parse(""), Err(IdError::Empty));
    }

    #[test]
    fn should_reject_leading_digit() {
        assert_eq!(Id::parse("1dev"), Err(IdError::InvalidStart('1')));
    }

    #[test]
    fn should_reject_invalid_character() {
        assert_eq!(Id::parse("my-dev"), Err(IdError::InvalidChar('-')));
    }

    #[test]
    fn should_reject_reserved_word() {
        assert_eq!(
            Id::parse("switch"),
            Err(IdError::Reserved("switch".to_string()))
        );
    }

    #[test]
    fn should_append_suffix() {
        let id = Id::parse("tion_switch").unwrap();
        assert_eq!(id.with_suffix(2).as_str(), "tion_switch_2");
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = Id::parse("dev1").unwrap();
        let parsed: Id = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_expose_manual_identifier_only() {
        let manual = IdDecl::Manual(Id::parse("bt1").unwrap());
        let auto = IdDecl::auto("tion_3s").unwrap();
        assert_eq!(manual.manual().map(Id::as_str), Some("bt1"));
        assert!(auto.manual().is_none());
    }
}
