//! Closed sets of textual choices (preset names, modes, entity categories, …).

/// A closed set of values with a canonical lowercase spelling.
pub trait Enumerated: Sized + Copy + PartialEq + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Canonical configuration spelling.
    fn as_str(self) -> &'static str;

    /// Case-insensitive lookup of a member by its spelling.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str().eq_ignore_ascii_case(value))
    }

    /// Exact lookup, for choices written as mapping keys.
    fn parse_exact(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str() == value)
    }

    /// Spellings of every member, used for error reporting.
    #[must_use]
    fn options() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.as_str()).collect()
    }
}

macro_rules! enumerated {
    (
        $(#[doc = $doc:expr])*
        $vis:vis enum $name:ident {
            $($(#[doc = $vdoc:expr])* $variant:ident => $text:literal),+ $(,)?
        }
        $(default $default:ident)?
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($(#[doc = $vdoc])* $variant),+
        }

        impl $crate::choice::Enumerated for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::choice::Enumerated::as_str(*self))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::choice::Enumerated::as_str(*self))
            }
        }

        $(
            impl Default for $name {
                fn default() -> Self {
                    Self::$default
                }
            }
        )?
    };
}

pub(crate) use enumerated;

#[cfg(test)]
mod tests {
    use super::*;

    enumerated!(
        /// Test-only choice set.
        enum Colour {
            Red => "red",
            DarkBlue => "dark_blue",
        }
        default Red
    );

    #[test]
    fn should_parse_case_insensitively() {
        assert_eq!(Colour::parse("RED"), Some(Colour::Red));
        assert_eq!(Colour::parse("Dark_Blue"), Some(Colour::DarkBlue));
    }

    #[test]
    fn should_match_exact_spelling_only() {
        assert_eq!(Colour::parse_exact("dark_blue"), Some(Colour::DarkBlue));
        assert_eq!(Colour::parse_exact("Red"), None);
    }

    #[test]
    fn should_return_none_for_unknown_member() {
        assert_eq!(Colour::parse("green"), None);
    }

    #[test]
    fn should_list_options_in_declaration_order() {
        assert_eq!(Colour::options(), vec!["red", "dark_blue"]);
    }

    #[test]
    fn should_use_declared_default() {
        assert_eq!(Colour::default(), Colour::Red);
    }

    #[test]
    fn should_display_and_serialize_canonical_spelling() {
        assert_eq!(Colour::DarkBlue.to_string(), "dark_blue");
        assert_eq!(
            serde_json::to_string(&Colour::Red).unwrap(),
            "\"red\"".to_string()
        );
    }
}
