//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Enums such as quota periods or log formats travel as fixed strings
//! (`"DAY"`, `"json"`). This macro keeps the string table in one place and
//! derives both directions from it.
//!
//! # Example
//!
//! ```rust
//! use botpub_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Stage {
//!     Dev,
//!     Prod,
//! }
//!
//! impl_wire_enum_conversions!(Stage {
//!     Dev => "dev",
//!     Prod => "prod",
//! });
//!
//! assert_eq!(Stage::Prod.to_string(), "prod");
//! assert_eq!("PROD".parse::<Stage>().unwrap(), Stage::Prod);
//! ```

/// Implements Display and FromStr traits for wire-level enums
///
/// This macro generates:
/// - Display trait: writes the exact wire string of the variant
/// - FromStr trait: parses ASCII case-insensitively
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire strings
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestPeriod {
        Day,
        Week,
    }

    impl_wire_enum_conversions!(TestPeriod {
        Day => "DAY",
        Week => "WEEK",
    });

    #[test]
    fn display_uses_wire_string() {
        assert_eq!(TestPeriod::Day.to_string(), "DAY");
        assert_eq!(TestPeriod::Week.to_string(), "WEEK");
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(TestPeriod::from_str("day").unwrap(), TestPeriod::Day);
        assert_eq!(TestPeriod::from_str("Week").unwrap(), TestPeriod::Week);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = TestPeriod::from_str("year").unwrap_err();
        assert!(err.contains("Invalid TestPeriod"));
        assert!(err.contains("year"));
    }
}
