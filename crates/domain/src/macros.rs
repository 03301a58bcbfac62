//! Display/FromStr boilerplate for closed name enums
//!
//! # Example
//!
//! ```rust
//! use profilebox_domain::impl_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shade {
//!     Light,
//!     Dark,
//! }
//!
//! impl_name_conversions!(Shade {
//!     Light => "Light",
//!     Dark => "Dark",
//! });
//!
//! assert_eq!(Shade::Dark.to_string(), "Dark");
//! assert_eq!("light".parse::<Shade>().unwrap(), Shade::Light);
//! ```

/// Implements `as_str`, `Display` and case-insensitive `FromStr` for an enum
/// whose variants map one-to-one onto canonical names.
#[macro_export]
macro_rules! impl_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical name of the variant
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(if trimmed.eq_ignore_ascii_case($str) {
                    return Ok(Self::$variant);
                })+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
