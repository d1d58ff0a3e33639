//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use thiserror::Error;

/// Error returned when an ID cannot be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id: {0:?}")]
pub struct ParseIdError(pub String);

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
/// - `FromStr`, accepting surrounding whitespace (`" 2 "` parses as `2`) and
///   integral decimal or exponent forms (`"2.0"`, `"2e0"`)
/// - `from_f64()` for integral floating-point values
///
/// # Example
///
/// ```rust
/// # use devopshub_core::define_id;
/// define_id!(WidgetId);
///
/// let id: WidgetId = "7".parse().unwrap();
/// assert_eq!(id, WidgetId::new(7));
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }

            /// Convert an integral, in-range float (`2.0`) to an ID.
            ///
            /// Returns `None` for fractions, non-finite values and values
            /// outside the `i32` range.
            #[must_use]
            #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
            pub fn from_f64(value: f64) -> Option<Self> {
                let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
                (value.is_finite() && value.fract() == 0.0 && in_range)
                    .then(|| Self(value as i32))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::ParseIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                trimmed
                    .parse::<i32>()
                    .ok()
                    .map(Self)
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(Self::from_f64))
                    .ok_or_else(|| $crate::types::id::ParseIdError(s.to_string()))
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        assert_eq!("2".parse::<ProductId>().unwrap(), ProductId::new(2));
        assert_eq!(" 4 ".parse::<ProductId>().unwrap(), ProductId::new(4));
    }

    #[test]
    fn test_parse_product_id_integral_decimal_forms() {
        assert_eq!("2.0".parse::<ProductId>().unwrap(), ProductId::new(2));
        assert_eq!("3.".parse::<ProductId>().unwrap(), ProductId::new(3));
        assert_eq!("1e0".parse::<ProductId>().unwrap(), ProductId::new(1));
        assert_eq!("-0.0".parse::<ProductId>().unwrap(), ProductId::new(0));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(ProductId::from_f64(4.0), Some(ProductId::new(4)));
        assert_eq!(ProductId::from_f64(2.5), None);
        assert_eq!(ProductId::from_f64(f64::NAN), None);
        assert_eq!(ProductId::from_f64(f64::INFINITY), None);
        assert_eq!(ProductId::from_f64(1e12), None);
    }

    #[test]
    fn test_parse_product_id_rejects_garbage() {
        assert!("".parse::<ProductId>().is_err());
        assert!("abc".parse::<ProductId>().is_err());
        assert!("2.5".parse::<ProductId>().is_err());
        assert!("inf".parse::<ProductId>().is_err());
        assert!("NaN".parse::<ProductId>().is_err());
        assert!("99999999999".parse::<ProductId>().is_err());
        assert_eq!(
            "x1".parse::<ProductId>().unwrap_err(),
            ParseIdError("x1".to_string())
        );
    }

    #[test]
    fn test_product_id_serde_is_transparent() {
        let json = serde_json::to_string(&ProductId::new(3)).unwrap();
        assert_eq!(json, "3");
        let back: ProductId = serde_json::from_str("3").unwrap();
        assert_eq!(back.as_i32(), 3);
    }
}
