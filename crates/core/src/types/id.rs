//! Newtype IDs for Shopify global IDs.
//!
//! Shopify identifies every resource with a global ID of the form
//! `gid://shopify/{Resource}/{id}`. Use the `define_gid!` macro to create
//! wrappers that reject IDs of the wrong resource type at parse time, so a
//! cart line ID can never be submitted where a variant ID is expected.

/// Prefix shared by every Shopify global ID.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Errors that can occur when parsing a Shopify global ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GidError {
    /// The input string is empty.
    #[error("global ID cannot be empty")]
    Empty,
    /// The input is not a `gid://shopify/{resource}/...` ID.
    #[error("expected a gid://shopify/{expected}/ ID, got {found:?}")]
    WrongResource {
        /// Resource type the caller asked for.
        expected: &'static str,
        /// The rejected input.
        found: String,
    },
    /// Nothing follows the resource segment.
    #[error("global ID for {0} is missing its identifier")]
    MissingIdentifier(&'static str),
}

/// Validate that `value` is a global ID for `resource`.
///
/// # Errors
///
/// Returns a [`GidError`] if the value is empty, belongs to another resource
/// type, or has no identifier after the resource segment.
pub fn validate_gid(value: &str, resource: &'static str) -> Result<(), GidError> {
    if value.is_empty() {
        return Err(GidError::Empty);
    }

    let rest = value
        .strip_prefix(GID_PREFIX)
        .and_then(|rest| rest.strip_prefix(resource))
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(|| GidError::WrongResource {
            expected: resource,
            found: value.to_owned(),
        })?;

    if rest.is_empty() {
        return Err(GidError::MissingIdentifier(resource));
    }

    Ok(())
}

/// Macro to define a type-safe Shopify global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string, validated on the way in
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()`, `as_str()`, `into_inner()`, `Display`, `FromStr`
///
/// # Example
///
/// ```rust
/// # use soap_store_core::define_gid;
/// define_gid!(OrderId, "Order");
///
/// assert!(OrderId::parse("gid://shopify/Order/42").is_ok());
/// assert!(OrderId::parse("gid://shopify/Product/42").is_err());
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $resource:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Shopify resource type this ID refers to.
            pub const RESOURCE: &'static str = $resource;

            /// Parse a global ID, checking its resource type.
            ///
            /// # Errors
            ///
            /// Returns a `GidError` if the value is not a global ID for this
            /// resource type.
            pub fn parse(value: &str) -> ::core::result::Result<Self, $crate::GidError> {
                $crate::validate_gid(value, $resource)?;
                Ok(Self(value.to_owned()))
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::GidError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::core::convert::TryFrom<String> for $name {
            type Error = $crate::GidError;

            fn try_from(value: String) -> ::core::result::Result<Self, Self::Error> {
                $crate::validate_gid(&value, $resource)?;
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Cart IDs carry a `?key=` suffix; it is part of the identifier.
define_gid!(CartId, "Cart");
define_gid!(CartLineId, "CartLine");
define_gid!(MerchandiseId, "ProductVariant");
define_gid!(ProductId, "Product");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert!(CartLineId::parse("gid://shopify/CartLine/abc-123").is_ok());
        assert!(MerchandiseId::parse("gid://shopify/ProductVariant/4567").is_ok());
        assert!(ProductId::parse("gid://shopify/Product/1").is_ok());
        assert!(CartId::parse("gid://shopify/Cart/c1-9f8e?key=0a1b2c").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(CartLineId::parse(""), Err(GidError::Empty));
    }

    #[test]
    fn test_parse_wrong_resource() {
        let err = MerchandiseId::parse("gid://shopify/CartLine/1").unwrap_err();
        assert!(matches!(
            err,
            GidError::WrongResource {
                expected: "ProductVariant",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_resource_prefix_is_not_enough() {
        // "Product" must not accept "ProductVariant" IDs
        assert!(ProductId::parse("gid://shopify/ProductVariant/1").is_err());
    }

    #[test]
    fn test_parse_missing_identifier() {
        assert_eq!(
            CartLineId::parse("gid://shopify/CartLine/"),
            Err(GidError::MissingIdentifier("CartLine"))
        );
    }

    #[test]
    fn test_parse_not_a_gid() {
        assert!(CartLineId::parse("12345").is_err());
        assert!(CartLineId::parse("https://shopify.com/CartLine/1").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<CartLineId, _> = serde_json::from_str("\"gid://shopify/CartLine/7\"");
        assert!(ok.is_ok());

        let bad: Result<CartLineId, _> = serde_json::from_str("\"gid://shopify/Cart/7\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProductId::parse("gid://shopify/Product/9").unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"gid://shopify/Product/9\""
        );
    }

    #[test]
    fn test_display_and_from_str() {
        let id: CartId = "gid://shopify/Cart/x?key=y".parse().unwrap();
        assert_eq!(id.to_string(), "gid://shopify/Cart/x?key=y");
        assert_eq!(id.as_str(), "gid://shopify/Cart/x?key=y");
    }
}
