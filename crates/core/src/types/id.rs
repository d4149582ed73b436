//! Type-safe identifiers.
//!
//! Database rows are keyed by integer newtypes; catalog products are keyed by
//! an opaque string, see [`ProductId`].

use core::fmt;

use serde::{Deserialize, Serialize};

/// Primary key of the administrator credential row.
///
/// ```
/// use gemvault_core::AdminUserId;
///
/// let id = AdminUserId::new(1);
/// assert_eq!(i32::from(id), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type), sqlx(transparent))]
pub struct AdminUserId(i32);

impl AdminUserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AdminUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AdminUserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<AdminUserId> for i32 {
    fn from(id: AdminUserId) -> Self {
        id.0
    }
}

/// Catalog product identifier.
///
/// Products come from the hosted catalog backend with opaque string keys
/// (e.g. `"7"` or a UUID). Within a cart the product ID is the line key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_user_id_conversions() {
        let id = AdminUserId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(AdminUserId::from(42), id);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_product_id_is_transparent_in_json() {
        let id = ProductId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");

        let parsed: ProductId = serde_json::from_str("\"ruby-2ct\"").unwrap();
        assert_eq!(parsed.as_str(), "ruby-2ct");
    }
}
