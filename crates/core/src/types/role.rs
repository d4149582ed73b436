//! Administrator role carried in session tokens.

use serde::{Deserialize, Serialize};

/// Role of an authenticated back-office user.
///
/// The back office has a single administrator tier; the role is still carried
/// in every session token so the guard can reject tokens minted for anything
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to the back office.
    #[default]
    Admin,
}

impl AdminRole {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&AdminRole::Admin).unwrap(), "\"admin\"");
        assert_eq!("admin".parse::<AdminRole>().unwrap(), AdminRole::Admin);
        assert!("super_admin".parse::<AdminRole>().is_err());
    }
}
