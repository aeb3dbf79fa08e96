//! Entity trait - common interface for identified records

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityId;

/// Common trait for records carrying a prefixed ULID identity
pub trait Entity: Serialize + DeserializeOwned {
    /// The record type prefix (e.g., "MAT", "ORD")
    const PREFIX: &'static str;

    /// Get the record's unique ID
    fn id(&self) -> &EntityId;

    /// Get a short display label for listings
    fn label(&self) -> String;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the author
    fn author(&self) -> &str;
}

/// Lifecycle of catalog reference data
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Status {
    #[default]
    Active,
    Obsolete,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Active => write!(f, "active"),
            Status::Obsolete => write!(f, "obsolete"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "obsolete" => Ok(Status::Obsolete),
            _ => Err(format!("Unknown status: {}. Use active or obsolete", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Active.to_string(), "active");
        assert_eq!(Status::Obsolete.to_string(), "obsolete");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("active".parse::<Status>().unwrap(), Status::Active);
        assert_eq!("Obsolete".parse::<Status>().unwrap(), Status::Obsolete);
        assert!("retired".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_default() {
        assert_eq!(Status::default(), Status::Active);
    }
}
