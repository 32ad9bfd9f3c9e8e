//! Strongly-typed GUID wrappers for all entity types
//!
//! The book format identifies entities by 32-hex-character GUIDs. Newtype
//! wrappers prevent accidentally mixing up IDs from different entity types
//! at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A raw entity GUID as stored in the file: 32 lowercase hex characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(Uuid);

impl Guid {
    /// Create a new random GUID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a GUID from its textual form (with or without hyphens)
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The file format writes GUIDs without hyphens
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for Guid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Macro to generate typed ID newtype wrappers over [`Guid`]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Guid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Guid::new())
            }

            /// Wrap an existing GUID
            pub fn from_guid(guid: Guid) -> Self {
                Self(guid)
            }

            /// Get the underlying GUID
            pub fn as_guid(&self) -> Guid {
                self.0
            }

            /// Parse an ID from its textual form
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Guid::parse(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Guid> for $name {
            fn from(guid: Guid) -> Self {
                Self(guid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Guid::parse(s)?))
            }
        }
    };
}

define_id!(AccountId);
define_id!(TransactionId);
define_id!(SplitId);
define_id!(CustomerId);
define_id!(VendorId);
define_id!(JobId);
define_id!(InvoiceId);
define_id!(EntryId);
define_id!(LotId);
define_id!(TaxTableId);
define_id!(TermsId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_display_is_simple_hex() {
        let guid = Guid::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(guid.to_string(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_guid_parses_simple_form() {
        let guid = Guid::parse("550e8400e29b41d4a716446655440000").unwrap();
        assert_eq!(guid.to_string(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_id_equality() {
        let id1 = CustomerId::new();
        let id2 = id1;
        assert_eq!(id1, id2);

        let id3 = CustomerId::new();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_serialization() {
        let id = InvoiceId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: InvoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_different_id_types_not_mixable() {
        // Different ID types are distinct at compile time; only the
        // underlying GUIDs can be compared.
        let customer_id = CustomerId::new();
        let job_id = JobId::new();
        assert_ne!(customer_id.as_guid(), job_id.as_guid());
    }
}
