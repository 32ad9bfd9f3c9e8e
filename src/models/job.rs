//! Job record and owner references
//!
//! An owner reference is the file's typed (kind + guid) pointer naming the
//! customer, vendor, or job an entity belongs to. Jobs themselves may only
//! be owned by customers or vendors; they never chain into other jobs.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{Guid, JobId};

/// Owner kind discriminant with the file's string tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    Customer,
    Vendor,
    Job,
}

impl OwnerKind {
    /// Parse the file's owner type tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "gncCustomer" => Some(Self::Customer),
            "gncVendor" => Some(Self::Vendor),
            "gncJob" => Some(Self::Job),
            _ => None,
        }
    }

    /// The file's owner type tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Customer => "gncCustomer",
            Self::Vendor => "gncVendor",
            Self::Job => "gncJob",
        }
    }

    /// Human-readable name for error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::Job => "job",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A typed owner pointer: discriminant plus the owner's GUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub kind: OwnerKind,
    pub guid: Guid,
}

impl OwnerRef {
    pub fn customer(guid: Guid) -> Self {
        Self {
            kind: OwnerKind::Customer,
            guid,
        }
    }

    pub fn vendor(guid: Guid) -> Self {
        Self {
            kind: OwnerKind::Vendor,
            guid,
        }
    }

    pub fn job(guid: Guid) -> Self {
        Self {
            kind: OwnerKind::Job,
            guid,
        }
    }
}

/// A job as stored in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Unique identifier, immutable after creation
    pub id: JobId,

    /// User-facing job number, mutable
    pub number: String,

    pub name: String,

    #[serde(default = "default_active")]
    pub active: bool,

    /// The customer or vendor this job belongs to; never another job
    pub owner: OwnerRef,

    #[serde(default)]
    pub reference: String,
}

fn default_active() -> bool {
    true
}

impl JobRecord {
    /// Create a job record with a fresh id
    pub fn new(number: impl Into<String>, name: impl Into<String>, owner: OwnerRef) -> Self {
        Self {
            id: JobId::new(),
            number: number.into(),
            name: name.into(),
            active: true,
            owner,
            reference: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_kind_tags() {
        assert_eq!(OwnerKind::from_tag("gncCustomer"), Some(OwnerKind::Customer));
        assert_eq!(OwnerKind::from_tag("gncVendor"), Some(OwnerKind::Vendor));
        assert_eq!(OwnerKind::from_tag("gncJob"), Some(OwnerKind::Job));
        assert_eq!(OwnerKind::from_tag("gncEmployee"), None);
        assert_eq!(OwnerKind::Customer.tag(), "gncCustomer");
    }

    #[test]
    fn test_owner_ref_ctors() {
        let guid = Guid::new();
        assert_eq!(OwnerRef::customer(guid).kind, OwnerKind::Customer);
        assert_eq!(OwnerRef::vendor(guid).kind, OwnerKind::Vendor);
        assert_eq!(OwnerRef::job(guid).guid, guid);
    }
}
