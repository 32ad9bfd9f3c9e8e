//! Postal address block shared by customers and vendors

use serde::{Deserialize, Serialize};

/// An address as stored on customers, vendors, and invoices
///
/// The format keeps addresses as four free-form lines rather than
/// structured street/city/postcode fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub line3: String,
    #[serde(default)]
    pub line4: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub fax: String,
    #[serde(default)]
    pub email: String,
}

impl Address {
    /// An address with just the addressee name filled in
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check whether every field is empty
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.line1.is_empty()
            && self.line2.is_empty()
            && self.line3.is_empty()
            && self.line4.is_empty()
            && self.phone.is_empty()
            && self.fax.is_empty()
            && self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(Address::default().is_empty());
    }

    #[test]
    fn test_with_name() {
        let addr = Address::with_name("Customatrix jr.");
        assert!(!addr.is_empty());
        assert_eq!(addr.name, "Customatrix jr.");
        assert!(addr.line1.is_empty());
    }
}
