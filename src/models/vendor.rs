//! Vendor record

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::ids::{TaxTableId, TermsId, VendorId};
use super::slots::Slot;

/// A vendor as stored in the file
///
/// The mirror image of a customer, minus discount/credit and the shipping
/// address, which the format only carries on customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRecord {
    /// Unique identifier, immutable after creation
    pub id: VendorId,

    /// User-facing vendor number, mutable
    pub number: String,

    pub name: String,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default)]
    pub address: Address,

    #[serde(default)]
    pub currency: String,

    /// Default tax table, legitimately optional
    pub tax_table: Option<TaxTableId>,

    /// Default billing terms, legitimately optional
    pub terms: Option<TermsId>,

    /// Whether quoted prices include tax by default
    #[serde(default)]
    pub tax_included: bool,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub slots: Vec<Slot>,
}

fn default_active() -> bool {
    true
}

impl VendorRecord {
    /// Create a vendor record with a fresh id
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: VendorId::new(),
            number: number.into(),
            name: name.into(),
            active: true,
            address: Address::default(),
            currency: "USD".into(),
            tax_table: None,
            terms: None,
            tax_included: false,
            notes: String::new(),
            slots: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vendor() {
        let vend = VendorRecord::new("000001", "Parts & Sundry");
        assert!(vend.active);
        assert!(vend.terms.is_none());
    }
}
