//! Customer record

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::ids::{CustomerId, TaxTableId, TermsId};
use super::numeric::FixedPoint;
use super::slots::Slot;

/// A customer as stored in the file
///
/// Cross-references (`tax_table`, `terms`) are kept as plain ids and
/// resolved lazily through the book's index, never as embedded copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Unique identifier, immutable after creation
    pub id: CustomerId,

    /// User-facing customer number, mutable
    pub number: String,

    pub name: String,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default)]
    pub address: Address,

    #[serde(default)]
    pub shipping_address: Address,

    /// Standing discount percentage, if any
    pub discount: Option<FixedPoint>,

    /// Credit limit, if any
    pub credit: Option<FixedPoint>,

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

impl CustomerRecord {
    /// Create a customer record with a fresh id
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            number: number.into(),
            name: name.into(),
            active: true,
            address: Address::default(),
            shipping_address: Address::default(),
            discount: None,
            credit: None,
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
    fn test_new_customer() {
        let cust = CustomerRecord::new("000001", "Customatrix jr.");
        assert!(cust.active);
        assert!(cust.tax_table.is_none());
        assert!(cust.discount.is_none());
    }
}
