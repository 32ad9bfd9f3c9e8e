//! Generic invoice and invoice entry records
//!
//! One record type backs all three invoice flavors: a direct customer
//! invoice, a direct vendor bill, or a job invoice. The flavor is read off
//! the owner reference's kind; nothing else distinguishes them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{EntryId, InvoiceId, LotId, TaxTableId, TermsId, TransactionId};
use super::job::OwnerRef;
use super::numeric::FixedPoint;
use super::slots::Slot;

/// One line item on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceEntryRecord {
    /// Entry GUID, unique within the file
    pub id: EntryId,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    /// Action tag, e.g. "Hours" or "Material"
    #[serde(default)]
    pub action: String,

    pub quantity: FixedPoint,

    /// Price per unit
    pub price: FixedPoint,

    /// Whether tax applies to this entry at all
    #[serde(default)]
    pub taxable: bool,

    /// Whether the written price already contains the tax
    #[serde(default)]
    pub tax_included: bool,

    /// Tax table used when `taxable`; absent means no tax even if taxable
    pub tax_table: Option<TaxTableId>,
}

impl InvoiceEntryRecord {
    /// Create an untaxed entry
    pub fn new(date: NaiveDate, quantity: FixedPoint, price: FixedPoint) -> Self {
        Self {
            id: EntryId::new(),
            date,
            description: String::new(),
            action: String::new(),
            quantity,
            price,
            taxable: false,
            tax_included: false,
            tax_table: None,
        }
    }

    /// Quantity times unit price, before any tax handling
    pub fn gross(&self) -> FixedPoint {
        self.quantity.mul(&self.price)
    }
}

/// A generic invoice as stored in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Unique identifier, immutable after creation
    pub id: InvoiceId,

    /// User-facing invoice number, mutable
    pub number: String,

    /// The immediate owner: customer, vendor, or job
    pub owner: OwnerRef,

    pub date_opened: NaiveDate,

    /// Set once the invoice has been posted to the ledger
    pub date_posted: Option<NaiveDate>,

    #[serde(default)]
    pub currency: String,

    /// Ordered line items
    #[serde(default)]
    pub entries: Vec<InvoiceEntryRecord>,

    /// The ledger transaction created by posting, if posted
    pub post_txn: Option<TransactionId>,

    /// The lot collecting this invoice's posting and payments, if posted
    pub post_lot: Option<LotId>,

    /// Billing terms, legitimately optional
    pub terms: Option<TermsId>,

    /// Free-form billing reference shown to the owner
    #[serde(default)]
    pub billing_id: String,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub slots: Vec<Slot>,
}

fn default_active() -> bool {
    true
}

impl InvoiceRecord {
    /// Create an unposted invoice record with a fresh id
    pub fn new(number: impl Into<String>, owner: OwnerRef, date_opened: NaiveDate) -> Self {
        Self {
            id: InvoiceId::new(),
            number: number.into(),
            owner,
            date_opened,
            date_posted: None,
            currency: "USD".into(),
            entries: Vec::new(),
            post_txn: None,
            post_lot: None,
            terms: None,
            billing_id: String::new(),
            active: true,
            notes: String::new(),
            slots: Vec::new(),
        }
    }

    /// Whether the invoice has been posted to the ledger
    pub fn is_posted(&self) -> bool {
        self.post_lot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ids::Guid;

    fn fp(s: &str) -> FixedPoint {
        FixedPoint::parse(s).unwrap()
    }

    #[test]
    fn test_entry_gross() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entry = InvoiceEntryRecord::new(date, fp("3/1"), fp("1250/100"));
        assert_eq!(entry.gross(), fp("3750/100"));
    }

    #[test]
    fn test_new_invoice_is_unposted() {
        let invc = InvoiceRecord::new(
            "000010",
            OwnerRef::customer(Guid::new()),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert!(!invc.is_posted());
        assert!(invc.post_txn.is_none());
    }
}
