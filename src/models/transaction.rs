//! Transaction and split records
//!
//! Transactions carry the postings that make an invoice "posted" and the
//! payments that make it "paid". A split's optional lot reference is what
//! links it to an invoice's payment lot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, LotId, SplitId, TransactionId};
use super::numeric::FixedPoint;
use super::slots::Slot;

/// One leg of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    /// Split GUID, unique within the file
    pub id: SplitId,

    #[serde(default)]
    pub memo: String,

    /// Action tag, e.g. "Invoice" or "Payment"
    #[serde(default)]
    pub action: String,

    /// Reconcile state character as written: 'n', 'c', 'y'
    #[serde(default = "default_reconcile_state")]
    pub reconcile_state: char,

    /// Value in the transaction currency
    pub value: FixedPoint,

    /// Quantity in the account's commodity
    pub quantity: FixedPoint,

    /// The account this split posts to
    pub account: AccountId,

    /// The lot this split belongs to, if any; invoice payments are the
    /// splits sharing the invoice's post lot
    pub lot: Option<LotId>,
}

fn default_reconcile_state() -> char {
    'n'
}

impl SplitRecord {
    /// Create a split with value == quantity (single-commodity case)
    pub fn new(account: AccountId, value: FixedPoint) -> Self {
        Self {
            id: SplitId::new(),
            memo: String::new(),
            action: String::new(),
            reconcile_state: 'n',
            value,
            quantity: value,
            account,
            lot: None,
        }
    }

    /// Same, tied to a lot
    pub fn with_lot(account: AccountId, value: FixedPoint, lot: LotId) -> Self {
        Self {
            lot: Some(lot),
            ..Self::new(account, value)
        }
    }
}

/// A transaction with its ordered splits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier, immutable after creation
    pub id: TransactionId,

    /// Currency mnemonic for the split values
    #[serde(default)]
    pub currency: String,

    /// The business date of the transaction
    pub date_posted: NaiveDate,

    /// When the transaction was keyed in
    pub date_entered: DateTime<Utc>,

    #[serde(default)]
    pub description: String,

    /// User-facing transaction number (check number etc.)
    #[serde(default)]
    pub number: String,

    /// Ordered splits; order is preserved through round-trip
    pub splits: Vec<SplitRecord>,

    #[serde(default)]
    pub slots: Vec<Slot>,
}

impl TransactionRecord {
    /// Create a transaction record with a fresh id and no splits
    pub fn new(currency: impl Into<String>, date_posted: NaiveDate) -> Self {
        Self {
            id: TransactionId::new(),
            currency: currency.into(),
            date_posted,
            date_entered: Utc::now(),
            description: String::new(),
            number: String::new(),
            splits: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Sum of split values; zero for a balanced transaction
    pub fn splits_total(&self) -> FixedPoint {
        self.splits.iter().map(|s| s.value).sum()
    }

    /// Splits belonging to the given lot
    pub fn splits_in_lot(&self, lot: LotId) -> impl Iterator<Item = &SplitRecord> {
        self.splits.iter().filter(move |s| s.lot == Some(lot))
    }
}
