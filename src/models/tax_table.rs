//! Tax table records

use serde::{Deserialize, Serialize};

use super::ids::{AccountId, TaxTableId};
use super::numeric::FixedPoint;

/// How a tax table entry's amount is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxAmountKind {
    /// Amount is a percentage of the taxed value
    Percent,
    /// Amount is a flat value added per entry
    Value,
}

impl TaxAmountKind {
    /// Parse the file's amount type tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PERCENT" => Some(Self::Percent),
            "VALUE" => Some(Self::Value),
            _ => None,
        }
    }

    /// The file's amount type tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Percent => "PERCENT",
            Self::Value => "VALUE",
        }
    }
}

/// One component of a tax table: which account the tax posts to and how much
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTableEntryRecord {
    pub account: AccountId,
    pub amount: FixedPoint,
    pub kind: TaxAmountKind,
}

/// A named tax table referenced by customers, vendors, and invoice entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTableRecord {
    /// Unique identifier, immutable after creation
    pub id: TaxTableId,

    pub name: String,

    /// Invisible tables are retained for old invoices but hidden from pickers
    #[serde(default)]
    pub invisible: bool,

    pub entries: Vec<TaxTableEntryRecord>,
}

impl TaxTableRecord {
    /// Create a tax table with a fresh id
    pub fn new(name: impl Into<String>, entries: Vec<TaxTableEntryRecord>) -> Self {
        Self {
            id: TaxTableId::new(),
            name: name.into(),
            invisible: false,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_kind_tags() {
        assert_eq!(TaxAmountKind::from_tag("PERCENT"), Some(TaxAmountKind::Percent));
        assert_eq!(TaxAmountKind::from_tag("VALUE"), Some(TaxAmountKind::Value));
        assert_eq!(TaxAmountKind::from_tag("FLAT"), None);
        assert_eq!(TaxAmountKind::Percent.tag(), "PERCENT");
    }

    #[test]
    fn test_new_table() {
        let table = TaxTableRecord::new(
            "VAT 10%",
            vec![TaxTableEntryRecord {
                account: AccountId::new(),
                amount: FixedPoint::parse("10/1").unwrap(),
                kind: TaxAmountKind::Percent,
            }],
        );
        assert!(!table.invisible);
        assert_eq!(table.entries.len(), 1);
    }
}
