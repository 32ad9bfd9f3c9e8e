//! Account record
//!
//! Accounts form the ledger tree that invoice postings and payments land
//! in. This crate reads them for reference resolution and balance math;
//! it does not enforce any chart-of-accounts structure.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::slots::Slot;

/// Account type tags from the file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Asset,
    Bank,
    Cash,
    Credit,
    Equity,
    Expense,
    Income,
    Liability,
    Payable,
    Receivable,
    Root,
    /// Any tag this crate does not model, preserved for round-trip
    Other(String),
}

impl AccountType {
    /// Parse the file's type tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ASSET" => Self::Asset,
            "BANK" => Self::Bank,
            "CASH" => Self::Cash,
            "CREDIT" => Self::Credit,
            "EQUITY" => Self::Equity,
            "EXPENSE" => Self::Expense,
            "INCOME" => Self::Income,
            "LIABILITY" => Self::Liability,
            "PAYABLE" => Self::Payable,
            "RECEIVABLE" => Self::Receivable,
            "ROOT" => Self::Root,
            other => Self::Other(other.to_string()),
        }
    }

    /// The file's type tag
    pub fn tag(&self) -> &str {
        match self {
            Self::Asset => "ASSET",
            Self::Bank => "BANK",
            Self::Cash => "CASH",
            Self::Credit => "CREDIT",
            Self::Equity => "EQUITY",
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
            Self::Liability => "LIABILITY",
            Self::Payable => "PAYABLE",
            Self::Receivable => "RECEIVABLE",
            Self::Root => "ROOT",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// An account in the ledger tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Unique identifier, immutable after creation
    pub id: AccountId,

    /// Account name (one path segment, not the colon-joined full name)
    pub name: String,

    /// Account type tag
    pub account_type: AccountType,

    /// Commodity mnemonic, e.g. "EUR" or "USD"
    #[serde(default)]
    pub commodity: String,

    /// Smallest-currency-unit denominator for amounts in this account
    #[serde(default = "default_scu")]
    pub commodity_scu: i128,

    /// Parent account, None for the root
    pub parent: Option<AccountId>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub slots: Vec<Slot>,
}

fn default_scu() -> i128 {
    100
}

impl AccountRecord {
    /// Create an account record with a fresh id
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            commodity: "USD".into(),
            commodity_scu: 100,
            parent: None,
            description: String::new(),
            slots: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_round_trip() {
        for tag in ["ASSET", "BANK", "RECEIVABLE", "ROOT"] {
            assert_eq!(AccountType::from_tag(tag).tag(), tag);
        }
    }

    #[test]
    fn test_unknown_type_preserved() {
        let t = AccountType::from_tag("TRADING");
        assert_eq!(t, AccountType::Other("TRADING".into()));
        assert_eq!(t.tag(), "TRADING");
    }

    #[test]
    fn test_new_account_defaults() {
        let acct = AccountRecord::new("Accounts Receivable", AccountType::Receivable);
        assert_eq!(acct.commodity_scu, 100);
        assert!(acct.parent.is_none());
    }
}
