//! Billing terms records

use serde::{Deserialize, Serialize};

use super::ids::TermsId;
use super::numeric::FixedPoint;

/// Billing terms of the "days" type: due date and early-payment discount
/// expressed as day counts after the posting date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillTermsRecord {
    /// Unique identifier, immutable after creation
    pub id: TermsId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Invisible terms are retained for old invoices but hidden from pickers
    #[serde(default)]
    pub invisible: bool,

    /// Payment due this many days after posting
    pub due_days: Option<u32>,

    /// Early-payment discount window in days
    pub discount_days: Option<u32>,

    /// Early-payment discount percentage
    pub discount: Option<FixedPoint>,
}

impl BillTermsRecord {
    /// Create net-N-days terms with a fresh id
    pub fn net_days(name: impl Into<String>, due_days: u32) -> Self {
        Self {
            id: TermsId::new(),
            name: name.into(),
            description: String::new(),
            invisible: false,
            due_days: Some(due_days),
            discount_days: None,
            discount: None,
        }
    }
}
