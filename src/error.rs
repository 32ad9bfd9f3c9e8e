//! Custom error types for cashbook
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for cashbook operations
#[derive(Error, Debug)]
pub enum BookError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Low-level XML errors from the reader/writer
    #[error("XML error: {0}")]
    Xml(String),

    /// The document is structurally not a book file
    #[error("Malformed book file in <{element}>: {detail}")]
    Parse { element: String, detail: String },

    /// Entity lookup miss
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A mandatory reference chain broke during resolution
    #[error("Dangling reference from {from} to {to}")]
    DanglingReference { from: String, to: String },

    /// A generic invoice was narrowed to the wrong specialized kind
    #[error("Wrong invoice type: expected {expected}, found {actual}")]
    WrongInvoiceType {
        expected: &'static str,
        actual: &'static str,
    },

    /// An owner reference names a kind that is not allowed in this position
    #[error("Wrong owner kind for {context}: {found}")]
    WrongOwnerKind {
        context: &'static str,
        found: &'static str,
    },

    /// Fixed-point division result is not representable without rounding
    #[error("Inexact division: {num}/{den} cannot be represented at the requested denominator")]
    InexactDivision { num: i128, den: i128 },

    /// Fixed-point division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Removal vetoed because dependents still reference the entity
    #[error("{entity_type} {identifier} is still referenced by {referenced_by}")]
    StillReferenced {
        entity_type: &'static str,
        identifier: String,
        referenced_by: String,
    },

    /// Validation errors for entity creation and mutation
    #[error("Validation error: {0}")]
    Validation(String),
}

impl BookError {
    /// Create a "not found" error for customers
    pub fn customer_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Customer",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for vendors
    pub fn vendor_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Vendor",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for jobs
    pub fn job_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Job",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for invoices
    pub fn invoice_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Invoice",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a narrowing/kind mismatch error
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            Self::WrongInvoiceType { .. } | Self::WrongOwnerKind { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<quick_xml::Error> for BookError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

/// Result type alias for cashbook operations
pub type BookResult<T> = Result<T, BookError>;
