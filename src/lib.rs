//! cashbook - Read/write access to XML book files of a personal finance app
//!
//! This library loads a complete double-entry book from its XML file into
//! memory, exposes the business entities in it (customers, vendors, jobs,
//! invoices and bills, tax tables, billing terms) behind typed views that
//! resolve cross-references on demand, and writes modified books back out
//! atomically.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Numbering configuration for generated entity numbers
//! - `error`: Custom error types
//! - `models`: Plain records as stored in the file (accounts, transactions,
//!   customers, invoices, ...) plus exact fixed-point arithmetic
//! - `book`: The owned record store, read views, aggregates, and mutation
//! - `xml`: File loading and saving
//!
//! # Example
//!
//! ```rust,ignore
//! use cashbook::{load_file, ReadVariant};
//!
//! let book = load_file("my-business.xml")?;
//! for customer in book.customers() {
//!     let outstanding = customer.outstanding_value(ReadVariant::Direct)?;
//!     println!("{}: {}", customer.name(), outstanding.to_decimal_string());
//! }
//! ```

pub mod book;
pub mod config;
pub mod error;
pub mod models;
pub mod xml;

pub use book::{
    BillTo, Book, Customer, CustomerInvoice, Invoice, InvoiceOwner, Job, JobInvoice, JobOwner,
    ReadVariant, Vendor, VendorBill,
};
pub use config::{NumberedKind, NumberingConfig};
pub use error::{BookError, BookResult};
pub use models::{FixedPoint, Guid, Rounding};
pub use xml::{load_file, load_str};
