//! Record schema for the book file
//!
//! These are plain owned structs mirroring the file's structure, with no
//! dependency on the XML layer. The book (`crate::book`) indexes them;
//! views resolve cross-references against that index on demand.

pub mod account;
pub mod address;
pub mod customer;
pub mod ids;
pub mod invoice;
pub mod job;
pub mod numeric;
pub mod slots;
pub mod tax_table;
pub mod terms;
pub mod transaction;
pub mod vendor;

pub use account::{AccountRecord, AccountType};
pub use address::Address;
pub use customer::CustomerRecord;
pub use ids::{
    AccountId, CustomerId, EntryId, Guid, InvoiceId, JobId, LotId, SplitId, TaxTableId, TermsId,
    TransactionId, VendorId,
};
pub use invoice::{InvoiceEntryRecord, InvoiceRecord};
pub use job::{JobRecord, OwnerKind, OwnerRef};
pub use numeric::{FixedPoint, Rounding};
pub use slots::{find_slot, set_slot, Slot, SlotValue};
pub use tax_table::{TaxAmountKind, TaxTableEntryRecord, TaxTableRecord};
pub use terms::BillTermsRecord;
pub use transaction::{SplitRecord, TransactionRecord};
pub use vendor::VendorRecord;
