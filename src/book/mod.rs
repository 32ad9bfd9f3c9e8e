//! The book: owned record store, index, and mutation surface
//!
//! A [`Book`] owns every record collection loaded from a file and is the
//! single place cross-references get resolved. Read views ([`views`])
//! borrow the book and look ids up on demand; mutation goes through
//! `*_mut` accessors against the owned store, so there is never aliased
//! mutable state shared across wrapper instances.

pub mod aggregates;
pub mod views;

pub use aggregates::ReadVariant;
pub use views::{
    BillTo, Customer, CustomerInvoice, Invoice, InvoiceOwner, Job, JobInvoice, JobOwner, Vendor,
    VendorBill,
};

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::NumberingConfig;
use crate::error::{BookError, BookResult};
use crate::models::{
    AccountId, AccountRecord, BillTermsRecord, CustomerId, CustomerRecord, InvoiceId,
    InvoiceRecord, JobId, JobRecord, LotId, OwnerKind, OwnerRef, SplitRecord, TaxTableId,
    TaxTableRecord, TermsId, TransactionId, TransactionRecord, VendorId, VendorRecord,
};
use crate::models::numeric::FixedPoint;

/// In-memory book: every entity collection keyed by GUID-backed id
///
/// `BTreeMap` keeps iteration deterministic, which in turn keeps the
/// serialized output stable across write cycles.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Book {
    pub(crate) accounts: BTreeMap<AccountId, AccountRecord>,
    pub(crate) transactions: BTreeMap<TransactionId, TransactionRecord>,
    pub(crate) customers: BTreeMap<CustomerId, CustomerRecord>,
    pub(crate) vendors: BTreeMap<VendorId, VendorRecord>,
    pub(crate) jobs: BTreeMap<JobId, JobRecord>,
    pub(crate) invoices: BTreeMap<InvoiceId, InvoiceRecord>,
    pub(crate) tax_tables: BTreeMap<TaxTableId, TaxTableRecord>,
    pub(crate) bill_terms: BTreeMap<TermsId, BillTermsRecord>,
    pub(crate) numbering: NumberingConfig,
}

impl Book {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fallback numbering configuration
    pub fn set_numbering(&mut self, numbering: NumberingConfig) {
        self.numbering = numbering;
    }

    // --- raw record insertion (load path and factories) ---

    pub(crate) fn insert_account(&mut self, record: AccountRecord) -> BookResult<()> {
        if self.accounts.contains_key(&record.id) {
            return Err(duplicate("Account", record.id.to_string()));
        }
        self.accounts.insert(record.id, record);
        Ok(())
    }

    pub(crate) fn insert_transaction(&mut self, record: TransactionRecord) -> BookResult<()> {
        if self.transactions.contains_key(&record.id) {
            return Err(duplicate("Transaction", record.id.to_string()));
        }
        self.transactions.insert(record.id, record);
        Ok(())
    }

    pub(crate) fn insert_customer(&mut self, record: CustomerRecord) -> BookResult<()> {
        if self.customers.contains_key(&record.id) {
            return Err(duplicate("Customer", record.id.to_string()));
        }
        self.customers.insert(record.id, record);
        Ok(())
    }

    pub(crate) fn insert_vendor(&mut self, record: VendorRecord) -> BookResult<()> {
        if self.vendors.contains_key(&record.id) {
            return Err(duplicate("Vendor", record.id.to_string()));
        }
        self.vendors.insert(record.id, record);
        Ok(())
    }

    pub(crate) fn insert_job(&mut self, record: JobRecord) -> BookResult<()> {
        if record.owner.kind == OwnerKind::Job {
            return Err(BookError::WrongOwnerKind {
                context: "job owner",
                found: "job",
            });
        }
        if self.jobs.contains_key(&record.id) {
            return Err(duplicate("Job", record.id.to_string()));
        }
        self.jobs.insert(record.id, record);
        Ok(())
    }

    pub(crate) fn insert_invoice(&mut self, record: InvoiceRecord) -> BookResult<()> {
        if self.invoices.contains_key(&record.id) {
            return Err(duplicate("Invoice", record.id.to_string()));
        }
        self.invoices.insert(record.id, record);
        Ok(())
    }

    pub(crate) fn insert_tax_table(&mut self, record: TaxTableRecord) -> BookResult<()> {
        if self.tax_tables.contains_key(&record.id) {
            return Err(duplicate("Tax table", record.id.to_string()));
        }
        self.tax_tables.insert(record.id, record);
        Ok(())
    }

    pub(crate) fn insert_bill_terms(&mut self, record: BillTermsRecord) -> BookResult<()> {
        if self.bill_terms.contains_key(&record.id) {
            return Err(duplicate("Bill terms", record.id.to_string()));
        }
        self.bill_terms.insert(record.id, record);
        Ok(())
    }

    // --- record lookups ---

    /// Look up an account record; `None` when the id is unknown
    pub fn account(&self, id: AccountId) -> Option<&AccountRecord> {
        self.accounts.get(&id)
    }

    /// Look up a transaction record
    pub fn transaction(&self, id: TransactionId) -> Option<&TransactionRecord> {
        self.transactions.get(&id)
    }

    /// Look up a customer record
    pub fn customer_record(&self, id: CustomerId) -> Option<&CustomerRecord> {
        self.customers.get(&id)
    }

    /// Look up a vendor record
    pub fn vendor_record(&self, id: VendorId) -> Option<&VendorRecord> {
        self.vendors.get(&id)
    }

    /// Look up a job record
    pub fn job_record(&self, id: JobId) -> Option<&JobRecord> {
        self.jobs.get(&id)
    }

    /// Look up an invoice record
    pub fn invoice_record(&self, id: InvoiceId) -> Option<&InvoiceRecord> {
        self.invoices.get(&id)
    }

    /// Look up a tax table record
    pub fn tax_table(&self, id: TaxTableId) -> Option<&TaxTableRecord> {
        self.tax_tables.get(&id)
    }

    /// Look up a bill terms record
    pub fn bill_terms(&self, id: TermsId) -> Option<&BillTermsRecord> {
        self.bill_terms.get(&id)
    }

    // --- view accessors ---

    /// A customer view, or `NotFound` when the id is unknown
    pub fn customer(&self, id: CustomerId) -> BookResult<Customer<'_>> {
        self.customer_record(id)
            .map(|record| Customer::new(self, record))
            .ok_or_else(|| BookError::customer_not_found(id.to_string()))
    }

    /// A vendor view, or `NotFound` when the id is unknown
    pub fn vendor(&self, id: VendorId) -> BookResult<Vendor<'_>> {
        self.vendor_record(id)
            .map(|record| Vendor::new(self, record))
            .ok_or_else(|| BookError::vendor_not_found(id.to_string()))
    }

    /// A job view, or `NotFound` when the id is unknown
    pub fn job(&self, id: JobId) -> BookResult<Job<'_>> {
        self.job_record(id)
            .map(|record| Job::new(self, record))
            .ok_or_else(|| BookError::job_not_found(id.to_string()))
    }

    /// A generic invoice view, or `NotFound` when the id is unknown
    pub fn invoice(&self, id: InvoiceId) -> BookResult<Invoice<'_>> {
        self.invoice_record(id)
            .map(|record| Invoice::new(self, record))
            .ok_or_else(|| BookError::invoice_not_found(id.to_string()))
    }

    /// Find a customer by name (case-insensitive)
    pub fn customer_by_name(&self, name: &str) -> Option<Customer<'_>> {
        let name_lower = name.to_lowercase();
        self.customers
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .map(|record| Customer::new(self, record))
    }

    /// Find a vendor by name (case-insensitive)
    pub fn vendor_by_name(&self, name: &str) -> Option<Vendor<'_>> {
        let name_lower = name.to_lowercase();
        self.vendors
            .values()
            .find(|v| v.name.to_lowercase() == name_lower)
            .map(|record| Vendor::new(self, record))
    }

    // --- iteration ---

    /// All customers
    pub fn customers(&self) -> impl Iterator<Item = Customer<'_>> {
        self.customers.values().map(|r| Customer::new(self, r))
    }

    /// All vendors
    pub fn vendors(&self) -> impl Iterator<Item = Vendor<'_>> {
        self.vendors.values().map(|r| Vendor::new(self, r))
    }

    /// All jobs
    pub fn jobs(&self) -> impl Iterator<Item = Job<'_>> {
        self.jobs.values().map(|r| Job::new(self, r))
    }

    /// All generic invoices
    pub fn invoices(&self) -> impl Iterator<Item = Invoice<'_>> {
        self.invoices.values().map(|r| Invoice::new(self, r))
    }

    /// All accounts
    pub fn accounts(&self) -> impl Iterator<Item = &AccountRecord> {
        self.accounts.values()
    }

    /// All transactions
    pub fn transactions(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions.values()
    }

    /// All tax tables
    pub fn tax_tables(&self) -> impl Iterator<Item = &TaxTableRecord> {
        self.tax_tables.values()
    }

    /// All bill terms
    pub fn bill_terms_iter(&self) -> impl Iterator<Item = &BillTermsRecord> {
        self.bill_terms.values()
    }

    /// Splits across all transactions that belong to the given lot,
    /// paired with their owning transaction
    pub fn splits_in_lot(
        &self,
        lot: LotId,
    ) -> impl Iterator<Item = (&TransactionRecord, &SplitRecord)> {
        self.transactions.values().flat_map(move |txn| {
            txn.splits
                .iter()
                .filter(move |s| s.lot == Some(lot))
                .map(move |s| (txn, s))
        })
    }

    // --- mutation accessors (write-through to the owned store) ---

    /// Mutable access to an account record
    pub fn account_mut(&mut self, id: AccountId) -> BookResult<&mut AccountRecord> {
        self.accounts
            .get_mut(&id)
            .ok_or_else(|| BookError::account_not_found(id.to_string()))
    }

    /// Mutable access to a transaction record
    pub fn transaction_mut(&mut self, id: TransactionId) -> BookResult<&mut TransactionRecord> {
        self.transactions
            .get_mut(&id)
            .ok_or_else(|| BookError::transaction_not_found(id.to_string()))
    }

    /// Mutable access to a customer record
    pub fn customer_mut(&mut self, id: CustomerId) -> BookResult<&mut CustomerRecord> {
        self.customers
            .get_mut(&id)
            .ok_or_else(|| BookError::customer_not_found(id.to_string()))
    }

    /// Mutable access to a vendor record
    pub fn vendor_mut(&mut self, id: VendorId) -> BookResult<&mut VendorRecord> {
        self.vendors
            .get_mut(&id)
            .ok_or_else(|| BookError::vendor_not_found(id.to_string()))
    }

    /// Mutable access to a job record
    pub fn job_mut(&mut self, id: JobId) -> BookResult<&mut JobRecord> {
        self.jobs
            .get_mut(&id)
            .ok_or_else(|| BookError::job_not_found(id.to_string()))
    }

    /// Mutable access to an invoice record
    pub fn invoice_mut(&mut self, id: InvoiceId) -> BookResult<&mut InvoiceRecord> {
        self.invoices
            .get_mut(&id)
            .ok_or_else(|| BookError::invoice_not_found(id.to_string()))
    }

    // --- factories ---

    /// Create a customer with a fresh GUID and the next customer number
    pub fn create_customer(&mut self, name: &str) -> BookResult<CustomerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookError::Validation("customer name cannot be empty".into()));
        }
        let record = CustomerRecord::new(self.next_customer_number(), name);
        let id = record.id;
        self.insert_customer(record)?;
        Ok(id)
    }

    /// Create a vendor with a fresh GUID and the next vendor number
    pub fn create_vendor(&mut self, name: &str) -> BookResult<VendorId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookError::Validation("vendor name cannot be empty".into()));
        }
        let record = VendorRecord::new(self.next_vendor_number(), name);
        let id = record.id;
        self.insert_vendor(record)?;
        Ok(id)
    }

    /// Create a job owned by a customer or vendor
    ///
    /// The owner reference is validated up front: naming another job fails
    /// with `WrongOwnerKind`, an unknown owner fails with
    /// `DanglingReference`.
    pub fn create_job(&mut self, name: &str, owner: OwnerRef) -> BookResult<JobId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookError::Validation("job name cannot be empty".into()));
        }
        self.check_owner_exists("job", owner, false)?;
        let record = JobRecord::new(self.next_job_number(), name, owner);
        let id = record.id;
        self.insert_job(record)?;
        Ok(id)
    }

    /// Create an unposted invoice for a customer, vendor, or job
    pub fn create_invoice(&mut self, owner: OwnerRef, date_opened: NaiveDate) -> BookResult<InvoiceId> {
        self.check_owner_exists("invoice", owner, true)?;
        let record = InvoiceRecord::new(self.next_invoice_number(), owner, date_opened);
        let id = record.id;
        self.insert_invoice(record)?;
        Ok(id)
    }

    fn check_owner_exists(
        &self,
        context: &'static str,
        owner: OwnerRef,
        jobs_allowed: bool,
    ) -> BookResult<()> {
        let found = match owner.kind {
            OwnerKind::Customer => self.customers.contains_key(&CustomerId::from(owner.guid)),
            OwnerKind::Vendor => self.vendors.contains_key(&VendorId::from(owner.guid)),
            OwnerKind::Job => {
                if !jobs_allowed {
                    return Err(BookError::WrongOwnerKind {
                        context: "job owner",
                        found: "job",
                    });
                }
                self.jobs.contains_key(&JobId::from(owner.guid))
            }
        };
        if found {
            Ok(())
        } else {
            Err(BookError::DanglingReference {
                from: format!("new {}", context),
                to: format!("{} {}", owner.kind, owner.guid),
            })
        }
    }

    // --- removal ---

    /// Remove a customer, failing while jobs or invoices still reference it
    pub fn remove_customer(&mut self, id: CustomerId) -> BookResult<CustomerRecord> {
        let guid = id.as_guid();
        if let Some(job) = self
            .jobs
            .values()
            .find(|j| j.owner.kind == OwnerKind::Customer && j.owner.guid == guid)
        {
            return Err(BookError::StillReferenced {
                entity_type: "Customer",
                identifier: id.to_string(),
                referenced_by: format!("job {}", job.number),
            });
        }
        if let Some(invc) = self
            .invoices
            .values()
            .find(|i| i.owner.kind == OwnerKind::Customer && i.owner.guid == guid)
        {
            return Err(BookError::StillReferenced {
                entity_type: "Customer",
                identifier: id.to_string(),
                referenced_by: format!("invoice {}", invc.number),
            });
        }
        self.customers
            .remove(&id)
            .ok_or_else(|| BookError::customer_not_found(id.to_string()))
    }

    /// Remove a vendor, failing while jobs or bills still reference it
    pub fn remove_vendor(&mut self, id: VendorId) -> BookResult<VendorRecord> {
        let guid = id.as_guid();
        if let Some(job) = self
            .jobs
            .values()
            .find(|j| j.owner.kind == OwnerKind::Vendor && j.owner.guid == guid)
        {
            return Err(BookError::StillReferenced {
                entity_type: "Vendor",
                identifier: id.to_string(),
                referenced_by: format!("job {}", job.number),
            });
        }
        if let Some(invc) = self
            .invoices
            .values()
            .find(|i| i.owner.kind == OwnerKind::Vendor && i.owner.guid == guid)
        {
            return Err(BookError::StillReferenced {
                entity_type: "Vendor",
                identifier: id.to_string(),
                referenced_by: format!("invoice {}", invc.number),
            });
        }
        self.vendors
            .remove(&id)
            .ok_or_else(|| BookError::vendor_not_found(id.to_string()))
    }

    /// Remove a job, failing while invoices still reference it
    pub fn remove_job(&mut self, id: JobId) -> BookResult<JobRecord> {
        let guid = id.as_guid();
        if let Some(invc) = self
            .invoices
            .values()
            .find(|i| i.owner.kind == OwnerKind::Job && i.owner.guid == guid)
        {
            return Err(BookError::StillReferenced {
                entity_type: "Job",
                identifier: id.to_string(),
                referenced_by: format!("invoice {}", invc.number),
            });
        }
        self.jobs
            .remove(&id)
            .ok_or_else(|| BookError::job_not_found(id.to_string()))
    }

    /// Remove an invoice; nothing references invoices, so this always
    /// succeeds for a known id
    pub fn remove_invoice(&mut self, id: InvoiceId) -> BookResult<InvoiceRecord> {
        self.invoices
            .remove(&id)
            .ok_or_else(|| BookError::invoice_not_found(id.to_string()))
    }

    // --- posting & payment ---

    /// Post an invoice to the ledger
    ///
    /// Creates the posting transaction (receivable/payable against the
    /// given income or expense account), opens the invoice's payment lot,
    /// and stamps the posting date. The invoice total at posting time is
    /// the amount including taxes.
    pub fn post_invoice(
        &mut self,
        id: InvoiceId,
        date: NaiveDate,
        posting_account: AccountId,
        income_account: AccountId,
    ) -> BookResult<TransactionId> {
        let (total, currency, number, owner_is_vendor_side) = {
            let invoice = self.invoice(id)?;
            if invoice.record().is_posted() {
                return Err(BookError::Validation(format!(
                    "invoice {} is already posted",
                    invoice.record().number
                )));
            }
            let bill_to = invoice.bill_to()?;
            (
                invoice.amount_with_taxes()?,
                invoice.record().currency.clone(),
                invoice.record().number.clone(),
                matches!(bill_to, BillTo::Vendor(_)),
            )
        };
        if self.account(posting_account).is_none() {
            return Err(BookError::account_not_found(posting_account.to_string()));
        }
        if self.account(income_account).is_none() {
            return Err(BookError::account_not_found(income_account.to_string()));
        }

        // Receivables post positive for customers; payables negative for
        // vendors, so later payments carry the opposite sign.
        let posted = if owner_is_vendor_side { -total } else { total };

        let lot = LotId::new();
        let mut txn = TransactionRecord::new(currency, date);
        txn.description = format!("Invoice {}", number);
        let mut post_split = SplitRecord::with_lot(posting_account, posted, lot);
        post_split.action = "Invoice".into();
        txn.splits.push(post_split);
        txn.splits.push(SplitRecord::new(income_account, -posted));
        let txn_id = txn.id;
        self.insert_transaction(txn)?;

        let invoice = self.invoice_mut(id)?;
        invoice.date_posted = Some(date);
        invoice.post_txn = Some(txn_id);
        invoice.post_lot = Some(lot);
        Ok(txn_id)
    }

    /// Record a payment against a posted invoice
    ///
    /// Adds a transaction with a split in the invoice's payment lot. The
    /// payment amount is positive regardless of invoice direction.
    pub fn pay_invoice(
        &mut self,
        id: InvoiceId,
        date: NaiveDate,
        transfer_account: AccountId,
        amount: FixedPoint,
    ) -> BookResult<TransactionId> {
        if amount.is_negative() || amount.is_zero() {
            return Err(BookError::Validation(
                "payment amount must be positive".into(),
            ));
        }
        let (lot, posting_account, currency, number, vendor_side) = {
            let invoice = self.invoice(id)?;
            let record = invoice.record();
            let lot = record.post_lot.ok_or_else(|| {
                BookError::Validation(format!("invoice {} is not posted", record.number))
            })?;
            let post_txn = record.post_txn.ok_or_else(|| {
                BookError::Validation(format!("invoice {} is not posted", record.number))
            })?;
            let posting_account = self
                .transaction(post_txn)
                .and_then(|t| t.splits_in_lot(lot).next())
                .map(|s| s.account)
                .ok_or_else(|| BookError::DanglingReference {
                    from: format!("invoice {}", record.number),
                    to: format!("transaction {}", post_txn),
                })?;
            let vendor_side = matches!(invoice.bill_to()?, BillTo::Vendor(_));
            (
                lot,
                posting_account,
                record.currency.clone(),
                record.number.clone(),
                vendor_side,
            )
        };
        if self.account(transfer_account).is_none() {
            return Err(BookError::account_not_found(transfer_account.to_string()));
        }

        // The payment split offsets the posting split's sign.
        let lot_value = if vendor_side { amount } else { -amount };

        let mut txn = TransactionRecord::new(currency, date);
        txn.description = format!("Payment for invoice {}", number);
        let mut pay_split = SplitRecord::with_lot(posting_account, lot_value, lot);
        pay_split.action = "Payment".into();
        txn.splits.push(pay_split);
        txn.splits.push(SplitRecord::new(transfer_account, -lot_value));
        let txn_id = txn.id;
        self.insert_transaction(txn)?;
        Ok(txn_id)
    }
}

fn duplicate(entity_type: &'static str, identifier: String) -> BookError {
    BookError::Validation(format!(
        "duplicate {} GUID: {}",
        entity_type.to_lowercase(),
        identifier
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fp(s: &str) -> FixedPoint {
        FixedPoint::parse(s).unwrap()
    }

    fn book_with_accounts() -> (Book, AccountId, AccountId, AccountId) {
        let mut book = Book::new();
        let receivable = AccountRecord::new("Accounts Receivable", AccountType::Receivable);
        let income = AccountRecord::new("Sales", AccountType::Income);
        let bank = AccountRecord::new("Checking", AccountType::Bank);
        let (r, i, b) = (receivable.id, income.id, bank.id);
        book.insert_account(receivable).unwrap();
        book.insert_account(income).unwrap();
        book.insert_account(bank).unwrap();
        (book, r, i, b)
    }

    #[test]
    fn test_create_customer_assigns_number_and_guid() {
        let mut book = Book::new();
        let id1 = book.create_customer("First").unwrap();
        let id2 = book.create_customer("Second").unwrap();

        assert_ne!(id1, id2);
        assert_eq!(book.customer_record(id1).unwrap().number, "000001");
        assert_eq!(book.customer_record(id2).unwrap().number, "000002");
    }

    #[test]
    fn test_create_customer_rejects_empty_name() {
        let mut book = Book::new();
        assert!(matches!(
            book.create_customer("   "),
            Err(BookError::Validation(_))
        ));
    }

    #[test]
    fn test_create_job_rejects_job_owner() {
        let mut book = Book::new();
        let cust = book.create_customer("Acme").unwrap();
        let job = book
            .create_job("Roof", OwnerRef::customer(cust.as_guid()))
            .unwrap();

        let err = book
            .create_job("Chained", OwnerRef::job(job.as_guid()))
            .unwrap_err();
        assert!(matches!(err, BookError::WrongOwnerKind { .. }));
    }

    #[test]
    fn test_create_job_rejects_unknown_owner() {
        let mut book = Book::new();
        let err = book
            .create_job("Orphan", OwnerRef::customer(crate::models::Guid::new()))
            .unwrap_err();
        assert!(matches!(err, BookError::DanglingReference { .. }));
    }

    #[test]
    fn test_mutation_writes_through() {
        let mut book = Book::new();
        let id = book.create_customer("Acme").unwrap();

        book.customer_mut(id).unwrap().name = "Acme Corp".into();
        assert_eq!(book.customer(id).unwrap().name(), "Acme Corp");
    }

    #[test]
    fn test_remove_customer_vetoed_by_job() {
        let mut book = Book::new();
        let cust = book.create_customer("Acme").unwrap();
        book.create_job("Roof", OwnerRef::customer(cust.as_guid()))
            .unwrap();

        let err = book.remove_customer(cust).unwrap_err();
        assert!(matches!(err, BookError::StillReferenced { .. }));

        // Still present after the failed removal
        assert!(book.customer_record(cust).is_some());
    }

    #[test]
    fn test_remove_customer_after_dependents_gone() {
        let mut book = Book::new();
        let cust = book.create_customer("Acme").unwrap();
        let job = book
            .create_job("Roof", OwnerRef::customer(cust.as_guid()))
            .unwrap();

        book.remove_job(job).unwrap();
        let removed = book.remove_customer(cust).unwrap();
        assert_eq!(removed.name, "Acme");
        assert!(book.customer_record(cust).is_none());
    }

    #[test]
    fn test_remove_unknown_customer_is_not_found() {
        let mut book = Book::new();
        let err = book.remove_customer(CustomerId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_post_and_pay_invoice() {
        let (mut book, receivable, income, bank) = book_with_accounts();
        let cust = book.create_customer("Acme").unwrap();
        let invc = book
            .create_invoice(OwnerRef::customer(cust.as_guid()), date(2024, 3, 1))
            .unwrap();
        book.invoice_mut(invc).unwrap().entries.push(
            crate::models::InvoiceEntryRecord::new(date(2024, 3, 1), fp("1/1"), fp("10000/100")),
        );

        book.post_invoice(invc, date(2024, 3, 2), receivable, income)
            .unwrap();
        let view = book.invoice(invc).unwrap();
        assert!(view.record().is_posted());
        assert_eq!(view.amount_paid().unwrap(), FixedPoint::zero());
        assert!(!view.is_paid().unwrap());

        book.pay_invoice(invc, date(2024, 3, 10), bank, fp("10000/100"))
            .unwrap();
        let view = book.invoice(invc).unwrap();
        assert_eq!(view.amount_paid().unwrap(), fp("10000/100"));
        assert!(view.is_paid().unwrap());
    }

    #[test]
    fn test_double_post_rejected() {
        let (mut book, receivable, income, _) = book_with_accounts();
        let cust = book.create_customer("Acme").unwrap();
        let invc = book
            .create_invoice(OwnerRef::customer(cust.as_guid()), date(2024, 3, 1))
            .unwrap();

        book.post_invoice(invc, date(2024, 3, 2), receivable, income)
            .unwrap();
        let err = book
            .post_invoice(invc, date(2024, 3, 3), receivable, income)
            .unwrap_err();
        assert!(matches!(err, BookError::Validation(_)));
    }

    #[test]
    fn test_pay_unposted_invoice_rejected() {
        let (mut book, _, _, bank) = book_with_accounts();
        let cust = book.create_customer("Acme").unwrap();
        let invc = book
            .create_invoice(OwnerRef::customer(cust.as_guid()), date(2024, 3, 1))
            .unwrap();

        let err = book
            .pay_invoice(invc, date(2024, 3, 10), bank, fp("100/100"))
            .unwrap_err();
        assert!(matches!(err, BookError::Validation(_)));
    }

    #[test]
    fn test_customer_by_name_case_insensitive() {
        let mut book = Book::new();
        book.create_customer("Acme Corp").unwrap();
        assert!(book.customer_by_name("acme corp").is_some());
        assert!(book.customer_by_name("nobody").is_none());
    }
}
