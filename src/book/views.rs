//! Typed entity views over the book's record store
//!
//! A view is a borrowed (book, record) pair; it never deep-copies and
//! resolves cross-references (tax table, terms, owners) on demand through
//! the book's index. Optional references resolve to `Ok(None)` when unset
//! and `Err(NotFound)` when set but dangling; mandatory references
//! (invoice and job owners) fail with `DanglingReference` instead.

use std::ops::Deref;

use crate::error::{BookError, BookResult};
use crate::models::{
    BillTermsRecord, CustomerId, CustomerRecord, FixedPoint, InvoiceEntryRecord, InvoiceId,
    InvoiceRecord, JobId, JobRecord, OwnerKind, TaxAmountKind, TaxTableRecord, VendorId,
    VendorRecord,
};

use super::aggregates::ReadVariant;
use super::Book;

/// Human-readable label for an invoice flavor, keyed by its owner kind
fn invoice_kind_label(kind: OwnerKind) -> &'static str {
    match kind {
        OwnerKind::Customer => "customer invoice",
        OwnerKind::Vendor => "vendor bill",
        OwnerKind::Job => "job invoice",
    }
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

/// Read view over a customer record
#[derive(Debug, Clone, Copy)]
pub struct Customer<'a> {
    book: &'a Book,
    record: &'a CustomerRecord,
}

impl<'a> Customer<'a> {
    pub(crate) fn new(book: &'a Book, record: &'a CustomerRecord) -> Self {
        Self { book, record }
    }

    pub fn id(&self) -> CustomerId {
        self.record.id
    }

    pub fn number(&self) -> &'a str {
        &self.record.number
    }

    pub fn name(&self) -> &'a str {
        &self.record.name
    }

    /// The raw record
    pub fn record(&self) -> &'a CustomerRecord {
        self.record
    }

    /// The customer's default tax table
    ///
    /// `Ok(None)` when no table is set; `NotFound` when the set id is
    /// dangling.
    pub fn tax_table(&self) -> BookResult<Option<&'a TaxTableRecord>> {
        match self.record.tax_table {
            None => Ok(None),
            Some(id) => self
                .book
                .tax_table(id)
                .map(Some)
                .ok_or_else(|| BookError::NotFound {
                    entity_type: "Tax table",
                    identifier: id.to_string(),
                }),
        }
    }

    /// The customer's default billing terms; same contract as `tax_table`
    pub fn terms(&self) -> BookResult<Option<&'a BillTermsRecord>> {
        match self.record.terms {
            None => Ok(None),
            Some(id) => self
                .book
                .bill_terms(id)
                .map(Some)
                .ok_or_else(|| BookError::NotFound {
                    entity_type: "Bill terms",
                    identifier: id.to_string(),
                }),
        }
    }

    /// Jobs owned by this customer
    pub fn jobs(&self) -> Vec<Job<'a>> {
        let guid = self.record.id.as_guid();
        self.book
            .jobs
            .values()
            .filter(|j| j.owner.kind == OwnerKind::Customer && j.owner.guid == guid)
            .map(|r| Job::new(self.book, r))
            .collect()
    }

    /// Every invoice attributable to this customer, direct and via jobs
    pub fn invoices(&self) -> BookResult<Vec<Invoice<'a>>> {
        let mut all = self.book.invoices_for_customer(self.id(), ReadVariant::Direct)?;
        all.extend(self.book.invoices_for_customer(self.id(), ReadVariant::ViaJobs)?);
        Ok(all)
    }

    /// Paid invoices in the selected partition
    pub fn paid_invoices(&self, variant: ReadVariant) -> BookResult<Vec<Invoice<'a>>> {
        self.book.paid_invoices_for_customer(self.id(), variant)
    }

    /// Unpaid invoices in the selected partition
    pub fn unpaid_invoices(&self, variant: ReadVariant) -> BookResult<Vec<Invoice<'a>>> {
        self.book.unpaid_invoices_for_customer(self.id(), variant)
    }

    /// Number of unpaid direct invoices
    ///
    /// Payment dates are not checked, so an invoice with a payment dated
    /// in the future already counts as paid here.
    pub fn open_invoice_count(&self) -> BookResult<usize> {
        Ok(self.unpaid_invoices(ReadVariant::Direct)?.len())
    }

    /// Net revenue from paid invoices in the selected partition (tax excluded)
    pub fn income_generated(&self, variant: ReadVariant) -> BookResult<FixedPoint> {
        self.book.income_generated_for_customer(self.id(), variant)
    }

    /// `income_generated` rendered as currency
    pub fn income_generated_formatted(
        &self,
        variant: ReadVariant,
        symbol: &str,
    ) -> BookResult<String> {
        Ok(self.income_generated(variant)?.format_currency(symbol))
    }

    /// Sum still owed across unpaid invoices in the selected partition
    pub fn outstanding_value(&self, variant: ReadVariant) -> BookResult<FixedPoint> {
        self.book.outstanding_value_for_customer(self.id(), variant)
    }

    /// `outstanding_value` rendered as currency
    pub fn outstanding_value_formatted(
        &self,
        variant: ReadVariant,
        symbol: &str,
    ) -> BookResult<String> {
        Ok(self.outstanding_value(variant)?.format_currency(symbol))
    }
}

// ---------------------------------------------------------------------------
// Vendor
// ---------------------------------------------------------------------------

/// Read view over a vendor record
#[derive(Debug, Clone, Copy)]
pub struct Vendor<'a> {
    book: &'a Book,
    record: &'a VendorRecord,
}

impl<'a> Vendor<'a> {
    pub(crate) fn new(book: &'a Book, record: &'a VendorRecord) -> Self {
        Self { book, record }
    }

    pub fn id(&self) -> VendorId {
        self.record.id
    }

    pub fn number(&self) -> &'a str {
        &self.record.number
    }

    pub fn name(&self) -> &'a str {
        &self.record.name
    }

    /// The raw record
    pub fn record(&self) -> &'a VendorRecord {
        self.record
    }

    /// The vendor's default tax table; same contract as on customers
    pub fn tax_table(&self) -> BookResult<Option<&'a TaxTableRecord>> {
        match self.record.tax_table {
            None => Ok(None),
            Some(id) => self
                .book
                .tax_table(id)
                .map(Some)
                .ok_or_else(|| BookError::NotFound {
                    entity_type: "Tax table",
                    identifier: id.to_string(),
                }),
        }
    }

    /// The vendor's default billing terms; same contract as on customers
    pub fn terms(&self) -> BookResult<Option<&'a BillTermsRecord>> {
        match self.record.terms {
            None => Ok(None),
            Some(id) => self
                .book
                .bill_terms(id)
                .map(Some)
                .ok_or_else(|| BookError::NotFound {
                    entity_type: "Bill terms",
                    identifier: id.to_string(),
                }),
        }
    }

    /// Jobs owned by this vendor
    pub fn jobs(&self) -> Vec<Job<'a>> {
        let guid = self.record.id.as_guid();
        self.book
            .jobs
            .values()
            .filter(|j| j.owner.kind == OwnerKind::Vendor && j.owner.guid == guid)
            .map(|r| Job::new(self.book, r))
            .collect()
    }

    /// Every bill attributable to this vendor, direct and via jobs
    pub fn bills(&self) -> BookResult<Vec<Invoice<'a>>> {
        let mut all = self.book.invoices_for_vendor(self.id(), ReadVariant::Direct)?;
        all.extend(self.book.invoices_for_vendor(self.id(), ReadVariant::ViaJobs)?);
        Ok(all)
    }

    /// Paid bills in the selected partition
    pub fn paid_bills(&self, variant: ReadVariant) -> BookResult<Vec<Invoice<'a>>> {
        self.book.paid_invoices_for_vendor(self.id(), variant)
    }

    /// Unpaid bills in the selected partition
    pub fn unpaid_bills(&self, variant: ReadVariant) -> BookResult<Vec<Invoice<'a>>> {
        self.book.unpaid_invoices_for_vendor(self.id(), variant)
    }

    /// Number of unpaid direct bills (payment dates not checked)
    pub fn open_bill_count(&self) -> BookResult<usize> {
        Ok(self.unpaid_bills(ReadVariant::Direct)?.len())
    }

    /// Net expense from paid bills in the selected partition (tax excluded)
    pub fn expense_generated(&self, variant: ReadVariant) -> BookResult<FixedPoint> {
        self.book.expense_generated_for_vendor(self.id(), variant)
    }

    /// `expense_generated` rendered as currency
    pub fn expense_generated_formatted(
        &self,
        variant: ReadVariant,
        symbol: &str,
    ) -> BookResult<String> {
        Ok(self.expense_generated(variant)?.format_currency(symbol))
    }

    /// Sum still owed across unpaid bills in the selected partition
    pub fn outstanding_value(&self, variant: ReadVariant) -> BookResult<FixedPoint> {
        self.book.outstanding_value_for_vendor(self.id(), variant)
    }

    /// `outstanding_value` rendered as currency
    pub fn outstanding_value_formatted(
        &self,
        variant: ReadVariant,
        symbol: &str,
    ) -> BookResult<String> {
        Ok(self.outstanding_value(variant)?.format_currency(symbol))
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// The resolved owner of a job: a customer or a vendor, never another job
#[derive(Debug, Clone, Copy)]
pub enum JobOwner<'a> {
    Customer(Customer<'a>),
    Vendor(Vendor<'a>),
}

/// Read view over a job record
#[derive(Debug, Clone, Copy)]
pub struct Job<'a> {
    book: &'a Book,
    record: &'a JobRecord,
}

impl<'a> Job<'a> {
    pub(crate) fn new(book: &'a Book, record: &'a JobRecord) -> Self {
        Self { book, record }
    }

    pub fn id(&self) -> JobId {
        self.record.id
    }

    pub fn number(&self) -> &'a str {
        &self.record.number
    }

    pub fn name(&self) -> &'a str {
        &self.record.name
    }

    /// The raw record
    pub fn record(&self) -> &'a JobRecord {
        self.record
    }

    /// Resolve the owning customer or vendor
    ///
    /// A job's owner is mandatory, so an unknown id is a dangling
    /// reference, not a plain lookup miss.
    pub fn owner(&self) -> BookResult<JobOwner<'a>> {
        let owner = self.record.owner;
        match owner.kind {
            OwnerKind::Customer => self
                .book
                .customer_record(CustomerId::from(owner.guid))
                .map(|r| JobOwner::Customer(Customer::new(self.book, r)))
                .ok_or_else(|| self.dangling_owner()),
            OwnerKind::Vendor => self
                .book
                .vendor_record(VendorId::from(owner.guid))
                .map(|r| JobOwner::Vendor(Vendor::new(self.book, r)))
                .ok_or_else(|| self.dangling_owner()),
            // insert_job rejects these, but a record can still be built
            // by hand or read from a damaged file
            OwnerKind::Job => Err(BookError::WrongOwnerKind {
                context: "job owner",
                found: "job",
            }),
        }
    }

    fn dangling_owner(&self) -> BookError {
        BookError::DanglingReference {
            from: format!("job {}", self.record.number),
            to: format!("{} {}", self.record.owner.kind, self.record.owner.guid),
        }
    }

    /// Invoices whose immediate owner is this job
    pub fn invoices(&self) -> Vec<Invoice<'a>> {
        let guid = self.record.id.as_guid();
        self.book
            .invoices
            .values()
            .filter(|i| i.owner.kind == OwnerKind::Job && i.owner.guid == guid)
            .map(|r| Invoice::new(self.book, r))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Invoice
// ---------------------------------------------------------------------------

/// The resolved immediate owner of a generic invoice
#[derive(Debug, Clone, Copy)]
pub enum InvoiceOwner<'a> {
    Customer(Customer<'a>),
    Vendor(Vendor<'a>),
    Job(Job<'a>),
}

/// The party ultimately billed, after following a job one level
#[derive(Debug, Clone, Copy)]
pub enum BillTo<'a> {
    Customer(Customer<'a>),
    Vendor(Vendor<'a>),
}

/// Read view over a generic invoice record
///
/// Check `owner_kind()` before narrowing with the `as_*` methods; a
/// mismatched narrow fails with `WrongInvoiceType`.
#[derive(Debug, Clone, Copy)]
pub struct Invoice<'a> {
    book: &'a Book,
    record: &'a InvoiceRecord,
}

impl<'a> Invoice<'a> {
    pub(crate) fn new(book: &'a Book, record: &'a InvoiceRecord) -> Self {
        Self { book, record }
    }

    pub fn id(&self) -> InvoiceId {
        self.record.id
    }

    pub fn number(&self) -> &'a str {
        &self.record.number
    }

    /// The raw record
    pub fn record(&self) -> &'a InvoiceRecord {
        self.record
    }

    /// The owner-type discriminant deciding this invoice's flavor
    pub fn owner_kind(&self) -> OwnerKind {
        self.record.owner.kind
    }

    /// Resolve the immediate owner; mandatory, so an unknown id is a
    /// dangling reference
    pub fn owner(&self) -> BookResult<InvoiceOwner<'a>> {
        let owner = self.record.owner;
        match owner.kind {
            OwnerKind::Customer => self
                .book
                .customer_record(CustomerId::from(owner.guid))
                .map(|r| InvoiceOwner::Customer(Customer::new(self.book, r)))
                .ok_or_else(|| self.dangling_owner()),
            OwnerKind::Vendor => self
                .book
                .vendor_record(VendorId::from(owner.guid))
                .map(|r| InvoiceOwner::Vendor(Vendor::new(self.book, r)))
                .ok_or_else(|| self.dangling_owner()),
            OwnerKind::Job => self
                .book
                .job_record(JobId::from(owner.guid))
                .map(|r| InvoiceOwner::Job(Job::new(self.book, r)))
                .ok_or_else(|| self.dangling_owner()),
        }
    }

    fn dangling_owner(&self) -> BookError {
        BookError::DanglingReference {
            from: format!("invoice {}", self.record.number),
            to: format!("{} {}", self.record.owner.kind, self.record.owner.guid),
        }
    }

    /// Resolve the eventual bill-to party, following a job's own owner
    /// exactly one level (jobs cannot chain into jobs)
    pub fn bill_to(&self) -> BookResult<BillTo<'a>> {
        match self.owner()? {
            InvoiceOwner::Customer(c) => Ok(BillTo::Customer(c)),
            InvoiceOwner::Vendor(v) => Ok(BillTo::Vendor(v)),
            InvoiceOwner::Job(job) => match job.owner()? {
                JobOwner::Customer(c) => Ok(BillTo::Customer(c)),
                JobOwner::Vendor(v) => Ok(BillTo::Vendor(v)),
            },
        }
    }

    /// Net and tax portions of one entry
    ///
    /// An entry that is not taxable, or whose tax table is unset or
    /// unknown, contributes zero tax. Arithmetic stays exact; nothing is
    /// rounded here.
    fn entry_amounts(&self, entry: &InvoiceEntryRecord) -> BookResult<(FixedPoint, FixedPoint)> {
        let gross = entry.gross();
        if !entry.taxable {
            return Ok((gross, FixedPoint::zero()));
        }
        let table = match entry.tax_table.and_then(|id| self.book.tax_table(id)) {
            Some(t) => t,
            None => return Ok((gross, FixedPoint::zero())),
        };

        let mut percent = FixedPoint::zero();
        let mut flat = FixedPoint::zero();
        for tax in &table.entries {
            match tax.kind {
                TaxAmountKind::Percent => percent += tax.amount,
                TaxAmountKind::Value => flat += tax.amount,
            }
        }

        let hundred = FixedPoint::from_int(100);
        if entry.tax_included {
            // gross = net * (1 + percent/100) + flat
            let net = (gross - flat)
                .mul(&hundred)
                .mul(&(hundred + percent).recip()?);
            Ok((net, gross - net))
        } else {
            let tax = gross.mul(&percent).mul(&hundred.recip()?) + flat;
            Ok((gross, tax))
        }
    }

    /// Sum of entry amounts excluding taxes
    pub fn amount_without_taxes(&self) -> BookResult<FixedPoint> {
        let mut total = FixedPoint::zero();
        for entry in &self.record.entries {
            total += self.entry_amounts(entry)?.0;
        }
        Ok(total)
    }

    /// Tax portion across all entries
    pub fn tax_amount(&self) -> BookResult<FixedPoint> {
        let mut total = FixedPoint::zero();
        for entry in &self.record.entries {
            total += self.entry_amounts(entry)?.1;
        }
        Ok(total)
    }

    /// Sum of entry amounts including taxes
    pub fn amount_with_taxes(&self) -> BookResult<FixedPoint> {
        Ok(self.amount_without_taxes()? + self.tax_amount()?)
    }

    /// Sum of payments recorded against this invoice's lot
    ///
    /// Payment dates are deliberately not checked: a payment dated in the
    /// future already counts as received. This mirrors the format's
    /// intent and is a business rule, not a defect.
    pub fn amount_paid(&self) -> BookResult<FixedPoint> {
        let lot = match self.record.post_lot {
            Some(lot) => lot,
            None => return Ok(FixedPoint::zero()),
        };
        let mut paid = FixedPoint::zero();
        for (txn, split) in self.book.splits_in_lot(lot) {
            if Some(txn.id) == self.record.post_txn {
                continue;
            }
            paid += split.value;
        }
        // The lot sign depends on invoice direction; payments always
        // oppose the posting split, so the magnitude is what was paid.
        Ok(paid.abs())
    }

    /// What remains to pay, including taxes
    pub fn amount_unpaid_with_taxes(&self) -> BookResult<FixedPoint> {
        Ok(self.amount_with_taxes()? - self.amount_paid()?)
    }

    /// Whether payments cover the full amount including taxes as of now
    pub fn is_paid(&self) -> BookResult<bool> {
        Ok(self.amount_paid()? >= self.amount_with_taxes()?.abs())
    }

    /// Negation of `is_paid`
    pub fn is_not_fully_paid(&self) -> BookResult<bool> {
        Ok(!self.is_paid()?)
    }

    // --- narrowing ---

    /// Narrow to a direct customer invoice
    pub fn as_customer_invoice(&self) -> BookResult<CustomerInvoice<'a>> {
        if self.owner_kind() == OwnerKind::Customer {
            Ok(CustomerInvoice(*self))
        } else {
            Err(BookError::WrongInvoiceType {
                expected: invoice_kind_label(OwnerKind::Customer),
                actual: invoice_kind_label(self.owner_kind()),
            })
        }
    }

    /// Narrow to a direct vendor bill
    pub fn as_vendor_bill(&self) -> BookResult<VendorBill<'a>> {
        if self.owner_kind() == OwnerKind::Vendor {
            Ok(VendorBill(*self))
        } else {
            Err(BookError::WrongInvoiceType {
                expected: invoice_kind_label(OwnerKind::Vendor),
                actual: invoice_kind_label(self.owner_kind()),
            })
        }
    }

    /// Narrow to a job invoice
    pub fn as_job_invoice(&self) -> BookResult<JobInvoice<'a>> {
        if self.owner_kind() == OwnerKind::Job {
            Ok(JobInvoice(*self))
        } else {
            Err(BookError::WrongInvoiceType {
                expected: invoice_kind_label(OwnerKind::Job),
                actual: invoice_kind_label(self.owner_kind()),
            })
        }
    }
}

/// A generic invoice known to be a direct customer invoice
#[derive(Debug, Clone, Copy)]
pub struct CustomerInvoice<'a>(Invoice<'a>);

impl<'a> CustomerInvoice<'a> {
    /// The invoiced customer
    pub fn customer(&self) -> BookResult<Customer<'a>> {
        match self.0.owner()? {
            InvoiceOwner::Customer(c) => Ok(c),
            // owner kind was checked at narrowing time
            _ => Err(self.0.dangling_owner()),
        }
    }
}

impl<'a> Deref for CustomerInvoice<'a> {
    type Target = Invoice<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A generic invoice known to be a direct vendor bill
#[derive(Debug, Clone, Copy)]
pub struct VendorBill<'a>(Invoice<'a>);

impl<'a> VendorBill<'a> {
    /// The billed vendor
    pub fn vendor(&self) -> BookResult<Vendor<'a>> {
        match self.0.owner()? {
            InvoiceOwner::Vendor(v) => Ok(v),
            _ => Err(self.0.dangling_owner()),
        }
    }
}

impl<'a> Deref for VendorBill<'a> {
    type Target = Invoice<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A generic invoice known to belong to a job
#[derive(Debug, Clone, Copy)]
pub struct JobInvoice<'a>(Invoice<'a>);

impl<'a> JobInvoice<'a> {
    /// The owning job
    pub fn job(&self) -> BookResult<Job<'a>> {
        match self.0.owner()? {
            InvoiceOwner::Job(j) => Ok(j),
            _ => Err(self.0.dangling_owner()),
        }
    }

    /// The customer billed through the job, if the job is customer-owned
    pub fn customer(&self) -> BookResult<Customer<'a>> {
        match self.0.bill_to()? {
            BillTo::Customer(c) => Ok(c),
            BillTo::Vendor(_) => Err(BookError::WrongInvoiceType {
                expected: "customer job invoice",
                actual: "vendor job invoice",
            }),
        }
    }

    /// The vendor billed through the job, if the job is vendor-owned
    pub fn vendor(&self) -> BookResult<Vendor<'a>> {
        match self.0.bill_to()? {
            BillTo::Vendor(v) => Ok(v),
            BillTo::Customer(_) => Err(BookError::WrongInvoiceType {
                expected: "vendor job invoice",
                actual: "customer job invoice",
            }),
        }
    }
}

impl<'a> Deref for JobInvoice<'a> {
    type Target = Invoice<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccountRecord, AccountType, InvoiceEntryRecord, OwnerRef, TaxTableEntryRecord,
        TaxTableRecord,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fp(s: &str) -> FixedPoint {
        FixedPoint::parse(s).unwrap()
    }

    fn percent_table(book: &mut Book, pct: &str) -> crate::models::TaxTableId {
        let tax_account = AccountRecord::new("Tax Collected", AccountType::Liability);
        let account_id = tax_account.id;
        book.insert_account(tax_account).unwrap();
        let table = TaxTableRecord::new(
            "VAT",
            vec![TaxTableEntryRecord {
                account: account_id,
                amount: fp(pct),
                kind: TaxAmountKind::Percent,
            }],
        );
        let id = table.id;
        book.insert_tax_table(table).unwrap();
        id
    }

    fn taxed_entry(qty: &str, price: &str, table: crate::models::TaxTableId) -> InvoiceEntryRecord {
        let mut entry = InvoiceEntryRecord::new(date(2024, 3, 1), fp(qty), fp(price));
        entry.taxable = true;
        entry.tax_table = Some(table);
        entry
    }

    #[test]
    fn test_lazy_tax_table_resolution() {
        let mut book = Book::new();
        let table = percent_table(&mut book, "10/1");
        let cust_id = book.create_customer("Acme").unwrap();

        // Unset -> Ok(None)
        assert!(book.customer(cust_id).unwrap().tax_table().unwrap().is_none());

        book.customer_mut(cust_id).unwrap().tax_table = Some(table);
        let resolved = book.customer(cust_id).unwrap().tax_table().unwrap();
        assert_eq!(resolved.map(|t| t.name.as_str()), Some("VAT"));

        // Set but dangling -> NotFound
        book.customer_mut(cust_id).unwrap().tax_table = Some(crate::models::TaxTableId::new());
        let err = book.customer(cust_id).unwrap().tax_table().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invoice_amounts_with_percent_tax() {
        let mut book = Book::new();
        let table = percent_table(&mut book, "10/1");
        let cust = book.create_customer("Acme").unwrap();
        let invc = book
            .create_invoice(OwnerRef::customer(cust.as_guid()), date(2024, 3, 1))
            .unwrap();
        book.invoice_mut(invc)
            .unwrap()
            .entries
            .push(taxed_entry("1/1", "5000/100", table));

        let view = book.invoice(invc).unwrap();
        assert_eq!(view.amount_without_taxes().unwrap(), fp("5000/100"));
        assert_eq!(view.tax_amount().unwrap(), fp("500/100"));
        assert_eq!(view.amount_with_taxes().unwrap(), fp("5500/100"));
    }

    #[test]
    fn test_tax_included_entry_backs_tax_out() {
        let mut book = Book::new();
        let table = percent_table(&mut book, "10/1");
        let cust = book.create_customer("Acme").unwrap();
        let invc = book
            .create_invoice(OwnerRef::customer(cust.as_guid()), date(2024, 3, 1))
            .unwrap();
        let mut entry = taxed_entry("1/1", "5500/100", table);
        entry.tax_included = true;
        book.invoice_mut(invc).unwrap().entries.push(entry);

        let view = book.invoice(invc).unwrap();
        assert_eq!(view.amount_without_taxes().unwrap(), fp("5000/100"));
        assert_eq!(view.tax_amount().unwrap(), fp("500/100"));
        assert_eq!(view.amount_with_taxes().unwrap(), fp("5500/100"));
    }

    #[test]
    fn test_untaxed_entry_has_no_tax() {
        let mut book = Book::new();
        let cust = book.create_customer("Acme").unwrap();
        let invc = book
            .create_invoice(OwnerRef::customer(cust.as_guid()), date(2024, 3, 1))
            .unwrap();
        book.invoice_mut(invc)
            .unwrap()
            .entries
            .push(InvoiceEntryRecord::new(date(2024, 3, 1), fp("2/1"), fp("2500/100")));

        let view = book.invoice(invc).unwrap();
        assert_eq!(view.amount_without_taxes().unwrap(), fp("5000/100"));
        assert!(view.tax_amount().unwrap().is_zero());
    }

    #[test]
    fn test_narrowing_job_invoice_as_customer_invoice_fails() {
        let mut book = Book::new();
        let cust = book.create_customer("Acme").unwrap();
        let job = book
            .create_job("Roof", OwnerRef::customer(cust.as_guid()))
            .unwrap();
        let invc = book
            .create_invoice(OwnerRef::job(job.as_guid()), date(2024, 3, 1))
            .unwrap();

        let view = book.invoice(invc).unwrap();
        let err = view.as_customer_invoice().unwrap_err();
        assert!(matches!(
            err,
            BookError::WrongInvoiceType {
                expected: "customer invoice",
                actual: "job invoice",
            }
        ));
        assert!(!err.is_not_found());

        // The correct narrow works, and the bill-to chain resolves
        let job_invc = view.as_job_invoice().unwrap();
        assert_eq!(job_invc.customer().unwrap().name(), "Acme");
    }

    #[test]
    fn test_bill_to_follows_job_one_level() {
        let mut book = Book::new();
        let vend = book.create_vendor("Parts & Sundry").unwrap();
        let job = book
            .create_job("Supply run", OwnerRef::vendor(vend.as_guid()))
            .unwrap();
        let invc = book
            .create_invoice(OwnerRef::job(job.as_guid()), date(2024, 3, 1))
            .unwrap();

        let view = book.invoice(invc).unwrap();
        assert_eq!(view.owner_kind(), OwnerKind::Job);
        match view.bill_to().unwrap() {
            BillTo::Vendor(v) => assert_eq!(v.name(), "Parts & Sundry"),
            BillTo::Customer(_) => panic!("expected vendor"),
        }
    }

    #[test]
    fn test_dangling_invoice_owner_is_resolution_failure() {
        let mut book = Book::new();
        let record = InvoiceRecord::new(
            "000099",
            OwnerRef::customer(crate::models::Guid::new()),
            date(2024, 3, 1),
        );
        let id = record.id;
        book.insert_invoice(record).unwrap();

        let err = book.invoice(id).unwrap().owner().unwrap_err();
        assert!(matches!(err, BookError::DanglingReference { .. }));
    }

    #[test]
    fn test_unposted_invoice_has_zero_paid() {
        let mut book = Book::new();
        let cust = book.create_customer("Acme").unwrap();
        let invc = book
            .create_invoice(OwnerRef::customer(cust.as_guid()), date(2024, 3, 1))
            .unwrap();

        let view = book.invoice(invc).unwrap();
        assert!(view.amount_paid().unwrap().is_zero());
    }

    #[test]
    fn test_future_dated_payment_counts_as_paid() {
        let mut book = Book::new();
        let receivable = AccountRecord::new("A/R", AccountType::Receivable);
        let income = AccountRecord::new("Sales", AccountType::Income);
        let bank = AccountRecord::new("Checking", AccountType::Bank);
        let (r, i, b) = (receivable.id, income.id, bank.id);
        book.insert_account(receivable).unwrap();
        book.insert_account(income).unwrap();
        book.insert_account(bank).unwrap();

        let cust = book.create_customer("Acme").unwrap();
        let invc = book
            .create_invoice(OwnerRef::customer(cust.as_guid()), date(2024, 3, 1))
            .unwrap();
        book.invoice_mut(invc)
            .unwrap()
            .entries
            .push(InvoiceEntryRecord::new(date(2024, 3, 1), fp("1/1"), fp("10000/100")));
        book.post_invoice(invc, date(2024, 3, 2), r, i).unwrap();

        // A payment dated far in the future still counts right now.
        book.pay_invoice(invc, date(2099, 1, 1), b, fp("10000/100"))
            .unwrap();
        assert!(book.invoice(invc).unwrap().is_paid().unwrap());
    }
}
