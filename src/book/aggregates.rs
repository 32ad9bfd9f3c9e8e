//! Partitioned invoice queries and derived aggregates
//!
//! Every invoice is attributed to exactly one owner, either directly or
//! through exactly one job, so the Direct and ViaJobs partitions are
//! disjoint and together cover the owner's full invoice set. Aggregation
//! fails fast on a broken owner chain; skipping a bad invoice would
//! silently understate the totals.

use crate::config::NumberedKind;
use crate::error::{BookError, BookResult};
use crate::models::{CustomerId, FixedPoint, JobId, OwnerKind, VendorId};

use super::views::Invoice;
use super::Book;

/// The two mutually exclusive paths an invoice is attributed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadVariant {
    /// Invoices whose immediate owner is the customer/vendor itself
    Direct,
    /// Invoices owned by a job that belongs to the customer/vendor
    ViaJobs,
}

impl Book {
    fn invoices_for_owner(
        &self,
        owner_kind: OwnerKind,
        owner_guid: crate::models::Guid,
        variant: ReadVariant,
    ) -> BookResult<Vec<Invoice<'_>>> {
        let mut result = Vec::new();
        for record in self.invoices.values() {
            match variant {
                ReadVariant::Direct => {
                    if record.owner.kind == owner_kind && record.owner.guid == owner_guid {
                        result.push(Invoice::new(self, record));
                    }
                }
                ReadVariant::ViaJobs => {
                    if record.owner.kind != OwnerKind::Job {
                        continue;
                    }
                    let job = self.job_record(JobId::from(record.owner.guid)).ok_or_else(
                        || BookError::DanglingReference {
                            from: format!("invoice {}", record.number),
                            to: format!("job {}", record.owner.guid),
                        },
                    )?;
                    if job.owner.kind == owner_kind && job.owner.guid == owner_guid {
                        result.push(Invoice::new(self, record));
                    }
                }
            }
        }
        Ok(result)
    }

    /// Invoices attributed to a customer through the selected path
    pub fn invoices_for_customer(
        &self,
        id: CustomerId,
        variant: ReadVariant,
    ) -> BookResult<Vec<Invoice<'_>>> {
        self.invoices_for_owner(OwnerKind::Customer, id.as_guid(), variant)
    }

    /// Bills attributed to a vendor through the selected path
    pub fn invoices_for_vendor(
        &self,
        id: VendorId,
        variant: ReadVariant,
    ) -> BookResult<Vec<Invoice<'_>>> {
        self.invoices_for_owner(OwnerKind::Vendor, id.as_guid(), variant)
    }

    fn partition_paid<'a>(
        invoices: Vec<Invoice<'a>>,
        want_paid: bool,
    ) -> BookResult<Vec<Invoice<'a>>> {
        let mut result = Vec::new();
        for invoice in invoices {
            if invoice.is_paid()? == want_paid {
                result.push(invoice);
            }
        }
        Ok(result)
    }

    /// Paid invoices for a customer in the selected partition
    ///
    /// "Paid" checks payments against the total as of now, with payment
    /// dates deliberately not filtered (see [`Invoice::amount_paid`]).
    pub fn paid_invoices_for_customer(
        &self,
        id: CustomerId,
        variant: ReadVariant,
    ) -> BookResult<Vec<Invoice<'_>>> {
        Self::partition_paid(self.invoices_for_customer(id, variant)?, true)
    }

    /// Unpaid invoices for a customer in the selected partition
    pub fn unpaid_invoices_for_customer(
        &self,
        id: CustomerId,
        variant: ReadVariant,
    ) -> BookResult<Vec<Invoice<'_>>> {
        Self::partition_paid(self.invoices_for_customer(id, variant)?, false)
    }

    /// Paid bills for a vendor in the selected partition
    pub fn paid_invoices_for_vendor(
        &self,
        id: VendorId,
        variant: ReadVariant,
    ) -> BookResult<Vec<Invoice<'_>>> {
        Self::partition_paid(self.invoices_for_vendor(id, variant)?, true)
    }

    /// Unpaid bills for a vendor in the selected partition
    pub fn unpaid_invoices_for_vendor(
        &self,
        id: VendorId,
        variant: ReadVariant,
    ) -> BookResult<Vec<Invoice<'_>>> {
        Self::partition_paid(self.invoices_for_vendor(id, variant)?, false)
    }

    /// Sum still owed across a customer's unpaid invoices in the partition
    pub fn outstanding_value_for_customer(
        &self,
        id: CustomerId,
        variant: ReadVariant,
    ) -> BookResult<FixedPoint> {
        let mut total = FixedPoint::zero();
        for invoice in self.unpaid_invoices_for_customer(id, variant)? {
            total += invoice.amount_unpaid_with_taxes()?;
        }
        Ok(total)
    }

    /// Sum still owed across a vendor's unpaid bills in the partition
    pub fn outstanding_value_for_vendor(
        &self,
        id: VendorId,
        variant: ReadVariant,
    ) -> BookResult<FixedPoint> {
        let mut total = FixedPoint::zero();
        for invoice in self.unpaid_invoices_for_vendor(id, variant)? {
            total += invoice.amount_unpaid_with_taxes()?;
        }
        Ok(total)
    }

    /// Net revenue from a customer's paid invoices in the partition,
    /// excluding taxes
    pub fn income_generated_for_customer(
        &self,
        id: CustomerId,
        variant: ReadVariant,
    ) -> BookResult<FixedPoint> {
        let mut total = FixedPoint::zero();
        for invoice in self.paid_invoices_for_customer(id, variant)? {
            total += invoice.amount_without_taxes()?;
        }
        Ok(total)
    }

    /// Net expense from a vendor's paid bills in the partition,
    /// excluding taxes
    pub fn expense_generated_for_vendor(
        &self,
        id: VendorId,
        variant: ReadVariant,
    ) -> BookResult<FixedPoint> {
        let mut total = FixedPoint::zero();
        for invoice in self.paid_invoices_for_vendor(id, variant)? {
            total += invoice.amount_without_taxes()?;
        }
        Ok(total)
    }

    // --- numbering ---

    fn numbers_of_kind(&self, kind: NumberedKind) -> Vec<&str> {
        match kind {
            NumberedKind::Customer => self.customers.values().map(|c| c.number.as_str()).collect(),
            NumberedKind::Vendor => self.vendors.values().map(|v| v.number.as_str()).collect(),
            NumberedKind::Job => self.jobs.values().map(|j| j.number.as_str()).collect(),
            NumberedKind::Invoice => self.invoices.values().map(|i| i.number.as_str()).collect(),
        }
    }

    /// The highest numeric user-facing number of the given kind
    ///
    /// Numbers that do not parse as decimal integers are skipped.
    pub fn highest_number(&self, kind: NumberedKind) -> Option<u64> {
        self.numbers_of_kind(kind)
            .into_iter()
            .filter_map(|n| n.trim().parse::<u64>().ok())
            .max()
    }

    /// One past the highest existing number, keeping its zero-padding
    ///
    /// With no numeric numbers present, the configured fallback is used.
    pub fn next_number(&self, kind: NumberedKind) -> String {
        let best = self
            .numbers_of_kind(kind)
            .into_iter()
            .filter_map(|n| {
                let trimmed = n.trim();
                trimmed.parse::<u64>().ok().map(|value| (value, trimmed.len()))
            })
            .max_by_key(|&(value, _)| value);

        match best {
            Some((value, width)) => format!("{:0width$}", value + 1, width = width),
            None => self.numbering.first_number(),
        }
    }

    /// Shorthand for [`Book::next_number`] on customers
    pub fn next_customer_number(&self) -> String {
        self.next_number(NumberedKind::Customer)
    }

    /// Shorthand for [`Book::next_number`] on vendors
    pub fn next_vendor_number(&self) -> String {
        self.next_number(NumberedKind::Vendor)
    }

    /// Shorthand for [`Book::next_number`] on jobs
    pub fn next_job_number(&self) -> String {
        self.next_number(NumberedKind::Job)
    }

    /// Shorthand for [`Book::next_number`] on invoices
    pub fn next_invoice_number(&self) -> String {
        self.next_number(NumberedKind::Invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccountId, AccountRecord, AccountType, InvoiceEntryRecord, InvoiceId, OwnerRef,
        TaxAmountKind, TaxTableEntryRecord, TaxTableRecord,
    };
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fp(s: &str) -> FixedPoint {
        FixedPoint::parse(s).unwrap()
    }

    struct Fixture {
        book: Book,
        receivable: AccountId,
        income: AccountId,
        bank: AccountId,
        tax_table: crate::models::TaxTableId,
    }

    fn fixture() -> Fixture {
        let mut book = Book::new();
        let receivable = AccountRecord::new("A/R", AccountType::Receivable);
        let income = AccountRecord::new("Sales", AccountType::Income);
        let bank = AccountRecord::new("Checking", AccountType::Bank);
        let tax_acct = AccountRecord::new("Tax Collected", AccountType::Liability);
        let (r, i, b, t) = (receivable.id, income.id, bank.id, tax_acct.id);
        book.insert_account(receivable).unwrap();
        book.insert_account(income).unwrap();
        book.insert_account(bank).unwrap();
        book.insert_account(tax_acct).unwrap();

        let table = TaxTableRecord::new(
            "VAT 10%",
            vec![TaxTableEntryRecord {
                account: t,
                amount: fp("10/1"),
                kind: TaxAmountKind::Percent,
            }],
        );
        let table_id = table.id;
        book.insert_tax_table(table).unwrap();

        Fixture {
            book,
            receivable: r,
            income: i,
            bank: b,
            tax_table: table_id,
        }
    }

    impl Fixture {
        /// One posted invoice with a single entry; taxed at 10% if asked
        fn add_invoice(&mut self, owner: OwnerRef, price: &str, taxed: bool) -> InvoiceId {
            let id = self
                .book
                .create_invoice(owner, date(2024, 3, 1))
                .unwrap();
            let mut entry = InvoiceEntryRecord::new(date(2024, 3, 1), fp("1/1"), fp(price));
            if taxed {
                entry.taxable = true;
                entry.tax_table = Some(self.tax_table);
            }
            self.book.invoice_mut(id).unwrap().entries.push(entry);
            self.book
                .post_invoice(id, date(2024, 3, 2), self.receivable, self.income)
                .unwrap();
            id
        }

        fn pay_in_full(&mut self, id: InvoiceId) {
            let total = self.book.invoice(id).unwrap().amount_with_taxes().unwrap();
            self.book
                .pay_invoice(id, date(2024, 3, 10), self.bank, total)
                .unwrap();
        }
    }

    #[test]
    fn test_income_and_outstanding_scenario() {
        // A customer with two direct invoices: one fully paid ($100,
        // tax-free) and one unpaid ($50 of goods + $5 tax).
        let mut fx = fixture();
        let cust = fx.book.create_customer("Acme").unwrap();
        let owner = OwnerRef::customer(cust.as_guid());

        let paid = fx.add_invoice(owner, "10000/100", false);
        fx.pay_in_full(paid);
        fx.add_invoice(owner, "5000/100", true);

        assert_eq!(
            fx.book
                .income_generated_for_customer(cust, ReadVariant::Direct)
                .unwrap(),
            fp("10000/100")
        );
        assert_eq!(
            fx.book
                .outstanding_value_for_customer(cust, ReadVariant::Direct)
                .unwrap(),
            fp("5500/100")
        );
        // Nothing flows through jobs for this customer
        assert!(fx
            .book
            .outstanding_value_for_customer(cust, ReadVariant::ViaJobs)
            .unwrap()
            .is_zero());
    }

    #[test]
    fn test_direct_and_via_jobs_partition_is_disjoint_and_complete() {
        let mut fx = fixture();
        let cust = fx.book.create_customer("Acme").unwrap();
        let owner = OwnerRef::customer(cust.as_guid());
        let job = fx
            .book
            .create_job("Roof", OwnerRef::customer(cust.as_guid()))
            .unwrap();
        let job_owner = OwnerRef::job(job.as_guid());

        let d1 = fx.add_invoice(owner, "10000/100", false);
        let d2 = fx.add_invoice(owner, "20000/100", false);
        let j1 = fx.add_invoice(job_owner, "30000/100", false);

        let direct: BTreeSet<_> = fx
            .book
            .invoices_for_customer(cust, ReadVariant::Direct)
            .unwrap()
            .iter()
            .map(|i| i.id())
            .collect();
        let via_jobs: BTreeSet<_> = fx
            .book
            .invoices_for_customer(cust, ReadVariant::ViaJobs)
            .unwrap()
            .iter()
            .map(|i| i.id())
            .collect();

        assert_eq!(direct, BTreeSet::from([d1, d2]));
        assert_eq!(via_jobs, BTreeSet::from([j1]));
        assert!(direct.is_disjoint(&via_jobs));

        let all: BTreeSet<_> = fx
            .book
            .customer(cust)
            .unwrap()
            .invoices()
            .unwrap()
            .iter()
            .map(|i| i.id())
            .collect();
        assert_eq!(all, direct.union(&via_jobs).copied().collect());
    }

    #[test]
    fn test_paid_unpaid_partition_is_disjoint_and_complete() {
        let mut fx = fixture();
        let cust = fx.book.create_customer("Acme").unwrap();
        let owner = OwnerRef::customer(cust.as_guid());

        let a = fx.add_invoice(owner, "10000/100", false);
        let b = fx.add_invoice(owner, "20000/100", true);
        let c = fx.add_invoice(owner, "30000/100", false);
        fx.pay_in_full(a);
        fx.pay_in_full(b);

        let paid: BTreeSet<_> = fx
            .book
            .paid_invoices_for_customer(cust, ReadVariant::Direct)
            .unwrap()
            .iter()
            .map(|i| i.id())
            .collect();
        let unpaid: BTreeSet<_> = fx
            .book
            .unpaid_invoices_for_customer(cust, ReadVariant::Direct)
            .unwrap()
            .iter()
            .map(|i| i.id())
            .collect();

        assert_eq!(paid, BTreeSet::from([a, b]));
        assert_eq!(unpaid, BTreeSet::from([c]));
        assert!(paid.is_disjoint(&unpaid));
    }

    #[test]
    fn test_partial_payment_stays_unpaid_with_positive_outstanding() {
        let mut fx = fixture();
        let cust = fx.book.create_customer("Acme").unwrap();
        let invc = fx.add_invoice(OwnerRef::customer(cust.as_guid()), "10000/100", false);
        fx.book
            .pay_invoice(invc, date(2024, 3, 10), fx.bank, fp("4000/100"))
            .unwrap();

        let view = fx.book.invoice(invc).unwrap();
        assert!(!view.is_paid().unwrap());
        let remaining = view.amount_unpaid_with_taxes().unwrap();
        assert_eq!(remaining, fp("6000/100"));
        assert!(!remaining.is_negative());
    }

    #[test]
    fn test_vendor_expense_mirror() {
        let mut fx = fixture();
        let payable = AccountRecord::new("A/P", AccountType::Payable);
        let expense = AccountRecord::new("Supplies", AccountType::Expense);
        let (p, e) = (payable.id, expense.id);
        fx.book.insert_account(payable).unwrap();
        fx.book.insert_account(expense).unwrap();

        let vend = fx.book.create_vendor("Parts & Sundry").unwrap();
        let bill = fx
            .book
            .create_invoice(OwnerRef::vendor(vend.as_guid()), date(2024, 3, 1))
            .unwrap();
        fx.book
            .invoice_mut(bill)
            .unwrap()
            .entries
            .push(InvoiceEntryRecord::new(date(2024, 3, 1), fp("1/1"), fp("7500/100")));
        fx.book.post_invoice(bill, date(2024, 3, 2), p, e).unwrap();

        assert_eq!(
            fx.book
                .outstanding_value_for_vendor(vend, ReadVariant::Direct)
                .unwrap(),
            fp("7500/100")
        );

        fx.book
            .pay_invoice(bill, date(2024, 3, 10), fx.bank, fp("7500/100"))
            .unwrap();
        assert_eq!(
            fx.book
                .expense_generated_for_vendor(vend, ReadVariant::Direct)
                .unwrap(),
            fp("7500/100")
        );
        assert!(fx
            .book
            .outstanding_value_for_vendor(vend, ReadVariant::Direct)
            .unwrap()
            .is_zero());
    }

    #[test]
    fn test_dangling_job_fails_via_jobs_scan() {
        let mut fx = fixture();
        let cust = fx.book.create_customer("Acme").unwrap();
        let job = fx
            .book
            .create_job("Roof", OwnerRef::customer(cust.as_guid()))
            .unwrap();
        // Build the invoice record directly so the job can be removed
        // underneath it, leaving a dangling owner chain.
        let record = crate::models::InvoiceRecord::new(
            "000050",
            OwnerRef::job(job.as_guid()),
            date(2024, 3, 1),
        );
        let invc = record.id;
        fx.book.insert_invoice(record).unwrap();
        fx.book.jobs.remove(&job);
        assert!(fx.book.invoice_record(invc).is_some());

        let err = fx
            .book
            .invoices_for_customer(cust, ReadVariant::ViaJobs)
            .unwrap_err();
        assert!(matches!(err, BookError::DanglingReference { .. }));
    }

    #[test]
    fn test_next_number_continues_padding() {
        let mut book = Book::new();
        let a = book.create_customer("First").unwrap();
        let b = book.create_customer("Seventh").unwrap();
        book.customer_mut(a).unwrap().number = "000001".into();
        book.customer_mut(b).unwrap().number = "000007".into();

        assert_eq!(book.highest_number(NumberedKind::Customer), Some(7));
        assert_eq!(book.next_number(NumberedKind::Customer), "000008");
    }

    #[test]
    fn test_next_number_empty_uses_config_default() {
        let book = Book::new();
        assert_eq!(book.highest_number(NumberedKind::Customer), None);
        assert_eq!(book.next_number(NumberedKind::Customer), "000001");
    }

    #[test]
    fn test_next_number_skips_non_numeric() {
        let mut book = Book::new();
        let a = book.create_customer("Legacy").unwrap();
        let b = book.create_customer("Numbered").unwrap();
        book.customer_mut(a).unwrap().number = "ACME-7".into();
        book.customer_mut(b).unwrap().number = "0042".into();

        assert_eq!(book.next_number(NumberedKind::Customer), "0043");
    }

    #[test]
    fn test_numbering_per_kind_independent() {
        let mut book = Book::new();
        book.create_customer("Acme").unwrap();
        assert_eq!(book.next_number(NumberedKind::Customer), "000002");
        assert_eq!(book.next_number(NumberedKind::Vendor), "000001");
        assert_eq!(book.next_number(NumberedKind::Invoice), "000001");
    }
}
