//! XML book writer
//!
//! Serializes a [`Book`] back into the v2 document layout the reader
//! accepts. Collections are walked in id order, so two writes of the same
//! book produce identical bytes. Optional fields that hold their default
//! (empty strings, unset references) are omitted rather than written as
//! empty elements.

use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::book::Book;
use crate::error::BookResult;
use crate::models::{
    AccountRecord, Address, BillTermsRecord, CustomerRecord, Guid, InvoiceEntryRecord, InvoiceId,
    InvoiceRecord, JobRecord, OwnerRef, Slot, SlotValue, SplitRecord, TaxTableRecord,
    TransactionRecord, VendorRecord,
};

type W = Writer<Vec<u8>>;

/// Serialize a book into a complete XML document
pub(crate) fn book_to_bytes(book: &Book) -> BookResult<Vec<u8>> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    start(&mut w, "gnc-v2")?;
    count_data(&mut w, "book", 1)?;
    start_versioned(&mut w, "gnc:book")?;

    count_data(&mut w, "account", book.accounts.len())?;
    count_data(&mut w, "transaction", book.transactions.len())?;
    count_data(&mut w, "gnc:GncCustomer", book.customers.len())?;
    count_data(&mut w, "gnc:GncVendor", book.vendors.len())?;
    count_data(&mut w, "gnc:GncJob", book.jobs.len())?;
    count_data(&mut w, "gnc:GncInvoice", book.invoices.len())?;
    let entry_count: usize = book.invoices.values().map(|i| i.entries.len()).sum();
    count_data(&mut w, "gnc:GncEntry", entry_count)?;
    count_data(&mut w, "gnc:GncTaxTable", book.tax_tables.len())?;
    count_data(&mut w, "gnc:GncBillTerm", book.bill_terms.len())?;

    for record in book.accounts.values() {
        write_account(&mut w, record)?;
    }
    for record in book.transactions.values() {
        write_transaction(&mut w, record)?;
    }
    for record in book.customers.values() {
        write_customer(&mut w, record)?;
    }
    for record in book.vendors.values() {
        write_vendor(&mut w, record)?;
    }
    for record in book.jobs.values() {
        write_job(&mut w, record)?;
    }
    for record in book.invoices.values() {
        write_invoice(&mut w, record)?;
    }
    for record in book.invoices.values() {
        for entry in &record.entries {
            write_entry(&mut w, record.id, entry)?;
        }
    }
    for record in book.tax_tables.values() {
        write_tax_table(&mut w, record)?;
    }
    for record in book.bill_terms.values() {
        write_bill_terms(&mut w, record)?;
    }

    end(&mut w, "gnc:book")?;
    end(&mut w, "gnc-v2")?;

    let mut bytes = w.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

// --- event helpers ---

fn start(w: &mut W, name: &str) -> BookResult<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn start_versioned(w: &mut W, name: &str) -> BookResult<()> {
    let mut el = BytesStart::new(name);
    el.push_attribute(("version", "2.0.0"));
    w.write_event(Event::Start(el))?;
    Ok(())
}

fn end(w: &mut W, name: &str) -> BookResult<()> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_elem(w: &mut W, name: &str, text: &str) -> BookResult<()> {
    start(w, name)?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, name)
}

/// Write a text element only when the value is non-empty
fn opt_text_elem(w: &mut W, name: &str, text: &str) -> BookResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    text_elem(w, name, text)
}

fn guid_elem(w: &mut W, name: &str, guid: Guid) -> BookResult<()> {
    let mut el = BytesStart::new(name);
    el.push_attribute(("type", "guid"));
    w.write_event(Event::Start(el))?;
    w.write_event(Event::Text(BytesText::new(&guid.to_string())))?;
    end(w, name)
}

fn flag_elem(w: &mut W, name: &str, value: bool) -> BookResult<()> {
    text_elem(w, name, if value { "1" } else { "0" })
}

fn count_data(w: &mut W, kind: &str, count: usize) -> BookResult<()> {
    if count == 0 {
        return Ok(());
    }
    let mut el = BytesStart::new("gnc:count-data");
    el.push_attribute(("cd:type", kind));
    w.write_event(Event::Start(el))?;
    w.write_event(Event::Text(BytesText::new(&count.to_string())))?;
    end(w, "gnc:count-data")
}

fn timestamp_elem(w: &mut W, name: &str, when: DateTime<Utc>) -> BookResult<()> {
    start(w, name)?;
    text_elem(w, "ts:date", &when.format(super::reader::TS_FORMAT).to_string())?;
    end(w, name)
}

fn date_elem(w: &mut W, name: &str, date: NaiveDate) -> BookResult<()> {
    start(w, name)?;
    let text = format!("{} 00:00:00 +0000", date.format("%Y-%m-%d"));
    text_elem(w, "ts:date", &text)?;
    end(w, name)
}

fn currency_elem(w: &mut W, name: &str, code: &str) -> BookResult<()> {
    if code.is_empty() {
        return Ok(());
    }
    start(w, name)?;
    text_elem(w, "cmdty:space", "CURRENCY")?;
    text_elem(w, "cmdty:id", code)?;
    end(w, name)
}

fn address_elem(w: &mut W, name: &str, address: &Address) -> BookResult<()> {
    if address.is_empty() {
        return Ok(());
    }
    start_versioned(w, name)?;
    opt_text_elem(w, "addr:name", &address.name)?;
    opt_text_elem(w, "addr:addr1", &address.line1)?;
    opt_text_elem(w, "addr:addr2", &address.line2)?;
    opt_text_elem(w, "addr:addr3", &address.line3)?;
    opt_text_elem(w, "addr:addr4", &address.line4)?;
    opt_text_elem(w, "addr:phone", &address.phone)?;
    opt_text_elem(w, "addr:fax", &address.fax)?;
    opt_text_elem(w, "addr:email", &address.email)?;
    end(w, name)
}

fn slots_elem(w: &mut W, name: &str, slots: &[Slot]) -> BookResult<()> {
    if slots.is_empty() {
        return Ok(());
    }
    start(w, name)?;
    for slot in slots {
        write_slot(w, slot)?;
    }
    end(w, name)
}

fn write_slot(w: &mut W, slot: &Slot) -> BookResult<()> {
    start(w, "slot")?;
    text_elem(w, "slot:key", &slot.key)?;

    let mut value_el = BytesStart::new("slot:value");
    value_el.push_attribute(("type", slot.value.type_tag()));
    w.write_event(Event::Start(value_el))?;
    match &slot.value {
        SlotValue::Text(text) => w.write_event(Event::Text(BytesText::new(text)))?,
        SlotValue::Integer(n) => w.write_event(Event::Text(BytesText::new(&n.to_string())))?,
        SlotValue::Numeric(n) => w.write_event(Event::Text(BytesText::new(&n.to_string())))?,
        SlotValue::Guid(guid) => w.write_event(Event::Text(BytesText::new(&guid.to_string())))?,
        SlotValue::Frame(children) => {
            for child in children {
                write_slot(w, child)?;
            }
        }
        SlotValue::Other { text, .. } => w.write_event(Event::Text(BytesText::new(text)))?,
    }
    end(w, "slot:value")?;
    end(w, "slot")
}

fn owner_elem(w: &mut W, name: &str, owner: &OwnerRef) -> BookResult<()> {
    start_versioned(w, name)?;
    text_elem(w, "owner:type", owner.kind.tag())?;
    guid_elem(w, "owner:id", owner.guid)?;
    end(w, name)
}

// --- records ---

fn write_account(w: &mut W, record: &AccountRecord) -> BookResult<()> {
    start_versioned(w, "gnc:account")?;
    text_elem(w, "act:name", &record.name)?;
    guid_elem(w, "act:id", record.id.as_guid())?;
    text_elem(w, "act:type", record.account_type.tag())?;
    currency_elem(w, "act:commodity", &record.commodity)?;
    text_elem(w, "act:commodity-scu", &record.commodity_scu.to_string())?;
    opt_text_elem(w, "act:description", &record.description)?;
    slots_elem(w, "act:slots", &record.slots)?;
    if let Some(parent) = record.parent {
        guid_elem(w, "act:parent", parent.as_guid())?;
    }
    end(w, "gnc:account")
}

fn write_transaction(w: &mut W, record: &TransactionRecord) -> BookResult<()> {
    start_versioned(w, "gnc:transaction")?;
    guid_elem(w, "trn:id", record.id.as_guid())?;
    currency_elem(w, "trn:currency", &record.currency)?;
    opt_text_elem(w, "trn:num", &record.number)?;
    date_elem(w, "trn:date-posted", record.date_posted)?;
    timestamp_elem(w, "trn:date-entered", record.date_entered)?;
    opt_text_elem(w, "trn:description", &record.description)?;
    slots_elem(w, "trn:slots", &record.slots)?;
    start(w, "trn:splits")?;
    for split in &record.splits {
        write_split(w, split)?;
    }
    end(w, "trn:splits")?;
    end(w, "gnc:transaction")
}

fn write_split(w: &mut W, record: &SplitRecord) -> BookResult<()> {
    start(w, "trn:split")?;
    guid_elem(w, "split:id", record.id.as_guid())?;
    opt_text_elem(w, "split:memo", &record.memo)?;
    opt_text_elem(w, "split:action", &record.action)?;
    text_elem(w, "split:reconciled-state", &record.reconcile_state.to_string())?;
    text_elem(w, "split:value", &record.value.to_string())?;
    text_elem(w, "split:quantity", &record.quantity.to_string())?;
    guid_elem(w, "split:account", record.account.as_guid())?;
    if let Some(lot) = record.lot {
        guid_elem(w, "split:lot", lot.as_guid())?;
    }
    end(w, "trn:split")
}

fn write_customer(w: &mut W, record: &CustomerRecord) -> BookResult<()> {
    start_versioned(w, "gnc:GncCustomer")?;
    guid_elem(w, "cust:guid", record.id.as_guid())?;
    text_elem(w, "cust:name", &record.name)?;
    text_elem(w, "cust:id", &record.number)?;
    address_elem(w, "cust:addr", &record.address)?;
    address_elem(w, "cust:shipaddr", &record.shipping_address)?;
    opt_text_elem(w, "cust:notes", &record.notes)?;
    if let Some(terms) = record.terms {
        guid_elem(w, "cust:terms", terms.as_guid())?;
    }
    flag_elem(w, "cust:taxincluded", record.tax_included)?;
    flag_elem(w, "cust:active", record.active)?;
    if let Some(discount) = record.discount {
        text_elem(w, "cust:discount", &discount.to_string())?;
    }
    if let Some(credit) = record.credit {
        text_elem(w, "cust:credit", &credit.to_string())?;
    }
    currency_elem(w, "cust:currency", &record.currency)?;
    if let Some(tax_table) = record.tax_table {
        guid_elem(w, "cust:taxtable", tax_table.as_guid())?;
    }
    slots_elem(w, "cust:slots", &record.slots)?;
    end(w, "gnc:GncCustomer")
}

fn write_vendor(w: &mut W, record: &VendorRecord) -> BookResult<()> {
    start_versioned(w, "gnc:GncVendor")?;
    guid_elem(w, "vendor:guid", record.id.as_guid())?;
    text_elem(w, "vendor:name", &record.name)?;
    text_elem(w, "vendor:id", &record.number)?;
    address_elem(w, "vendor:addr", &record.address)?;
    opt_text_elem(w, "vendor:notes", &record.notes)?;
    if let Some(terms) = record.terms {
        guid_elem(w, "vendor:terms", terms.as_guid())?;
    }
    flag_elem(w, "vendor:taxincluded", record.tax_included)?;
    flag_elem(w, "vendor:active", record.active)?;
    currency_elem(w, "vendor:currency", &record.currency)?;
    if let Some(tax_table) = record.tax_table {
        guid_elem(w, "vendor:taxtable", tax_table.as_guid())?;
    }
    slots_elem(w, "vendor:slots", &record.slots)?;
    end(w, "gnc:GncVendor")
}

fn write_job(w: &mut W, record: &JobRecord) -> BookResult<()> {
    start_versioned(w, "gnc:GncJob")?;
    guid_elem(w, "job:guid", record.id.as_guid())?;
    text_elem(w, "job:name", &record.name)?;
    text_elem(w, "job:id", &record.number)?;
    opt_text_elem(w, "job:reference", &record.reference)?;
    owner_elem(w, "job:owner", &record.owner)?;
    flag_elem(w, "job:active", record.active)?;
    end(w, "gnc:GncJob")
}

fn write_invoice(w: &mut W, record: &InvoiceRecord) -> BookResult<()> {
    start_versioned(w, "gnc:GncInvoice")?;
    guid_elem(w, "invoice:guid", record.id.as_guid())?;
    text_elem(w, "invoice:id", &record.number)?;
    owner_elem(w, "invoice:owner", &record.owner)?;
    date_elem(w, "invoice:opened", record.date_opened)?;
    if let Some(posted) = record.date_posted {
        date_elem(w, "invoice:posted", posted)?;
    }
    if let Some(terms) = record.terms {
        guid_elem(w, "invoice:terms", terms.as_guid())?;
    }
    opt_text_elem(w, "invoice:billing_id", &record.billing_id)?;
    opt_text_elem(w, "invoice:notes", &record.notes)?;
    flag_elem(w, "invoice:active", record.active)?;
    if let Some(txn) = record.post_txn {
        guid_elem(w, "invoice:posttxn", txn.as_guid())?;
    }
    if let Some(lot) = record.post_lot {
        guid_elem(w, "invoice:postlot", lot.as_guid())?;
    }
    currency_elem(w, "invoice:currency", &record.currency)?;
    slots_elem(w, "invoice:slots", &record.slots)?;
    end(w, "gnc:GncInvoice")
}

fn write_entry(w: &mut W, invoice: InvoiceId, record: &InvoiceEntryRecord) -> BookResult<()> {
    start_versioned(w, "gnc:GncEntry")?;
    guid_elem(w, "entry:guid", record.id.as_guid())?;
    date_elem(w, "entry:date", record.date)?;
    opt_text_elem(w, "entry:description", &record.description)?;
    opt_text_elem(w, "entry:action", &record.action)?;
    text_elem(w, "entry:qty", &record.quantity.to_string())?;
    guid_elem(w, "entry:invoice", invoice.as_guid())?;
    text_elem(w, "entry:i-price", &record.price.to_string())?;
    flag_elem(w, "entry:i-taxable", record.taxable)?;
    flag_elem(w, "entry:i-taxincluded", record.tax_included)?;
    if let Some(tax_table) = record.tax_table {
        guid_elem(w, "entry:i-taxtable", tax_table.as_guid())?;
    }
    end(w, "gnc:GncEntry")
}

fn write_tax_table(w: &mut W, record: &TaxTableRecord) -> BookResult<()> {
    start_versioned(w, "gnc:GncTaxTable")?;
    guid_elem(w, "taxtable:guid", record.id.as_guid())?;
    text_elem(w, "taxtable:name", &record.name)?;
    flag_elem(w, "taxtable:invisible", record.invisible)?;
    start(w, "taxtable:entries")?;
    for entry in &record.entries {
        start(w, "gnc:GncTaxTableEntry")?;
        guid_elem(w, "tte:acct", entry.account.as_guid())?;
        text_elem(w, "tte:amount", &entry.amount.to_string())?;
        text_elem(w, "tte:type", entry.kind.tag())?;
        end(w, "gnc:GncTaxTableEntry")?;
    }
    end(w, "taxtable:entries")?;
    end(w, "gnc:GncTaxTable")
}

fn write_bill_terms(w: &mut W, record: &BillTermsRecord) -> BookResult<()> {
    start_versioned(w, "gnc:GncBillTerm")?;
    guid_elem(w, "billterm:guid", record.id.as_guid())?;
    text_elem(w, "billterm:name", &record.name)?;
    opt_text_elem(w, "billterm:desc", &record.description)?;
    flag_elem(w, "billterm:invisible", record.invisible)?;
    if let Some(days) = record.due_days {
        text_elem(w, "billterm:due-days", &days.to_string())?;
    }
    if let Some(days) = record.discount_days {
        text_elem(w, "billterm:disc-days", &days.to_string())?;
    }
    if let Some(discount) = record.discount {
        text_elem(w, "billterm:discount", &discount.to_string())?;
    }
    end(w, "gnc:GncBillTerm")
}
