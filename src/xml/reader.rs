//! XML book reader
//!
//! Parses the whole document into a lightweight element tree first, then
//! maps known elements onto records. Anything structurally wrong surfaces
//! as a parse error before a `Book` is handed out; unknown elements inside
//! known entities are skipped, while slot payloads are kept verbatim.

use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::book::Book;
use crate::error::{BookError, BookResult};
use crate::models::{
    AccountId, AccountRecord, AccountType, Address, BillTermsRecord, CustomerRecord, EntryId,
    FixedPoint, Guid, InvoiceEntryRecord, InvoiceId, InvoiceRecord, JobRecord, LotId, OwnerKind,
    OwnerRef, Slot, SlotValue, SplitId, SplitRecord, TaxAmountKind, TaxTableEntryRecord,
    TaxTableRecord, TransactionId, TransactionRecord, VendorRecord,
};

/// Timestamp layout used throughout the file
pub(crate) const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// A parsed XML element with its attributes, text, and children
#[derive(Debug, Default)]
pub(crate) struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    pub fn require_child(&self, name: &str) -> BookResult<&Element> {
        self.child(name).ok_or_else(|| BookError::Parse {
            element: self.name.clone(),
            detail: format!("missing <{}>", name),
        })
    }

    pub fn require_text(&self, name: &str) -> BookResult<&str> {
        Ok(self.require_child(name)?.text.as_str())
    }

    fn parse_error(&self, detail: impl Into<String>) -> BookError {
        BookError::Parse {
            element: self.name.clone(),
            detail: detail.into(),
        }
    }
}

/// Read the whole document into an element tree
pub(crate) fn parse_document(input: &str) -> BookResult<Element> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_open(&start)?);
            }
            Event::Empty(start) => {
                let elem = element_open(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(elem),
                    None => return Ok(elem),
                }
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                let elem = match stack.pop() {
                    Some(elem) => elem,
                    None => {
                        return Err(BookError::Xml("unbalanced closing tag".into()));
                    }
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(elem),
                    None => return Ok(elem),
                }
            }
            Event::Eof => {
                return Err(BookError::Xml("unexpected end of document".into()));
            }
            // Declaration, comments, processing instructions
            _ => {}
        }
    }
}

fn element_open(start: &quick_xml::events::BytesStart<'_>) -> BookResult<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| BookError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| BookError::Xml(e.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(Element {
        name,
        attrs,
        text: String::new(),
        children: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Element -> record mapping
// ---------------------------------------------------------------------------

/// Map a parsed document onto a book
pub(crate) fn book_from_document(root: &Element) -> BookResult<Book> {
    if root.name != "gnc-v2" {
        return Err(root.parse_error("expected <gnc-v2> document root"));
    }
    let book_el = root.require_child("gnc:book")?;

    let mut book = Book::new();
    // Entries arrive as top-level elements referencing their invoice, so
    // invoices get collected first and entries attached afterwards.
    let mut entries: Vec<(InvoiceId, InvoiceEntryRecord)> = Vec::new();

    for child in &book_el.children {
        match child.name.as_str() {
            "gnc:account" => inserted(child, book.insert_account(parse_account(child)?))?,
            "gnc:transaction" => {
                inserted(child, book.insert_transaction(parse_transaction(child)?))?
            }
            "gnc:GncCustomer" => inserted(child, book.insert_customer(parse_customer(child)?))?,
            "gnc:GncVendor" => inserted(child, book.insert_vendor(parse_vendor(child)?))?,
            "gnc:GncJob" => inserted(child, book.insert_job(parse_job(child)?))?,
            "gnc:GncInvoice" => inserted(child, book.insert_invoice(parse_invoice(child)?))?,
            "gnc:GncEntry" => entries.push(parse_entry(child)?),
            "gnc:GncTaxTable" => inserted(child, book.insert_tax_table(parse_tax_table(child)?))?,
            "gnc:GncBillTerm" => {
                inserted(child, book.insert_bill_terms(parse_bill_terms(child)?))?
            }
            // Count headers, commodities, prices, and anything newer than
            // this crate are skipped here.
            _ => {}
        }
    }

    for (invoice_id, entry) in entries {
        match book.invoice_mut(invoice_id) {
            Ok(invoice) => invoice.entries.push(entry),
            Err(_) => {
                return Err(BookError::Parse {
                    element: "gnc:GncEntry".into(),
                    detail: format!("entry references unknown invoice {}", invoice_id),
                })
            }
        }
    }

    Ok(book)
}

/// A GUID collision while loading is a document defect, so it surfaces as a
/// parse error naming the offending element.
fn inserted(el: &Element, result: BookResult<()>) -> BookResult<()> {
    result.map_err(|err| match err {
        BookError::Validation(detail) => el.parse_error(detail),
        other => other,
    })
}

fn parse_guid(el: &Element, name: &str) -> BookResult<Guid> {
    let text = el.require_text(name)?;
    Guid::parse(text).map_err(|_| el.parse_error(format!("invalid GUID in <{}>: {}", name, text)))
}

fn parse_opt_guid(el: &Element, name: &str) -> BookResult<Option<Guid>> {
    match el.child(name) {
        None => Ok(None),
        Some(child) => Guid::parse(&child.text)
            .map(Some)
            .map_err(|_| el.parse_error(format!("invalid GUID in <{}>: {}", name, child.text))),
    }
}

fn parse_numeric(el: &Element, name: &str) -> BookResult<FixedPoint> {
    let text = el.require_text(name)?;
    FixedPoint::parse(text)
        .map_err(|_| el.parse_error(format!("invalid number in <{}>: {}", name, text)))
}

fn parse_opt_numeric(el: &Element, name: &str) -> BookResult<Option<FixedPoint>> {
    match el.child(name) {
        None => Ok(None),
        Some(child) => FixedPoint::parse(&child.text)
            .map(Some)
            .map_err(|_| el.parse_error(format!("invalid number in <{}>: {}", name, child.text))),
    }
}

fn parse_flag(el: &Element, name: &str, default: bool) -> bool {
    match el.child_text(name) {
        Some("1") => true,
        Some("0") => false,
        _ => default,
    }
}

fn parse_timestamp(el: &Element, name: &str) -> BookResult<DateTime<Utc>> {
    let ts = el.require_child(name)?;
    let text = ts.require_text("ts:date")?;
    DateTime::parse_from_str(text, TS_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| el.parse_error(format!("invalid timestamp in <{}>: {}", name, text)))
}

fn parse_date(el: &Element, name: &str) -> BookResult<NaiveDate> {
    Ok(parse_timestamp(el, name)?.date_naive())
}

fn parse_opt_date(el: &Element, name: &str) -> BookResult<Option<NaiveDate>> {
    match el.child(name) {
        None => Ok(None),
        Some(_) => Ok(Some(parse_date(el, name)?)),
    }
}

fn parse_owner(el: &Element, name: &str) -> BookResult<OwnerRef> {
    let owner = el.require_child(name)?;
    let tag = owner.require_text("owner:type")?;
    let kind = OwnerKind::from_tag(tag)
        .ok_or_else(|| owner.parse_error(format!("unknown owner type: {}", tag)))?;
    let guid = parse_guid(owner, "owner:id")?;
    Ok(OwnerRef { kind, guid })
}

fn parse_address(el: &Element, name: &str) -> Address {
    let Some(addr) = el.child(name) else {
        return Address::default();
    };
    Address {
        name: addr.child_text("addr:name").unwrap_or_default().to_string(),
        line1: addr.child_text("addr:addr1").unwrap_or_default().to_string(),
        line2: addr.child_text("addr:addr2").unwrap_or_default().to_string(),
        line3: addr.child_text("addr:addr3").unwrap_or_default().to_string(),
        line4: addr.child_text("addr:addr4").unwrap_or_default().to_string(),
        phone: addr.child_text("addr:phone").unwrap_or_default().to_string(),
        fax: addr.child_text("addr:fax").unwrap_or_default().to_string(),
        email: addr.child_text("addr:email").unwrap_or_default().to_string(),
    }
}

fn parse_slots(el: &Element, name: &str) -> BookResult<Vec<Slot>> {
    match el.child(name) {
        None => Ok(Vec::new()),
        Some(slots) => slots.children_named("slot").map(parse_slot).collect(),
    }
}

fn parse_slot(el: &Element) -> BookResult<Slot> {
    let key = el.require_text("slot:key")?.to_string();
    let value_el = el.require_child("slot:value")?;
    let value_type = value_el.attr("type").unwrap_or("string");

    let value = match value_type {
        "string" => SlotValue::Text(value_el.text.clone()),
        "integer" => SlotValue::Integer(value_el.text.parse().map_err(|_| {
            el.parse_error(format!("invalid integer slot value: {}", value_el.text))
        })?),
        "numeric" => SlotValue::Numeric(FixedPoint::parse(&value_el.text).map_err(|_| {
            el.parse_error(format!("invalid numeric slot value: {}", value_el.text))
        })?),
        "guid" => SlotValue::Guid(Guid::parse(&value_el.text).map_err(|_| {
            el.parse_error(format!("invalid guid slot value: {}", value_el.text))
        })?),
        "frame" => SlotValue::Frame(
            value_el
                .children_named("slot")
                .map(parse_slot)
                .collect::<BookResult<Vec<_>>>()?,
        ),
        other => SlotValue::Other {
            value_type: other.to_string(),
            text: value_el.text.clone(),
        },
    };

    Ok(Slot { key, value })
}

fn parse_account(el: &Element) -> BookResult<AccountRecord> {
    let commodity = el
        .child("act:commodity")
        .and_then(|c| c.child_text("cmdty:id"))
        .unwrap_or_default()
        .to_string();
    let commodity_scu = match el.child_text("act:commodity-scu") {
        None => 100,
        Some(text) => text
            .parse()
            .map_err(|_| el.parse_error(format!("invalid commodity scu: {}", text)))?,
    };
    Ok(AccountRecord {
        id: AccountId::from(parse_guid(el, "act:id")?),
        name: el.require_text("act:name")?.to_string(),
        account_type: AccountType::from_tag(el.require_text("act:type")?),
        commodity,
        commodity_scu,
        parent: parse_opt_guid(el, "act:parent")?.map(AccountId::from),
        description: el.child_text("act:description").unwrap_or_default().to_string(),
        slots: parse_slots(el, "act:slots")?,
    })
}

fn parse_transaction(el: &Element) -> BookResult<TransactionRecord> {
    let splits = el
        .require_child("trn:splits")?
        .children_named("trn:split")
        .map(parse_split)
        .collect::<BookResult<Vec<_>>>()?;
    Ok(TransactionRecord {
        id: TransactionId::from(parse_guid(el, "trn:id")?),
        currency: el
            .child("trn:currency")
            .and_then(|c| c.child_text("cmdty:id"))
            .unwrap_or_default()
            .to_string(),
        date_posted: parse_date(el, "trn:date-posted")?,
        date_entered: parse_timestamp(el, "trn:date-entered")?,
        description: el.child_text("trn:description").unwrap_or_default().to_string(),
        number: el.child_text("trn:num").unwrap_or_default().to_string(),
        splits,
        slots: parse_slots(el, "trn:slots")?,
    })
}

fn parse_split(el: &Element) -> BookResult<SplitRecord> {
    Ok(SplitRecord {
        id: SplitId::from(parse_guid(el, "split:id")?),
        memo: el.child_text("split:memo").unwrap_or_default().to_string(),
        action: el.child_text("split:action").unwrap_or_default().to_string(),
        reconcile_state: el
            .child_text("split:reconciled-state")
            .and_then(|s| s.chars().next())
            .unwrap_or('n'),
        value: parse_numeric(el, "split:value")?,
        quantity: parse_numeric(el, "split:quantity")?,
        account: AccountId::from(parse_guid(el, "split:account")?),
        lot: parse_opt_guid(el, "split:lot")?.map(LotId::from),
    })
}

fn parse_customer(el: &Element) -> BookResult<CustomerRecord> {
    Ok(CustomerRecord {
        id: crate::models::CustomerId::from(parse_guid(el, "cust:guid")?),
        number: el.require_text("cust:id")?.to_string(),
        name: el.require_text("cust:name")?.to_string(),
        active: parse_flag(el, "cust:active", true),
        address: parse_address(el, "cust:addr"),
        shipping_address: parse_address(el, "cust:shipaddr"),
        discount: parse_opt_numeric(el, "cust:discount")?,
        credit: parse_opt_numeric(el, "cust:credit")?,
        currency: el
            .child("cust:currency")
            .and_then(|c| c.child_text("cmdty:id"))
            .unwrap_or_default()
            .to_string(),
        tax_table: parse_opt_guid(el, "cust:taxtable")?.map(Into::into),
        terms: parse_opt_guid(el, "cust:terms")?.map(Into::into),
        tax_included: parse_flag(el, "cust:taxincluded", false),
        notes: el.child_text("cust:notes").unwrap_or_default().to_string(),
        slots: parse_slots(el, "cust:slots")?,
    })
}

fn parse_vendor(el: &Element) -> BookResult<VendorRecord> {
    Ok(VendorRecord {
        id: crate::models::VendorId::from(parse_guid(el, "vendor:guid")?),
        number: el.require_text("vendor:id")?.to_string(),
        name: el.require_text("vendor:name")?.to_string(),
        active: parse_flag(el, "vendor:active", true),
        address: parse_address(el, "vendor:addr"),
        currency: el
            .child("vendor:currency")
            .and_then(|c| c.child_text("cmdty:id"))
            .unwrap_or_default()
            .to_string(),
        tax_table: parse_opt_guid(el, "vendor:taxtable")?.map(Into::into),
        terms: parse_opt_guid(el, "vendor:terms")?.map(Into::into),
        tax_included: parse_flag(el, "vendor:taxincluded", false),
        notes: el.child_text("vendor:notes").unwrap_or_default().to_string(),
        slots: parse_slots(el, "vendor:slots")?,
    })
}

fn parse_job(el: &Element) -> BookResult<JobRecord> {
    Ok(JobRecord {
        id: crate::models::JobId::from(parse_guid(el, "job:guid")?),
        number: el.require_text("job:id")?.to_string(),
        name: el.require_text("job:name")?.to_string(),
        active: parse_flag(el, "job:active", true),
        owner: parse_owner(el, "job:owner")?,
        reference: el.child_text("job:reference").unwrap_or_default().to_string(),
    })
}

fn parse_invoice(el: &Element) -> BookResult<InvoiceRecord> {
    Ok(InvoiceRecord {
        id: InvoiceId::from(parse_guid(el, "invoice:guid")?),
        number: el.require_text("invoice:id")?.to_string(),
        owner: parse_owner(el, "invoice:owner")?,
        date_opened: parse_date(el, "invoice:opened")?,
        date_posted: parse_opt_date(el, "invoice:posted")?,
        currency: el
            .child("invoice:currency")
            .and_then(|c| c.child_text("cmdty:id"))
            .unwrap_or_default()
            .to_string(),
        entries: Vec::new(),
        post_txn: parse_opt_guid(el, "invoice:posttxn")?.map(Into::into),
        post_lot: parse_opt_guid(el, "invoice:postlot")?.map(Into::into),
        terms: parse_opt_guid(el, "invoice:terms")?.map(Into::into),
        billing_id: el.child_text("invoice:billing_id").unwrap_or_default().to_string(),
        active: parse_flag(el, "invoice:active", true),
        notes: el.child_text("invoice:notes").unwrap_or_default().to_string(),
        slots: parse_slots(el, "invoice:slots")?,
    })
}

fn parse_entry(el: &Element) -> BookResult<(InvoiceId, InvoiceEntryRecord)> {
    let invoice = InvoiceId::from(parse_guid(el, "entry:invoice")?);
    let entry = InvoiceEntryRecord {
        id: EntryId::from(parse_guid(el, "entry:guid")?),
        date: parse_date(el, "entry:date")?,
        description: el.child_text("entry:description").unwrap_or_default().to_string(),
        action: el.child_text("entry:action").unwrap_or_default().to_string(),
        quantity: parse_numeric(el, "entry:qty")?,
        price: parse_numeric(el, "entry:i-price")?,
        taxable: parse_flag(el, "entry:i-taxable", false),
        tax_included: parse_flag(el, "entry:i-taxincluded", false),
        tax_table: parse_opt_guid(el, "entry:i-taxtable")?.map(Into::into),
    };
    Ok((invoice, entry))
}

fn parse_tax_table(el: &Element) -> BookResult<TaxTableRecord> {
    let entries = el
        .require_child("taxtable:entries")?
        .children_named("gnc:GncTaxTableEntry")
        .map(parse_tax_table_entry)
        .collect::<BookResult<Vec<_>>>()?;
    Ok(TaxTableRecord {
        id: crate::models::TaxTableId::from(parse_guid(el, "taxtable:guid")?),
        name: el.require_text("taxtable:name")?.to_string(),
        invisible: parse_flag(el, "taxtable:invisible", false),
        entries,
    })
}

fn parse_tax_table_entry(el: &Element) -> BookResult<TaxTableEntryRecord> {
    let tag = el.require_text("tte:type")?;
    let kind = TaxAmountKind::from_tag(tag)
        .ok_or_else(|| el.parse_error(format!("unknown tax amount type: {}", tag)))?;
    Ok(TaxTableEntryRecord {
        account: AccountId::from(parse_guid(el, "tte:acct")?),
        amount: parse_numeric(el, "tte:amount")?,
        kind,
    })
}

fn parse_bill_terms(el: &Element) -> BookResult<BillTermsRecord> {
    let parse_days = |name: &str| -> BookResult<Option<u32>> {
        match el.child_text(name) {
            None => Ok(None),
            Some(text) => text
                .parse()
                .map(Some)
                .map_err(|_| el.parse_error(format!("invalid day count in <{}>: {}", name, text))),
        }
    };
    Ok(BillTermsRecord {
        id: crate::models::TermsId::from(parse_guid(el, "billterm:guid")?),
        name: el.require_text("billterm:name")?.to_string(),
        description: el.child_text("billterm:desc").unwrap_or_default().to_string(),
        invisible: parse_flag(el, "billterm:invisible", false),
        due_days: parse_days("billterm:due-days")?,
        discount_days: parse_days("billterm:disc-days")?,
        discount: parse_opt_numeric(el, "billterm:discount")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_builds_tree() {
        let root = parse_document(
            r#"<?xml version="1.0"?>
            <top attr="v"><a>hello</a><b/><a>again</a></top>"#,
        )
        .unwrap();

        assert_eq!(root.name, "top");
        assert_eq!(root.attr("attr"), Some("v"));
        assert_eq!(root.children_named("a").count(), 2);
        assert_eq!(root.child_text("a"), Some("hello"));
        assert!(root.child("b").unwrap().children.is_empty());
    }

    #[test]
    fn test_unbalanced_document_is_xml_error() {
        let err = parse_document("<top><a></top>").unwrap_err();
        assert!(matches!(err, BookError::Xml(_)));
    }

    #[test]
    fn test_truncated_document_is_xml_error() {
        let err = parse_document("<top><a>").unwrap_err();
        assert!(matches!(err, BookError::Xml(_)));
    }

    #[test]
    fn test_missing_root_is_parse_error() {
        let root = parse_document("<not-a-book/>").unwrap();
        let err = book_from_document(&root).unwrap_err();
        assert!(matches!(err, BookError::Parse { .. }));
    }

    #[test]
    fn test_missing_required_child_is_parse_error() {
        let root = parse_document(
            r#"<gnc-v2><gnc:book version="2.0.0">
                 <gnc:GncCustomer><cust:name>No guid</cust:name></gnc:GncCustomer>
               </gnc:book></gnc-v2>"#,
        )
        .unwrap();
        let err = book_from_document(&root).unwrap_err();
        assert!(matches!(err, BookError::Parse { .. }));
    }

    #[test]
    fn test_entry_with_unknown_invoice_is_parse_error() {
        let root = parse_document(
            r#"<gnc-v2><gnc:book version="2.0.0">
                 <gnc:GncEntry>
                   <entry:guid type="guid">0451db3338f14a66b562b5cbbe15a653</entry:guid>
                   <entry:date><ts:date>2024-03-01 00:00:00 +0000</ts:date></entry:date>
                   <entry:qty>1/1</entry:qty>
                   <entry:i-price>100/100</entry:i-price>
                   <entry:invoice type="guid">ffffffffffffffffffffffffffffffff</entry:invoice>
                 </gnc:GncEntry>
               </gnc:book></gnc-v2>"#,
        )
        .unwrap();
        let err = book_from_document(&root).unwrap_err();
        assert!(matches!(err, BookError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_guid_rejected() {
        let xml = r#"<gnc-v2><gnc:book version="2.0.0">
             <gnc:GncCustomer>
               <cust:guid type="guid">0451db3338f14a66b562b5cbbe15a653</cust:guid>
               <cust:id>000001</cust:id><cust:name>One</cust:name>
             </gnc:GncCustomer>
             <gnc:GncCustomer>
               <cust:guid type="guid">0451db3338f14a66b562b5cbbe15a653</cust:guid>
               <cust:id>000002</cust:id><cust:name>Two</cust:name>
             </gnc:GncCustomer>
           </gnc:book></gnc-v2>"#;
        let root = parse_document(xml).unwrap();
        let err = book_from_document(&root).unwrap_err();
        match err {
            BookError::Parse { element, detail } => {
                assert_eq!(element, "gnc:GncCustomer");
                assert!(detail.contains("0451db3338f14a66b562b5cbbe15a653"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_minimal_customer() {
        let root = parse_document(
            r#"<gnc-v2><gnc:book version="2.0.0">
                 <gnc:GncCustomer version="2.0.0">
                   <cust:guid type="guid">0451db3338f14a66b562b5cbbe15a653</cust:guid>
                   <cust:id>000001</cust:id>
                   <cust:name>Customatrix jr.</cust:name>
                   <cust:addr version="2.0.0">
                     <addr:name>Customatrix jr.</addr:name>
                     <addr:addr1>1 Main St</addr:addr1>
                   </cust:addr>
                   <cust:active>1</cust:active>
                   <cust:discount>0/1</cust:discount>
                 </gnc:GncCustomer>
               </gnc:book></gnc-v2>"#,
        )
        .unwrap();
        let book = book_from_document(&root).unwrap();

        let cust = book.customer_by_name("Customatrix jr.").unwrap();
        assert_eq!(cust.number(), "000001");
        assert_eq!(cust.record().address.line1, "1 Main St");
        assert_eq!(
            cust.record().discount,
            Some(FixedPoint::parse("0/1").unwrap())
        );
        assert!(cust.record().credit.is_none());
    }

    #[test]
    fn test_unknown_slot_type_preserved() {
        let root = parse_document(
            r#"<gnc-v2><gnc:book version="2.0.0">
                 <gnc:GncCustomer>
                   <cust:guid type="guid">0451db3338f14a66b562b5cbbe15a653</cust:guid>
                   <cust:id>000001</cust:id>
                   <cust:name>Slotted</cust:name>
                   <cust:slots>
                     <slot>
                       <slot:key>last-sync</slot:key>
                       <slot:value type="timespec">2024-01-01 00:00:00 +0000</slot:value>
                     </slot>
                   </cust:slots>
                 </gnc:GncCustomer>
               </gnc:book></gnc-v2>"#,
        )
        .unwrap();
        let book = book_from_document(&root).unwrap();
        let cust = book.customer_by_name("Slotted").unwrap();
        assert_eq!(
            cust.record().slots[0].value,
            SlotValue::Other {
                value_type: "timespec".into(),
                text: "2024-01-01 00:00:00 +0000".into(),
            }
        );
    }
}
