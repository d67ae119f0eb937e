//! ERP record adapter.
//!
//! Maps loosely-typed JSON records (as returned by an ERP's RPC layer) onto
//! the canonical [`core`](crate::core) types. Nothing here fails: missing
//! fields become defaults and every fallback is logged at `debug` level.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use ubl_export::adapter::{RawRecord, adapt_invoice, adapt_partner};
//!
//! let move_record = RawRecord::from_value(json!({
//!     "id": 42,
//!     "name": "INV/2025/001",
//!     "move_type": "out_invoice",
//!     "invoice_date": "2025-01-15",
//!     "currency_id": [1, "EUR"],
//!     "amount_untaxed": 100.0,
//!     "amount_tax": 21.0,
//!     "amount_total": 121.0
//! }));
//! let invoice = adapt_invoice(&move_record, "BE");
//! assert_eq!(invoice.number, "INV/2025/001");
//! assert_eq!(invoice.currency_code, "EUR");
//!
//! let partner = adapt_partner(&RawRecord::from_value(json!({
//!     "name": "Client BV",
//!     "country_id": [165, "Netherlands"]
//! })), "BE");
//! assert_eq!(partner.address.country_code, "NL");
//! ```

mod record;
mod relation;

pub use record::RawRecord;
pub use relation::Relation;

use rust_decimal::Decimal;

use crate::core::{
    Address, CompanyIdentity, DocumentTotals, Invoice, InvoiceLine, MoveType, Party, Product,
    ProductMap, Tax, TaxMap, resolve_country, resolve_currency, resolve_document_number,
    strip_markup,
};

/// Adapt an `account.move`-shaped record.
///
/// `home_country` is the exporting company's jurisdiction; it decides the
/// fallback currency when the record carries none.
pub fn adapt_invoice(record: &RawRecord, home_country: &str) -> Invoice {
    let record_id = record.id("id");

    let move_type = match record.text("move_type") {
        Some(tag) => MoveType::from_tag(&tag).unwrap_or_else(|| {
            tracing::debug!(record_id, tag = %tag, "unknown move type, adapting as out_invoice");
            MoveType::OutInvoice
        }),
        None => {
            tracing::debug!(record_id, "no move type, adapting as out_invoice");
            MoveType::OutInvoice
        }
    };

    let issue_date = record.date("invoice_date").or_else(|| {
        let date = record.date("date");
        if date.is_some() {
            tracing::debug!(record_id, "invoice_date unset, using accounting date");
        }
        date
    });

    let currency_relation = record.relation("currency_id");
    let currency_code = resolve_currency(currency_relation.label(), home_country);
    if currency_relation.label().is_none() {
        tracing::debug!(record_id, currency = %currency_code, "currency label missing, using fallback");
    }

    let name = record.text("name");
    let reference = record.text("ref");
    let number = resolve_document_number(move_type, name.as_deref(), reference.as_deref(), record_id)
        .unwrap_or_default();

    Invoice {
        number,
        record_id,
        move_type,
        issue_date,
        due_date: record.date("invoice_date_due"),
        note: record.text("narration"),
        currency_code,
        payment_reference: record.text("payment_reference"),
        reference,
        totals: DocumentTotals {
            untaxed: record.decimal("amount_untaxed"),
            tax: record.decimal("amount_tax"),
            total: record.decimal("amount_total"),
        },
    }
}

/// Adapt a `res.partner`-shaped record (customer or vendor).
pub fn adapt_partner(record: &RawRecord, home_country: &str) -> Party {
    let name = record.text("name").unwrap_or_else(|| {
        tracing::debug!(partner_id = record.id("id"), "partner without name");
        String::new()
    });
    Party {
        name,
        vat_id: record.text("vat"),
        registration_id: record.text("company_registry"),
        address: adapt_address(record, home_country),
    }
}

/// Adapt a `res.company`-shaped record into the supplier identity.
///
/// The IBAN is read from `iban`, then `acc_number`, then the display label
/// of the `bank_account_id` relation.
pub fn adapt_company(record: &RawRecord, home_country: &str) -> CompanyIdentity {
    let iban = record
        .text("iban")
        .or_else(|| record.text("acc_number"))
        .or_else(|| {
            record
                .relation("bank_account_id")
                .label()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
        });
    if iban.is_none() {
        tracing::debug!("company without bank account, payment means will be unspecified");
    }
    CompanyIdentity {
        party: adapt_partner(record, home_country),
        iban,
    }
}

fn adapt_address(record: &RawRecord, home_country: &str) -> Address {
    let country = record.relation("country_id");
    let country_code = resolve_country(country.label(), home_country);
    if country.label().is_none() {
        tracing::debug!(country = %country_code, "country label missing, using home jurisdiction");
    }
    Address {
        street: record.text("street"),
        additional: record.text("street2"),
        city: record.text("city"),
        postal_code: record.text("zip"),
        country_code,
    }
}

/// Adapt an `account.move.line`-shaped record.
///
/// The net amount is `price_subtotal`; when the field is absent it is
/// derived as quantity × unit price, or zero when that product overflows.
pub fn adapt_line(record: &RawRecord) -> InvoiceLine {
    let quantity = record.decimal("quantity");
    let unit_price = record.decimal("price_unit");
    let net_amount = if record.get("price_subtotal").is_some() {
        record.decimal("price_subtotal")
    } else {
        quantity.checked_mul(unit_price).unwrap_or_else(|| {
            tracing::debug!(%quantity, %unit_price, "line net amount overflows, using zero");
            Decimal::ZERO
        })
    };
    InvoiceLine {
        quantity,
        unit_price,
        net_amount,
        description: record.text("name").and_then(|d| strip_markup(&d)),
        product_id: record.id("product_id"),
        tax_ids: record.id_list("tax_ids"),
    }
}

/// Adapt an `account.tax`-shaped record. Records without an id are dropped.
pub fn adapt_tax(record: &RawRecord) -> Option<Tax> {
    let Some(id) = record.id("id") else {
        tracing::debug!("tax record without id ignored");
        return None;
    };
    Some(Tax {
        id,
        rate: record.decimal("amount"),
        name: record.text("name").unwrap_or_else(|| "VAT".to_string()),
    })
}

/// Adapt a `product.product`-shaped record. Records without an id are dropped.
pub fn adapt_product(record: &RawRecord) -> Option<Product> {
    let Some(id) = record.id("id") else {
        tracing::debug!("product record without id ignored");
        return None;
    };
    Some(Product {
        id,
        name: record.text("name").unwrap_or_default(),
        default_code: record.text("default_code"),
    })
}

pub fn tax_map<'a, I>(records: I) -> TaxMap
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records
        .into_iter()
        .filter_map(adapt_tax)
        .map(|t| (t.id, t))
        .collect()
}

pub fn product_map<'a, I>(records: I) -> ProductMap
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records
        .into_iter()
        .filter_map(adapt_product)
        .map(|p| (p.id, p))
        .collect()
}
