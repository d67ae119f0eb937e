use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax records keyed by ERP tax id.
pub type TaxMap = HashMap<i64, Tax>;

/// Product records keyed by ERP product id.
pub type ProductMap = HashMap<i64, Product>;

/// An accounting document ready for export (invoice or credit note).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Display number (BT-1). For vendor bills this is the vendor's own
    /// reference once [`resolve_document_number`](crate::core::resolve_document_number) ran.
    pub number: String,
    /// Internal ERP record key.
    pub record_id: Option<i64>,
    /// ERP move-type tag.
    pub move_type: MoveType,
    /// BT-2: Issue date. `None` only for incomplete drafts; the builder rejects it.
    pub issue_date: Option<NaiveDate>,
    /// BT-9: Payment due date.
    pub due_date: Option<NaiveDate>,
    /// BT-22: Free-text note, may contain markup.
    pub note: Option<String>,
    /// BT-5: Document currency (ISO 4217).
    pub currency_code: String,
    /// BT-83: Payment reference (structured communication).
    pub payment_reference: Option<String>,
    /// Free-text reference; the vendor's invoice number on vendor bills.
    pub reference: Option<String>,
    /// Document totals as stated by the ERP.
    pub totals: DocumentTotals,
}

impl Invoice {
    /// Invoice or credit note, derived from the move type.
    pub fn kind(&self) -> DocumentKind {
        self.move_type.kind()
    }

    /// BT-10 buyer reference: payment reference, then free-text reference,
    /// then the document number.
    pub fn buyer_reference(&self) -> &str {
        non_blank(self.payment_reference.as_deref())
            .or_else(|| non_blank(self.reference.as_deref()))
            .unwrap_or(&self.number)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// Monetary totals of a document (all signed, presented with 2 decimals).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// BT-109: Total without VAT.
    pub untaxed: Decimal,
    /// BT-110: Total VAT.
    pub tax: Decimal,
    /// BT-112: Total with VAT.
    pub total: Decimal,
}

/// ERP move-type tag of an accounting document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    /// Customer invoice.
    OutInvoice,
    /// Customer credit note.
    OutRefund,
    /// Vendor bill.
    InInvoice,
    /// Vendor credit note.
    InRefund,
}

impl MoveType {
    /// All exportable move types.
    pub const ALL: [MoveType; 4] = [
        Self::OutInvoice,
        Self::OutRefund,
        Self::InInvoice,
        Self::InRefund,
    ];

    /// ERP tag string.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::OutInvoice => "out_invoice",
            Self::OutRefund => "out_refund",
            Self::InInvoice => "in_invoice",
            Self::InRefund => "in_refund",
        }
    }

    /// Parse from the ERP tag string.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "out_invoice" => Some(Self::OutInvoice),
            "out_refund" => Some(Self::OutRefund),
            "in_invoice" => Some(Self::InInvoice),
            "in_refund" => Some(Self::InRefund),
            _ => None,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::OutInvoice | Self::InInvoice => DocumentKind::Invoice,
            Self::OutRefund | Self::InRefund => DocumentKind::CreditNote,
        }
    }

    /// Incoming document (vendor bill or vendor credit note).
    pub fn is_vendor_bill(&self) -> bool {
        matches!(self, Self::InInvoice | Self::InRefund)
    }
}

/// UBL document kind. Drives root element, namespace and type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Invoice,
    CreditNote,
}

impl DocumentKind {
    /// UNTDID 1001 type code: 380 commercial invoice, 381 credit note.
    pub fn type_code(&self) -> u16 {
        match self {
            Self::Invoice => 380,
            Self::CreditNote => 381,
        }
    }
}

/// Trading party (exporting company or trading partner).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Party {
    /// BT-27 / BT-44: Name.
    pub name: String,
    /// BT-31 / BT-48: VAT identifier (e.g. "BE0123456789").
    pub vat_id: Option<String>,
    /// BT-30: Company registry number (emitted for the supplier only).
    pub registration_id: Option<String>,
    /// BG-5 / BG-8: Postal address.
    pub address: Address,
}

/// Postal address. Only the country is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    /// BT-35 / BT-50: Street.
    pub street: Option<String>,
    /// BT-36 / BT-51: Additional address line.
    pub additional: Option<String>,
    /// BT-37 / BT-52: City.
    pub city: Option<String>,
    /// BT-38 / BT-53: Postal code.
    pub postal_code: Option<String>,
    /// BT-40 / BT-55: Country code (ISO 3166-1 alpha-2), always resolved.
    pub country_code: String,
}

/// The exporting company: its party identity plus its bank account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyIdentity {
    pub party: Party,
    /// BT-84: IBAN of the payee account.
    pub iban: Option<String>,
}

/// Invoice line as delivered by the ERP.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// BT-129: Quantity.
    pub quantity: Decimal,
    /// BT-146: Net unit price.
    pub unit_price: Decimal,
    /// BT-131: Line net amount.
    pub net_amount: Decimal,
    /// BT-154: Free-text description.
    pub description: Option<String>,
    /// Linked product id, resolved through a [`ProductMap`].
    pub product_id: Option<i64>,
    /// Applicable tax ids, resolved through a [`TaxMap`].
    pub tax_ids: Vec<i64>,
}

impl InvoiceLine {
    /// Section headers and notes carry neither quantity nor amount.
    pub fn is_billable(&self) -> bool {
        !(self.quantity.is_zero() && self.net_amount.is_zero())
    }
}

/// Tax record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub id: i64,
    /// Percentage rate (21 for 21 %).
    pub rate: Decimal,
    pub name: String,
}

/// Product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// BT-155: Seller's item code.
    pub default_code: Option<String>,
}

/// UNTDID 5305 tax category codes emitted by this crate.
///
/// Exempt ("E") is not distinguished from zero-rated: the ERP tax record
/// carries no flag telling them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxCategory {
    /// S: Standard rate.
    StandardRate,
    /// Z: Zero rated.
    ZeroRated,
}

impl TaxCategory {
    /// Category for a percentage rate: positive → S, otherwise Z.
    pub fn for_rate(rate: Decimal) -> Self {
        if rate > Decimal::ZERO {
            Self::StandardRate
        } else {
            Self::ZeroRated
        }
    }

    /// UNTDID 5305 code letter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StandardRate => "S",
            Self::ZeroRated => "Z",
        }
    }
}

/// UNTDID 4461 payment means codes emitted by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMeansCode {
    /// 1: Instrument not defined.
    NotDefined,
    /// 30: Credit transfer. Requires a payee account (BR-61).
    CreditTransfer,
}

impl PaymentMeansCode {
    /// Credit transfer when the company has an IBAN on file, otherwise
    /// "not defined".
    pub fn for_company(company: &CompanyIdentity) -> Self {
        match company.iban.as_deref() {
            Some(iban) if !iban.trim().is_empty() => Self::CreditTransfer,
            _ => Self::NotDefined,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::NotDefined => 1,
            Self::CreditTransfer => 30,
        }
    }
}
