use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::countries::DEFAULT_COUNTRY;
use super::currencies::DEFAULT_CURRENCY;
use super::types::*;

/// Builder for export-ready documents.
///
/// ```
/// use ubl_export::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("INV/2025/001", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
///     .due_date(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap())
///     .payment_reference("+++090/9337/55493+++")
///     .totals(dec!(100), dec!(21), dec!(121))
///     .build();
///
/// assert_eq!(invoice.kind(), DocumentKind::Invoice);
/// assert_eq!(invoice.buyer_reference(), "+++090/9337/55493+++");
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceBuilder {
    number: String,
    record_id: Option<i64>,
    move_type: MoveType,
    issue_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    note: Option<String>,
    currency_code: String,
    payment_reference: Option<String>,
    reference: Option<String>,
    totals: DocumentTotals,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            record_id: None,
            move_type: MoveType::OutInvoice,
            issue_date: Some(issue_date),
            due_date: None,
            note: None,
            currency_code: DEFAULT_CURRENCY.to_string(),
            payment_reference: None,
            reference: None,
            totals: DocumentTotals::default(),
        }
    }

    pub fn record_id(mut self, id: i64) -> Self {
        self.record_id = Some(id);
        self
    }

    pub fn move_type(mut self, move_type: MoveType) -> Self {
        self.move_type = move_type;
        self
    }

    /// Shorthand for `move_type(MoveType::OutRefund)`.
    pub fn credit_note(self) -> Self {
        self.move_type(MoveType::OutRefund)
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = Some(reference.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Untaxed amount, tax amount and total as booked.
    pub fn totals(mut self, untaxed: Decimal, tax: Decimal, total: Decimal) -> Self {
        self.totals = DocumentTotals {
            untaxed,
            tax,
            total,
        };
        self
    }

    pub fn build(self) -> Invoice {
        Invoice {
            number: self.number,
            record_id: self.record_id,
            move_type: self.move_type,
            issue_date: self.issue_date,
            due_date: self.due_date,
            note: self.note,
            currency_code: self.currency_code,
            payment_reference: self.payment_reference,
            reference: self.reference,
            totals: self.totals,
        }
    }
}

/// Builder for [`Party`].
pub struct PartyBuilder {
    name: String,
    vat_id: Option<String>,
    registration_id: Option<String>,
    address: Address,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            vat_id: None,
            registration_id: None,
            address,
        }
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.vat_id = Some(id.into());
        self
    }

    pub fn registration_id(mut self, id: impl Into<String>) -> Self {
        self.registration_id = Some(id.into());
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            vat_id: self.vat_id,
            registration_id: self.registration_id,
            address: self.address,
        }
    }
}

/// Builder for [`Address`]. Only the country is required.
pub struct AddressBuilder {
    street: Option<String>,
    additional: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    country_code: String,
}

impl AddressBuilder {
    pub fn new(country_code: impl Into<String>) -> Self {
        let country_code = country_code.into();
        Self {
            street: None,
            additional: None,
            city: None,
            postal_code: None,
            country_code: if country_code.trim().is_empty() {
                DEFAULT_COUNTRY.to_string()
            } else {
                country_code
            },
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn additional(mut self, additional: impl Into<String>) -> Self {
        self.additional = Some(additional.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            additional: self.additional,
            city: self.city,
            postal_code: self.postal_code,
            country_code: self.country_code,
        }
    }
}

/// Builder for [`InvoiceLine`].
pub struct LineBuilder {
    quantity: Decimal,
    unit_price: Decimal,
    net_amount: Decimal,
    description: Option<String>,
    product_id: Option<i64>,
    tax_ids: Vec<i64>,
}

impl LineBuilder {
    /// New line; the net amount defaults to `quantity * unit_price`.
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            net_amount: quantity * unit_price,
            description: None,
            product_id: None,
            tax_ids: Vec::new(),
        }
    }

    /// Override the net amount (discounted lines).
    pub fn net_amount(mut self, amount: Decimal) -> Self {
        self.net_amount = amount;
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn product(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn tax(mut self, tax_id: i64) -> Self {
        self.tax_ids.push(tax_id);
        self
    }

    pub fn build(self) -> InvoiceLine {
        InvoiceLine {
            quantity: self.quantity,
            unit_price: self.unit_price,
            net_amount: self.net_amount,
            description: self.description,
            product_id: self.product_id,
            tax_ids: self.tax_ids,
        }
    }
}
