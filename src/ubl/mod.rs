//! UBL 2.1 document generation for Peppol BIS Billing 3.0.
//!
//! [`build`] turns one canonical document plus its lines, tax and product
//! lookups, the company identity and an optional rendered PDF into a
//! self-contained UTF-8 XML byte buffer. The function is pure: identical
//! inputs give byte-identical output, and it can run on any thread.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use ubl_export::core::*;
//! use ubl_export::ubl;
//!
//! let invoice = InvoiceBuilder::new("INV/2025/001", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
//!     .totals(dec!(100), dec!(21), dec!(121))
//!     .build();
//! let partner = PartyBuilder::new("Client BV", AddressBuilder::new("NL").build()).build();
//! let company = CompanyIdentity {
//!     party: PartyBuilder::new("Exporter NV", AddressBuilder::new("BE").build()).build(),
//!     iban: None,
//! };
//! let lines = vec![LineBuilder::new(dec!(2), dec!(50)).tax(1).build()];
//! let taxes: TaxMap = HashMap::from([(1, Tax { id: 1, rate: dec!(21), name: "21%".into() })]);
//!
//! let xml = ubl::build(&invoice, &partner, &lines, &taxes, &ProductMap::new(), &company, None).unwrap();
//! assert!(xml.starts_with(b"<?xml"));
//! ```

mod attachment;
mod document;
pub(crate) mod xml_utils;

pub use attachment::PDF_DESCRIPTION;
pub use document::{PLACEHOLDER_LINE, build};

/// UBL 2.1 namespace URIs.
pub mod ubl_ns {
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    pub const CREDIT_NOTE: &str = "urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2";
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
}

/// Namespace of a UBL element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ns {
    /// Document namespace (Invoice-2 or CreditNote-2), bound as default.
    Document,
    /// CommonAggregateComponents-2, prefix `cac`.
    Cac,
    /// CommonBasicComponents-2, prefix `cbc`.
    Cbc,
}

impl Ns {
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::Document => None,
            Self::Cac => Some("cac"),
            Self::Cbc => Some("cbc"),
        }
    }
}

/// Namespace-qualified element name.
///
/// Every element carries its own namespace; nothing is registered globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QName {
    pub ns: Ns,
    pub local: &'static str,
}

impl QName {
    /// Serialized tag name (`cbc:ID`, or `Invoice` for the default namespace).
    pub fn tag(&self) -> String {
        match self.ns.prefix() {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.to_string(),
        }
    }
}

/// Element in the CommonAggregateComponents namespace.
pub const fn cac(local: &'static str) -> QName {
    QName { ns: Ns::Cac, local }
}

/// Element in the CommonBasicComponents namespace.
pub const fn cbc(local: &'static str) -> QName {
    QName { ns: Ns::Cbc, local }
}

/// Element in the document's own (default) namespace.
pub const fn doc(local: &'static str) -> QName {
    QName {
        ns: Ns::Document,
        local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_tags() {
        assert_eq!(cbc("ID").tag(), "cbc:ID");
        assert_eq!(cac("Party").tag(), "cac:Party");
        assert_eq!(doc("CreditNote").tag(), "CreditNote");
    }
}
