//! Peppol BIS Billing 3.0 pre-flight checks.
//!
//! The builder never refuses a document over these findings; batch callers
//! use them to report master-data gaps before the receiving access point
//! rejects the file.

use crate::core::*;

/// Check an export against the Peppol rules the builder cannot repair.
///
/// Returns an empty list when nothing was found.
pub fn validate_peppol(
    invoice: &Invoice,
    partner: &Party,
    company: &CompanyIdentity,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // PEPPOL-EN16931-R008: no empty mandatory values
    if invoice.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "invoice number must not be empty",
            "PEPPOL-EN16931-R008",
        ));
    }

    // BR-02: issue date
    if invoice.issue_date.is_none() {
        errors.push(ValidationError::with_rule(
            "issue_date",
            "issue date is required",
            "BR-02",
        ));
    }

    // BR-05: currency code must be ISO 4217
    if !is_known_currency_code(&invoice.currency_code) {
        errors.push(ValidationError::with_rule(
            "currency_code",
            format!("unknown currency code '{}'", invoice.currency_code),
            "BR-05",
        ));
    }

    check_party(&mut errors, &company.party, "seller", "PEPPOL-EN16931-R020", "BR-09");
    check_party(&mut errors, partner, "buyer", "PEPPOL-EN16931-R010", "BR-11");

    // BR-50: payee account must be a plausible IBAN when present
    if let Some(iban) = &company.iban {
        if !is_plausible_iban(iban) {
            errors.push(ValidationError::with_rule(
                "company.iban",
                format!("'{iban}' is not a valid IBAN"),
                "BR-50",
            ));
        }
    }

    errors
}

fn check_party(
    errors: &mut Vec<ValidationError>,
    party: &Party,
    role: &str,
    endpoint_rule: &str,
    country_rule: &str,
) {
    if party.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{role}.name"),
            format!("{role} name must not be empty"),
            "PEPPOL-EN16931-R008",
        ));
    }
    if party.vat_id.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errors.push(ValidationError::with_rule(
            format!("{role}.vat_id"),
            format!("{role} has no VAT number, EndpointID will be missing"),
            endpoint_rule,
        ));
    }
    if !is_known_country_code(&party.address.country_code) {
        errors.push(ValidationError::with_rule(
            format!("{role}.address.country_code"),
            format!("unknown country code '{}'", party.address.country_code),
            country_rule,
        ));
    }
}

/// Structural IBAN check: country prefix, check digits, length and the
/// ISO 13616 mod-97 checksum.
pub fn is_plausible_iban(iban: &str) -> bool {
    let compact: String = iban.chars().filter(|c| !c.is_whitespace()).collect();
    if !(15..=34).contains(&compact.len()) || !compact.is_ascii() {
        return false;
    }
    let (head, tail) = compact.split_at(4);
    let bytes = head.as_bytes();
    if !bytes[0].is_ascii_alphabetic()
        || !bytes[1].is_ascii_alphabetic()
        || !bytes[2].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
    {
        return false;
    }

    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            'a'..='z' => c as u32 - 'a' as u32 + 10,
            _ => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    remainder == 1
}
