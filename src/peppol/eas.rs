//! Electronic Address Scheme (EAS) codes for Peppol EndpointID.

use serde::Serialize;

/// EAS code for a VAT-number based Peppol participant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EasScheme {
    /// The numeric scheme code (e.g. "9925").
    pub code: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl EasScheme {
    /// Belgian VAT number.
    pub const BE_VAT: Self = Self {
        code: "9925",
        description: "Belgian VAT number",
    };
    /// Dutch VAT number.
    pub const NL_VAT: Self = Self {
        code: "9944",
        description: "Dutch VAT number",
    };
    /// German VAT number.
    pub const DE_VAT: Self = Self {
        code: "9930",
        description: "German VAT number",
    };
    /// French VAT number.
    pub const FR_VAT: Self = Self {
        code: "9957",
        description: "French VAT number",
    };
    /// Luxembourg VAT number.
    pub const LU_VAT: Self = Self {
        code: "9945",
        description: "Luxembourg VAT number",
    };
}

/// VAT scheme for a jurisdiction. Unrecognized jurisdictions get the
/// Belgian scheme, the exporter's home default.
pub fn vat_scheme_for_country(country_code: &str) -> EasScheme {
    match country_code.trim().to_uppercase().as_str() {
        "NL" => EasScheme::NL_VAT,
        "DE" => EasScheme::DE_VAT,
        "FR" => EasScheme::FR_VAT,
        "LU" => EasScheme::LU_VAT,
        _ => EasScheme::BE_VAT,
    }
}

/// Jurisdiction a VAT number belongs to: its two-letter prefix when it has
/// one ("NL859..." → "NL"), otherwise the party's country.
pub fn vat_jurisdiction<'a>(vat_id: &'a str, country_code: &'a str) -> &'a str {
    let vat = vat_id.trim();
    match vat.get(..2) {
        Some(prefix) if prefix.chars().all(|c| c.is_ascii_alphabetic()) => prefix,
        _ => country_code,
    }
}

/// EndpointID scheme for a party's VAT number.
pub fn endpoint_scheme(vat_id: &str, country_code: &str) -> EasScheme {
    vat_scheme_for_country(vat_jurisdiction(vat_id, country_code))
}
