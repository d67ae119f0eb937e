//! Peppol BIS Billing 3.0 identifiers and pre-flight validation.
//!
//! Peppol BIS 3.0 is a CIUS of EN 16931 on top of UBL 2.1. This module
//! holds the profile constants, the Electronic Address Scheme selection for
//! EndpointID and the rule checks callers can run before sending.
//!
//! # Example
//!
//! ```
//! use ubl_export::peppol;
//!
//! assert_eq!(peppol::endpoint_scheme("NL859048890B01", "BE").code, "9944");
//! ```

mod eas;
mod validate;

pub use eas::{EasScheme, endpoint_scheme, vat_jurisdiction, vat_scheme_for_country};
pub use validate::{is_plausible_iban, validate_peppol};

/// Peppol BIS Billing 3.0 customization identifier (BT-24).
pub const PEPPOL_CUSTOMIZATION_ID: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0";

/// Peppol BIS Billing 3.0 profile identifier (BT-23).
pub const PEPPOL_PROFILE_ID: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";
