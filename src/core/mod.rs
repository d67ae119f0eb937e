//! Core document types, tax aggregation and identity resolution.
//!
//! This module holds the canonical accounting-document model every other
//! module works on, plus the pure domain logic (tax grouping, country and
//! currency defaults, document numbering) that does not touch XML.

mod builder;
pub mod countries;
pub mod currencies;
mod error;
mod numbering;
mod tax;
mod text;
mod types;

pub use builder::*;
pub use countries::{DEFAULT_COUNTRY, country_code_for_label, is_known_country_code, resolve_country};
pub use currencies::{DEFAULT_CURRENCY, currency_for_country, is_known_currency_code, resolve_currency};
pub use error::*;
pub use numbering::*;
pub use tax::*;
pub use text::strip_markup;
pub use types::*;
