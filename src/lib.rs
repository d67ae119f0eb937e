//! # ubl-export
//!
//! Peppol BIS Billing 3.0 export for ERP accounting documents: customer
//! invoices, credit notes and vendor bills rendered as UBL 2.1 XML, with
//! optional embedded PDF rendering.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use ubl_export::core::*;
//!
//! let invoice = InvoiceBuilder::new("INV/2025/001", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
//!     .totals(dec!(100), dec!(21), dec!(121))
//!     .build();
//! let line = LineBuilder::new(dec!(2), dec!(50)).description("Consulting").tax(1).build();
//! let taxes = TaxMap::from([(1, Tax { id: 1, rate: dec!(21), name: "VAT 21%".into() })]);
//!
//! let buckets = aggregate_taxes([&line], &taxes, &invoice.totals).unwrap();
//! assert_eq!(buckets[0].tax_amount, dec!(21.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Canonical document model, tax aggregation, numbering, Peppol checks |
//! | `ubl` (default) | UBL 2.1 Invoice / CreditNote generation |
//! | `adapter` (default) | JSON ERP record adapter |
//! | `export` (default) | Batch export with configuration and PDF enrichment |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod peppol;

#[cfg(feature = "ubl")]
pub mod ubl;

#[cfg(feature = "adapter")]
pub mod adapter;

#[cfg(feature = "export")]
pub mod export;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
