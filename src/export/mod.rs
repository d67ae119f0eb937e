//! Batch export of accounting documents to UBL files.
//!
//! Selects documents by direction and kind, resolves their export number,
//! optionally embeds the rendered PDF and collects per-document failures
//! without aborting the batch.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use ubl_export::core::*;
//! use ubl_export::export::{ExportConfig, ExportDocument, NoPdf, export_batch};
//!
//! let company = CompanyIdentity {
//!     party: PartyBuilder::new("Seller NV", AddressBuilder::new("BE").build())
//!         .vat_id("BE0123456789")
//!         .build(),
//!     iban: Some("BE68539007547034".into()),
//! };
//! let doc = ExportDocument {
//!     invoice: InvoiceBuilder::new("INV/2025/001", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
//!         .totals(dec!(100), dec!(21), dec!(121))
//!         .build(),
//!     partner: PartyBuilder::new("Client BV", AddressBuilder::new("NL").build()).build(),
//!     lines: vec![LineBuilder::new(dec!(2), dec!(50)).description("Consulting").build()],
//! };
//!
//! let report = export_batch(
//!     &ExportConfig::default(),
//!     &company,
//!     [&doc],
//!     &TaxMap::new(),
//!     &ProductMap::new(),
//!     &NoPdf,
//! );
//! assert_eq!(report.files[0].filename, "INV-2025-001.xml");
//! ```

mod batch;
mod config;

pub use batch::{
    BatchReport, ExportDocument, ExportFailure, ExportedFile, NoPdf, PdfSource, export_batch,
};
pub use config::{Direction, DocumentFilter, ExportConfig, UblExtension};
