use std::borrow::Cow;

use super::config::ExportConfig;
use crate::core::{
    CompanyIdentity, EnrichmentError, ExportError, Invoice, InvoiceLine, MoveType, Party,
    ProductMap, TaxMap, resolve_country, resolve_document_number, ubl_filename,
};
use crate::ubl;

/// Supplies the rendered PDF for a document.
pub trait PdfSource {
    /// `Ok(None)` when no rendering exists.
    fn fetch_pdf(&self, invoice: &Invoice) -> Result<Option<Vec<u8>>, EnrichmentError>;
}

/// Never supplies a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPdf;

impl PdfSource for NoPdf {
    fn fetch_pdf(&self, _invoice: &Invoice) -> Result<Option<Vec<u8>>, EnrichmentError> {
        Ok(None)
    }
}

impl<F> PdfSource for F
where
    F: Fn(&Invoice) -> Result<Option<Vec<u8>>, EnrichmentError>,
{
    fn fetch_pdf(&self, invoice: &Invoice) -> Result<Option<Vec<u8>>, EnrichmentError> {
        self(invoice)
    }
}

/// One document with its counterparty and lines.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub invoice: Invoice,
    pub partner: Party,
    pub lines: Vec<InvoiceLine>,
}

/// A generated UBL file.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub number: String,
    pub move_type: MoveType,
    pub pdf_embedded: bool,
    pub content: Vec<u8>,
}

/// A document whose build failed.
#[derive(Debug)]
pub struct ExportFailure {
    pub number: String,
    pub record_id: Option<i64>,
    pub error: ExportError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<ExportedFile>,
    pub failures: Vec<ExportFailure>,
    /// Documents filtered out by configuration or lacking a number.
    pub skipped: usize,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Export a batch of documents.
///
/// A failing document never aborts the batch: build errors are collected in
/// [`BatchReport::failures`], PDF retrieval errors only drop the attachment.
///
/// When the company address carries no recognisable country,
/// [`ExportConfig::home_country`] is used as its jurisdiction.
pub fn export_batch<'a, I, P>(
    config: &ExportConfig,
    company: &CompanyIdentity,
    documents: I,
    taxes: &TaxMap,
    products: &ProductMap,
    pdf_source: &P,
) -> BatchReport
where
    I: IntoIterator<Item = &'a ExportDocument>,
    P: PdfSource + ?Sized,
{
    let mut report = BatchReport::default();
    let company = with_home_country(company, &config.home_country);

    for doc in documents {
        let source = &doc.invoice;
        if !config.accepts(source.move_type) {
            report.skipped += 1;
            continue;
        }

        let Some(number) = resolve_document_number(
            source.move_type,
            Some(source.number.as_str()),
            source.reference.as_deref(),
            source.record_id,
        ) else {
            tracing::warn!(
                record_id = source.record_id,
                move_type = source.move_type.tag(),
                "document has no number, skipped"
            );
            report.skipped += 1;
            continue;
        };

        let invoice: Cow<'_, Invoice> = if number == source.number {
            Cow::Borrowed(source)
        } else {
            let mut owned = source.clone();
            owned.number = number.clone();
            Cow::Owned(owned)
        };

        let pdf = if config.embed_pdf {
            match pdf_source.fetch_pdf(&invoice) {
                Ok(pdf) => pdf,
                Err(e) => {
                    tracing::warn!(number = %number, error = %e, "PDF retrieval failed, exporting without attachment");
                    None
                }
            }
        } else {
            None
        };

        match ubl::build(
            &invoice,
            &doc.partner,
            &doc.lines,
            taxes,
            products,
            &company,
            pdf.as_deref(),
        ) {
            Ok(content) => report.files.push(ExportedFile {
                filename: ubl_filename(&number, config.ubl_file_extension.as_str()),
                pdf_embedded: pdf.as_ref().is_some_and(|p| !p.is_empty()),
                number,
                move_type: invoice.move_type,
                content,
            }),
            Err(error) => {
                tracing::error!(number = %number, error = %error, "UBL export failed");
                report.failures.push(ExportFailure {
                    number,
                    record_id: invoice.record_id,
                    error,
                });
            }
        }
    }

    tracing::info!(
        exported = report.files.len(),
        failed = report.failures.len(),
        skipped = report.skipped,
        "UBL export finished"
    );
    report
}

fn with_home_country<'c>(company: &'c CompanyIdentity, home_country: &str) -> Cow<'c, CompanyIdentity> {
    let declared = company.party.address.country_code.as_str();
    let country = resolve_country(Some(declared), home_country);
    if country == declared {
        return Cow::Borrowed(company);
    }
    tracing::debug!(declared, country = %country, "company country resolved against home jurisdiction");
    let mut owned = company.clone();
    owned.party.address.country_code = country;
    Cow::Owned(owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AddressBuilder, InvoiceBuilder, LineBuilder, PartyBuilder};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn company() -> CompanyIdentity {
        CompanyIdentity {
            party: PartyBuilder::new("Seller NV", AddressBuilder::new("BE").build())
                .vat_id("BE0123456789")
                .build(),
            iban: None,
        }
    }

    fn doc(number: &str, move_type: MoveType) -> ExportDocument {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        ExportDocument {
            invoice: InvoiceBuilder::new(number, date)
                .record_id(7)
                .move_type(move_type)
                .totals(dec!(10), dec!(0), dec!(10))
                .build(),
            partner: PartyBuilder::new("Buyer", AddressBuilder::new("BE").build()).build(),
            lines: vec![LineBuilder::new(dec!(1), dec!(10)).description("Thing").build()],
        }
    }

    #[test]
    fn filters_and_skips() {
        let config = ExportConfig::default();
        let docs = [
            doc("INV/1", MoveType::OutInvoice),
            doc("/", MoveType::OutInvoice),
            doc("/", MoveType::InInvoice),
        ];
        let report = export_batch(
            &config,
            &company(),
            &docs,
            &TaxMap::new(),
            &ProductMap::new(),
            &NoPdf,
        );
        assert_eq!(report.skipped, 1);
        assert!(report.is_clean());
        let names: Vec<_> = report.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, ["INV-1.xml", "BILL-7.xml"]);
    }

    #[test]
    fn pdf_errors_do_not_fail_documents() {
        let failing = |_: &Invoice| -> Result<Option<Vec<u8>>, EnrichmentError> {
            Err(EnrichmentError::Failed("renderer down".into()))
        };
        let report = export_batch(
            &ExportConfig::default(),
            &company(),
            &[doc("INV/2", MoveType::OutInvoice)],
            &TaxMap::new(),
            &ProductMap::new(),
            &failing,
        );
        assert_eq!(report.files.len(), 1);
        assert!(!report.files[0].pdf_embedded);
    }

    #[test]
    fn home_country_fills_unknown_company_country() {
        let mut foreign = company();
        foreign.party.address.country_code = "XX".into();
        let resolved = with_home_country(&foreign, "NL");
        assert_eq!(resolved.party.address.country_code, "NL");

        let known = company();
        assert!(matches!(with_home_country(&known, "NL"), Cow::Borrowed(_)));
    }
}
