use rust_decimal::Decimal;

use super::attachment::write_pdf_reference;
use super::xml_utils::{XmlResult, XmlWriter, format_percent};
use super::{QName, cac, cbc, doc, ubl_ns};
use crate::core::*;
use crate::peppol::{PEPPOL_CUSTOMIZATION_ID, PEPPOL_PROFILE_ID, endpoint_scheme};

/// UNECE Rec 20 "one" (piece). The ERP line carries no unit of measure.
const UNIT_CODE: &str = "C62";

/// Description and item name of the synthetic line emitted for documents
/// without billable lines.
pub const PLACEHOLDER_LINE: &str = "No billable lines";

/// Element names that differ between Invoice and CreditNote documents.
struct Vocabulary {
    root: QName,
    namespace: &'static str,
    type_code: QName,
    line: QName,
    quantity: QName,
}

impl Vocabulary {
    fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Invoice => Self {
                root: doc("Invoice"),
                namespace: ubl_ns::INVOICE,
                type_code: cbc("InvoiceTypeCode"),
                line: cac("InvoiceLine"),
                quantity: cbc("InvoicedQuantity"),
            },
            DocumentKind::CreditNote => Self {
                root: doc("CreditNote"),
                namespace: ubl_ns::CREDIT_NOTE,
                type_code: cbc("CreditNoteTypeCode"),
                line: cac("CreditNoteLine"),
                quantity: cbc("CreditedQuantity"),
            },
        }
    }
}

/// Generate a Peppol BIS Billing 3.0 UBL document.
///
/// `lines` are the document's lines as booked; lines without quantity and
/// amount are dropped and the rest renumbered `1..N`. `taxes` and
/// `products` must contain every id the lines reference that should be
/// resolved; unknown ids are ignored. `pdf` is embedded as an
/// AdditionalDocumentReference when present and non-empty.
///
/// Fails only when a mandatory identifier cannot be produced: an empty
/// document number or a missing issue date.
pub fn build(
    invoice: &Invoice,
    partner: &Party,
    lines: &[InvoiceLine],
    taxes: &TaxMap,
    products: &ProductMap,
    company: &CompanyIdentity,
    pdf: Option<&[u8]>,
) -> Result<Vec<u8>, ExportError> {
    let number = invoice.number.trim();
    if number.is_empty() {
        return Err(ExportError::MissingIdentifier(format!(
            "document {} has no number",
            invoice
                .record_id
                .map_or_else(|| "<unknown>".to_string(), |id| id.to_string())
        )));
    }
    let issue_date = invoice.issue_date.ok_or_else(|| {
        ExportError::MissingIdentifier(format!("document {number} has no issue date"))
    })?;

    let home_country = resolve_country(Some(company.party.address.country_code.as_str()), DEFAULT_COUNTRY);
    let currency = resolve_currency(Some(invoice.currency_code.as_str()), &home_country);
    let kind = invoice.kind();
    let vocab = Vocabulary::for_kind(kind);
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        vocab.root,
        &[
            ("xmlns", vocab.namespace),
            ("xmlns:cac", ubl_ns::CAC),
            ("xmlns:cbc", ubl_ns::CBC),
        ],
    )?;

    // BT-24 / BT-23
    w.text_element(cbc("CustomizationID"), PEPPOL_CUSTOMIZATION_ID)?;
    w.text_element(cbc("ProfileID"), PEPPOL_PROFILE_ID)?;
    // BT-1
    w.text_element(cbc("ID"), number)?;
    // BT-2 / BT-9
    w.text_element(cbc("IssueDate"), &issue_date.to_string())?;
    // CreditNote carries BT-9 under PaymentMeans instead
    if let (Some(due), DocumentKind::Invoice) = (&invoice.due_date, kind) {
        w.text_element(cbc("DueDate"), &due.to_string())?;
    }
    // BT-3
    w.text_element(vocab.type_code, &kind.type_code().to_string())?;
    // BT-22
    if let Some(note) = invoice.note.as_deref().and_then(strip_markup) {
        w.text_element(cbc("Note"), &note)?;
    }
    // BT-5
    w.text_element(cbc("DocumentCurrencyCode"), &currency)?;
    // BT-10
    w.text_element(cbc("BuyerReference"), invoice.buyer_reference().trim())?;

    // BG-24
    write_pdf_reference(&mut w, number, pdf)?;

    // BG-4 / BG-7
    write_party(&mut w, &company.party, cac("AccountingSupplierParty"), true, &home_country)?;
    write_party(&mut w, partner, cac("AccountingCustomerParty"), false, &home_country)?;

    // BG-16
    write_payment_means(&mut w, invoice, kind, company)?;

    let retained: Vec<&InvoiceLine> = lines.iter().filter(|l| l.is_billable()).collect();

    // BG-23
    let buckets = aggregate_taxes(retained.iter().copied(), taxes, &invoice.totals)?;
    write_tax_total(&mut w, invoice.totals.tax, &buckets, &currency)?;

    // BG-22
    let totals = &invoice.totals;
    w.start_element(cac("LegalMonetaryTotal"))?;
    w.amount_element(cbc("LineExtensionAmount"), totals.untaxed, &currency)?;
    w.amount_element(cbc("TaxExclusiveAmount"), totals.untaxed, &currency)?;
    w.amount_element(cbc("TaxInclusiveAmount"), totals.total, &currency)?;
    w.amount_element(cbc("PayableAmount"), totals.total, &currency)?;
    w.end_element(cac("LegalMonetaryTotal"))?;

    // BG-25
    if retained.is_empty() {
        tracing::debug!(number, "no billable lines, emitting placeholder line");
        write_placeholder_line(&mut w, &vocab, &currency)?;
    } else {
        for (idx, line) in retained.iter().enumerate() {
            write_line(&mut w, &vocab, idx + 1, line, taxes, products, &currency)?;
        }
    }

    w.end_element(vocab.root)?;
    Ok(w.into_bytes())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn write_party(
    w: &mut XmlWriter,
    party: &Party,
    wrapper: QName,
    with_registry: bool,
    home_country: &str,
) -> XmlResult {
    let country = resolve_country(Some(party.address.country_code.as_str()), home_country);
    let vat_id = non_blank(party.vat_id.as_deref());

    w.start_element(wrapper)?;
    w.start_element(cac("Party"))?;

    // BT-34 / BT-49
    if let Some(vat) = vat_id {
        let scheme = endpoint_scheme(vat, &country);
        w.text_element_with_attrs(cbc("EndpointID"), vat, &[("schemeID", scheme.code)])?;
        w.start_element(cac("PartyIdentification"))?;
        w.text_element(cbc("ID"), vat)?;
        w.end_element(cac("PartyIdentification"))?;
    }

    w.start_element(cac("PartyName"))?;
    w.text_element(cbc("Name"), party.name.trim())?;
    w.end_element(cac("PartyName"))?;

    // BG-5 / BG-8
    let address = &party.address;
    w.start_element(cac("PostalAddress"))?;
    if let Some(street) = non_blank(address.street.as_deref()) {
        w.text_element(cbc("StreetName"), street)?;
    }
    if let Some(additional) = non_blank(address.additional.as_deref()) {
        w.text_element(cbc("AdditionalStreetName"), additional)?;
    }
    if let Some(city) = non_blank(address.city.as_deref()) {
        w.text_element(cbc("CityName"), city)?;
    }
    if let Some(zip) = non_blank(address.postal_code.as_deref()) {
        w.text_element(cbc("PostalZone"), zip)?;
    }
    w.start_element(cac("Country"))?;
    w.text_element(cbc("IdentificationCode"), &country)?;
    w.end_element(cac("Country"))?;
    w.end_element(cac("PostalAddress"))?;

    // BT-31 / BT-48
    if let Some(vat) = vat_id {
        w.start_element(cac("PartyTaxScheme"))?;
        w.text_element(cbc("CompanyID"), vat)?;
        write_vat_scheme(w)?;
        w.end_element(cac("PartyTaxScheme"))?;
    }

    // BT-27 / BT-44, BT-30
    w.start_element(cac("PartyLegalEntity"))?;
    w.text_element(cbc("RegistrationName"), party.name.trim())?;
    if with_registry {
        if let Some(registry) = non_blank(party.registration_id.as_deref()) {
            w.text_element(cbc("CompanyID"), registry)?;
        }
    }
    w.end_element(cac("PartyLegalEntity"))?;

    w.end_element(cac("Party"))?;
    w.end_element(wrapper)?;
    Ok(())
}

fn write_payment_means(
    w: &mut XmlWriter,
    invoice: &Invoice,
    kind: DocumentKind,
    company: &CompanyIdentity,
) -> XmlResult {
    let means = PaymentMeansCode::for_company(company);

    w.start_element(cac("PaymentMeans"))?;
    // BT-81
    w.text_element(cbc("PaymentMeansCode"), &means.code().to_string())?;
    // BT-9 on credit notes
    if let (Some(due), DocumentKind::CreditNote) = (&invoice.due_date, kind) {
        w.text_element(cbc("PaymentDueDate"), &due.to_string())?;
    }
    // BT-83
    if let Some(reference) = non_blank(invoice.payment_reference.as_deref()) {
        w.text_element(cbc("PaymentID"), reference)?;
    }
    // BG-17: BR-61 requires the account whenever code 30 is used
    if means == PaymentMeansCode::CreditTransfer {
        if let Some(iban) = non_blank(company.iban.as_deref()) {
            w.start_element(cac("PayeeFinancialAccount"))?;
            w.text_element(cbc("ID"), iban)?;
            w.end_element(cac("PayeeFinancialAccount"))?;
        }
    }
    w.end_element(cac("PaymentMeans"))?;
    Ok(())
}

fn write_tax_total(
    w: &mut XmlWriter,
    stated_tax: Decimal,
    buckets: &[TaxBucket],
    currency: &str,
) -> XmlResult {
    w.start_element(cac("TaxTotal"))?;
    // BT-110 is the booked total, not the sum of the recomputed subtotals
    w.amount_element(cbc("TaxAmount"), stated_tax, currency)?;
    for bucket in buckets {
        w.start_element(cac("TaxSubtotal"))?;
        w.amount_element(cbc("TaxableAmount"), bucket.taxable_amount, currency)?;
        w.amount_element(cbc("TaxAmount"), bucket.tax_amount, currency)?;
        write_tax_category(w, cac("TaxCategory"), bucket.category(), bucket.rate)?;
        w.end_element(cac("TaxSubtotal"))?;
    }
    w.end_element(cac("TaxTotal"))?;
    Ok(())
}

fn write_tax_category(
    w: &mut XmlWriter,
    wrapper: QName,
    category: TaxCategory,
    rate: Decimal,
) -> XmlResult {
    w.start_element(wrapper)?;
    w.text_element(cbc("ID"), category.code())?;
    w.text_element(cbc("Percent"), &format_percent(rate))?;
    write_vat_scheme(w)?;
    w.end_element(wrapper)?;
    Ok(())
}

fn write_vat_scheme(w: &mut XmlWriter) -> XmlResult {
    w.start_element(cac("TaxScheme"))?;
    w.text_element(cbc("ID"), "VAT")?;
    w.end_element(cac("TaxScheme"))?;
    Ok(())
}

fn write_line(
    w: &mut XmlWriter,
    vocab: &Vocabulary,
    position: usize,
    line: &InvoiceLine,
    taxes: &TaxMap,
    products: &ProductMap,
    currency: &str,
) -> XmlResult {
    let product = line.product_id.and_then(|id| products.get(&id));
    let description = non_blank(line.description.as_deref());
    let name = product
        .and_then(|p| non_blank(Some(p.name.as_str())))
        .or(description)
        .unwrap_or("Item");
    // BT-152: the first resolvable tax determines the line category
    let rate = line
        .tax_ids
        .iter()
        .find_map(|id| taxes.get(id))
        .map_or(Decimal::ZERO, |t| t.rate);

    w.start_element(vocab.line)?;
    w.text_element(cbc("ID"), &position.to_string())?;
    w.quantity_element(vocab.quantity, line.quantity, UNIT_CODE)?;
    w.amount_element(cbc("LineExtensionAmount"), line.net_amount, currency)?;

    w.start_element(cac("Item"))?;
    if let Some(desc) = description {
        w.text_element(cbc("Description"), desc)?;
    }
    w.text_element(cbc("Name"), name)?;
    if let Some(code) = product.and_then(|p| non_blank(p.default_code.as_deref())) {
        w.start_element(cac("SellersItemIdentification"))?;
        w.text_element(cbc("ID"), code)?;
        w.end_element(cac("SellersItemIdentification"))?;
    }
    write_tax_category(w, cac("ClassifiedTaxCategory"), TaxCategory::for_rate(rate), rate)?;
    w.end_element(cac("Item"))?;

    w.start_element(cac("Price"))?;
    w.price_element(cbc("PriceAmount"), line.unit_price, currency)?;
    w.end_element(cac("Price"))?;

    w.end_element(vocab.line)?;
    Ok(())
}

fn write_placeholder_line(w: &mut XmlWriter, vocab: &Vocabulary, currency: &str) -> XmlResult {
    w.start_element(vocab.line)?;
    w.text_element(cbc("ID"), "1")?;
    w.quantity_element(vocab.quantity, Decimal::ZERO, UNIT_CODE)?;
    w.amount_element(cbc("LineExtensionAmount"), Decimal::ZERO, currency)?;
    w.start_element(cac("Item"))?;
    w.text_element(cbc("Description"), PLACEHOLDER_LINE)?;
    w.text_element(cbc("Name"), PLACEHOLDER_LINE)?;
    write_tax_category(w, cac("ClassifiedTaxCategory"), TaxCategory::ZeroRated, Decimal::ZERO)?;
    w.end_element(cac("Item"))?;
    w.start_element(cac("Price"))?;
    w.price_element(cbc("PriceAmount"), Decimal::ZERO, currency)?;
    w.end_element(cac("Price"))?;
    w.end_element(vocab.line)?;
    Ok(())
}
