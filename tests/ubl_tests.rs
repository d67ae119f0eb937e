#![cfg(feature = "ubl")]

mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::*;
use rust_decimal_macros::dec;
use ubl_export::core::*;
use ubl_export::ubl;

fn build(invoice: &Invoice, partner: &Party, lines: &[InvoiceLine], company: &CompanyIdentity) -> Doc {
    let xml = ubl::build(invoice, partner, lines, &taxes(), &products(), company, None).unwrap();
    Doc::parse(&xml)
}

#[test]
fn reference_invoice_end_to_end() {
    let (invoice, lines) = reference_invoice();
    let xml = ubl::build(&invoice, &dutch_client(), &lines, &taxes(), &products(), &company(None), None)
        .unwrap();
    let text = String::from_utf8(xml.clone()).unwrap();
    assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));

    let doc = Doc::parse(&xml);
    assert_eq!(doc.root().name, "Invoice");
    assert_eq!(
        doc.root().attrs["xmlns"],
        "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
    );
    assert_eq!(doc.first("cbc:ID").text, "INV/2025/001");
    assert_eq!(doc.first("cbc:IssueDate").text, "2025-01-15");
    assert_eq!(doc.first("cbc:InvoiceTypeCode").text, "380");
    assert_eq!(doc.first("cbc:DocumentCurrencyCode").text, "EUR");
    assert_eq!(doc.first("cbc:BuyerReference").text, "INV/2025/001");

    let subtotals = doc.all("cac:TaxSubtotal");
    assert_eq!(subtotals.len(), 1);
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:TaxableAmount"), "100.00");
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:TaxAmount"), "21.00");
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:ID"), "S");
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:Percent"), "21.00");
    assert_eq!(doc.text_under("cac:TaxTotal", "cbc:TaxAmount"), "21.00");

    assert_eq!(doc.text_under("cac:LegalMonetaryTotal", "cbc:LineExtensionAmount"), "100.00");
    assert_eq!(doc.text_under("cac:LegalMonetaryTotal", "cbc:TaxExclusiveAmount"), "100.00");
    assert_eq!(doc.text_under("cac:LegalMonetaryTotal", "cbc:TaxInclusiveAmount"), "121.00");
    assert_eq!(doc.text_under("cac:LegalMonetaryTotal", "cbc:PayableAmount"), "121.00");

    assert_eq!(doc.all("cac:InvoiceLine").len(), 1);
    assert_eq!(doc.text_under("cac:InvoiceLine", "cbc:LineExtensionAmount"), "100.00");
    let qty = doc.first("cbc:InvoicedQuantity");
    assert_eq!(qty.text, "2");
    assert_eq!(qty.attrs["unitCode"], "C62");
    assert_eq!(doc.text_under("cac:Price", "cbc:PriceAmount"), "50.0000");
    assert_eq!(doc.first("cbc:PayableAmount").attrs["currencyID"], "EUR");
}

#[test]
fn credit_note_without_lines_gets_placeholder() {
    let invoice = InvoiceBuilder::new("RINV/2025/004", date(2025, 2, 1))
        .credit_note()
        .totals(dec!(0), dec!(0), dec!(0))
        .build();
    let section = LineBuilder::new(dec!(0), dec!(0)).description("Section").build();
    let doc = build(&invoice, &dutch_client(), &[section], &company(None));

    assert_eq!(doc.root().name, "CreditNote");
    assert_eq!(
        doc.root().attrs["xmlns"],
        "urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2"
    );
    assert_eq!(doc.first("cbc:CreditNoteTypeCode").text, "381");
    assert!(!doc.has("cac:InvoiceLine"));
    let lines = doc.all("cac:CreditNoteLine");
    assert_eq!(lines.len(), 1);
    assert_eq!(doc.text_under("cac:CreditNoteLine", "cbc:ID"), "1");
    assert_eq!(doc.first("cbc:CreditedQuantity").text, "0");
    assert_eq!(doc.text_under("cac:CreditNoteLine", "cbc:LineExtensionAmount"), "0.00");
    assert_eq!(doc.text_under("cac:CreditNoteLine", "cbc:Name"), ubl::PLACEHOLDER_LINE);
    assert_eq!(doc.text_under("cac:ClassifiedTaxCategory", "cbc:ID"), "Z");
    assert_eq!(doc.text_under("cac:ClassifiedTaxCategory", "cbc:Percent"), "0.00");
    assert_eq!(doc.text_under("cac:CreditNoteLine", "cbc:PriceAmount"), "0.0000");
}

#[test]
fn root_follows_kind_not_amount_sign() {
    let invoice = InvoiceBuilder::new("INV/NEG", date(2025, 1, 1))
        .totals(dec!(-10), dec!(0), dec!(-10))
        .build();
    let line = LineBuilder::new(dec!(-1), dec!(10)).build();
    let doc = build(&invoice, &dutch_client(), &[line], &company(None));
    assert_eq!(doc.root().name, "Invoice");
}

#[test]
fn top_level_element_order() {
    let (mut invoice, lines) = reference_invoice();
    invoice.due_date = Some(date(2025, 2, 14));
    invoice.note = Some("<p>Thanks</p>".into());
    let xml = ubl::build(
        &invoice,
        &dutch_client(),
        &lines,
        &taxes(),
        &products(),
        &company(Some("BE68539007547034")),
        Some(b"%PDF-1.4".as_slice()),
    )
    .unwrap();
    let doc = Doc::parse(&xml);
    assert_eq!(
        doc.child_names(0),
        [
            "cbc:CustomizationID",
            "cbc:ProfileID",
            "cbc:ID",
            "cbc:IssueDate",
            "cbc:DueDate",
            "cbc:InvoiceTypeCode",
            "cbc:Note",
            "cbc:DocumentCurrencyCode",
            "cbc:BuyerReference",
            "cac:AdditionalDocumentReference",
            "cac:AccountingSupplierParty",
            "cac:AccountingCustomerParty",
            "cac:PaymentMeans",
            "cac:TaxTotal",
            "cac:LegalMonetaryTotal",
            "cac:InvoiceLine",
        ]
    );
    assert_eq!(
        doc.first("cbc:CustomizationID").text,
        "urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0"
    );
    assert_eq!(doc.first("cbc:ProfileID").text, "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0");
}

#[test]
fn optional_header_elements_omitted() {
    let (invoice, lines) = reference_invoice();
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    assert!(!doc.has("cbc:DueDate"));
    assert!(!doc.has("cbc:Note"));
    assert!(!doc.has("cac:AdditionalDocumentReference"));
    assert!(!doc.has("cbc:PaymentID"));
}

#[test]
fn line_element_order() {
    let (invoice, _) = reference_invoice();
    let line = LineBuilder::new(dec!(2), dec!(50)).description("Advice").product(5).tax(1).build();
    let doc = build(&invoice, &dutch_client(), &[line], &company(None));
    let idx = doc.index_of("cac:InvoiceLine")[0];
    assert_eq!(
        doc.child_names(idx),
        ["cbc:ID", "cbc:InvoicedQuantity", "cbc:LineExtensionAmount", "cac:Item", "cac:Price"]
    );
    let item = doc.index_of("cac:Item")[0];
    assert_eq!(
        doc.child_names(item),
        [
            "cbc:Description",
            "cbc:Name",
            "cac:SellersItemIdentification",
            "cac:ClassifiedTaxCategory"
        ]
    );
    assert_eq!(doc.text_under("cac:Item", "cbc:Description"), "Advice");
    assert_eq!(doc.text_under("cac:Item", "cbc:Name"), "Consulting");
    assert_eq!(doc.text_under("cac:SellersItemIdentification", "cbc:ID"), "CONS-01");
}

#[test]
fn item_name_fallbacks() {
    let (invoice, _) = reference_invoice();
    let described = LineBuilder::new(dec!(1), dec!(10)).description("Widget").build();
    let bare = LineBuilder::new(dec!(1), dec!(10)).product(999).build();
    let doc = build(&invoice, &dutch_client(), &[described, bare], &company(None));
    let names: Vec<_> = doc
        .all("cbc:Name")
        .into_iter()
        .map(|e| e.text.as_str())
        .collect();
    assert!(names.ends_with(&["Widget", "Item"]));
    assert_eq!(doc.all("cbc:Description").len(), 1);
}

#[test]
fn filtered_lines_are_renumbered() {
    let (invoice, _) = reference_invoice();
    let lines = [
        LineBuilder::new(dec!(1), dec!(10)).description("A").tax(1).build(),
        LineBuilder::new(dec!(0), dec!(0)).description("Section").build(),
        LineBuilder::new(dec!(1), dec!(20)).description("B").tax(1).build(),
    ];
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    let ids: Vec<String> = doc
        .index_of("cac:InvoiceLine")
        .into_iter()
        .map(|i| doc.descendants(i)[0].text.clone())
        .collect();
    assert_eq!(ids, ["1", "2"]);
}

#[test]
fn same_rate_lines_share_a_subtotal() {
    let invoice = InvoiceBuilder::new("INV/2", date(2025, 1, 15))
        .totals(dec!(45.55), dec!(9.57), dec!(55.12))
        .build();
    let lines = [
        LineBuilder::new(dec!(1), dec!(12.345)).net_amount(dec!(12.35)).tax(1).build(),
        LineBuilder::new(dec!(1), dec!(33.2)).net_amount(dec!(33.20)).tax(1).build(),
    ];
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    assert_eq!(doc.all("cac:TaxSubtotal").len(), 1);
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:TaxableAmount"), "45.55");
    // 45.55 * 0.21 = 9.5655
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:TaxAmount"), "9.57");
}

#[test]
fn mixed_rates_in_discovery_order() {
    let invoice = InvoiceBuilder::new("INV/3", date(2025, 1, 15))
        .totals(dec!(300), dec!(27), dec!(327))
        .build();
    let lines = [
        LineBuilder::new(dec!(1), dec!(100)).tax(2).build(),
        LineBuilder::new(dec!(1), dec!(100)).tax(1).build(),
        LineBuilder::new(dec!(1), dec!(100)).tax(3).build(),
    ];
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    let idx = doc.index_of("cac:TaxSubtotal");
    assert_eq!(idx.len(), 3);
    let rates: Vec<String> = idx
        .iter()
        .map(|&i| {
            doc.descendants(i)
                .into_iter()
                .find(|e| e.name == "cbc:Percent")
                .unwrap()
                .text
                .clone()
        })
        .collect();
    assert_eq!(rates, ["6.00", "21.00", "0.00"]);
    let categories: Vec<String> = idx
        .iter()
        .map(|&i| {
            doc.descendants(i)
                .into_iter()
                .find(|e| e.name == "cbc:ID")
                .unwrap()
                .text
                .clone()
        })
        .collect();
    assert_eq!(categories, ["S", "S", "Z"]);
}

#[test]
fn untaxed_document_gets_implicit_subtotal() {
    let invoice = InvoiceBuilder::new("INV/4", date(2025, 1, 15))
        .totals(dec!(200), dec!(42), dec!(242))
        .build();
    let lines = [LineBuilder::new(dec!(2), dec!(100)).build()];
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    assert_eq!(doc.all("cac:TaxSubtotal").len(), 1);
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:TaxableAmount"), "200.00");
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:TaxAmount"), "42.00");
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:Percent"), "21.00");
    assert_eq!(doc.text_under("cac:TaxSubtotal", "cbc:ID"), "S");
    // line without resolvable tax is zero-rated
    assert_eq!(doc.text_under("cac:ClassifiedTaxCategory", "cbc:ID"), "Z");
}

#[test]
fn endpoint_schemes() {
    let (invoice, lines) = reference_invoice();
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    let endpoints = doc.all("cbc:EndpointID");
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[0].text, "BE0123456789");
    assert_eq!(endpoints[0].attrs["schemeID"], "9925");
    assert_eq!(endpoints[1].text, "NL859048890B01");
    assert_eq!(endpoints[1].attrs["schemeID"], "9944");
}

#[test]
fn unknown_country_defaults_to_belgian_scheme() {
    let (invoice, lines) = reference_invoice();
    let partner = PartyBuilder::new("Far Away Ltd", AddressBuilder::new("ZZ").build())
        .vat_id("123456789")
        .build();
    let doc = build(&invoice, &partner, &lines, &company(None));
    assert_eq!(doc.all("cbc:EndpointID")[1].attrs["schemeID"], "9925");
    let countries = doc.all("cbc:IdentificationCode");
    assert_eq!(countries[1].text, "BE");
}

#[test]
fn party_without_vat_has_no_endpoint() {
    let (invoice, lines) = reference_invoice();
    let partner = PartyBuilder::new("Consumer", AddressBuilder::new("BE").build()).build();
    let doc = build(&invoice, &partner, &lines, &company(None));
    assert_eq!(doc.all("cbc:EndpointID").len(), 1);
    assert_eq!(doc.all("cac:PartyTaxScheme").len(), 1);
    let customer = doc.index_of("cac:AccountingCustomerParty")[0];
    let names: Vec<_> = doc.descendants(customer).iter().map(|e| e.name.clone()).collect();
    assert!(names.contains(&"cbc:RegistrationName".to_string()));
    assert!(names.contains(&"cbc:IdentificationCode".to_string()));
}

#[test]
fn party_block_shape() {
    let (invoice, lines) = reference_invoice();
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    let party = doc.index_of("cac:Party")[0];
    assert_eq!(
        doc.child_names(party),
        [
            "cbc:EndpointID",
            "cac:PartyIdentification",
            "cac:PartyName",
            "cac:PostalAddress",
            "cac:PartyTaxScheme",
            "cac:PartyLegalEntity"
        ]
    );
    assert_eq!(doc.text_under("cac:PostalAddress", "cbc:StreetName"), "Rue de la Loi 16");
    assert_eq!(doc.text_under("cac:PostalAddress", "cbc:CityName"), "Brussels");
    assert_eq!(doc.text_under("cac:PostalAddress", "cbc:PostalZone"), "1000");
    assert_eq!(doc.text_under("cac:PartyLegalEntity", "cbc:CompanyID"), "0123456789");
    assert_eq!(doc.text_under("cac:PartyTaxScheme", "cbc:ID"), "VAT");
}

#[test]
fn payment_means_without_bank_account() {
    let (invoice, lines) = reference_invoice();
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    assert_eq!(doc.first("cbc:PaymentMeansCode").text, "1");
    assert!(!doc.has("cac:PayeeFinancialAccount"));
}

#[test]
fn payment_means_with_iban() {
    let (mut invoice, lines) = reference_invoice();
    invoice.payment_reference = Some("+++090/9337/55493+++".into());
    let doc = build(&invoice, &dutch_client(), &lines, &company(Some("BE68539007547034")));
    assert_eq!(doc.first("cbc:PaymentMeansCode").text, "30");
    assert_eq!(doc.first("cbc:PaymentID").text, "+++090/9337/55493+++");
    assert_eq!(doc.text_under("cac:PayeeFinancialAccount", "cbc:ID"), "BE68539007547034");
    assert_eq!(doc.first("cbc:BuyerReference").text, "+++090/9337/55493+++");
}

#[test]
fn blank_iban_counts_as_missing() {
    let (invoice, lines) = reference_invoice();
    let doc = build(&invoice, &dutch_client(), &lines, &company(Some("  ")));
    assert_eq!(doc.first("cbc:PaymentMeansCode").text, "1");
    assert!(!doc.has("cac:PayeeFinancialAccount"));
}

#[test]
fn embedded_pdf() {
    let (invoice, lines) = reference_invoice();
    let pdf = b"%PDF-1.4 minimal";
    let xml = ubl::build(
        &invoice,
        &dutch_client(),
        &lines,
        &taxes(),
        &products(),
        &company(None),
        Some(pdf.as_slice()),
    )
    .unwrap();
    let doc = Doc::parse(&xml);
    assert_eq!(doc.text_under("cac:AdditionalDocumentReference", "cbc:ID"), "INV/2025/001");
    assert_eq!(
        doc.text_under("cac:AdditionalDocumentReference", "cbc:DocumentDescription"),
        ubl::PDF_DESCRIPTION
    );
    let object = doc.first("cbc:EmbeddedDocumentBinaryObject");
    assert_eq!(object.attrs["mimeCode"], "application/pdf");
    assert_eq!(object.attrs["filename"], "INV-2025-001.pdf");
    assert_eq!(STANDARD.decode(&object.text).unwrap(), pdf);
}

#[test]
fn empty_pdf_is_not_embedded() {
    let (invoice, lines) = reference_invoice();
    let xml = ubl::build(
        &invoice,
        &dutch_client(),
        &lines,
        &taxes(),
        &products(),
        &company(None),
        Some(&[][..]),
    )
    .unwrap();
    assert!(!Doc::parse(&xml).has("cac:AdditionalDocumentReference"));
}

#[test]
fn note_markup_is_stripped() {
    let (mut invoice, lines) = reference_invoice();
    invoice.note = Some("<p>Payment within <b>30</b> days</p><p>Tom &amp; Co</p>".into());
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    assert_eq!(doc.first("cbc:Note").text, "Payment within 30 days\nTom & Co");

    invoice.note = Some("<p> </p>".into());
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    assert!(!doc.has("cbc:Note"));
}

#[test]
fn unknown_currency_falls_back_to_home_currency() {
    let (mut invoice, lines) = reference_invoice();
    invoice.currency_code = String::new();
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    assert_eq!(doc.first("cbc:DocumentCurrencyCode").text, "EUR");
    assert!(doc.all("cbc:PayableAmount").iter().all(|e| e.attrs["currencyID"] == "EUR"));
}

#[test]
fn single_currency_on_every_amount() {
    let (mut invoice, lines) = reference_invoice();
    invoice.currency_code = "USD".into();
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    let ids: Vec<_> = doc
        .elements
        .iter()
        .filter_map(|e| e.attrs.get("currencyID"))
        .collect();
    assert!(!ids.is_empty());
    assert!(ids.iter().all(|c| *c == "USD"));
}

#[test]
fn build_is_idempotent() {
    let (invoice, lines) = reference_invoice();
    let company = company(Some("BE68539007547034"));
    let a = ubl::build(&invoice, &dutch_client(), &lines, &taxes(), &products(), &company, Some(b"pdf".as_slice()))
        .unwrap();
    let b = ubl::build(&invoice, &dutch_client(), &lines, &taxes(), &products(), &company, Some(b"pdf".as_slice()))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn missing_number_is_rejected() {
    let (mut invoice, lines) = reference_invoice();
    invoice.number = "  ".into();
    let err = ubl::build(&invoice, &dutch_client(), &lines, &taxes(), &products(), &company(None), None)
        .unwrap_err();
    assert!(matches!(err, ExportError::MissingIdentifier(_)));
    assert!(err.to_string().starts_with("cannot construct mandatory identifier"));
}

#[test]
fn missing_issue_date_is_rejected() {
    let (mut invoice, lines) = reference_invoice();
    invoice.issue_date = None;
    let err = ubl::build(&invoice, &dutch_client(), &lines, &taxes(), &products(), &company(None), None)
        .unwrap_err();
    assert!(matches!(err, ExportError::MissingIdentifier(_)));
}

#[test]
fn special_characters_are_escaped() {
    let (invoice, _) = reference_invoice();
    let partner = PartyBuilder::new("Smith & <Sons>", AddressBuilder::new("BE").build()).build();
    let line = LineBuilder::new(dec!(1), dec!(10)).description("\"quoted\" & more").build();
    let doc = build(&invoice, &partner, &[line], &company(None));
    let names: Vec<_> = doc.all("cbc:RegistrationName").into_iter().map(|e| e.text.clone()).collect();
    assert_eq!(names[1], "Smith & <Sons>");
    assert_eq!(doc.text_under("cac:Item", "cbc:Description"), "\"quoted\" & more");
}

#[test]
fn credit_note_due_date_moves_to_payment_means() {
    let (mut invoice, lines) = reference_invoice();
    invoice.move_type = MoveType::OutRefund;
    invoice.due_date = Some(date(2025, 2, 14));
    let doc = build(&invoice, &dutch_client(), &lines, &company(Some("BE68539007547034")));
    assert_eq!(doc.root().name, "CreditNote");
    assert!(!doc.has("cbc:DueDate"));
    assert_eq!(doc.text_under("cac:PaymentMeans", "cbc:PaymentDueDate"), "2025-02-14");
    let means = doc.index_of("cac:PaymentMeans")[0];
    assert_eq!(
        doc.child_names(means),
        ["cbc:PaymentMeansCode", "cbc:PaymentDueDate", "cac:PayeeFinancialAccount"]
    );
}

#[test]
fn invoice_due_date_stays_at_document_level() {
    let (mut invoice, lines) = reference_invoice();
    invoice.due_date = Some(date(2025, 2, 14));
    let doc = build(&invoice, &dutch_client(), &lines, &company(None));
    assert_eq!(doc.first("cbc:DueDate").text, "2025-02-14");
    assert!(!doc.has("cbc:PaymentDueDate"));
}

#[test]
fn pdf_reference_uses_trimmed_number() {
    let (mut invoice, lines) = reference_invoice();
    invoice.number = "  INV/9 ".into();
    let xml = ubl::build(
        &invoice,
        &dutch_client(),
        &lines,
        &taxes(),
        &products(),
        &company(None),
        Some(b"%PDF-1.4".as_slice()),
    )
    .unwrap();
    let doc = Doc::parse(&xml);
    assert_eq!(doc.first("cbc:ID").text, "INV/9");
    assert_eq!(doc.text_under("cac:AdditionalDocumentReference", "cbc:ID"), "INV/9");
    assert_eq!(doc.first("cbc:EmbeddedDocumentBinaryObject").attrs["filename"], "INV-9.pdf");
}
