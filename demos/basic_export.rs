use chrono::NaiveDate;
use rust_decimal_macros::dec;
use ubl_export::core::*;
use ubl_export::{peppol, ubl};

fn main() {
    // Belgian seller invoicing a Dutch client
    let company = CompanyIdentity {
        party: PartyBuilder::new(
            "Exporter NV",
            AddressBuilder::new("BE")
                .street("Rue de la Loi 16")
                .city("Brussels")
                .postal_code("1000")
                .build(),
        )
        .vat_id("BE0123456789")
        .registration_id("0123456789")
        .build(),
        iban: Some("BE68539007547034".into()),
    };
    let client = PartyBuilder::new(
        "Client BV",
        AddressBuilder::new("NL")
            .street("Damrak 1")
            .city("Amsterdam")
            .postal_code("1012LG")
            .build(),
    )
    .vat_id("NL859048890B01")
    .build();

    let invoice = InvoiceBuilder::new("INV/2025/001", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        .due_date(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap())
        .payment_reference("+++090/9337/55493+++")
        .totals(dec!(149.90), dec!(31.48), dec!(181.38))
        .build();
    let lines = vec![
        LineBuilder::new(dec!(2), dec!(50)).description("Consulting").product(5).tax(1).build(),
        LineBuilder::new(dec!(1), dec!(49.90)).description("Hosting (monthly)").tax(1).build(),
    ];
    let taxes = TaxMap::from([(1, Tax { id: 1, rate: dec!(21), name: "VAT 21%".into() })]);
    let products = ProductMap::from([(
        5,
        Product { id: 5, name: "Consulting".into(), default_code: Some("CONS-01".into()) },
    )]);

    let issues = peppol::validate_peppol(&invoice, &client, &company);
    for issue in &issues {
        println!("warning: {issue}");
    }

    let buckets = aggregate_taxes(&lines, &taxes, &invoice.totals).unwrap();
    for bucket in &buckets {
        println!(
            "{} ({}): {} on {}",
            bucket.name,
            bucket.category().code(),
            bucket.tax_amount,
            bucket.taxable_amount
        );
    }

    let xml = ubl::build(&invoice, &client, &lines, &taxes, &products, &company, None).unwrap();
    println!("--- {} ---", ubl_filename(&invoice.number, "xml"));
    println!("{}", String::from_utf8_lossy(&xml));
}
