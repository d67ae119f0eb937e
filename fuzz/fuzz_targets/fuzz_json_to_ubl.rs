#![no_main]

use libfuzzer_sys::fuzz_target;
use ubl_export::adapter::{RawRecord, adapt_company, adapt_invoice, adapt_line, adapt_partner};
use ubl_export::core::{ProductMap, TaxMap};

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSON records must adapt and build without panicking.
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let record = RawRecord::from_value(value.clone());
    let invoice = adapt_invoice(&record, "BE");
    let partner = adapt_partner(&record, "BE");
    let company = adapt_company(&record, "BE");
    let lines: Vec<_> = match &value {
        serde_json::Value::Object(map) => match map.get("lines") {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(|v| adapt_line(&RawRecord::from_value(v.clone())))
                .collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    let _ = ubl_export::ubl::build(
        &invoice,
        &partner,
        &lines,
        &TaxMap::new(),
        &ProductMap::new(),
        &company,
        None,
    );
});
