//! Shared fixtures and a small element index over generated XML.

#![allow(dead_code)]

use std::collections::HashMap;

use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rust_decimal_macros::dec;
use ubl_export::core::*;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn company(iban: Option<&str>) -> CompanyIdentity {
    CompanyIdentity {
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
        iban: iban.map(str::to_string),
    }
}

pub fn dutch_client() -> Party {
    PartyBuilder::new(
        "Client BV",
        AddressBuilder::new("NL")
            .street("Damrak 1")
            .city("Amsterdam")
            .postal_code("1012LG")
            .build(),
    )
    .vat_id("NL859048890B01")
    .build()
}

pub fn taxes() -> TaxMap {
    TaxMap::from([
        (1, Tax { id: 1, rate: dec!(21), name: "VAT 21%".into() }),
        (2, Tax { id: 2, rate: dec!(6), name: "VAT 6%".into() }),
        (3, Tax { id: 3, rate: dec!(0), name: "VAT 0%".into() }),
    ])
}

pub fn products() -> ProductMap {
    ProductMap::from([(
        5,
        Product { id: 5, name: "Consulting".into(), default_code: Some("CONS-01".into()) },
    )])
}

/// The INV/2025/001 reference document: one 21 % line of 2 × 50.
pub fn reference_invoice() -> (Invoice, Vec<InvoiceLine>) {
    let invoice = InvoiceBuilder::new("INV/2025/001", date(2025, 1, 15))
        .record_id(42)
        .currency("EUR")
        .totals(dec!(100.00), dec!(21.00), dec!(121.00))
        .build();
    let lines = vec![LineBuilder::new(dec!(2), dec!(50.0000)).description("Consulting").tax(1).build()];
    (invoice, lines)
}

/// One element of a parsed document.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    pub depth: usize,
    pub parent: Option<usize>,
    pub attrs: HashMap<String, String>,
    pub text: String,
}

/// Flat, document-ordered element index.
#[derive(Debug, Default)]
pub struct Doc {
    pub elements: Vec<Element>,
}

fn element(e: &BytesStart<'_>, depth: usize, parent: Option<usize>) -> Element {
    let attrs = e
        .attributes()
        .map(|a| {
            let a = a.unwrap();
            (
                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                a.unescape_value().unwrap().into_owned(),
            )
        })
        .collect();
    Element {
        name: String::from_utf8(e.name().as_ref().to_vec()).unwrap(),
        depth,
        parent,
        attrs,
        text: String::new(),
    }
}

impl Doc {
    pub fn parse(xml: &[u8]) -> Self {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        let mut elements = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) => {
                    elements.push(element(&e, stack.len(), stack.last().copied()));
                    stack.push(elements.len() - 1);
                }
                Event::Empty(e) => {
                    elements.push(element(&e, stack.len(), stack.last().copied()));
                }
                Event::Text(t) => {
                    if let Some(&top) = stack.last() {
                        let text: &mut String = &mut elements[top].text;
                        text.push_str(&t.unescape().unwrap());
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Self { elements }
    }

    pub fn root(&self) -> &Element {
        &self.elements[0]
    }

    pub fn all(&self, name: &str) -> Vec<&Element> {
        self.elements.iter().filter(|e| e.name == name).collect()
    }

    pub fn first(&self, name: &str) -> &Element {
        self.elements
            .iter()
            .find(|e| e.name == name)
            .unwrap_or_else(|| panic!("no element {name}"))
    }

    pub fn has(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e.name == name)
    }

    /// Names of the direct children of the element at `idx`, in order.
    pub fn child_names(&self, idx: usize) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| e.parent == Some(idx))
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Text of the first element named `child` below the first `parent`.
    pub fn text_under(&self, parent: &str, child: &str) -> String {
        let pidx = self
            .elements
            .iter()
            .position(|e| e.name == parent)
            .unwrap_or_else(|| panic!("no element {parent}"));
        self.descendants(pidx)
            .into_iter()
            .find(|e| e.name == child)
            .map(|e| e.text.clone())
            .unwrap_or_else(|| panic!("no {child} under {parent}"))
    }

    /// All elements below the element at `idx`.
    pub fn descendants(&self, idx: usize) -> Vec<&Element> {
        let depth = self.elements[idx].depth;
        self.elements[idx + 1..]
            .iter()
            .take_while(|e| e.depth > depth)
            .collect()
    }

    pub fn index_of(&self, name: &str) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.name == name)
            .map(|(i, _)| i)
            .collect()
    }
}
