use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Cursor;

use super::QName;
use crate::core::ExportError;

pub type XmlResult<T = ()> = Result<T, ExportError>;

fn xml_io(e: std::io::Error) -> ExportError {
    ExportError::Xml(format!("XML write error: {e}"))
}

/// Event writer emitting namespace-qualified UBL elements.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    /// New buffer, already holding the UTF-8 XML declaration.
    pub fn new() -> XmlResult<Self> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }

    pub fn start_element(&mut self, name: QName) -> XmlResult<&mut Self> {
        self.start_element_with_attrs(name, &[])
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: QName,
        attrs: &[(&str, &str)],
    ) -> XmlResult<&mut Self> {
        let tag = name.tag();
        let mut elem = BytesStart::new(tag.as_str());
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: QName) -> XmlResult<&mut Self> {
        let tag = name.tag();
        self.writer
            .write_event(Event::End(BytesEnd::new(tag.as_str())))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: QName, text: &str) -> XmlResult<&mut Self> {
        self.text_element_with_attrs(name, text, &[])
    }

    pub fn text_element_with_attrs(
        &mut self,
        name: QName,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> XmlResult<&mut Self> {
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Monetary amount, 2 decimals, with currencyID attribute.
    pub fn amount_element(
        &mut self,
        name: QName,
        amount: Decimal,
        currency: &str,
    ) -> XmlResult<&mut Self> {
        self.text_element_with_attrs(name, &format_amount(amount), &[("currencyID", currency)])
    }

    /// Unit price, 4 decimals, with currencyID attribute.
    pub fn price_element(
        &mut self,
        name: QName,
        price: Decimal,
        currency: &str,
    ) -> XmlResult<&mut Self> {
        self.text_element_with_attrs(name, &format_price(price), &[("currencyID", currency)])
    }

    /// Quantity with unitCode attribute.
    pub fn quantity_element(
        &mut self,
        name: QName,
        qty: Decimal,
        unit: &str,
    ) -> XmlResult<&mut Self> {
        self.text_element_with_attrs(name, &format_quantity(qty), &[("unitCode", unit)])
    }
}

fn fixed(d: Decimal, dp: u32) -> String {
    let mut r = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    r.rescale(dp);
    if r.is_zero() {
        r.set_sign_positive(true);
    }
    r.to_string()
}

/// Amounts: exactly 2 decimals ("100.00").
pub fn format_amount(d: Decimal) -> String {
    fixed(d, 2)
}

/// Percentages: exactly 2 decimals ("21.00").
pub fn format_percent(d: Decimal) -> String {
    fixed(d, 2)
}

/// Unit prices: exactly 4 decimals ("50.0000").
pub fn format_price(d: Decimal) -> String {
    fixed(d, 4)
}

/// Quantities: no trailing zeros ("2", "1.5", "0").
pub fn format_quantity(d: Decimal) -> String {
    let mut n = d.normalize();
    if n.is_zero() {
        n.set_sign_positive(true);
    }
    n.to_string()
}
