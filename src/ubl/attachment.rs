use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::xml_utils::{XmlResult, XmlWriter};
use super::{cac, cbc};
use crate::core::pdf_filename;

/// BT-123 description of the embedded rendering.
pub const PDF_DESCRIPTION: &str = "Invoice PDF";

pub const PDF_MIME_CODE: &str = "application/pdf";

/// BG-24: embed the rendered PDF as an AdditionalDocumentReference.
///
/// Returns whether anything was written; an empty buffer counts as no PDF.
pub(super) fn write_pdf_reference(
    w: &mut XmlWriter,
    number: &str,
    pdf: Option<&[u8]>,
) -> XmlResult<bool> {
    let Some(pdf) = pdf.filter(|bytes| !bytes.is_empty()) else {
        return Ok(false);
    };

    let filename = pdf_filename(number);
    let content = STANDARD.encode(pdf);

    w.start_element(cac("AdditionalDocumentReference"))?;
    w.text_element(cbc("ID"), number)?;
    w.text_element(cbc("DocumentDescription"), PDF_DESCRIPTION)?;
    w.start_element(cac("Attachment"))?;
    w.text_element_with_attrs(
        cbc("EmbeddedDocumentBinaryObject"),
        &content,
        &[("mimeCode", PDF_MIME_CODE), ("filename", filename.as_str())],
    )?;
    w.end_element(cac("Attachment"))?;
    w.end_element(cac("AdditionalDocumentReference"))?;

    tracing::debug!(
        number = %number,
        bytes = pdf.len(),
        "embedded PDF attachment"
    );
    Ok(true)
}
