use super::types::MoveType;

/// Determine the number a document is exported under.
///
/// Vendor bills are exported under the vendor's own invoice number
/// (`reference`), falling back to the ERP name and finally to a synthetic
/// `BILL-{record_id}`. Customer documents are exported under the ERP name;
/// an unposted name (`/` or blank) yields `None` and the document is skipped.
pub fn resolve_document_number(
    move_type: MoveType,
    name: Option<&str>,
    reference: Option<&str>,
    record_id: Option<i64>,
) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty() && *n != "/");

    if move_type.is_vendor_bill() {
        if let Some(vendor_ref) = reference.map(str::trim).filter(|r| !r.is_empty()) {
            return Some(vendor_ref.to_string());
        }
        if let Some(name) = name {
            return Some(name.to_string());
        }
        return record_id.map(|id| format!("BILL-{id}"));
    }

    name.map(str::to_string)
}

/// File name for an exported UBL document: `/` becomes `-`, spaces become
/// `_`, then `.{extension}` is appended.
///
/// ```
/// use ubl_export::core::ubl_filename;
///
/// assert_eq!(ubl_filename("INV/2025/001", "xml"), "INV-2025-001.xml");
/// ```
pub fn ubl_filename(number: &str, extension: &str) -> String {
    let stem: String = number
        .chars()
        .map(|c| match c {
            '/' => '-',
            ' ' => '_',
            c => c,
        })
        .collect();
    format!("{stem}.{extension}")
}

/// Attachment file name for an embedded PDF: path separators become `-`.
pub fn pdf_filename(number: &str) -> String {
    let stem: String = number
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("{stem}.pdf")
}
