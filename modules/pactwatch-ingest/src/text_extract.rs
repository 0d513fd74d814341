use std::path::Path;

use pactwatch_common::PactwatchError;

/// Extract the full text of a document.
///
/// `.pdf` files go through lopdf page by page; a page with no extractable
/// text contributes nothing rather than failing the document. Any other
/// file is read as UTF-8 text. A document that cannot be read or decoded
/// at all is reported as unparseable.
pub fn extract_text(path: &Path) -> Result<String, PactwatchError> {
    let bytes = std::fs::read(path).map_err(|e| {
        PactwatchError::UnparseableDocument(format!("cannot read {}: {e}", path.display()))
    })?;

    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    {
        pdf_text(&bytes)
    } else {
        String::from_utf8(bytes).map_err(|_| {
            PactwatchError::UnparseableDocument(format!(
                "{} is not valid UTF-8 text",
                path.display()
            ))
        })
    }
}

fn pdf_text(bytes: &[u8]) -> Result<String, PactwatchError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| PactwatchError::UnparseableDocument(format!("cannot open PDF: {e}")))?;

    if doc.is_encrypted() {
        return Err(PactwatchError::UnparseableDocument(
            "PDF is encrypted".to_string(),
        ));
    }

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        if let Ok(page_text) = doc.extract_text(&[*page_number]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    Ok(text)
}
