use std::path::Path;

use anyhow::{Context, Result};
use pdfium_render::prelude::*;

/// Load a PDF and extract the plain text of every page.
///
/// Line endings are normalized to `\n`. Pages without text yield an empty string.
pub fn extract_page_texts(pdfium: &Pdfium, path: &Path) -> Result<Vec<String>> {
    let document = pdfium
        .load_pdf_from_file(path, None)
        .with_context(|| format!("Failed to load PDF: {}", path.display()))?;

    document
        .pages()
        .iter()
        .enumerate()
        .map(|(idx, page)| extract_page_text(idx, &page))
        .collect()
}

fn extract_page_text(page_idx: usize, page: &PdfPage) -> Result<String> {
    let text_page = page
        .text()
        .with_context(|| format!("Failed to load text for page {}", page_idx + 1))?;
    let text = normalize_line_endings(&text_page.all());
    if text.trim().is_empty() {
        log::warn!("page {} has no extractable text", page_idx + 1);
    }
    Ok(text)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Concatenate page texts into the full text, each non-empty page followed by `\n`.
pub fn join_pages(pages: &[String]) -> String {
    let mut full_text = String::new();
    for page in pages.iter().filter(|p| !p.is_empty()) {
        full_text.push_str(page);
        full_text.push('\n');
    }
    full_text
}
