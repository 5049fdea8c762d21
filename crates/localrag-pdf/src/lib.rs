//! PDF page extraction backed by `lopdf`.
//!
//! A file that cannot be parsed fails as a whole; a page whose text cannot be
//! decoded fails on its own so the rest of the document still loads.

use std::path::Path;

use tracing::debug;

use localrag_core::error::{Error, Result};
use localrag_core::traits::PageSource;
use localrag_core::types::RawPage;

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfPageSource;

impl PdfPageSource {
    pub fn new() -> Self { Self }
}

impl PageSource for PdfPageSource {
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }

    fn pages(&self, path: &Path) -> Result<Vec<RawPage>> {
        let file = path.display().to_string();
        let doc = lopdf::Document::load(path)
            .map_err(|e| Error::Extraction { file: file.clone(), reason: e.to_string() })?;
        let pages: Vec<RawPage> = doc
            .get_pages()
            .into_keys()
            .map(|number| RawPage {
                number,
                text: doc
                    .extract_text(&[number])
                    .map_err(|e| Error::Extraction { file: format!("{file} p.{number}"), reason: e.to_string() }),
            })
            .collect();
        debug!(file = %file, pages = pages.len(), "Extracted PDF pages");
        Ok(pages)
    }
}
