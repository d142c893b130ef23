use crate::cards::CardDocument;
use crate::domain::{CodecResult, DwuckError};
use std::fs;
use std::path::Path;

/// Canonicalizes line endings so decks and reports compare byte-for-byte
/// across platforms, and guarantees a trailing newline.
pub fn normalize_report_text(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_card_document(path: &Path, document: &CardDocument) -> CodecResult<()> {
    fs::write(path, document.render()).map_err(|source| {
        DwuckError::io_system(
            "IO.DECK_WRITE",
            format!("failed to write card deck '{}': {}", path.display(), source),
        )
    })
}

pub fn read_report_text(path: &Path) -> CodecResult<String> {
    let raw = fs::read_to_string(path).map_err(|source| {
        DwuckError::io_system(
            "IO.REPORT_READ",
            format!(
                "failed to read engine report '{}': {}",
                path.display(),
                source
            ),
        )
    })?;
    Ok(normalize_report_text(&raw))
}
