//! File system utility helpers (BOM-aware readers, etc.)
use std::fs;
use std::path::Path;

use super::errors::{DocParseError, DocResult};

/// Read an HTML documentation page as UTF-8 text, stripping UTF-8 BOM if present.
pub fn read_html_file(path: &Path) -> DocResult<String> {
    let mut content =
        fs::read_to_string(path).map_err(|e| DocParseError::from_read(path, e))?;
    if content.starts_with('\u{FEFF}') {
        content = content.trim_start_matches('\u{FEFF}').to_string();
    }
    Ok(content)
}

/// Create `dir` (and parents) unless it already exists.
pub fn ensure_dir(dir: &Path) -> DocResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| DocParseError::from_write(dir, e))?;
    }
    Ok(())
}
