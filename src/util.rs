// treenotes/src/util.rs

use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

/// Display name for the walk root. `./` resolves to the real directory name;
/// a filesystem root falls back to its display form.
pub fn root_name(p: &Path) -> String {
    // canonicalize when possible, but don’t fail the whole call if it errors
    let canon: PathBuf = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
    canon
        .file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| canon.to_string_lossy().trim_end_matches(['/', '\\']).to_string())
}

/// Relative, slash-normalized path of `path` under `root`.
pub fn normalize_rel(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

/// Multi-line notes become one line.
pub fn flatten_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace(['\n', '\r'], " ")
}

/// Spaces needed to bring `label` up to `width` terminal columns.
pub fn pad_to(label: &str, width: usize) -> usize {
    width.saturating_sub(UnicodeWidthStr::width(label))
}

/* ===================================== Tests ===================================== */
