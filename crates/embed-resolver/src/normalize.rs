//! Path normalization for export directories
//!
//! Turns a raw, possibly decorated path (query suffix, encoding, slashes,
//! trailing doc page or export directory) into a bare project path.

use crate::encoding::decode_lenient;

/// Export directory appended to every project path
pub const EXPORT_DIR: &str = "exports/web";

const DOC_PAGES: [&str; 2] = ["/README", "/index"];

/// Normalize a raw path to a base project path
///
/// Applies the normalization steps until the result is stable, so
/// `normalize_path(&normalize_path(x)) == normalize_path(x)`.
///
/// # Examples
/// - `"/demos/foo/README?id=x"` → `"demos/foo"`
/// - `"proj/Exports/Web/"` → `"proj"`
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let mut current = normalize_once(raw);
    loop {
        // Every step only ever shortens the string, so this settles.
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(raw: &str) -> String {
    let decoded = decode_lenient(truncate_suffix(raw));
    let mut path: &str = &decoded;
    path = path.strip_prefix('/').unwrap_or(path);
    path = path.strip_suffix('/').unwrap_or(path);
    path = strip_doc_page(path);
    path = strip_export_dir(path);
    path.to_string()
}

/// Cut a path at the first `?` or `#`
#[inline]
#[must_use]
pub fn truncate_suffix(raw: &str) -> &str {
    raw.find(|c| c == '?' || c == '#')
        .map_or(raw, |end| &raw[..end])
}

fn strip_doc_page(path: &str) -> &str {
    DOC_PAGES
        .iter()
        .find_map(|page| path.strip_suffix(page))
        .unwrap_or(path)
}

fn strip_export_dir(path: &str) -> &str {
    if path.eq_ignore_ascii_case(EXPORT_DIR) {
        return "";
    }
    let Some(split) = path.len().checked_sub(EXPORT_DIR.len() + 1) else {
        return path;
    };
    if !path.is_char_boundary(split) {
        return path;
    }
    let (head, tail) = path.split_at(split);
    match tail.strip_prefix('/') {
        Some(dir) if dir.eq_ignore_ascii_case(EXPORT_DIR) => head,
        _ => path,
    }
}
