//! Normalization helpers for user-entered values.

/// Output extensions recognized when switching between single-file formats.
pub const TILESET_EXTENSIONS: &[&str] = &[".mbtiles", ".pmtiles"];

/// Applies `extension` to a user-supplied output filename.
///
/// A trailing extension listed in `recognized` is replaced; any other suffix
/// is kept and `extension` appended after it.
///
/// ```
/// use tcgen::compiler::sanitize::{normalize_filename, TILESET_EXTENSIONS};
///
/// assert_eq!(normalize_filename("out.mbtiles", ".pmtiles", TILESET_EXTENSIONS), "out.pmtiles");
/// assert_eq!(normalize_filename("out.v2", ".pmtiles", TILESET_EXTENSIONS), "out.v2.pmtiles");
/// ```
pub fn normalize_filename(name: &str, extension: &str, recognized: &[&str]) -> String {
    let name = name.trim();
    let stem = recognized
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name);
    format!("{}{}", stem, extension)
}

/// Splits free text into entries on `separator`, keeping entries verbatim.
///
/// Empty text yields no entries. Carriage returns before line breaks are
/// dropped so pasted Windows text splits like Unix text.
pub fn split_entries(text: &str, separator: char) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(separator)
        .map(|entry| entry.strip_suffix('\r').unwrap_or(entry).to_string())
        .collect()
}

/// Iterates the trimmed, non-empty entries of a list in order.
pub fn entries(list: &[String]) -> impl Iterator<Item = &str> {
    list.iter().map(|e| e.trim()).filter(|e| !e.is_empty())
}

/// Formats a number the way the form displays it: whole numbers keep one
/// decimal place (`2.0`), everything else uses the shortest representation.
/// Negative zero renders as `0.0`.
pub fn format_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
