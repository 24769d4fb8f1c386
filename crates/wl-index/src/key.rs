//! Index key normalization.

/// Reduce a title to its index key: ASCII letters and digits only, lowercased.
///
/// Spacing, punctuation, underscores and non-ASCII characters all vanish, so
/// OCR output like `Your first_fortress` and a file named `Yourfirstfortress`
/// land on the same key.
///
/// # Example
///
/// ```
/// use wl_index::normalize_key;
///
/// assert_eq!(normalize_key("Your first fortress"), "yourfirstfortress");
/// assert_eq!(normalize_key("DF2014:Dwarf"), "df2014dwarf");
/// assert_eq!(normalize_key("--"), "");
/// ```
#[must_use]
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
