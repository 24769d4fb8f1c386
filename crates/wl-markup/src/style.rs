//! Inline styles for generated elements.
//!
//! The display layer is a lightweight rich-text widget without stylesheet
//! support, so every element carries its presentation inline.

pub(crate) const LINK: &str = "color:#1a73e8;text-decoration:none;";

pub(crate) const HEADING: &str =
    "background-color:#ffffcc;padding:8px 12px;border-left:4px solid #ffcc00;margin:12px 0;";

pub(crate) const PRE: &str = "background:#f4f4f4;padding:8px;border-radius:4px;overflow-x:auto;";
pub(crate) const CODE: &str =
    "background:#f4f4f4;padding:2px 4px;border-radius:3px;font-family:monospace;";

pub(crate) const RULE: &str = "border:none;border-top:1px solid #ddd;margin:16px 0;";
pub(crate) const BLOCKQUOTE: &str =
    "border-left:4px solid #ddd;margin:8px 0;padding:8px 16px;background:#f9f9f9;color:#666;";

pub(crate) const LIST: &str = "margin:8px 0;padding-left:24px;";
pub(crate) const LIST_ITEM: &str = "margin:4px 0;";

pub(crate) const TABLE_HEADER_CELL: &str = "border:1px solid #ddd;padding:8px;background:#f5f5f5;";
pub(crate) const TABLE_CELL: &str = "border:1px solid #ddd;padding:8px;";
/// Attributes selected by `{{prettytable}}`.
pub(crate) const PRETTYTABLE_ATTRS: &str =
    r#" class="prettytable" style="border-collapse:collapse;width:100%;""#;
/// Row attributes for a row opened by a header cell.
pub(crate) const HEADER_ROW_ATTRS: &str = r##" bgcolor="#ddd""##;
