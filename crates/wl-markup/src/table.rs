//! MediaWiki `{| ... |}` tables.
//!
//! The table body is processed line by line. Each trimmed line is classified
//! into a [`Line`] and fed to a [`TableBuilder`] that tracks the open row:
//!
//! - `{| attrs` on the opening line sets table attributes
//! - `{{prettytable}}` selects the default wiki table look
//! - `! a !! b` header cells, `attrs | content` splits cell attributes
//! - `| a || b` data cells
//! - `|- attrs` starts a row, `|-| a | b` starts a row with inline cells
//! - `|}` or the end of the block closes the open row
//!
//! The body arrives HTML-escaped with every tag shielded, so attribute strings
//! have their quotes unescaped before they are emitted.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::unescape_quotes;
use crate::style;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{\|(.*?)\|\}").unwrap());

/// `! LAND_HOLDER|-| ...`: a row break glued to the end of a header.
static GLUED_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|!)([^\n|]+)\|-").unwrap());

static INLINE_CELL_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\|\|?\s*").unwrap());

const PRETTYTABLE: &str = "{{prettytable}}";

/// Replace every table block in `text` with an HTML table.
pub(crate) fn tables(text: &str) -> String {
    TABLE_RE
        .replace_all(text, |caps: &Captures<'_>| render_table(&caps[1]))
        .into_owned()
}

fn render_table(body: &str) -> String {
    let pretty = body.contains(PRETTYTABLE);
    let body = body.replace(PRETTYTABLE, "");

    // Text on the `{|` line is the attribute list unless it already is table content.
    let (opening, rest) = match body.split_once('\n') {
        Some((first, rest)) if !is_content(first) => (first.trim(), rest),
        None if !is_content(&body) => (body.trim(), ""),
        _ => ("", body.as_str()),
    };

    let attrs = if !opening.is_empty() && !opening.contains("{{") {
        format!(" {}", unescape_quotes(opening))
    } else if pretty {
        style::PRETTYTABLE_ATTRS.to_owned()
    } else {
        String::new()
    };

    let normalized = GLUED_ROW_RE.replace_all(rest, "${1}${2}\n|-");
    let mut builder = TableBuilder::default();
    for line in normalized.split('\n') {
        let line = line.trim();
        if !line.is_empty() {
            builder.push(Line::classify(line));
        }
    }
    builder.finish(&attrs)
}

fn is_content(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with('!') || line.starts_with('|')
}

/// One non-blank line of a table body.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// `|}`
    Close,
    /// `|- attrs`
    RowStart(&'a str),
    /// `|-| a | b`
    InlineRow(&'a str),
    /// `! a !! b`
    Header(&'a str),
    /// `| a || b`
    Cells(&'a str),
    /// Anything else. Dropped.
    Other,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if line.starts_with("|}") {
            Self::Close
        } else if let Some(rest) = line.strip_prefix("|-") {
            let rest = rest.trim();
            match rest.strip_prefix('|') {
                Some(cells) => Self::InlineRow(cells.trim()),
                None => Self::RowStart(rest),
            }
        } else if let Some(rest) = line.strip_prefix('!') {
            Self::Header(rest)
        } else if let Some(rest) = line.strip_prefix('|') {
            Self::Cells(rest)
        } else {
            Self::Other
        }
    }
}

#[derive(Debug)]
struct Row {
    attrs: String,
    cells: String,
}

impl Row {
    fn new(attrs: impl Into<String>) -> Self {
        Self {
            attrs: attrs.into(),
            cells: String::new(),
        }
    }

    fn push_data(&mut self, content: &str) {
        let _ = write!(self.cells, "<td style='{}'>{content}</td>", style::TABLE_CELL);
    }

    fn push_header(&mut self, cell: &str) {
        let (attrs, content) = match cell.split_once('|') {
            Some((attrs, content)) if !cell.starts_with("[[") => {
                let attrs = attrs.trim();
                let attrs = if attrs.is_empty() {
                    String::new()
                } else {
                    format!(" {}", unescape_quotes(attrs))
                };
                (attrs, content.trim())
            }
            _ => (String::new(), cell),
        };
        let _ = write!(
            self.cells,
            "<th{attrs} style='{}'>{content}</th>",
            style::TABLE_HEADER_CELL
        );
    }
}

#[derive(Debug, Default)]
struct TableBuilder {
    rows: String,
    row: Option<Row>,
}

impl TableBuilder {
    fn push(&mut self, line: Line<'_>) {
        match line {
            Line::Close => self.flush(),
            Line::RowStart(attrs) => {
                self.flush();
                let attrs = if attrs.is_empty() {
                    String::new()
                } else {
                    format!(" {}", unescape_quotes(attrs))
                };
                self.row = Some(Row::new(attrs));
            }
            Line::InlineRow(cells) => {
                self.flush();
                let row = self.row.insert(Row::new(""));
                INLINE_CELL_SPLIT_RE
                    .split(cells)
                    .map(str::trim)
                    .filter(|cell| !cell.is_empty())
                    .for_each(|cell| row.push_data(cell));
            }
            Line::Header(cells) => {
                let row = self
                    .row
                    .get_or_insert_with(|| Row::new(style::HEADER_ROW_ATTRS));
                for cell in cells.split("!!") {
                    row.push_header(cell.trim());
                }
            }
            Line::Cells(cells) => {
                let row = self.row.get_or_insert_with(|| Row::new(""));
                for cell in cells.split("||") {
                    row.push_data(cell.trim());
                }
            }
            Line::Other => {}
        }
    }

    /// Emit the open row, if it has any cells.
    fn flush(&mut self) {
        if let Some(row) = self.row.take()
            && !row.cells.is_empty()
        {
            let _ = write!(self.rows, "<tr{}>{}</tr>", row.attrs, row.cells);
        }
    }

    fn finish(mut self, attrs: &str) -> String {
        self.flush();
        format!("<table{attrs}>{}</table>", self.rows)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn th(content: &str) -> String {
        format!("<th style='{}'>{content}</th>", style::TABLE_HEADER_CELL)
    }

    fn td(content: &str) -> String {
        format!("<td style='{}'>{content}</td>", style::TABLE_CELL)
    }

    #[test]
    fn test_basic_table() {
        let html = tables("{|\n! A !! B\n|-\n| 1 || 2\n|}");
        let expected = format!(
            r##"<table><tr bgcolor="#ddd">{}{}</tr><tr>{}{}</tr></table>"##,
            th("A"),
            th("B"),
            td("1"),
            td("2")
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_text_around_table_untouched() {
        let html = tables("before {|\n| a\n|} after");
        assert!(html.starts_with("before <table>"));
        assert!(html.ends_with("</table> after"));
    }

    #[test]
    fn test_no_table_is_noop() {
        assert_eq!(tables("a | b || c"), "a | b || c");
    }

    #[test]
    fn test_prettytable_attributes() {
        let html = tables("{| {{prettytable}}\n| x\n|}");
        assert!(html.starts_with(r#"<table class="prettytable" style="border-collapse:collapse;width:100%;">"#));
        assert!(!html.contains("prettytable}}"));
        assert!(html.contains(&td("x")));
    }

    #[test]
    fn test_explicit_attributes_override_prettytable() {
        let html = tables("{| border=&quot;1&quot;\n{{prettytable}}\n| x\n|}");
        assert!(html.starts_with(r#"<table border="1">"#));
    }

    #[test]
    fn test_single_line_table() {
        assert_eq!(tables("{|| x |}"), format!("<table><tr>{}</tr></table>", td("x")));
    }

    #[test]
    fn test_row_attributes_are_unescaped() {
        let html = tables("{|\n|- class=&quot;odd&quot;\n| a\n|}");
        assert!(html.contains(r#"<tr class="odd">"#));
    }

    #[test]
    fn test_header_cell_attributes() {
        let html = tables("{|\n! style=&quot;width:50%&quot; | Name\n|}");
        assert!(html.contains(&format!(
            r#"<th style="width:50%" style='{}'>Name</th>"#,
            style::TABLE_HEADER_CELL
        )));
    }

    #[test]
    fn test_header_link_cell_not_split() {
        let html = tables("{|\n! [[Page|label]]\n|}");
        assert!(html.contains(&th("[[Page|label]]")));
    }

    #[test]
    fn test_glued_inline_row() {
        let html = tables("{|\n! LAND_HOLDER|-| civilization | yes\n|}");
        let expected = format!(
            r##"<table><tr bgcolor="#ddd">{}</tr><tr>{}{}</tr></table>"##,
            th("LAND_HOLDER"),
            td("civilization"),
            td("yes")
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_inline_row_double_pipes() {
        let html = tables("{|\n|-| a || b\n|}");
        assert_eq!(html, format!("<table><tr>{}{}</tr></table>", td("a"), td("b")));
    }

    #[test]
    fn test_rows_without_close_marker_are_flushed() {
        let html = tables("{|\n|-\n| a\n|-\n| b\n|}");
        assert_eq!(
            html,
            format!("<table><tr>{}</tr><tr>{}</tr></table>", td("a"), td("b"))
        );
    }

    #[test]
    fn test_empty_rows_are_dropped() {
        let html = tables("{|\n|-\n|-\n| a\n|}");
        assert_eq!(html, format!("<table><tr>{}</tr></table>", td("a")));
    }

    #[test]
    fn test_stray_text_lines_dropped() {
        let html = tables("{|\n| a\nloose text\n|}");
        assert!(!html.contains("loose"));
    }

    #[test]
    fn test_classify_lines() {
        assert_eq!(Line::classify("|}"), Line::Close);
        assert_eq!(Line::classify("|- x=1"), Line::RowStart("x=1"));
        assert_eq!(Line::classify("|-| a"), Line::InlineRow("a"));
        assert_eq!(Line::classify("! h"), Line::Header(" h"));
        assert_eq!(Line::classify("| c"), Line::Cells(" c"));
        assert_eq!(Line::classify("text"), Line::Other);
    }
}
