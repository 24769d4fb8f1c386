//! HTML escaping.

/// Escape `&`, `<`, `>`, `"` and `'` for safe inclusion in HTML text and
/// attribute values.
///
/// # Example
///
/// ```
/// use wl_markup::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Undo quote escaping inside an attribute string lifted out of escaped text.
pub(crate) fn unescape_quotes(attrs: &str) -> String {
    attrs.replace("&quot;", "\"").replace("&#x27;", "'")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_html("just words"), "just words");
    }

    #[test]
    fn test_escape_ampersand_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_html(r#""a" 'b'"#), "&quot;a&quot; &#x27;b&#x27;");
    }

    #[test]
    fn test_unescape_quotes() {
        assert_eq!(
            unescape_quotes("style=&quot;color:red&quot; title=&#x27;x&#x27;"),
            r#"style="color:red" title='x'"#
        );
    }
}
