//! Text escaping and style name conversion.

use crate::pipeline::config::EscapeMode;

const NBSP: char = '\u{00A0}';

/// Escape text content into `output`.
///
/// `Minimal` only touches `<` and non-breaking spaces; everything else,
/// including `&` and quotes, passes through.
pub fn escape_text(text: &str, mode: EscapeMode, output: &mut String) {
    for c in text.chars() {
        match (c, mode) {
            ('<', _) => output.push_str("&lt;"),
            (NBSP, _) => output.push_str("&nbsp;"),
            ('&', EscapeMode::Full) => output.push_str("&amp;"),
            ('>', EscapeMode::Full) => output.push_str("&gt;"),
            ('"', EscapeMode::Full) => output.push_str("&quot;"),
            ('\'', EscapeMode::Full) => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
}

/// Escape text content into a new string.
pub fn escape(text: &str, mode: EscapeMode) -> String {
    let mut output = String::with_capacity(text.len());
    escape_text(text, mode, &mut output);
    output
}

/// `backgroundColor` -> `background-color`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_escape() {
        assert_eq!(escape("a < b", EscapeMode::Minimal), "a &lt; b");
        assert_eq!(escape("<<", EscapeMode::Minimal), "&lt;&lt;");
        assert_eq!(escape("a\u{00A0}b", EscapeMode::Minimal), "a&nbsp;b");
    }

    #[test]
    fn test_minimal_escape_passes_ampersand_and_quotes() {
        let text = r#"Tom & "Jerry" > 'Spike'"#;
        assert_eq!(escape(text, EscapeMode::Minimal), text);
    }

    #[test]
    fn test_full_escape() {
        assert_eq!(
            escape(r#"<a href="x">&'"#, EscapeMode::Full),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("padding"), "padding");
        assert_eq!(kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(kebab_case("WebkitTransition"), "-webkit-transition");
    }
}
