//! Syntax highlighting for fenced code blocks.

use autumnus::{HtmlLinkedBuilder, formatter::Formatter, languages::Language};

/// Highlights code with autumnus (tree-sitter based).
///
/// Falls back to a plain escaped `<pre><code>` block when the language is
/// unrecognized or formatting fails.
#[derive(Default)]
pub struct Highlighter;

impl Highlighter {
    /// Highlight code and return HTML with CSS classes.
    pub fn highlight(&self, code: &str, language: &str) -> String {
        let lang = Language::guess(language, code);

        // Language::guess answers PlainText for names it does not know;
        // keep those as plain blocks with the language class intact.
        if matches!(lang, Language::PlainText)
            && !language.is_empty()
            && language != "plaintext"
            && language != "text"
        {
            return plain_code_block(code, language);
        }

        let Ok(formatter) = HtmlLinkedBuilder::new().source(code).lang(lang).build() else {
            return plain_code_block(code, language);
        };

        let mut output: Vec<u8> = Vec::new();
        if formatter.format(&mut output).is_err() {
            return plain_code_block(code, language);
        }
        String::from_utf8(output).unwrap_or_else(|_| plain_code_block(code, language))
    }
}

/// Unhighlighted code block, escaped for embedding in HTML.
fn plain_code_block(code: &str, language: &str) -> String {
    let escaped = html_escape(code);
    if language.is_empty() {
        format!("<pre><code>{escaped}</code></pre>")
    } else {
        format!("<pre><code class=\"language-{language}\">{escaped}</code></pre>")
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
