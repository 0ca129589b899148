//! MathJax injection for posts containing LaTeX math.
//!
//! Detection runs on the markdown source rather than the rendered HTML:
//! rendering can escape the backslash delimiters out of existence, which
//! would hide the pattern from a post-render scan.

use std::sync::LazyLock;

use regex::Regex;

/// Matches display `\[...\]` or inline `\(...\)` math delimiters on a
/// single line.
static MATH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\[.*\\\]|\\\(.*\\\)").expect("math pattern is valid"));

/// The script tags appended to pages that contain math: the ES6 polyfill
/// and the MathJax 3 CDN bundle.
pub const MATHJAX_SCRIPTS: &str = concat!(
    "<script src=\"https://polyfill.io/v3/polyfill.min.js?features=es6\"></script>\n",
    "<script id=\"MathJax-script\" async ",
    "src=\"https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js\"></script>",
);

/// Check the markdown source for math delimiters.
pub fn contains_math(source: &str) -> bool {
    MATH_PATTERN.is_match(source)
}

/// Append the MathJax loader scripts to rendered content.
pub fn inject(mut html: String) -> String {
    html.push('\n');
    html.push_str(MATHJAX_SCRIPTS);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_display_math() {
        assert!(contains_math(r"The identity \[e^{i\pi} + 1 = 0\] holds."));
    }

    #[test]
    fn test_detects_inline_math() {
        assert!(contains_math(r"Let \(x > 0\) be given."));
    }

    #[test]
    fn test_ignores_plain_text() {
        assert!(!contains_math("No math here, just [brackets] and (parens)."));
    }

    #[test]
    fn test_ignores_unclosed_delimiters() {
        assert!(!contains_math(r"A lone \[ opener never closes."));
    }

    #[test]
    fn test_delimiters_do_not_span_lines() {
        assert!(!contains_math("\\[ split across\nlines \\]"));
    }

    #[test]
    fn test_inject_appends_both_scripts() {
        let html = inject("<p>body</p>".to_string());

        assert!(html.starts_with("<p>body</p>"));
        assert!(html.contains("polyfill.min.js"));
        assert!(html.contains("MathJax-script"));
    }
}
