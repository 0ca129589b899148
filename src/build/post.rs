//! Per-post processing.
//!
//! Each post is threaded through a pure pipeline: title extraction, content
//! digest, metadata tracking, markdown rendering, math injection, and
//! template substitution. All per-post state is local to [`process`]; the
//! only shared mutation is the metadata record update.

use std::path::{Path, PathBuf};

use super::highlight::Highlighter;
use super::markdown::render_markdown;
use super::mathjax;
use super::metadata::{Metadata, PostState};
use super::template::{Template, TemplateFill};

#[derive(thiserror::Error, Debug)]
pub enum PostError {
    #[error("post {0} is not valid UTF-8")]
    Encoding(String),
}

/// A post as read from disk, before any processing.
pub struct PostSource {
    /// Source path string, used as the metadata key
    pub key: String,
    /// The source file's basename
    pub file_name: String,
    /// Raw file bytes; the digest covers these exactly
    pub bytes: Vec<u8>,
}

/// The result of processing one post.
pub struct RenderedPage {
    /// Output basename: source basename with the extension swapped to .html
    pub file_name: PathBuf,
    /// Final page HTML, ready to write
    pub html: String,
    /// How this post related to the previous run's metadata
    pub state: PostState,
}

/// Run a single post through the pipeline.
///
/// The page HTML is produced unconditionally; only the metadata update
/// depends on whether the content changed since the last run.
pub fn process(
    source: &PostSource,
    template: &Template,
    highlighter: &Highlighter,
    metadata: &mut Metadata,
    now: &str,
) -> Result<RenderedPage, PostError> {
    let text = std::str::from_utf8(&source.bytes)
        .map_err(|_| PostError::Encoding(source.key.clone()))?;

    let title = extract_title(text);
    let hash = content_digest(&source.bytes);
    let (state, record) = metadata.track(&source.key, &title, &hash, now);
    let published = record.published.clone();
    let modified = record.modified.clone();

    let has_math = mathjax::contains_math(text);

    let mut content = render_markdown(text, highlighter);
    if has_math {
        content = mathjax::inject(content);
    }

    let html = template.render(&TemplateFill {
        content: &content,
        title: &title,
        published: &published,
        modified: &modified,
    });

    Ok(RenderedPage {
        file_name: Path::new(&source.file_name).with_extension("html"),
        html,
        state,
    })
}

/// Derive the title from the first line of content, stripping a leading
/// heading marker if present.
pub fn extract_title(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    first_line.trim_start_matches('#').trim().to_string()
}

/// Hex digest of the raw post bytes, used to detect content changes.
pub fn content_digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, content: &str) -> PostSource {
        PostSource {
            key: format!("./posts/{name}"),
            file_name: name.to_string(),
            bytes: content.as_bytes().to_vec(),
        }
    }

    fn template() -> Template {
        Template::from_raw(
            "<title>[[title]]</title><main>[[content]]</main>[[date]]|[[modified]]".to_string(),
        )
    }

    #[test]
    fn test_extract_title_strips_heading_marker() {
        assert_eq!(extract_title("# Hello\nWorld"), "Hello");
        assert_eq!(extract_title("## Deep Heading\n"), "Deep Heading");
        assert_eq!(extract_title("Plain first line\nmore"), "Plain first line");
        assert_eq!(extract_title(""), "");
    }

    #[test]
    fn test_content_digest_tracks_content() {
        assert_eq!(content_digest(b"same"), content_digest(b"same"));
        assert_ne!(content_digest(b"same"), content_digest(b"different"));
    }

    #[test]
    fn test_process_new_post() {
        let mut metadata = Metadata::default();
        let source = source("a.md", "# Hello\n\nWorld");

        let page = process(
            &source,
            &template(),
            &Highlighter::default(),
            &mut metadata,
            "2026-01-01 10:00",
        )
        .unwrap();

        assert_eq!(page.state, PostState::New);
        assert_eq!(page.file_name, Path::new("a.html"));
        assert!(page.html.contains("<title>Hello</title>"));
        assert!(page.html.contains("<p>World</p>"));
        assert!(page.html.contains("2026-01-01 10:00|"));

        let record = metadata.get("./posts/a.md").unwrap();
        assert_eq!(record.title, "Hello");
        assert_eq!(record.modified, "");
    }

    #[test]
    fn test_process_unchanged_post_keeps_record() {
        let mut metadata = Metadata::default();
        let source = source("a.md", "# Hello\n\nWorld");

        process(
            &source,
            &template(),
            &Highlighter::default(),
            &mut metadata,
            "2026-01-01 10:00",
        )
        .unwrap();
        let page = process(
            &source,
            &template(),
            &Highlighter::default(),
            &mut metadata,
            "2026-01-02 11:00",
        )
        .unwrap();

        assert_eq!(page.state, PostState::Stable);
        let record = metadata.get("./posts/a.md").unwrap();
        assert_eq!(record.published, "2026-01-01 10:00");
        assert_eq!(record.modified, "");
    }

    #[test]
    fn test_process_changed_post_sets_modified() {
        let mut metadata = Metadata::default();

        process(
            &source("a.md", "# Hello\n\nWorld"),
            &template(),
            &Highlighter::default(),
            &mut metadata,
            "2026-01-01 10:00",
        )
        .unwrap();
        let page = process(
            &source("a.md", "# Hello\n\nWorld, revised"),
            &template(),
            &Highlighter::default(),
            &mut metadata,
            "2026-01-02 11:00",
        )
        .unwrap();

        assert_eq!(page.state, PostState::Modified);
        assert!(page.html.contains("2026-01-01 10:00|2026-01-02 11:00"));

        let record = metadata.get("./posts/a.md").unwrap();
        assert_eq!(record.published, "2026-01-01 10:00");
        assert_eq!(record.modified, "2026-01-02 11:00");
    }

    #[test]
    fn test_process_math_post_gets_mathjax() {
        let mut metadata = Metadata::default();
        let source = source("math.md", "# Math\n\nEuler: \\(e^{i\\pi} = -1\\)");

        let page = process(
            &source,
            &template(),
            &Highlighter::default(),
            &mut metadata,
            "2026-01-01 10:00",
        )
        .unwrap();

        assert!(page.html.contains("polyfill.min.js"));
        assert!(page.html.contains("MathJax-script"));
    }

    #[test]
    fn test_process_plain_post_gets_no_mathjax() {
        let mut metadata = Metadata::default();
        let source = source("plain.md", "# Plain\n\nNothing mathy.");

        let page = process(
            &source,
            &template(),
            &Highlighter::default(),
            &mut metadata,
            "2026-01-01 10:00",
        )
        .unwrap();

        assert!(!page.html.contains("MathJax"));
    }

    #[test]
    fn test_process_rejects_invalid_utf8() {
        let mut metadata = Metadata::default();
        let source = PostSource {
            key: "./posts/bad.md".to_string(),
            file_name: "bad.md".to_string(),
            bytes: vec![0xff, 0xfe, 0xfd],
        };

        let result = process(
            &source,
            &template(),
            &Highlighter::default(),
            &mut metadata,
            "2026-01-01 10:00",
        );

        assert!(matches!(result, Err(PostError::Encoding(_))));
    }
}
