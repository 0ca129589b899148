//! Literal placeholder substitution over a single HTML template.
//!
//! The template carries four fixed tokens replaced by plain string
//! substitution. No escaping, no loops, no conditionals.

use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The page template, loaded once per build.
pub struct Template {
    raw: String,
}

/// Values substituted into the template for one post.
pub struct TemplateFill<'a> {
    pub content: &'a str,
    pub title: &'a str,
    pub published: &'a str,
    pub modified: &'a str,
}

impl Template {
    /// Load the template from disk.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { raw })
    }

    /// Build a template from an in-memory string.
    pub fn from_raw(raw: String) -> Self {
        Self { raw }
    }

    /// Replace the four placeholder tokens with the given values.
    pub fn render(&self, fill: &TemplateFill<'_>) -> String {
        self.raw
            .replace("[[content]]", fill.content)
            .replace("[[title]]", fill.title)
            .replace("[[date]]", fill.published)
            .replace("[[modified]]", fill.modified)
    }
}
