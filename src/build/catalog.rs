//! Catalog generation hook.
//!
//! Runs once per build, after all posts are rendered and before the
//! metadata is written back. The default implementation produces no
//! output; the original tool reserved this step without ever filling
//! it in.

use std::path::Path;

use super::metadata::Metadata;

/// Build-wide hook invoked after all posts are processed.
pub trait CatalogWriter {
    /// Generate catalog output from the final post metadata.
    fn generate(&self, metadata: &Metadata, output_dir: &Path) -> std::io::Result<()>;
}

/// Placeholder catalog writer that generates nothing.
pub struct NoCatalog;

impl CatalogWriter for NoCatalog {
    fn generate(&self, _metadata: &Metadata, _output_dir: &Path) -> std::io::Result<()> {
        Ok(())
    }
}
