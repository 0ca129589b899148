use std::path::{Path, PathBuf};

use super::catalog::{CatalogWriter, NoCatalog};
use super::highlight::Highlighter;
use super::metadata::{Metadata, MetadataError, PostState, timestamp};
use super::post::{self, PostError, PostSource};
use super::template::{Template, TemplateError};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("post error: {0}")]
    Post(#[from] PostError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct BuildResult {
    pub output_dir: PathBuf,
    pub posts: usize,
    pub new: usize,
    pub modified: usize,
    pub stable: usize,
}

pub struct Builder {
    posts_dir: PathBuf,
    template_path: PathBuf,
    output_dir: PathBuf,
    metadata_path: PathBuf,
    catalog: Box<dyn CatalogWriter>,
}

impl Builder {
    pub fn new(
        posts_dir: PathBuf,
        template_path: PathBuf,
        output_dir: PathBuf,
        metadata_path: PathBuf,
    ) -> Self {
        Self {
            posts_dir,
            template_path,
            output_dir,
            metadata_path,
            catalog: Box::new(NoCatalog),
        }
    }

    /// Replace the catalog hook run after all posts are processed.
    pub fn with_catalog(mut self, catalog: impl CatalogWriter + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    /// Run the build pipeline:
    /// 1. Load metadata and prune entries for deleted posts
    /// 2. Scan the posts directory
    /// 3. Load the page template
    /// 4. Process each post and write its HTML
    /// 5. Run the catalog hook
    /// 6. Write the metadata back to disk
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        println!("Loading metadata from {}...", self.metadata_path.display());
        let mut metadata = Metadata::load(&self.metadata_path)?;
        let pruned = metadata.prune();
        if pruned > 0 {
            println!("Dropped {pruned} record(s) for deleted posts");
        }

        println!("Checking for posts...");
        let posts = scan_posts(&self.posts_dir)?;

        println!("Loading template...");
        let template = Template::load(&self.template_path)?;

        std::fs::create_dir_all(&self.output_dir)?;

        let highlighter = Highlighter::default();
        let now = timestamp();
        let mut new = 0;
        let mut modified = 0;
        let mut stable = 0;

        for (path, name) in &posts {
            println!("Processing post {name}...");
            let source = PostSource {
                key: path.display().to_string(),
                file_name: name.clone(),
                bytes: std::fs::read(path)?,
            };

            let page = post::process(&source, &template, &highlighter, &mut metadata, &now)?;
            match page.state {
                PostState::New => new += 1,
                PostState::Modified => modified += 1,
                PostState::Stable => stable += 1,
            }

            let output_path = self.output_dir.join(&page.file_name);
            println!("Saving page to {}...", output_path.display());
            std::fs::write(&output_path, page.html)?;
        }

        self.catalog.generate(&metadata, &self.output_dir)?;

        println!("Writing new metadata...");
        metadata.save(&self.metadata_path)?;

        Ok(BuildResult {
            output_dir: self.output_dir.clone(),
            posts: posts.len(),
            new,
            modified,
            stable,
        })
    }
}

/// List the regular files in the posts directory, sorted by name for a
/// deterministic processing order.
fn scan_posts(dir: &Path) -> Result<Vec<(PathBuf, String)>, BuildError> {
    let mut posts = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            let name = entry.file_name().to_string_lossy().into_owned();
            posts.push((entry.path(), name));
        }
    }
    posts.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(posts)
}
