use std::path::PathBuf;

use clap::Parser;

mod build;

use build::Builder;

/// Convert a directory of markdown posts into static HTML pages,
/// tracking publish/modify timestamps between runs.
#[derive(Parser)]
struct Args {
    /// The directory containing markdown posts
    #[arg(long, default_value = "./posts")]
    posts_dir: PathBuf,

    /// The HTML page template
    #[arg(long, default_value = "./html/template.html")]
    template: PathBuf,

    /// The directory generated pages are written to
    #[arg(long, default_value = "./generated")]
    output_dir: PathBuf,

    /// The metadata sidecar file tracking publish state
    #[arg(long, default_value = "metadata.json")]
    metadata_file: PathBuf,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let builder = Builder::new(
        args.posts_dir,
        args.template,
        args.output_dir,
        args.metadata_file,
    );
    let result = builder.build()?;

    println!(
        "Built {} post(s) to {} ({} new, {} modified, {} unchanged)",
        result.posts,
        result.output_dir.display(),
        result.new,
        result.modified,
        result.stable
    );

    Ok(())
}
