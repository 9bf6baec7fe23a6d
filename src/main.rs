use anyhow::Result;
use clap::Parser;
use ereader_exporter::{ExportConfig, ExportPipeline};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ereader-exporter")]
#[command(about = "Pack a PML markup document into an eReader PDB file", long_about = None)]
struct Args {
    /// Path to the PML markup file (cp1252 encoded)
    markup: PathBuf,

    /// Output .pdb file
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Directory containing images referenced from the markup
    #[arg(short = 'i', long)]
    images: Option<PathBuf>,

    /// Book title
    #[arg(long)]
    title: Option<String>,

    /// Author name (can be specified multiple times)
    #[arg(long = "author")]
    authors: Vec<String>,

    /// Copyright line
    #[arg(long)]
    rights: Option<String>,

    /// Publisher
    #[arg(long)]
    publisher: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = ExportConfig::new(args.markup, args.output.clone());
    if let Some(dir) = args.images {
        config = config.with_image_dir(dir);
    }
    if let Some(title) = args.title {
        config = config.with_title(title);
    }
    if !args.authors.is_empty() {
        config = config.with_authors(args.authors);
    }
    config.rights = args.rights;
    config.publisher = args.publisher;

    let pipeline = ExportPipeline::new(config);
    pipeline.export()?;

    log::info!("Export completed successfully!");
    log::info!("eReader book ready at: {:?}", args.output);

    Ok(())
}
