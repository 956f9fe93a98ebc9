//! strudel-manifest - Strudel sample manifest builder
//!
//! Scans a folder of audio samples, classifies every file by filename and
//! path heuristics (BPM+key loops, drum-loop groups, keymapped one-shots)
//! and prints a deterministic `strudel.json`-style manifest to stdout.
//! Diagnostics go to stderr so the output stays pipeable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strudel_manifest::services::{slugify, FileScanner, ManifestBuilder};

/// Command-line arguments for strudel-manifest
#[derive(Parser, Debug)]
#[command(name = "strudel-manifest")]
#[command(about = "Builds a Strudel sample manifest (BPM+key loops; keymapped one-shots)")]
#[command(version)]
struct Args {
    /// Folder to scan
    #[arg(long)]
    root: PathBuf,

    /// CDN base URL for _base
    #[arg(long)]
    base: String,

    /// Key prefix (default: slug of root folder)
    #[arg(long)]
    prefix: Option<String>,
}

fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr, the manifest owns stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strudel_manifest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("Failed to resolve root folder {}", args.root.display()))?;

    let prefix = match args.prefix {
        Some(prefix) => prefix,
        None => {
            let name = root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            slugify(&name)
        }
    };

    info!("Scanning {} (prefix: {})", root.display(), prefix);

    let scanner = FileScanner::new();
    let files = scanner
        .scan(&root)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let mut builder = ManifestBuilder::new(prefix);
    for file in &files {
        builder.add(file);
    }
    let manifest = builder.build(&args.base);

    let rendered =
        serde_json::to_string_pretty(&manifest).context("Failed to render manifest")?;
    println!("{}", rendered);

    Ok(())
}
