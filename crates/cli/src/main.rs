// ABOUTME: CLI for building podcast RSS feeds from JSON manifests.
// ABOUTME: Reads a manifest from a file or stdin, optionally validates it, and writes the feed XML.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use podcast_feed::{FeedError, FeedManifest};
use tracing::{info, Level};

/// Build a podcast RSS feed from a JSON manifest.
#[derive(Parser, Debug)]
#[command(name = "podcast-cli")]
#[command(about = "Build podcast RSS 2.0 feeds with iTunes tags from JSON manifests", long_about = None)]
struct Args {
    /// Manifest file path. Use "-" to read from stdin.
    manifest: String,

    /// Write the feed to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Reject feeds with invalid URLs, language codes, enclosures or dates.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Log progress to stderr.
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let source = load_manifest(&args.manifest)?;
    let feed = FeedManifest::from_json_str(&source)
        .and_then(FeedManifest::into_feed)
        .with_context(|| format!("reading manifest {}", args.manifest))?;
    info!(title = feed.title(), items = feed.items().len(), "loaded manifest");

    if args.strict {
        if let Err(FeedError::Invalid(issues)) = feed.validate() {
            let listed: Vec<String> = issues.iter().map(|i| format!("  - {}", i)).collect();
            bail!(
                "feed failed validation with {} issue(s):\n{}",
                issues.len(),
                listed.join("\n")
            );
        }
    }

    let xml = feed.to_xml_string()?;

    match &args.output {
        Some(path) => {
            fs::write(path, &xml).with_context(|| format!("writing {:?}", path))?;
            info!(path = ?path, bytes = xml.len(), "wrote feed");
        }
        None => print!("{}", xml),
    }

    Ok(())
}

fn load_manifest(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}
