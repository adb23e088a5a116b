//! Decode a tar archive, list its entries, and extract matching files.
//!
//! Usage:
//!   cargo run --release --example extract --features async -- archive.tar output_dir/ ['pattern'...]

use std::path::Path;
use std::sync::Arc;
use tar_stream::{ByteSource, DecodeOptions, LocalFileSource, WindowDecoder};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: extract <archive.tar> <output_dir> [pattern...]");
        eprintln!("  extract ./bundle.tar ./out/ '\\.json$'");
        std::process::exit(1);
    }

    let archive_path = &args[1];
    let output_dir = Path::new(&args[2]);
    let patterns = args[3..]
        .iter()
        .map(|p| regex::Regex::new(p))
        .collect::<Result<Vec<_>, _>>()?;

    std::fs::create_dir_all(output_dir)?;

    let source: Arc<dyn ByteSource> = Arc::new(LocalFileSource::new(archive_path)?);
    let options = DecodeOptions {
        patterns,
        ..DecodeOptions::default()
    };
    let files = WindowDecoder::new(source).decode(&options).await?;

    println!("{} entr(ies) in archive:", files.len());
    for f in &files {
        println!("  {} ({} bytes)", f.name, f.content.len());
    }

    for f in files.iter().filter(|f| !f.content.is_empty()) {
        let out_path = output_dir.join(&f.name);
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&out_path, &f.content)?;
        println!("Extracted {} ({} bytes)", f.name, f.content.len());
    }

    Ok(())
}
