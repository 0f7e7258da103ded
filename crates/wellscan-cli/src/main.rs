//! WellScan: extract well and stimulation records from scanned permit OCR text.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wellscan_core::ExtractionConfig;
use wellscan_extract::DocumentExtractor;
use wellscan_runtime::{load_into, Orchestrator};
use wellscan_store::MemoryStore;

mod corpus;

fn print_help() {
    println!("WellScan - oil well document field extraction");
    println!();
    println!("Usage: wellscan <command>");
    println!();
    println!("Commands:");
    println!("  extract <dir> [out.jsonl]   Extract every .txt file in a directory");
    println!("  show <file.txt>             Extract one file and print it as JSON");
    println!("  help                        Show this help message");
    println!();
    println!("Environment:");
    println!("  WELLSCAN_CONFIG             JSON file with extraction settings");
    println!("  WELLSCAN_STATE              Default state code (ND)");
    println!("  WELLSCAN_WORKERS            Worker threads, 0 for one per core");
    println!("  WELLSCAN_PREFER_SITE_POSITION  Prefer survey site-position coordinates");
}

fn run_extract(
    config: ExtractionConfig,
    dir: PathBuf,
    out: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let documents = corpus::read_corpus(&dir)?;
    info!("Found {} text files in {}", documents.len(), dir.display());

    let orchestrator = Orchestrator::new(config);
    let report = orchestrator.run_batch(documents);

    let store = MemoryStore::new();
    let loaded = load_into(&store, report.extracted());
    info!(
        "Store holds {} wells and {} stimulation rows",
        store.wells().len(),
        store.stimulation_count()
    );

    if let Some(path) = out {
        let written = corpus::write_jsonl(&path, report.extracted())?;
        info!("Wrote {} records to {}", written, path.display());
    }

    print!("{}", report.summary.render());
    println!(
        "Loaded:               {} new, {} updated, {} stimulation rows",
        loaded.inserted, loaded.updated, loaded.stimulation_rows
    );
    for failed in &loaded.failed {
        println!(
            "  not stored #{} {}: {}",
            failed.index,
            failed.source.as_deref().unwrap_or("<unnamed>"),
            failed.error
        );
    }
    Ok(report.summary.succeeded > 0 || report.summary.documents == 0)
}

fn run_show(config: ExtractionConfig, path: PathBuf) -> anyhow::Result<()> {
    let document = corpus::read_document(&path)?;
    let extracted = DocumentExtractor::new(config)
        .extract(&document)
        .map_err(|e| anyhow::anyhow!("Failed to extract {}: {}", path.display(), e))?;
    println!("{}", serde_json::to_string_pretty(&extracted)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_help();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "extract" => {
            if args.len() < 3 {
                eprintln!("Usage: wellscan extract <dir> [out.jsonl]");
                std::process::exit(1);
            }
            let config = ExtractionConfig::from_env()?;
            let out = args.get(3).map(PathBuf::from);
            let any_succeeded = run_extract(config, PathBuf::from(&args[2]), out)?;
            std::process::exit(if any_succeeded { 0 } else { 1 });
        }
        "show" => {
            if args.len() < 3 {
                eprintln!("Usage: wellscan show <file.txt>");
                std::process::exit(1);
            }
            let config = ExtractionConfig::from_env()?;
            run_show(config, PathBuf::from(&args[2]))
        }
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}. Use 'wellscan help' for usage.", other);
            std::process::exit(1);
        }
    }
}
