use anyhow::{Context, Result};
use log::info;
use std::env;
use std::path::PathBuf;

use cotizaciones::extraction_config::{ExtractionConfig, ExtractionMode};
use cotizaciones::measure_extractor::MeasureExtractor;
use cotizaciones::quotation::{format_measures_for_display, pieces_by_edge_banding};
use cotizaciones::quote_session::QuoteSession;
use cotizaciones::transcript::read_transcript;

const USAGE: &str = "Uso: cotizaciones [--modo dictado|imagen] [ARCHIVO]";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let default_mode = env::var("QUOTE_MODE").unwrap_or_else(|_| "dictado".to_string());
    let (mode, path) = parse_args(env::args().skip(1), &default_mode)?;

    let config = ExtractionConfig::from_env().context("Invalid extraction configuration")?;
    let session = QuoteSession::new(MeasureExtractor::with_config(config));

    let text = read_transcript(path.as_deref())?;
    info!("Extracting measures in {:?} mode", mode);

    let appended = session.ingest(&text, mode).await;
    if appended == 0 {
        eprintln!("No se detectaron medidas válidas");
    }

    let records = session.snapshot().await;
    eprint!("{}", format_measures_for_display(&records));
    for (banding, pieces) in pieces_by_edge_banding(&records) {
        eprintln!("  Bordo {}: {} piezas", banding.display_name(), pieces);
    }
    println!("{}", serde_json::to_string_pretty(&records)?);

    info!("Total pieces: {}", session.total_pieces().await);
    Ok(())
}

fn parse_args(
    args: impl Iterator<Item = String>,
    default_mode: &str,
) -> Result<(ExtractionMode, Option<PathBuf>)> {
    let mut mode: ExtractionMode = default_mode.parse()?;
    let mut path = None;
    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--modo" | "--mode" | "-m" => {
                let value = args
                    .next()
                    .with_context(|| format!("Missing value for {arg}\n{USAGE}"))?;
                mode = value.parse()?;
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if path.is_none() => path = Some(PathBuf::from(other)),
            other => anyhow::bail!("Unexpected argument: {other}\n{USAGE}"),
        }
    }

    Ok((mode, path))
}
