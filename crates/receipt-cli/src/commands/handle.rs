//! Handle command - process every record of a notification document.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::{error, info};

use receipt_core::{IngestionPipeline, InvocationResponse, UploadEvent};

use super::{build_ocr, build_store, load_config};

/// Arguments for the handle command.
#[derive(Args)]
pub struct HandleArgs {
    /// Notification JSON file ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Run on-device OCR instead of replaying recorded detection responses
    #[arg(long)]
    local_ocr: bool,
}

pub async fn run(args: HandleArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let json = if args.input.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        fs::read_to_string(&args.input)?
    };
    let events = UploadEvent::from_notification(&json)?;
    info!("Notification carries {} records", events.len());

    let ocr = build_ocr(&config, args.local_ocr)?;
    let pipeline = Arc::new(IngestionPipeline::from_config(ocr, build_store(&config), &config));

    // Each record is an independent ingestion.
    let handles: Vec<_> = events
        .into_iter()
        .map(|event| {
            let pipeline = Arc::clone(&pipeline);
            tokio::task::spawn_blocking(move || {
                let outcome = pipeline.ingest(&event);
                (event, InvocationResponse::from(&outcome))
            })
        })
        .collect();

    let mut failures = 0usize;
    for handle in handles {
        let (event, response) = handle.await?;
        if !response.is_success() {
            failures += 1;
            error!("Failed to ingest {}", event.object);
        }
        println!("{}", serde_json::to_string(&response)?);
    }

    if failures > 0 {
        anyhow::bail!("{} record(s) failed", failures);
    }

    eprintln!("{} Notification handled", style("✓").green());
    Ok(())
}
