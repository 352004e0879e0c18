//! Ingest command - run the pipeline for a single object.

use clap::Args;
use console::style;
use tracing::info;

use receipt_core::{IngestionPipeline, InvocationResponse, Outcome, UploadEvent};

use super::{build_ocr, build_store, load_config};

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Object key (e.g. uploads/1234.jpg)
    #[arg(required = true)]
    key: String,

    /// Bucket name (default: upload bucket from config)
    #[arg(short, long)]
    bucket: Option<String>,

    /// Run on-device OCR instead of replaying recorded detection responses
    #[arg(long)]
    local_ocr: bool,

    /// Print the host envelope instead of the plain response body
    #[arg(long)]
    envelope: bool,
}

pub async fn run(args: IngestArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let bucket = args.bucket.unwrap_or_else(|| config.upload.bucket.clone());

    let ocr = build_ocr(&config, args.local_ocr)?;
    let pipeline = IngestionPipeline::from_config(ocr, build_store(&config), &config);

    let event = UploadEvent::new(bucket, args.key);
    let outcome = tokio::task::spawn_blocking(move || pipeline.ingest(&event)).await?;
    let response = InvocationResponse::from(&outcome);

    if args.envelope {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if let Some(body) = &response.body {
        println!("{}", serde_json::to_string_pretty(body)?);
    }

    match outcome {
        Outcome::Success(record) => {
            eprintln!(
                "{} {} {} -> {}",
                style("✓").green(),
                record.category,
                record.amount,
                record.id
            );
            Ok(())
        }
        Outcome::Ignored(reason) => {
            info!("Ignored: {}", reason);
            eprintln!("{} Skipped: {}", style("ℹ").blue(), reason);
            Ok(())
        }
        Outcome::Failure(e) => anyhow::bail!("Ingestion failed: {}", e),
    }
}
