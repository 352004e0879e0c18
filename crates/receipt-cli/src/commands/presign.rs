//! Presign command - issue an upload grant.

use chrono::Utc;
use clap::Args;

use receipt_core::UploadPolicy;

use super::load_config;

/// Arguments for the presign command.
#[derive(Args)]
pub struct PresignArgs {
    /// File extension of the upload (e.g. jpg, png)
    #[arg(short, long)]
    ext: Option<String>,
}

pub async fn run(args: PresignArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let policy = UploadPolicy::from_config(&config.upload);

    let grant = policy.issue(args.ext.as_deref(), Utc::now());
    println!("{}", serde_json::to_string_pretty(&grant)?);

    Ok(())
}
