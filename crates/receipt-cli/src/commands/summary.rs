//! Summary command - per-category totals of stored expenses.

use clap::Args;

use receipt_core::summary::summarize_source;
use receipt_core::Category;

use super::{build_store, load_config};

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Print a plain table instead of JSON
    #[arg(long)]
    table: bool,
}

pub async fn run(args: SummaryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = build_store(&config);

    let totals = summarize_source(&store)?;

    if args.table {
        for category in Category::TRACKED {
            println!("{:<10} {:>12}", category, totals.get(category).to_string());
        }
        println!("{:<10} {:>12}", "Total", totals.grand_total()?.to_string());
    } else {
        println!("{}", serde_json::to_string_pretty(&totals)?);
    }

    Ok(())
}
