//! Refresh command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use super::utils::apply;
use super::Store;
use crate::exclude::ExclusionOutcome;

#[derive(Args)]
pub struct RefreshArgs {
    /// Print the computed exclusion map as JSON instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(store: &mut Store, args: RefreshArgs) -> Result<()> {
    if !args.dry_run {
        return apply(store);
    }

    match store.generate_exclusion_globs() {
        ExclusionOutcome::Apply(map) => {
            let json = serde_json::to_string_pretty(&map)
                .context("Failed to serialize exclusion map")?;
            println!("{}", json);
        }
        ExclusionOutcome::Unchanged { message } => {
            eprintln!("{}", style(message).yellow());
        }
    }
    Ok(())
}
