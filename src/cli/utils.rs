//! Shared CLI utilities.

use super::Store;
use crate::exclude::ExclusionOutcome;
use crate::utils::{lexical_normalize, to_posix_path};
use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

/// Resolve a path argument against the current directory, lexically.
pub fn absolute_arg(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(lexical_normalize(&joined))
}

/// Render a path argument the way the store expects it: absolute, slash separated.
pub fn path_arg(path: &Path) -> Result<String> {
    Ok(to_posix_path(&absolute_arg(path)?))
}

/// Refresh the store and tell the user what happened to files.exclude.
pub fn apply(store: &mut Store) -> Result<()> {
    match store.refresh()? {
        ExclusionOutcome::Apply(map) => {
            println!(
                "Wrote {} exclusion entries to {}",
                map.len(),
                store.settings().path().display()
            );
        }
        ExclusionOutcome::Unchanged { message } => {
            eprintln!("{}", style(message).yellow());
        }
    }
    Ok(())
}
