//! Read-only commands: list, show and check

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use super::utils::path_arg;
use super::Store;
use crate::domain::ScopeList;
use crate::exclude::ExclusionMatcher;

#[derive(Args)]
pub struct ShowArgs {
    /// Scope to show (default: the active scope)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Paths to check (relative to the current directory)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn list(store: &Store) -> Result<()> {
    let status =
        if store.is_enabled() { style("enabled").green() } else { style("disabled").red() };
    println!("Scopes ({})", status);

    for name in store.scope_names() {
        if name == store.active_scope() {
            println!("  {} {}", style("●").green(), style(name).bold());
        } else {
            println!("  ○ {}", name);
        }
    }

    if store.scope(store.active_scope()).is_none() {
        println!("Active scope '{}' does not exist", store.active_scope());
    }
    Ok(())
}

pub fn show(store: &Store, args: ShowArgs) -> Result<()> {
    let name = args.name.as_deref().unwrap_or(store.active_scope());
    let Some(scope) = store.scope(name) else {
        anyhow::bail!("Unknown scope: {}", name);
    };

    println!("Scope: {}", style(name).bold());
    for (label, list) in [("Include", ScopeList::Included), ("Exclude", ScopeList::Excluded)] {
        let paths = scope.list(list);
        println!("{} ({})", label, paths.len());
        for path in paths {
            println!("  {}", path);
        }
    }
    Ok(())
}

pub fn check(store: &Store, args: CheckArgs) -> Result<()> {
    let matcher = ExclusionMatcher::new(&store.host_exclusions()?)?;

    for path in &args.paths {
        let relative = store.workspace().as_relative_path(&path_arg(path)?);
        match matcher.hidden_by(&relative) {
            Some(pattern) => println!("hidden   {} ({})", relative, pattern),
            None => println!("visible  {}", relative),
        }
    }
    Ok(())
}
