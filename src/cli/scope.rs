//! Scope mutation commands

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

use super::utils::{absolute_arg, apply, path_arg};
use super::Store;
use crate::domain::ScopeList;

#[derive(Args)]
pub struct NameArgs {
    /// Scope name
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args)]
pub struct PathArgs {
    /// File or directory (relative to the current directory)
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

pub fn use_scope(store: &mut Store, args: NameArgs) -> Result<()> {
    let existed = store.scope(&args.name).is_some();
    store.set_active_scope(&args.name)?;
    if existed {
        println!("Active scope: {}", style(&args.name).bold());
    } else {
        println!("Created and activated scope {}", style(&args.name).bold());
    }
    apply(store)
}

pub fn delete(store: &mut Store, args: NameArgs) -> Result<()> {
    if !store.delete_scope(&args.name)? {
        println!("No scope named '{}'", args.name);
        return Ok(());
    }
    println!("Deleted scope '{}'", args.name);
    if store.active_scope() == args.name {
        eprintln!(
            "{}",
            style(format!(
                "'{}' was the active scope; run `scopes use <NAME>` to pick another",
                args.name
            ))
            .yellow()
        );
    }
    apply(store)
}

pub fn toggle(store: &mut Store) -> Result<()> {
    let enabled = store.toggle()?;
    println!("Scopes {}", if enabled { "enabled" } else { "disabled" });
    apply(store)
}

pub fn include(store: &mut Store, args: PathArgs) -> Result<()> {
    toggle_path(store, ScopeList::Included, &args.path)
}

pub fn exclude(store: &mut Store, args: PathArgs) -> Result<()> {
    toggle_path(store, ScopeList::Excluded, &args.path)
}

fn toggle_path(store: &mut Store, list: ScopeList, path: &Path) -> Result<()> {
    if store.workspace().folder_for(&absolute_arg(path)?).is_none() {
        eprintln!(
            "{}",
            style(format!("{} is outside every workspace folder", path.display())).yellow()
        );
    }

    let arg = path_arg(path)?;
    let added = store.toggle_item(list, &arg)?;
    let stored = store.workspace().as_relative_path(&arg);
    if added {
        println!("Added {} to {} paths of scope '{}'", stored, list, store.active_scope());
    } else {
        println!("Removed {} from {} paths of scope '{}'", stored, list, store.active_scope());
    }
    apply(store)
}
