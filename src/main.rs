//! scopes: apply named include/exclude scopes to an editor's file explorer

use anyhow::Result;

fn main() -> Result<()> {
    scopes::cli::run()
}
