//! The `names` command: list catalog type names, optionally filtered.

use std::path::PathBuf;

use ctygen_core::pattern::matches;
use ctygen_core::{SnapshotCatalog, TypeCatalog};

pub struct NamesArgs {
    pub pattern: Option<String>,
    pub catalog: PathBuf,
}

pub fn run(args: NamesArgs) {
    let catalog = SnapshotCatalog::load(&args.catalog).unwrap_or_else(|e| {
        eprintln!("error: {}: {e}", args.catalog.display());
        std::process::exit(1);
    });

    for name in catalog.names() {
        let keep = match &args.pattern {
            Some(pattern) => matches(pattern, name),
            None => true,
        };
        if keep {
            println!("{name}");
        }
    }
}
