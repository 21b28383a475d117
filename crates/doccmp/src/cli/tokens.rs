use std::path::Path;

use anyhow::Result;
use doccmp_core::{read_document, Comparator, Config};

use super::describe;

pub fn run(config: &Config, file: &Path) -> Result<()> {
    let comparator = Comparator::new(config).map_err(describe)?;
    let document = read_document(file).map_err(describe)?;
    let tokens = comparator.tokens(&document).map_err(describe)?;

    if tokens.is_empty() {
        eprintln!("{}: no tokens after normalization", document.name);
    }
    for token in &tokens {
        println!("{token}");
    }

    Ok(())
}
