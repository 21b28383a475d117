use std::path::Path;

use anyhow::Result;
use doccmp_core::{Comparator, Config};

use super::describe;

pub fn run(config: &Config, first: &Path, second: &Path, json: bool) -> Result<()> {
    let comparator = Comparator::new(config).map_err(describe)?;
    let comparison = comparator.compare_files(first, second).map_err(describe)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("{}", comparison.score);
    }

    Ok(())
}
