use anyhow::Result;
use doccmp_core::{Config, LinguisticResources};

use super::describe;

pub fn run(config: &Config) -> Result<()> {
    let resources = LinguisticResources::load(config).map_err(describe)?;

    println!("language:  {}", resources.language());
    println!(
        "stopwords: {} ({})",
        resources.stopword_count(),
        resources.stopword_source()
    );
    println!("stemmer:   snowball");

    Ok(())
}
