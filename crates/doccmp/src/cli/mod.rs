pub mod check;
pub mod compare;
pub mod tokens;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use doccmp_core::{Config, Language};

#[derive(Parser)]
#[command(
    name = "doccmp",
    about = "Compare two documents by TF-IDF cosine similarity",
    version
)]
pub struct Cli {
    /// Language of the stopword list and stemmer (overrides DOCCMP_LANGUAGE)
    #[arg(long, global = true)]
    pub language: Option<Language>,
    /// Stopword list, one word per line (overrides DOCCMP_STOPWORDS)
    #[arg(long, global = true)]
    pub stopwords: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score the similarity of two .txt, .pdf or .docx files
    Compare {
        first: PathBuf,
        second: PathBuf,
        /// Print the full comparison as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the normalized tokens of a file, one per line
    Tokens { file: PathBuf },
    /// Verify that the linguistic resources load
    Check,
}

impl Cli {
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::from_env().map_err(describe)?;
        if let Some(language) = self.language {
            config = config.with_language(language);
        }
        if let Some(path) = &self.stopwords {
            config = config.with_stopwords_path(path.clone());
        }
        Ok(config)
    }
}

/// Attaches the error kind so scripts can tell bad input from a bad install.
pub fn describe(err: doccmp_core::Error) -> anyhow::Error {
    anyhow::anyhow!("{err} [{}]", err.kind())
}
