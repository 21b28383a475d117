//! Linguistic resources: stopword list and stemmer for the configured
//! language.
//!
//! Resources are loaded once at process start and shared read-only, so a
//! missing resource fails startup instead of a comparison.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_stemmers::Stemmer;

use crate::config::{Config, Language};
use crate::error::{Error, Result};

const PORTUGUESE_STOPWORDS: &str = include_str!("../resources/stopwords/portuguese.txt");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopwordSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for StopwordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => f.write_str("embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct LinguisticResources {
    language: Language,
    stopwords: HashSet<String>,
    stopword_source: StopwordSource,
    stemmer: Stemmer,
}

impl LinguisticResources {
    pub fn load(config: &Config) -> Result<Self> {
        let (stopwords, stopword_source) = match &config.stopwords_path {
            Some(path) => (read_stopword_file(path)?, StopwordSource::File(path.clone())),
            None => (
                embedded_stopwords(config.language)?,
                StopwordSource::Embedded,
            ),
        };

        if stopwords.is_empty() {
            return Err(Error::ResourceUnavailable(format!(
                "stopword list for {} is empty ({stopword_source})",
                config.language
            )));
        }

        tracing::info!(
            "Loaded {} {} stopwords from {}",
            stopwords.len(),
            config.language,
            stopword_source
        );

        Ok(Self {
            language: config.language,
            stopwords,
            stopword_source,
            stemmer: Stemmer::create(config.language.algorithm()),
        })
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub const fn stopword_source(&self) -> &StopwordSource {
        &self.stopword_source
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }
}

impl std::fmt::Debug for LinguisticResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinguisticResources")
            .field("language", &self.language)
            .field("stopwords", &self.stopwords.len())
            .field("stopword_source", &self.stopword_source)
            .finish_non_exhaustive()
    }
}

fn embedded_stopwords(language: Language) -> Result<HashSet<String>> {
    match language {
        Language::Portuguese => Ok(parse_stopwords(PORTUGUESE_STOPWORDS)),
        other => Err(Error::ResourceUnavailable(format!(
            "no embedded stopword list for {other}; set DOCCMP_STOPWORDS"
        ))),
    }
}

fn read_stopword_file(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::ResourceUnavailable(format!("stopword file {}: {e}", path.display()))
    })?;
    Ok(parse_stopwords(&content))
}

/// One word per line; blank lines and `#` comments are ignored.
fn parse_stopwords(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
