use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// 16 MiB per request
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Language the linguistic resources are configured for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Portuguese,
    English,
    Spanish,
    French,
    German,
    Italian,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portuguese => "portuguese",
            Self::English => "english",
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::German => "german",
            Self::Italian => "italian",
        }
    }

    pub(crate) const fn algorithm(self) -> rust_stemmers::Algorithm {
        match self {
            Self::Portuguese => rust_stemmers::Algorithm::Portuguese,
            Self::English => rust_stemmers::Algorithm::English,
            Self::Spanish => rust_stemmers::Algorithm::Spanish,
            Self::French => rust_stemmers::Algorithm::French,
            Self::German => rust_stemmers::Algorithm::German,
            Self::Italian => rust_stemmers::Algorithm::Italian,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "portuguese" | "pt" | "pt-br" | "pt_br" => Ok(Self::Portuguese),
            "english" | "en" => Ok(Self::English),
            "spanish" | "es" => Ok(Self::Spanish),
            "french" | "fr" => Ok(Self::French),
            "german" | "de" => Ok(Self::German),
            "italian" | "it" => Ok(Self::Italian),
            other => Err(Error::InvalidConfig(format!("unknown language: {other}"))),
        }
    }
}

/// Comparison configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub language: Language,
    /// Stopword list to load instead of the embedded one, one word per line
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

const fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            stopwords_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let language = match std::env::var("DOCCMP_LANGUAGE") {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => Language::default(),
        };

        let stopwords_path = std::env::var_os("DOCCMP_STOPWORDS")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let max_upload_bytes = match std::env::var("DOCCMP_MAX_UPLOAD_BYTES") {
            Ok(value) => value.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("DOCCMP_MAX_UPLOAD_BYTES is not a size: {value}"))
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            language,
            stopwords_path,
            max_upload_bytes,
        })
    }

    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_stopwords_path(mut self, path: PathBuf) -> Self {
        self.stopwords_path = Some(path);
        self
    }
}
