use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use super::extractor::{CompositeExtractor, ExtractedText, Extractor, NoTextReason, RawDocument};
use super::normalizer::{Normalizer, TokenStream};
use super::scorer::{self, SimilarityScore};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::resources::LinguisticResources;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    Extracting,
    Extracted,
    Normalizing,
    Normalized,
    Scoring,
    Done,
    Failed,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Extracting => "extracting",
            Self::Extracted => "extracted",
            Self::Normalizing => "normalizing",
            Self::Normalized => "normalized",
            Self::Scoring => "scoring",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// The stage that follows on success. `Done` and `Failed` are terminal.
    pub const fn next(self) -> Self {
        match self {
            Self::Start => Self::Extracting,
            Self::Extracting => Self::Extracted,
            Self::Extracted => Self::Normalizing,
            Self::Normalizing => Self::Normalized,
            Self::Normalized => Self::Scoring,
            Self::Scoring | Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks one comparison through its stages.
#[derive(Debug)]
struct Run {
    stage: Stage,
}

impl Run {
    const fn new() -> Self {
        Self {
            stage: Stage::Start,
        }
    }

    fn advance(&mut self) {
        self.stage = self.stage.next();
        tracing::debug!("Comparison stage: {}", self.stage);
    }

    fn fail(&mut self, error: Error) -> Error {
        tracing::warn!("Comparison failed while {}: {}", self.stage, error);
        self.stage = Stage::Failed;
        error
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub score: SimilarityScore,
    pub document_a: String,
    pub document_b: String,
}

/// Runs extraction, normalization and scoring for a pair of documents.
///
/// Holds no per-comparison state; one instance can serve concurrent callers.
pub struct Comparator {
    extractor: Box<dyn Extractor>,
    normalizer: Normalizer,
}

impl Comparator {
    /// Loads linguistic resources, failing if any is unavailable.
    pub fn new(config: &Config) -> Result<Self> {
        let resources = LinguisticResources::load(config)?;
        Ok(Self::with_resources(Arc::new(resources)))
    }

    #[must_use]
    pub fn with_resources(resources: Arc<LinguisticResources>) -> Self {
        Self {
            extractor: Box::new(CompositeExtractor::default()),
            normalizer: Normalizer::new(resources),
        }
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn resources(&self) -> &LinguisticResources {
        self.normalizer.resources()
    }

    pub fn compare(&self, a: &RawDocument, b: &RawDocument) -> Result<Comparison> {
        let mut run = Run::new();

        for document in [a, b] {
            if document.format.is_none() {
                return Err(run.fail(Error::UnsupportedFormat {
                    name: document.name.clone(),
                }));
            }
        }

        run.advance();
        let text_a = self.extract_text(a).map_err(|e| run.fail(e))?;
        let text_b = self.extract_text(b).map_err(|e| run.fail(e))?;
        run.advance();

        run.advance();
        let tokens_a = self.normalizer.normalize(&text_a);
        let tokens_b = self.normalizer.normalize(&text_b);
        run.advance();

        if tokens_a.is_empty() || tokens_b.is_empty() {
            tracing::info!(
                "Normalization left no tokens ({}: {}, {}: {})",
                a.name,
                tokens_a.len(),
                b.name,
                tokens_b.len()
            );
        }

        run.advance();
        let score = scorer::score(&tokens_a, &tokens_b);
        run.advance();

        tracing::info!("Similarity of '{}' and '{}': {}", a.name, b.name, score);

        Ok(Comparison {
            score,
            document_a: a.name.clone(),
            document_b: b.name.clone(),
        })
    }

    pub fn compare_bytes(
        &self,
        name_a: &str,
        bytes_a: Vec<u8>,
        name_b: &str,
        bytes_b: Vec<u8>,
    ) -> Result<Comparison> {
        self.compare(
            &RawDocument::new(name_a, bytes_a),
            &RawDocument::new(name_b, bytes_b),
        )
    }

    pub fn compare_files(&self, path_a: &Path, path_b: &Path) -> Result<Comparison> {
        let a = read_document(path_a)?;
        let b = read_document(path_b)?;
        self.compare(&a, &b)
    }

    /// Scores two texts that are already extracted.
    pub fn compare_text(&self, a: &str, b: &str) -> SimilarityScore {
        scorer::score(&self.normalizer.normalize(a), &self.normalizer.normalize(b))
    }

    pub fn tokens(&self, document: &RawDocument) -> Result<TokenStream> {
        if document.format.is_none() {
            return Err(Error::UnsupportedFormat {
                name: document.name.clone(),
            });
        }
        let text = self.extract_text(document)?;
        Ok(self.normalizer.normalize(&text))
    }

    fn extract_text(&self, document: &RawDocument) -> Result<String> {
        match self.extractor.extract(document) {
            ExtractedText::Text(text) => Ok(text),
            ExtractedText::NoText(NoTextReason::Unsupported) => Err(Error::UnsupportedFormat {
                name: document.name.clone(),
            }),
            ExtractedText::NoText(reason) => Err(Error::ExtractionFailed {
                name: document.name.clone(),
                reason: reason.to_string(),
            }),
        }
    }
}

/// Reads a file from disk, naming the document after its file name.
pub fn read_document(path: &Path) -> Result<RawDocument> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
        .into_owned();

    Ok(RawDocument::new(name, bytes))
}
