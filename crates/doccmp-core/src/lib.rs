#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod error;
pub mod ingest;
pub mod resources;

pub use config::{Config, Language};
pub use error::{Error, ErrorKind, Result};
pub use ingest::{
    extract, read_document, score, Comparator, Comparison, CompositeExtractor, DocumentFormat,
    ExtractedText, Extractor, NoTextReason, Normalizer, RawDocument, SimilarityScore, Stage,
    TokenStream,
};
pub use resources::{LinguisticResources, StopwordSource};
