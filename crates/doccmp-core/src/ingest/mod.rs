mod extractor;
mod normalizer;
mod pipeline;
mod scorer;

pub use extractor::{
    extract, CompositeExtractor, DocumentFormat, DocxExtractor, ExtractedText, Extractor,
    NoTextReason, PdfExtractor, PlainTextExtractor, RawDocument,
};
pub use normalizer::{Normalizer, TokenStream};
pub use pipeline::{read_document, Comparator, Comparison, Stage};
pub use scorer::{score, SimilarityScore, MIN_TERM_CHARS};
