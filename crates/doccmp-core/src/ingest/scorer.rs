use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::normalizer::TokenStream;

/// Terms shorter than this never enter the vocabulary.
pub const MIN_TERM_CHARS: usize = 2;

/// Documents in a pairwise corpus.
const CORPUS_SIZE: f64 = 2.0;

/// Cosine similarity in `[0.0, 1.0]`. Out-of-range input is clamped and NaN
/// becomes `0.0`, so an invalid score cannot be constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    #[must_use]
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            tracing::debug!("Similarity was NaN, scoring 0");
            return Self::ZERO;
        }
        // An empty dot product sums to -0.0; keep the sign positive.
        Self(raw.clamp(0.0, 1.0) + 0.0)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for SimilarityScore {
    fn from(raw: f64) -> Self {
        Self::new(raw)
    }
}

impl From<SimilarityScore> for f64 {
    fn from(score: SimilarityScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

type TermVector<'a> = BTreeMap<&'a str, f64>;

/// TF-IDF cosine similarity of two token streams, with IDF computed from the
/// pair alone.
pub fn score(a: &TokenStream, b: &TokenStream) -> SimilarityScore {
    if a.is_empty() || b.is_empty() {
        tracing::debug!("Empty token stream, scoring 0");
        return SimilarityScore::ZERO;
    }

    let counts_a = term_counts(a);
    let counts_b = term_counts(b);

    if counts_a.is_empty() && counts_b.is_empty() {
        tracing::debug!("Empty vocabulary, scoring 0");
        return SimilarityScore::ZERO;
    }

    let vector_a = tfidf(&counts_a, &counts_b);
    let vector_b = tfidf(&counts_b, &counts_a);

    SimilarityScore::new(cosine(&vector_a, &vector_b))
}

fn term_counts(tokens: &TokenStream) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens
        .iter()
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
    {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Smoothed IDF: `ln((1 + n) / (1 + df)) + 1`.
fn idf(document_frequency: usize) -> f64 {
    ((1.0 + CORPUS_SIZE) / (1.0 + document_frequency as f64)).ln() + 1.0
}

fn tfidf<'a>(
    own: &BTreeMap<&'a str, usize>,
    other: &BTreeMap<&'a str, usize>,
) -> TermVector<'a> {
    own.iter()
        .map(|(&term, &tf)| {
            let df = 1 + usize::from(other.contains_key(term));
            (term, tf as f64 * idf(df))
        })
        .collect()
}

fn magnitude(vector: &TermVector<'_>) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

fn cosine(a: &TermVector<'_>, b: &TermVector<'_>) -> f64 {
    let norm = magnitude(a) * magnitude(b);
    if norm == 0.0 || !norm.is_finite() {
        tracing::debug!("Degenerate vector magnitude, scoring 0");
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
        .sum();

    dot / norm
}
