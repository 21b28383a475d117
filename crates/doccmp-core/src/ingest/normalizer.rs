use serde::{Deserialize, Serialize};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

use crate::resources::LinguisticResources;

/// Ordered stems of a document. Empty when every token was filtered out,
/// which is a legal result rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStream(Vec<String>);

impl TokenStream {
    #[must_use]
    pub const fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for TokenStream {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    resources: Arc<LinguisticResources>,
}

impl Normalizer {
    #[must_use]
    pub const fn new(resources: Arc<LinguisticResources>) -> Self {
        Self { resources }
    }

    pub fn resources(&self) -> &LinguisticResources {
        &self.resources
    }

    /// Lowercase, split on word boundaries, keep purely alphabetic tokens,
    /// drop stopwords, then stem.
    pub fn normalize(&self, text: &str) -> TokenStream {
        let lowered = text.to_lowercase();

        lowered
            .split_word_bounds()
            .filter(|token| is_alphabetic(token))
            .filter(|token| !self.resources.is_stopword(token))
            .map(|token| self.resources.stem(token))
            .collect()
    }
}

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn normalizer() -> Normalizer {
        let resources = LinguisticResources::load(&Config::default()).unwrap();
        Normalizer::new(Arc::new(resources))
    }

    #[test]
    fn test_case_folding_and_stemming() {
        let normalizer = normalizer();

        let upper = normalizer.normalize("OLÁ MUNDO");
        let lower = normalizer.normalize("olá mundo");

        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 2);
    }

    #[test]
    fn test_digits_and_punctuation_only() {
        let tokens = normalizer().normalize("123 456 !!!");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_mixed_tokens_dropped_whole() {
        let normalizer = normalizer();

        let tokens = normalizer.normalize("r2d2 abc123 gatos");
        assert_eq!(tokens.as_slice(), &[normalizer.resources().stem("gatos")]);
    }

    #[test]
    fn test_stopwords_removed() {
        let tokens = normalizer().normalize("o gato e a casa de você");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_only_stopwords() {
        let tokens = normalizer().normalize("de que não para com uma");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let normalizer = normalizer();

        let tokens = normalizer.normalize("casa, gato; janela.");
        let expected: TokenStream = ["casa", "gato", "janela"]
            .iter()
            .map(|t| normalizer.resources().stem(t))
            .collect();

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_deterministic() {
        let normalizer = normalizer();
        let text = "As meninas correram pelo parque enquanto os meninos jogavam futebol.";

        assert_eq!(normalizer.normalize(text), normalizer.normalize(text));
    }

    #[test]
    fn test_token_stream_serializes_as_list() {
        let tokens: TokenStream = ["gat", "mund"].into_iter().collect();
        assert_eq!(serde_json::to_string(&tokens).unwrap(), r#"["gat","mund"]"#);
    }
}
