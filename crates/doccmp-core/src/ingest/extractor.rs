use serde::{Deserialize, Serialize};
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn from_filename(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// An uploaded document as received, before any parsing.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub format: Option<DocumentFormat>,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    /// Format is inferred from the filename suffix.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let format = DocumentFormat::from_filename(&name);
        Self {
            name,
            format,
            bytes,
        }
    }

    #[must_use]
    pub const fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoTextReason {
    Unsupported,
    Unreadable(String),
    Empty,
}

impl std::fmt::Display for NoTextReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => f.write_str("unsupported format"),
            Self::Unreadable(detail) => write!(f, "unreadable document: {detail}"),
            Self::Empty => f.write_str("no extractable text"),
        }
    }
}

/// Outcome of text extraction. `Text` always holds at least one
/// non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    Text(String),
    NoText(NoTextReason),
}

impl ExtractedText {
    /// Wraps extracted content, demoting blank content to `NoText(Empty)`.
    #[must_use]
    pub fn from_content(content: String) -> Self {
        if content.trim().is_empty() {
            Self::NoText(NoTextReason::Empty)
        } else {
            Self::Text(content)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::NoText(_) => None,
        }
    }
}

pub trait Extractor: Send + Sync {
    fn supported_formats(&self) -> &[DocumentFormat];

    fn can_extract(&self, format: DocumentFormat) -> bool {
        self.supported_formats().contains(&format)
    }

    /// Never fails: unreadable input is reported as `NoText`.
    fn extract_bytes(&self, data: &[u8], format: DocumentFormat) -> ExtractedText;

    fn extract(&self, document: &RawDocument) -> ExtractedText {
        match document.format {
            Some(format) if self.can_extract(format) => {
                let extracted = self.extract_bytes(&document.bytes, format);
                if let ExtractedText::NoText(reason) = &extracted {
                    tracing::warn!("No text extracted from '{}': {}", document.name, reason);
                }
                extracted
            }
            _ => {
                tracing::warn!("Unsupported file format: {}", document.name);
                ExtractedText::NoText(NoTextReason::Unsupported)
            }
        }
    }
}

pub struct PlainTextExtractor;

impl PlainTextExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PlainTextExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::PlainText]
    }

    fn extract_bytes(&self, data: &[u8], _format: DocumentFormat) -> ExtractedText {
        ExtractedText::from_content(decode_text(data))
    }
}

/// UTF-8 first, Latin-1 when that fails. Latin-1 maps every byte, so this is a
/// best-effort decoding rather than a guarantee.
fn decode_text(data: &[u8]) -> String {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    match std::str::from_utf8(data) {
        Ok(text) => text.to_owned(),
        Err(e) => {
            tracing::warn!("Input is not valid UTF-8 ({}), retrying as Latin-1", e);
            data.iter().copied().map(char::from).collect()
        }
    }
}

pub struct PdfExtractor;

impl PdfExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PdfExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Pdf]
    }

    fn extract_bytes(&self, data: &[u8], _format: DocumentFormat) -> ExtractedText {
        let document = match guard_parser(|| lopdf::Document::load_mem(data)) {
            Ok(Ok(document)) => document,
            Ok(Err(e)) => return ExtractedText::NoText(NoTextReason::Unreadable(e.to_string())),
            Err(panic) => return ExtractedText::NoText(NoTextReason::Unreadable(panic)),
        };

        let mut parts = Vec::new();

        // A page that fails to extract is skipped; the rest still count.
        for page_number in document.get_pages().into_keys() {
            match guard_parser(|| document.extract_text(&[page_number])) {
                Ok(Ok(text)) if !text.is_empty() => parts.push(text),
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    tracing::warn!("Skipping PDF page {}: {}", page_number, e);
                }
                Err(panic) => {
                    tracing::warn!("Skipping PDF page {}: {}", page_number, panic);
                }
            }
        }

        ExtractedText::from_content(parts.join("\n"))
    }
}

/// Runs a PDF parser call, turning a panic on malformed input into an error
/// message.
fn guard_parser<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).map_err(|payload| {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown cause".to_owned());
        format!("parser panicked: {detail}")
    })
}

pub struct DocxExtractor;

impl DocxExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for DocxExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Docx]
    }

    fn extract_bytes(&self, data: &[u8], _format: DocumentFormat) -> ExtractedText {
        let docx = match docx_rs::read_docx(data) {
            Ok(docx) => docx,
            Err(e) => return ExtractedText::NoText(NoTextReason::Unreadable(e.to_string())),
        };

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    Some(paragraph_text(&paragraph.children))
                }
                _ => None,
            })
            .collect();

        ExtractedText::from_content(paragraphs.join("\n"))
    }
}

fn paragraph_text(children: &[docx_rs::ParagraphChild]) -> String {
    let mut text = String::new();

    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        docx_rs::RunChild::Text(t) => text.push_str(&t.text),
                        docx_rs::RunChild::Tab(_) => text.push('\t'),
                        docx_rs::RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                text.push_str(&paragraph_text(&link.children));
            }
            _ => {}
        }
    }

    text
}

pub struct CompositeExtractor {
    extractors: Vec<Box<dyn Extractor>>,
}

impl CompositeExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    fn find_extractor(&self, format: DocumentFormat) -> Option<&dyn Extractor> {
        self.extractors
            .iter()
            .find(|e| e.can_extract(format))
            .map(AsRef::as_ref)
    }
}

impl Default for CompositeExtractor {
    fn default() -> Self {
        Self::new()
            .with_extractor(Box::new(PlainTextExtractor::new()))
            .with_extractor(Box::new(PdfExtractor::new()))
            .with_extractor(Box::new(DocxExtractor::new()))
    }
}

impl Extractor for CompositeExtractor {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[
            DocumentFormat::PlainText,
            DocumentFormat::Pdf,
            DocumentFormat::Docx,
        ]
    }

    fn can_extract(&self, format: DocumentFormat) -> bool {
        self.find_extractor(format).is_some()
    }

    fn extract_bytes(&self, data: &[u8], format: DocumentFormat) -> ExtractedText {
        match self.find_extractor(format) {
            Some(extractor) => extractor.extract_bytes(data, format),
            None => ExtractedText::NoText(NoTextReason::Unsupported),
        }
    }
}

/// Extracts text with every built-in format available.
pub fn extract(document: &RawDocument) -> ExtractedText {
    CompositeExtractor::default().extract(document)
}
