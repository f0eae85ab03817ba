use serde::{Deserialize, Serialize};
use std::path::Path;

/// Document formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Txt,
    Rtf,
    Html,
    Pptx,
    Ppt,
    Csv,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 9] = [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Doc,
        DocumentFormat::Txt,
        DocumentFormat::Rtf,
        DocumentFormat::Html,
        DocumentFormat::Pptx,
        DocumentFormat::Ppt,
        DocumentFormat::Csv,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Txt => "txt",
            DocumentFormat::Rtf => "rtf",
            DocumentFormat::Html => "html",
            DocumentFormat::Pptx => "pptx",
            DocumentFormat::Ppt => "ppt",
            DocumentFormat::Csv => "csv",
        }
    }

    /// Case-insensitive; `htm` is accepted as HTML
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        if extension == "htm" {
            return Some(DocumentFormat::Html);
        }
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// One logical unit of a document (page, slide, paragraph block)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSegment {
    pub body: String,
}

impl DocumentSegment {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}
