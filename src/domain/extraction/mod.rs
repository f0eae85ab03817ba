pub mod error;
pub mod format;
pub mod service;

pub use error::ExtractionError;
pub use format::{DocumentFormat, DocumentSegment};
pub use service::{ExtractionService, ExtractionServiceApi};

/// Separator placed between consecutive segments of one document
pub const SEGMENT_SEPARATOR: &str = "\n\n";
