pub mod error;
pub mod result;
pub mod service;

pub use error::PipelineError;
pub use result::{DocumentPipelineResult, PipelineResult, TranslationOutcome};
pub use service::{PipelineService, PipelineServiceApi};
