use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::{
    controllers::audio::{present_audio, AudioView},
    domain::pipeline::{PipelineResult, PipelineServiceApi, TranslationOutcome},
    error::{AppError, AppResult},
};

pub const EMPTY_INPUT_WARNING: &str = "Please enter text to translate";
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Multipart field carrying the uploaded document
const UPLOAD_FIELD: &str = "file";

/// Request for POST /api/translate
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    /// `translated` or `failed`
    pub status: &'static str,
    pub translation: String,
    pub audio: AudioView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

impl TranslateResponse {
    pub async fn from_result(result: &PipelineResult, source_text: Option<String>) -> Self {
        let status = match result.outcome {
            TranslationOutcome::Translated(_) => "translated",
            TranslationOutcome::Failed(_) => "failed",
        };

        Self {
            status,
            translation: result.outcome.text().to_string(),
            audio: present_audio(&result.audio).await,
            source_text,
        }
    }
}

pub struct TranslateController {
    pipeline_service: Arc<dyn PipelineServiceApi>,
}

impl TranslateController {
    pub fn new(pipeline_service: Arc<dyn PipelineServiceApi>) -> Self {
        Self { pipeline_service }
    }

    /// POST /api/translate - Translate English text and narrate the result
    pub async fn translate(
        State(controller): State<Arc<TranslateController>>,
        Json(request): Json<TranslateRequest>,
    ) -> AppResult<Json<TranslateResponse>> {
        validate_source_text(&request.text)?;

        let result = controller.pipeline_service.process(&request.text).await;
        Ok(Json(TranslateResponse::from_result(&result, None).await))
    }

    /// POST /api/translate/document - Extract, translate and narrate an upload
    pub async fn translate_document(
        State(controller): State<Arc<TranslateController>>,
        multipart: Multipart,
    ) -> AppResult<Json<TranslateResponse>> {
        let upload = store_upload(multipart).await?;

        let document = controller
            .pipeline_service
            .process_document(upload.path())
            .await;

        Ok(Json(
            TranslateResponse::from_result(&document.result, document.source_text).await,
        ))
    }
}

/// Reject input the pipeline should never be asked to handle
pub fn validate_source_text(text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::BadRequest(EMPTY_INPUT_WARNING.to_string()));
    }

    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::PayloadTooLarge(
            "Text must be 10,000 characters or less".to_string(),
        ));
    }

    Ok(())
}

/// Persist the `file` field of a multipart body to a temporary file.
///
/// The temporary file keeps the upload's extension so the extractor can pick a
/// loader. It is deleted when the returned handle is dropped.
pub(crate) async fn store_upload(mut multipart: Multipart) -> AppResult<NamedTempFile> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let suffix = field
            .file_name()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let data = field.bytes().await?;

        if data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        let upload = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile()?;
        tokio::fs::write(upload.path(), &data).await?;

        tracing::debug!(
            path = %upload.path().display(),
            bytes = data.len(),
            "Stored uploaded document"
        );

        return Ok(upload);
    }

    Err(AppError::BadRequest(format!(
        "Missing '{}' field in upload",
        UPLOAD_FIELD
    )))
}
