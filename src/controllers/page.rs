use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::{
    controllers::audio::{present_audio, AudioView},
    controllers::translate::{store_upload, validate_source_text},
    domain::pipeline::{PipelineResult, PipelineServiceApi},
};

const PAGE_TITLE: &str = "English to Arabic Translator";

/// Form body for POST /
#[derive(Debug, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub english_text: String,
}

/// Everything the page template needs for one render
#[derive(Debug, Default)]
pub struct PageView {
    pub english_text: String,
    pub translation: Option<String>,
    pub failed: bool,
    pub audio: Option<AudioView>,
    pub warning: Option<String>,
}

impl PageView {
    async fn from_result(english_text: String, result: &PipelineResult) -> Self {
        Self {
            english_text,
            translation: Some(result.outcome.text().to_string()),
            failed: result.outcome.is_failure(),
            audio: Some(present_audio(&result.audio).await),
            warning: None,
        }
    }

    fn warning(english_text: String, warning: String) -> Self {
        Self {
            english_text,
            warning: Some(warning),
            ..Self::default()
        }
    }
}

pub struct PageController {
    pipeline_service: Arc<dyn PipelineServiceApi>,
}

impl PageController {
    pub fn new(pipeline_service: Arc<dyn PipelineServiceApi>) -> Self {
        Self { pipeline_service }
    }

    /// GET / - Empty form
    pub async fn index() -> Html<String> {
        Html(render_page(&PageView::default()))
    }

    /// POST / - Translate the submitted text and re-render the page
    pub async fn submit(
        State(controller): State<Arc<PageController>>,
        Form(form): Form<PageForm>,
    ) -> Html<String> {
        if let Err(e) = validate_source_text(&form.english_text) {
            return Html(render_page(&PageView::warning(form.english_text, e.to_string())));
        }

        let result = controller.pipeline_service.process(&form.english_text).await;
        let view = PageView::from_result(form.english_text, &result).await;
        Html(render_page(&view))
    }

    /// POST /document - Translate an uploaded document and re-render the page
    pub async fn submit_document(
        State(controller): State<Arc<PageController>>,
        multipart: Multipart,
    ) -> Html<String> {
        let upload = match store_upload(multipart).await {
            Ok(upload) => upload,
            Err(e) => return Html(render_page(&PageView::warning(String::new(), e.to_string()))),
        };

        let document = controller
            .pipeline_service
            .process_document(upload.path())
            .await;
        let view =
            PageView::from_result(document.source_text.unwrap_or_default(), &document.result)
                .await;
        Html(render_page(&view))
    }
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
.columns {{ display: flex; gap: 2rem; }}
.column {{ flex: 1; }}
textarea {{ width: 100%; min-height: 12rem; }}
.warning {{ color: #a15c00; }}
.failed {{ color: #b00020; }}
</style>
</head>
<body>
<h1>{title}</h1>
"#,
        title = PAGE_TITLE
    );

    if let Some(warning) = &view.warning {
        let _ = writeln!(html, r#"<p class="warning">{}</p>"#, escape_html(warning));
    }

    let _ = write!(
        html,
        r#"<div class="columns">
<div class="column">
<h2>English</h2>
<form method="post" action="/">
<textarea name="english_text" placeholder="Enter English text">{english}</textarea>
<button type="submit">Translate</button>
</form>
<form method="post" action="/document" enctype="multipart/form-data">
<input type="file" name="file" accept=".pdf,.docx,.doc,.txt,.rtf,.html,.htm,.pptx,.ppt,.csv">
<button type="submit">Translate document</button>
</form>
</div>
<div class="column">
<h2>Arabic</h2>
"#,
        english = escape_html(&view.english_text)
    );

    if let Some(translation) = &view.translation {
        let class = if view.failed { " class=\"failed\"" } else { "" };
        let _ = writeln!(
            html,
            r#"<textarea dir="rtl" lang="ar" readonly{}>{}</textarea>"#,
            class,
            escape_html(translation)
        );
    }

    match &view.audio {
        Some(audio @ AudioView::Audio { .. }) => {
            if let Some(src) = audio.data_uri() {
                let _ = writeln!(html, r#"<audio controls src="{}"></audio>"#, src);
            }
        }
        Some(AudioView::None { notice }) | Some(AudioView::Error { notice }) => {
            let _ = writeln!(html, "<p>{}</p>", escape_html(notice));
        }
        None => {}
    }

    html.push_str("</div>\n</div>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
