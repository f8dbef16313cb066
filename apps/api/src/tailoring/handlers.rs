//! Axum route handlers for the Tailoring API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::state::AppState;
use crate::tailoring::matcher::MatchResult;
use crate::tailoring::pipeline::{self, tailor_text, TailorMode, TailorResponse};
use crate::tailoring::signals::ExtractedSignals;

const INVALID_INPUT: &str = "Please provide a valid job URL and resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields of the `/scrape-job` multipart form, as received.
#[derive(Debug, Default)]
struct ScrapeJobForm {
    url: Option<String>,
    reformat: Option<String>,
    resume: Option<Bytes>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    pub job_description: String,
    pub resume_text: String,
    #[serde(default)]
    pub reformat: bool,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub match_result: MatchResult,
    pub job_signals: ExtractedSignals,
    pub resume_signals: ExtractedSignals,
    pub resume_text: String,
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /scrape-job
///
/// Multipart form: `url`, `reformat` ("true"/"false", optional), `resume` (PDF file).
/// Input is validated before any collaborator runs.
pub async fn handle_scrape_job(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TailorResponse>, AppError> {
    let form = read_form(multipart).await?;

    let url = validate_url(form.url.as_deref(), &state.config.job_url_marker)?;
    let resume = form
        .resume
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation(INVALID_INPUT.to_string()))?;
    let reformat = parse_reformat(form.reformat.as_deref())?;

    info!(
        "Tailoring request: url={url} reformat={reformat} resume_bytes={}",
        resume.len()
    );

    let response = pipeline::run(&state, url, resume, TailorMode::from_reformat(reformat)).await?;
    Ok(Json(response))
}

/// POST /api/v1/tailor/preview
///
/// Runs only the core on already-extracted text. No fetching, no rendering.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let job = JobPosting::from_parts(
        Some(request.job_title),
        Some(request.company),
        Some(request.job_description),
    );
    let tailored = tailor_text(
        &job,
        &request.resume_text,
        TailorMode::from_reformat(request.reformat),
        &state.taxonomy,
        &state.aliases,
    );

    Ok(Json(PreviewResponse {
        match_result: tailored.match_result,
        job_signals: tailored.job_signals,
        resume_signals: tailored.resume_signals,
        resume_text: tailored.resume_text,
        cover_letter: tailored.cover_letter,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_form(mut multipart: Multipart) -> Result<ScrapeJobForm, AppError> {
    let mut form = ScrapeJobForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("url") => form.url = Some(field.text().await.map_err(malformed)?),
            Some("reformat") => form.reformat = Some(field.text().await.map_err(malformed)?),
            Some("resume") => form.resume = Some(field.bytes().await.map_err(malformed)?),
            other => warn!("Ignoring unexpected form field {other:?}"),
        }
    }

    Ok(form)
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {e}"))
}

fn validate_url<'a>(url: Option<&'a str>, marker: &str) -> Result<&'a str, AppError> {
    url.map(str::trim)
        .filter(|u| !u.is_empty() && u.contains(marker))
        .ok_or_else(|| AppError::Validation(INVALID_INPUT.to_string()))
}

fn parse_reformat(raw: Option<&str>) -> Result<bool, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(AppError::Validation(format!(
            "reformat must be \"true\" or \"false\", got {v:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes::build_router;
    use crate::state::testing::{stub_state, StubJobSource, StubResumeSource};

    const BOUNDARY: &str = "tailor-test-boundary";
    const JOB_URL: &str = "https://www.linkedin.com/jobs/view/123";
    const RESUME: &str = "Jane Doe\njane@x.com\nSKILLS\nPython, SQL\nEXPERIENCE\nAcme";

    fn job() -> JobPosting {
        JobPosting {
            title: "Data Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Python, SQL and AWS with 5+ years of experience".to_string(),
        }
    }

    fn multipart_body(fields: &[(&str, &str)], resume: Option<&[u8]>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                     name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(bytes) = resume {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; \
                     filename=\"resume.pdf\"\r\n\
                     Content-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_form(state: AppState, body: Vec<u8>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/scrape-job")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        send(state, request).await
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn ok_state() -> AppState {
        stub_state(StubJobSource::ok(job()), StubResumeSource::ok(RESUME))
    }

    #[tokio::test]
    async fn test_scrape_job_returns_encoded_documents() {
        let body = multipart_body(&[("url", JOB_URL), ("reformat", "false")], Some(b"%PDF-1.4"));
        let (status, json) = post_form(ok_state(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["jobData"]["title"], "Data Engineer");
        assert_eq!(json["jobData"]["company"], "Acme");
        assert!(json["requestId"].is_string());
        assert!(json["generatedAt"].is_string());

        let resume = STANDARD
            .decode(json["modifiedResume"].as_str().unwrap())
            .unwrap();
        let resume = String::from_utf8(resume).unwrap();
        assert!(resume.contains("Python, SQL, AWS"));

        let letter = STANDARD.decode(json["coverLetter"].as_str().unwrap()).unwrap();
        assert!(String::from_utf8(letter).unwrap().starts_with("Dear Hiring Manager,"));
    }

    #[tokio::test]
    async fn test_scrape_job_reformat_uses_template() {
        let body = multipart_body(&[("url", JOB_URL), ("reformat", "true")], Some(b"%PDF-1.4"));
        let (status, json) = post_form(ok_state(), body).await;

        assert_eq!(status, StatusCode::OK);
        let resume = STANDARD
            .decode(json["modifiedResume"].as_str().unwrap())
            .unwrap();
        assert!(String::from_utf8(resume).unwrap().contains("Professional Summary"));
    }

    #[tokio::test]
    async fn test_scrape_job_rejects_missing_url() {
        let body = multipart_body(&[], Some(b"%PDF-1.4"));
        let (status, json) = post_form(ok_state(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_scrape_job_rejects_non_job_url() {
        let body = multipart_body(&[("url", "https://example.com/careers/1")], Some(b"%PDF-1.4"));
        let (status, json) = post_form(ok_state(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_scrape_job_rejects_missing_resume() {
        let body = multipart_body(&[("url", JOB_URL)], None);
        let (status, _) = post_form(ok_state(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validation_runs_before_collaborators() {
        // A failing job source would surface as 500 if it were reached.
        let state = stub_state(StubJobSource::failing(500), StubResumeSource::failing());
        let body = multipart_body(&[("url", JOB_URL), ("reformat", "maybe")], Some(b"%PDF-1.4"));
        let (status, json) = post_form(state, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_tailoring_failed() {
        let state = stub_state(StubJobSource::ok(job()), StubResumeSource::failing());
        let body = multipart_body(&[("url", JOB_URL)], Some(b"%PDF-1.4"));
        let (status, json) = post_form(state, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "TAILORING_FAILED");
        assert_eq!(json["error"]["message"], "Failed to process job data or resume");
        assert!(json["error"]["details"].as_str().unwrap().contains("stub failure"));
    }

    #[tokio::test]
    async fn test_preview_returns_core_output() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/tailor/preview")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "job_title": "Data Engineer",
                    "company": "Acme",
                    "job_description": "Python and SQL",
                    "resume_text": "Jane Doe\njane@x.com\nSKILLS\n- Python\nEXPERIENCE\n...",
                })
                .to_string(),
            ))
            .unwrap();

        let (status, json) = send(ok_state(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["match_result"]["skills"], json!(["Python", "SQL"]));
        assert_eq!(json["resume_signals"]["experience_phrase"], "relevant experience");
        assert!(json["resume_text"].as_str().unwrap().contains("\n- SQL\n"));
        assert!(json["cover_letter"].as_str().unwrap().contains("Data Engineer position at Acme"));
    }

    #[tokio::test]
    async fn test_preview_rejects_empty_text() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/tailor/preview")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "job_description": "Python", "resume_text": "   " }).to_string(),
            ))
            .unwrap();

        let (status, json) = send(ok_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "resume_text cannot be empty");
    }

    #[test]
    fn test_parse_reformat() {
        assert!(!parse_reformat(None).unwrap());
        assert!(parse_reformat(Some("TRUE")).unwrap());
        assert!(!parse_reformat(Some("false")).unwrap());
        assert!(parse_reformat(Some("yes")).is_err());
    }
}
