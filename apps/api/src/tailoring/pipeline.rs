//! End-to-end tailoring: fetch the job, read the resume, run the core, render both artifacts.
//!
//! `tailor_text` is the pure part and is what the preview endpoint exposes.
//! `run` wraps it with the three collaborators and fails as a whole if any of them fails.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{Block, BlockStyle};
use crate::models::job::JobPosting;
use crate::render::RenderError;
use crate::state::AppState;
use crate::tailoring::cover_letter::write_cover_letter;
use crate::tailoring::matcher::{match_signals, MatchResult};
use crate::tailoring::sections::locate;
use crate::tailoring::signals::{extract, ExtractedSignals};
use crate::tailoring::splicer::splice;
use crate::tailoring::taxonomy::{SectionAliases, SkillTaxonomy};
use crate::tailoring::template;

/// Edit the resume in place, or regenerate it into the fixed template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailorMode {
    #[default]
    Edit,
    Reformat,
}

impl TailorMode {
    pub fn from_reformat(reformat: bool) -> Self {
        if reformat {
            TailorMode::Reformat
        } else {
            TailorMode::Edit
        }
    }
}

/// Everything the core produces for one job/resume pair.
#[derive(Debug, Clone, Serialize)]
pub struct TailoredText {
    pub job_signals: ExtractedSignals,
    pub resume_signals: ExtractedSignals,
    pub match_result: MatchResult,
    pub resume_blocks: Vec<Block>,
    pub resume_text: String,
    pub cover_letter: String,
}

/// Runs extraction, matching and either the splicer or the template renderer.
pub fn tailor_text(
    job: &JobPosting,
    resume_text: &str,
    mode: TailorMode,
    taxonomy: &SkillTaxonomy,
    aliases: &SectionAliases,
) -> TailoredText {
    let job_signals = extract(&job.description, taxonomy);
    let resume_signals = extract(resume_text, taxonomy);
    let match_result = match_signals(&job_signals, &resume_signals);

    let lines: Vec<&str> = resume_text.split('\n').collect();

    let (resume_blocks, resume_text) = match mode {
        TailorMode::Edit => {
            let index = locate(&lines, aliases);
            let spliced = splice(&lines, &index, &match_result, &job.title, &job.company, aliases);
            let text = spliced.join("\n");
            (vec![Block::new(BlockStyle::Body, text.clone())], text)
        }
        TailorMode::Reformat => {
            let document = template::render(&lines, &match_result, &job.title, &job.company);
            (document.to_blocks(), document.to_text())
        }
    };

    let cover_letter = write_cover_letter(job, &match_result);

    TailoredText {
        job_signals,
        resume_signals,
        match_result,
        resume_blocks,
        resume_text,
        cover_letter,
    }
}

/// Response of `POST /scrape-job`. Both documents are base64-encoded rendered bytes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResponse {
    pub job_data: JobPosting,
    pub modified_resume: String,
    pub cover_letter: String,
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

/// Full request: job page → resume text → core → rendered resume and cover letter.
pub async fn run(
    state: &AppState,
    url: &str,
    resume: Bytes,
    mode: TailorMode,
) -> Result<TailorResponse, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("tailor", %request_id, ?mode);

    async move {
        info!("Tailoring resume for {url}");

        let job = state.job_source.fetch(url).await?;
        let resume_text = state.resume_source.extract_text(resume).await?;

        let tailored = tailor_text(
            &job,
            &resume_text,
            mode,
            &state.taxonomy,
            &state.aliases,
        );
        info!(
            "Matched {} skills, experience={:?}",
            tailored.match_result.skills.len(),
            tailored.match_result.experience
        );

        let renderer = Arc::clone(&state.renderer);
        let resume_blocks = tailored.resume_blocks;
        let letter_blocks = vec![Block::new(BlockStyle::Body, tailored.cover_letter)];
        let (resume_pdf, letter_pdf) = tokio::task::spawn_blocking(move || {
            Ok::<_, RenderError>((
                renderer.render(&resume_blocks)?,
                renderer.render(&letter_blocks)?,
            ))
        })
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

        info!(
            "Rendered resume ({} bytes) and cover letter ({} bytes)",
            resume_pdf.len(),
            letter_pdf.len()
        );

        Ok(TailorResponse {
            job_data: job,
            modified_resume: STANDARD.encode(resume_pdf),
            cover_letter: STANDARD.encode(letter_pdf),
            request_id,
            generated_at: Utc::now(),
        })
    }
    .instrument(span)
    .await
}
