use std::sync::Arc;

use crate::config::Config;
use crate::render::DocumentRenderer;
use crate::sources::{JobSource, ResumeSource};
use crate::tailoring::taxonomy::{SectionAliases, SkillTaxonomy};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Job page fetcher. Default: HttpJobSource.
    pub job_source: Arc<dyn JobSource>,
    /// Resume text extractor. Default: PdfResumeSource.
    pub resume_source: Arc<dyn ResumeSource>,
    /// Document renderer. Blocking; always called from `spawn_blocking`.
    pub renderer: Arc<dyn DocumentRenderer>,
    pub taxonomy: Arc<SkillTaxonomy>,
    pub aliases: Arc<SectionAliases>,
}
