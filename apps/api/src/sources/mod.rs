//! External collaborators that turn outside inputs into text for the tailoring core:
//! the job posting page and the uploaded resume document.
//!
//! Each is a trait so `AppState` can carry any backend as `Arc<dyn _>`.

pub mod job_page;
pub mod resume_pdf;

pub use job_page::{FetchError, HttpJobSource, JobSource};
pub use resume_pdf::{ExtractError, PdfResumeSource, ResumeSource};
