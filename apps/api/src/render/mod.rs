//! Document rendering collaborator: turns render blocks into PDF bytes.
//! Rendering is CPU-bound; async callers must run it inside `tokio::task::spawn_blocking`.

pub mod font_metrics;
pub mod pdf;

use thiserror::Error;

use crate::models::document::Block;

pub use pdf::{PageLayout, PdfRenderer};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("nothing to render")]
    EmptyDocument,
}

/// Renders a sequence of styled blocks into document bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, blocks: &[Block]) -> Result<Vec<u8>, RenderError>;
}
