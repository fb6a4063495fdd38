use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("calendar date out of range: {0}")]
    Calendar(String),

    #[error("font {} unusable: {message}", .path.display())]
    Font { path: PathBuf, message: String },

    #[error("invalid branding: {0}")]
    Branding(#[from] prakriti_core::error::CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}

impl ExportError {
    pub(crate) fn pdf(e: impl std::fmt::Display) -> Self {
        ExportError::Pdf(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("nothing to plot for '{0}'")]
    EmptySeries(String),
}
