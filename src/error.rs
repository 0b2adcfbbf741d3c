use std::path::PathBuf;
use thiserror::Error;

pub const API_KEY_ENV: &str = "XAI_API_KEY";

#[derive(Debug, Error)]
pub enum XSearchError {
    #[error("{API_KEY_ENV} not set")]
    MissingApiKey,

    #[error("--sides must be exactly two, pipe-separated labels like 'SideA|SideB' (got {0:?})")]
    InvalidSides(String),

    #[error("config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("xAI API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("xAI response contained no text output")]
    EmptyReply,
}
