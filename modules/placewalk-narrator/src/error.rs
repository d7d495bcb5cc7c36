use thiserror::Error;

pub type Result<T> = std::result::Result<T, NarrateError>;

#[derive(Debug, Error)]
pub enum NarrateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no story text")]
    EmptyResponse,
}
