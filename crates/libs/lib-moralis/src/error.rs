//! # Market-Data SDK Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Moralis API key is missing")]
    MissingApiKey,

    #[error("Invalid Moralis configuration: {0}")]
    InvalidConfig(String),

    #[error("Moralis request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Moralis rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<SdkError> for lib_core::AppError {
    fn from(err: SdkError) -> Self {
        lib_core::AppError::MarketData(err.to_string())
    }
}
