use thiserror::Error;
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("decode error at byte {offset}: {message}")]
    DecodeError { offset: usize, message: String },
    #[error("missing field in response: {0}")]
    MissingField(String),
}
