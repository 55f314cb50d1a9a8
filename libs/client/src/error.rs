use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error body; `message` is its
    /// `{"error": …}` payload when present.
    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}
