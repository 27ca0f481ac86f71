//! Client-side error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with an error status; the message is the
    /// server's `{ "message": ... }` body when it could be read.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Network failure or malformed response.
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
