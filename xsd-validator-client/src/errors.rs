use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unable to decode the validator response: {0}")]
    Decode(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("error: status code [{0}]")]
    UnexpectedStatus(u16),

    #[error("invalid client configuration: {0}")]
    Config(String),
}
