use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response was not a roster array: {0}")]
    Decode(String),

    #[error("could not write rendered table: {0}")]
    Render(#[from] std::io::Error),
}
