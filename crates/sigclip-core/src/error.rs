use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no regions found: {0}")]
    NoRegionFound(String),
}
