use thiserror::Error;

pub mod types;
pub mod utils;
pub mod pagination;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid format: {0}")]
    Format(String),
    #[error("parse error: {0}")]
    Parse(String),
}
