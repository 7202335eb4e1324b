use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
