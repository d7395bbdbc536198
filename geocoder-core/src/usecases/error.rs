use crate::repositories;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid batch size")]
    InvalidBatchSize,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
