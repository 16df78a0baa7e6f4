// Repository trait for master dataset persistence
use crate::domain::dataset::MasterDataset;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("dataset file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset file {path} is malformed: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Read the whole master dataset
    async fn load(&self) -> Result<MasterDataset, RepositoryError>;

    /// Replace the master dataset. Either every row is written or nothing is.
    async fn store(&self, dataset: &MasterDataset) -> Result<(), RepositoryError>;
}
