// CSV repository implementation for the master dataset
use crate::application::dataset_repository::{DatasetRepository, RepositoryError};
use crate::domain::dataset::MasterDataset;
use crate::domain::record::YearlyRecord;
use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const COLUMNS: [&str; 10] = [
    "State",
    "Year",
    "Population_Millions",
    "Diabetes_Prev_Pct",
    "Pre_Diabetes_Prev_Pct",
    "Diagnosis_Rate_Pct",
    "Total_Diabetics_Millions",
    "Total_Pre_Diabetics_Millions",
    "Diagnosed_Millions",
    "Undiagnosed_Millions",
];

#[derive(Debug, Clone)]
pub struct CsvDatasetRepository {
    path: PathBuf,
}

impl CsvDatasetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(path: &Path) -> Result<Vec<YearlyRecord>, RepositoryError> {
        let file = File::open(path).map_err(|source| RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        csv::Reader::from_reader(file)
            .deserialize()
            .collect::<Result<Vec<YearlyRecord>, _>>()
            .map_err(|source| RepositoryError::Csv {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Rows go to a temporary file next to `path`, which is then renamed over
    /// it, so readers never observe a partially written dataset.
    fn write_all(path: &Path, records: &[YearlyRecord]) -> Result<(), RepositoryError> {
        let io_err = |source| RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        };
        let csv_err = |source| RepositoryError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = NamedTempFile::new_in(dir).map_err(io_err)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(staging.as_file());
            writer.write_record(COLUMNS).map_err(csv_err)?;
            for record in records {
                writer.serialize(record).map_err(csv_err)?;
            }
            writer.flush().map_err(io_err)?;
        }

        staging.as_file().sync_all().map_err(io_err)?;
        staging.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl DatasetRepository for CsvDatasetRepository {
    async fn load(&self) -> Result<MasterDataset, RepositoryError> {
        let path = self.path.clone();
        let records = tokio::task::spawn_blocking(move || Self::read_all(&path)).await??;

        tracing::debug!("Loaded {} rows from {}", records.len(), self.path.display());
        Ok(MasterDataset::from_records(records))
    }

    async fn store(&self, dataset: &MasterDataset) -> Result<(), RepositoryError> {
        let path = self.path.clone();
        let records = dataset.records().to_vec();
        let rows = records.len();
        tokio::task::spawn_blocking(move || Self::write_all(&path, &records)).await??;

        tracing::info!("Wrote {} rows to {}", rows, self.path().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::tests::master;

    #[tokio::test]
    async fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CsvDatasetRepository::new(dir.path().join("master.csv"));
        let dataset = master();

        repository.store(&dataset).await.unwrap();
        let loaded = repository.load().await.unwrap();

        assert_eq!(loaded, dataset);
    }

    #[tokio::test]
    async fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master.csv");
        CsvDatasetRepository::new(&path)
            .store(&master())
            .await
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "State,Year,Population_Millions,Diabetes_Prev_Pct,Pre_Diabetes_Prev_Pct,\
             Diagnosis_Rate_Pct,Total_Diabetics_Millions,Total_Pre_Diabetics_Millions,\
             Diagnosed_Millions,Undiagnosed_Millions"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Goa,2015,1.48,16.8,18.5,55.0,0.249,0.274,0.137,0.112"
        );
        assert_eq!(lines.count(), 87);
    }

    #[tokio::test]
    async fn test_store_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");

        CsvDatasetRepository::new(&first)
            .store(&master())
            .await
            .unwrap();
        CsvDatasetRepository::new(&second)
            .store(&master())
            .await
            .unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_empty_dataset_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CsvDatasetRepository::new(dir.path().join("empty.csv"));

        repository.store(&MasterDataset::default()).await.unwrap();

        let text = std::fs::read_to_string(repository.path()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(repository.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_fails_without_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("master.csv");
        let repository = CsvDatasetRepository::new(&path);

        let err = repository.store(&master()).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Io { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CsvDatasetRepository::new(dir.path().join("absent.csv"));

        let err = repository.load().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "State,Year\nGoa,not-a-year\n").unwrap();

        let err = CsvDatasetRepository::new(&path).load().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Csv { .. }));
    }
}
