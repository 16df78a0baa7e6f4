// Generation service - Use case for building and persisting the master dataset
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::dataset::MasterDataset;
use crate::domain::observation::Observation;
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct GenerationService {
    repository: Arc<dyn DatasetRepository>,
}

impl GenerationService {
    pub fn new(repository: Arc<dyn DatasetRepository>) -> Self {
        Self { repository }
    }

    pub async fn generate(&self, observations: &[Observation]) -> anyhow::Result<MasterDataset> {
        let dataset = MasterDataset::assemble(observations)
            .context("Failed to assemble master dataset")?;

        tracing::info!(
            "Assembled {} rows for {} regions",
            dataset.len(),
            observations.len()
        );

        self.repository
            .store(&dataset)
            .await
            .context("Failed to persist master dataset")?;

        Ok(dataset)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::dataset_repository::RepositoryError;
    use crate::domain::observation::{Endpoints, MetricEndpoints};
    use crate::infrastructure::observations::default_observations;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Keeps the last stored dataset in memory
    #[derive(Default)]
    pub(crate) struct MemoryRepository {
        pub(crate) stored: Mutex<Option<MasterDataset>>,
    }

    #[async_trait]
    impl DatasetRepository for MemoryRepository {
        async fn load(&self) -> Result<MasterDataset, RepositoryError> {
            Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
        }

        async fn store(&self, dataset: &MasterDataset) -> Result<(), RepositoryError> {
            *self.stored.lock().unwrap() = Some(dataset.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_generate_stores_dataset() {
        let repository = Arc::new(MemoryRepository::default());
        let service = GenerationService::new(repository.clone());

        let dataset = service
            .generate(&default_observations().unwrap())
            .await
            .unwrap();

        assert_eq!(dataset.len(), 88);
        assert_eq!(repository.load().await.unwrap(), dataset);
    }

    #[tokio::test]
    async fn test_generate_single_year_observation() {
        let repository = Arc::new(MemoryRepository::default());
        let service = GenerationService::new(repository);

        let obs = Observation::new(
            "Test",
            2020,
            2020,
            MetricEndpoints {
                population: Endpoints::new(1.0, 1.0),
                diabetes_pct: Endpoints::new(10.0, 10.0),
                pre_diabetes_pct: Endpoints::new(5.0, 5.0),
                diagnosis_pct: Endpoints::new(50.0, 50.0),
            },
        )
        .unwrap();

        let dataset = service.generate(&[obs]).await.unwrap();
        assert_eq!(dataset.len(), 1);
        let row = &dataset.records()[0];
        assert_eq!(row.total_diabetics, 0.1);
        assert_eq!(row.diagnosed, 0.05);
        assert_eq!(row.undiagnosed, 0.05);
    }
}
