// Dashboard service - Use case for building dashboards over the master dataset
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::dashboard::Dashboard;
use crate::domain::dataset::{MasterDataset, NationalTotals};
use crate::domain::record::YearlyRecord;
use crate::domain::report::{Report, ReportFacts};
use crate::domain::widgets::{ChartData, ChartKind, SeriesData, SeriesPoint, TileData};
use crate::infrastructure::config::{
    prepare_template, ChartConfig, ChartScope, TileAggregate, TileConfig, WidgetsConfig,
};
use anyhow::Context;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("no data for year {0}")]
    UnknownYear(i32),

    #[error("unknown state: {0}")]
    UnknownState(String),

    #[error("the dataset is empty")]
    EmptyDataset,
}

#[derive(Clone)]
pub struct DashboardService {
    dataset: Arc<MasterDataset>,
    widgets_config: WidgetsConfig,
}

impl DashboardService {
    pub fn new(dataset: Arc<MasterDataset>, widgets_config: WidgetsConfig) -> Self {
        Self {
            dataset,
            widgets_config,
        }
    }

    /// Load the dataset once; every request is served from memory.
    pub async fn load(
        repository: Arc<dyn DatasetRepository>,
        widgets_config: WidgetsConfig,
    ) -> anyhow::Result<Self> {
        let dataset = repository
            .load()
            .await
            .context("Failed to load master dataset")?;

        if dataset.is_empty() {
            tracing::warn!("Master dataset has no rows; every request will fail");
        }
        tracing::info!(
            "Serving {} rows for {} states",
            dataset.len(),
            dataset.regions().len()
        );
        Ok(Self::new(Arc::new(dataset), widgets_config))
    }

    pub fn dataset(&self) -> &MasterDataset {
        &self.dataset
    }

    /// The latest year in the dataset
    pub fn default_year(&self) -> Result<i32, DashboardError> {
        self.dataset
            .year_bounds()
            .map(|(_, max)| max)
            .ok_or(DashboardError::EmptyDataset)
    }

    /// Validate the requested selection. No selection at all falls back to
    /// the configured default states present in the dataset; an explicitly
    /// empty one stays empty.
    pub fn resolve_states(
        &self,
        requested: Option<&[String]>,
    ) -> Result<Vec<String>, DashboardError> {
        let Some(requested) = requested else {
            return Ok(self
                .widgets_config
                .default_states
                .iter()
                .filter(|s| self.dataset.contains_region(s))
                .cloned()
                .collect());
        };

        for state in requested {
            if !self.dataset.contains_region(state) {
                return Err(DashboardError::UnknownState(state.clone()));
            }
        }
        Ok(requested.to_vec())
    }

    fn resolve_year(&self, year: Option<i32>) -> Result<i32, DashboardError> {
        match year {
            Some(year) if self.dataset.contains_year(year) => Ok(year),
            Some(year) => Err(DashboardError::UnknownYear(year)),
            None => self.default_year(),
        }
    }

    pub fn records(
        &self,
        year: Option<i32>,
        states: &[String],
    ) -> Result<Vec<&YearlyRecord>, DashboardError> {
        if let Some(year) = year {
            if !self.dataset.contains_year(year) {
                return Err(DashboardError::UnknownYear(year));
            }
        }
        for state in states {
            if !self.dataset.contains_region(state) {
                return Err(DashboardError::UnknownState(state.clone()));
            }
        }

        Ok(self
            .dataset
            .records()
            .iter()
            .filter(|r| year.is_none_or(|y| r.year == y))
            .filter(|r| states.is_empty() || states.contains(&r.region))
            .collect())
    }

    pub fn national_totals(&self, year: Option<i32>) -> Result<NationalTotals, DashboardError> {
        let year = self.resolve_year(year)?;
        self.dataset
            .national_totals(year)
            .ok_or(DashboardError::UnknownYear(year))
    }

    pub fn get_report(
        &self,
        year: Option<i32>,
        states: Option<&[String]>,
    ) -> Result<Report, DashboardError> {
        let year = self.resolve_year(year)?;
        let selection = self.resolve_states(states)?;
        self.build_report(year, &selection)
    }

    pub fn get_dashboard(
        &self,
        year: Option<i32>,
        states: Option<&[String]>,
    ) -> Result<Dashboard, DashboardError> {
        let year = self.resolve_year(year)?;
        let selection = self.resolve_states(states)?;
        let title = format!("{} ({})", self.widgets_config.title, year);

        let tiles = self.build_tiles(year);
        let charts = self.build_charts(year, &selection);
        let report = self.build_report(year, &selection)?;

        tracing::debug!(
            "Built dashboard for {} with {} tiles, {} charts",
            year,
            tiles.len(),
            charts.len()
        );

        Ok(Dashboard::new(title, year, selection, tiles, charts, report))
    }

    fn build_tiles(&self, year: i32) -> Vec<TileData> {
        self.widgets_config
            .tiles
            .iter()
            .filter_map(|tile_config| {
                let value = self.tile_value(tile_config, year);
                if value.is_none() {
                    tracing::warn!("Tile {} has no metric to sum, skipping", tile_config.id);
                }
                value.map(|value| {
                    TileData::new(
                        tile_config.id.clone(),
                        tile_config.title.clone(),
                        tile_config.unit.clone(),
                        tile_config.caption.clone(),
                        value,
                        tile_config.precision,
                    )
                })
            })
            .collect()
    }

    fn tile_value(&self, tile_config: &TileConfig, year: i32) -> Option<f64> {
        match tile_config.aggregate {
            TileAggregate::Sum => {
                let metric = tile_config.metric?;
                Some(
                    self.dataset
                        .for_year(year)
                        .iter()
                        .map(|r| r.value(metric))
                        .sum(),
                )
            }
            TileAggregate::DistinctStates => Some(self.dataset.regions().len() as f64),
        }
    }

    fn build_charts(&self, year: i32, selection: &[String]) -> Vec<ChartData> {
        let mut charts = Vec::new();

        for chart_config in &self.widgets_config.charts {
            let series_list = match chart_config.scope {
                ChartScope::Year => self.year_series(chart_config, year),
                ChartScope::Trend => self.trend_series(chart_config, selection),
            };

            // An empty selection still gets its (empty) trend charts
            if !series_list.is_empty() && series_list.iter().all(|s| s.points.is_empty()) {
                continue;
            }

            let kind = match chart_config.kind.as_str() {
                "treemap" => ChartKind::Treemap,
                "bar" => ChartKind::Bar,
                "area" => ChartKind::Area,
                "line" => ChartKind::Line,
                other => {
                    tracing::warn!(
                        "Unknown chart kind {} for {}, drawing a line",
                        other,
                        chart_config.id
                    );
                    ChartKind::Line
                }
            };

            charts.push(ChartData::new(
                chart_config.id.clone(),
                chart_config.title.clone(),
                chart_config.unit.clone(),
                kind,
                series_list,
            ));
        }

        charts
    }

    /// A single series with one point per state
    fn year_series(&self, chart_config: &ChartConfig, year: i32) -> Vec<SeriesData> {
        let mut points: Vec<SeriesPoint> = self
            .dataset
            .for_year(year)
            .into_iter()
            .map(|r| point(r.region.clone(), r, chart_config))
            .collect();

        if chart_config.sort_ascending {
            points.sort_by(|a, b| a.value.total_cmp(&b.value));
        }

        vec![SeriesData::new(
            chart_config.id.clone(),
            chart_config.title.clone(),
            points,
        )]
    }

    /// One series per selected state with one point per year
    fn trend_series(&self, chart_config: &ChartConfig, selection: &[String]) -> Vec<SeriesData> {
        selection
            .iter()
            .map(|state| {
                let points = self
                    .dataset
                    .for_region(state)
                    .into_iter()
                    .map(|r| point(r.year.to_string(), r, chart_config))
                    .collect();
                SeriesData::new(state.clone(), state.clone(), points)
            })
            .collect()
    }

    fn build_report(&self, year: i32, selection: &[String]) -> Result<Report, DashboardError> {
        let facts = ReportFacts::gather(&self.dataset, year, selection)
            .ok_or(DashboardError::UnknownYear(year))?;
        let templates = &self.widgets_config.report;

        let mut vars = facts.variables();
        let growth_summary = match facts.fastest_growing {
            Some(_) => prepare_template(&templates.fastest_growing, &vars),
            None => templates.mixed_trends.clone(),
        };
        vars.insert("growth_summary".to_string(), growth_summary);

        Ok(Report {
            year,
            critical_alert: prepare_template(&templates.critical_alert, &vars),
            hidden_burden: prepare_template(&templates.hidden_burden, &vars),
            outlook: prepare_template(&templates.outlook, &vars),
            facts,
        })
    }
}

fn point(label: String, record: &YearlyRecord, chart_config: &ChartConfig) -> SeriesPoint {
    SeriesPoint::new(
        label,
        record.value(chart_config.metric),
        chart_config.color_metric.map(|m| record.value(m)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generation_service::tests::MemoryRepository;
    use crate::domain::dataset::tests::master;
    use crate::infrastructure::config::default_widgets_config;

    fn service() -> DashboardService {
        DashboardService::new(Arc::new(master()), default_widgets_config().unwrap())
    }

    fn states(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_year_and_states() {
        let dashboard = service().get_dashboard(None, None).unwrap();
        assert_eq!(dashboard.year, 2025);
        assert_eq!(
            dashboard.selected_states,
            states(&["Maharashtra", "Tamil Nadu", "Rajasthan", "Goa"])
        );
        assert_eq!(
            dashboard.title,
            "India Diabetes Epidemiology Monitor (2025)"
        );
    }

    #[test]
    fn test_tiles_sum_the_year() {
        let service = service();
        let dashboard = service.get_dashboard(Some(2020), None).unwrap();
        let totals = service.national_totals(Some(2020)).unwrap();

        let tile = |id: &str| dashboard.tiles.iter().find(|t| t.id == id).unwrap().clone();
        assert!((tile("total_diabetics").value - totals.total_diabetics).abs() < 1e-6);
        assert!((tile("undiagnosed_gap").value - totals.undiagnosed).abs() < 1e-6);
        assert!((tile("pre_diabetics").value - totals.total_pre_diabetics).abs() < 1e-6);
        assert_eq!(tile("states_analyzed").display(), "8");
    }

    #[test]
    fn test_leaderboard_sorted_ascending() {
        let dashboard = service().get_dashboard(Some(2025), None).unwrap();
        let chart = dashboard
            .charts
            .iter()
            .find(|c| c.id == "prevalence_leaderboard")
            .unwrap();

        assert_eq!(chart.kind, ChartKind::Bar);
        let points = &chart.series[0].points;
        assert_eq!(points.len(), 8);
        assert_eq!(points.first().unwrap().label, "Rajasthan");
        assert_eq!(points.last().unwrap().label, "Goa");
        assert!(points.windows(2).all(|w| w[0].value <= w[1].value));
    }

    #[test]
    fn test_treemap_carries_severity() {
        let dashboard = service().get_dashboard(Some(2015), None).unwrap();
        let chart = dashboard
            .charts
            .iter()
            .find(|c| c.kind == ChartKind::Treemap)
            .unwrap();
        let goa = chart.series[0]
            .points
            .iter()
            .find(|p| p.label == "Goa")
            .unwrap();
        assert_eq!(goa.value, 0.249);
        assert_eq!(goa.color_value, Some(16.8));
    }

    #[test]
    fn test_trend_series_follow_selection() {
        let dashboard = service()
            .get_dashboard(Some(2025), Some(&states(&["Odisha", "Goa"])))
            .unwrap();
        let chart = dashboard
            .charts
            .iter()
            .find(|c| c.id == "prevalence_trend")
            .unwrap();

        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Odisha", "Goa"]);
        assert_eq!(chart.series[0].points.len(), 11);
        assert_eq!(chart.series[0].points[0].label, "2015");
    }

    #[test]
    fn test_report_text() {
        let report = service()
            .get_report(Some(2025), Some(&states(&["Rajasthan", "Odisha"])))
            .unwrap();

        assert!(report.critical_alert.contains("Goa is currently the highest-risk zone"));
        assert!(report.critical_alert.contains("26.8%"));
        assert!(report.hidden_burden.contains("highest in Maharashtra"));
        assert!(
            report
                .outlook
                .starts_with("FUTURE OUTLOOK: Odisha is showing the most aggressive growth")
        );
        assert!(!report.outlook.contains("${"));
    }

    #[test]
    fn test_report_without_known_defaults() {
        let mut widgets = default_widgets_config().unwrap();
        widgets.default_states = states(&["Atlantis"]);
        let service = DashboardService::new(Arc::new(master()), widgets);

        let report = service.get_report(Some(2025), None).unwrap();
        assert!(report.outlook.contains("Mixed trends observed."));
    }

    #[test]
    fn test_explicitly_empty_selection() {
        let dashboard = service().get_dashboard(Some(2025), Some(&[])).unwrap();
        assert!(dashboard.selected_states.is_empty());
        assert!(dashboard.report.facts.fastest_growing.is_none());
        assert!(dashboard.report.outlook.contains("Mixed trends observed."));

        let trend = dashboard
            .charts
            .iter()
            .find(|c| c.id == "prevalence_trend")
            .unwrap();
        assert!(trend.series.is_empty());
        // Year snapshots ignore the selection
        assert!(dashboard.charts.iter().any(|c| c.id == "prevalence_leaderboard"));
    }

    #[test]
    fn test_report_uses_highest_peak() {
        let report = service()
            .get_report(Some(2025), Some(&states(&["New Delhi", "Odisha"])))
            .unwrap();
        assert!(
            report
                .outlook
                .starts_with("FUTURE OUTLOOK: New Delhi is showing the most aggressive growth")
        );
    }

    #[test]
    fn test_unknown_year_and_state() {
        let service = service();
        assert_eq!(
            service.get_dashboard(Some(1990), None).unwrap_err(),
            DashboardError::UnknownYear(1990)
        );
        assert_eq!(
            service
                .get_dashboard(None, Some(&states(&["Atlantis"])))
                .unwrap_err(),
            DashboardError::UnknownState("Atlantis".to_string())
        );
        assert!(service.records(Some(1990), &[]).is_err());
    }

    #[test]
    fn test_records_filter() {
        let service = service();
        assert_eq!(service.records(None, &[]).unwrap().len(), 88);
        assert_eq!(service.records(Some(2018), &[]).unwrap().len(), 8);

        let rows = service
            .records(Some(2018), &states(&["Goa", "Haryana"]))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.year == 2018));
    }

    #[test]
    fn test_empty_dataset() {
        let service = DashboardService::new(
            Arc::new(MasterDataset::default()),
            default_widgets_config().unwrap(),
        );
        assert_eq!(
            service.get_dashboard(None, None).unwrap_err(),
            DashboardError::EmptyDataset
        );
    }

    #[tokio::test]
    async fn test_load_from_repository() {
        let repository = Arc::new(MemoryRepository::default());
        repository.store(&master()).await.unwrap();

        let service = DashboardService::load(repository, default_widgets_config().unwrap())
            .await
            .unwrap();
        assert_eq!(service.dataset().len(), 88);
    }
}
