// Mapper to convert domain models to JSON response types
use crate::domain::dashboard::Dashboard;
use crate::domain::dataset::NationalTotals;
use crate::domain::record::YearlyRecord;
use crate::domain::report::Report;
use crate::domain::widgets::{ChartData, ChartKind, SeriesData, SeriesPoint, TileData};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardJson {
    pub title: String,
    pub year: i32,
    pub selected_states: Vec<String>,
    pub tiles: Vec<TileJson>,
    pub charts: Vec<ChartJson>,
    pub report: ReportJson,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileJson {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartJson {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: &'static str,
    pub series: Vec<SeriesJson>,
}

#[derive(Debug, Serialize)]
pub struct SeriesJson {
    pub id: String,
    pub name: String,
    pub points: Vec<PointJson>,
}

#[derive(Debug, Serialize)]
pub struct PointJson {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportJson {
    pub year: i32,
    pub critical_alert: String,
    pub hidden_burden: String,
    pub outlook: String,
    pub worst_state: String,
    pub hidden_burden_state: String,
    pub fastest_growing_state: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalTotalsJson {
    pub year: i32,
    pub population_millions: f64,
    pub total_diabetics_millions: f64,
    pub total_pre_diabetics_millions: f64,
    pub diagnosed_millions: f64,
    pub undiagnosed_millions: f64,
}

pub fn dashboard_to_json(dashboard: Dashboard) -> DashboardJson {
    DashboardJson {
        title: dashboard.title,
        year: dashboard.year,
        selected_states: dashboard.selected_states,
        tiles: dashboard.tiles.into_iter().map(tile_to_json).collect(),
        charts: dashboard.charts.into_iter().map(chart_to_json).collect(),
        report: report_to_json(dashboard.report),
    }
}

pub fn report_to_json(report: Report) -> ReportJson {
    ReportJson {
        year: report.year,
        critical_alert: report.critical_alert,
        hidden_burden: report.hidden_burden,
        outlook: report.outlook,
        worst_state: report.facts.worst_state,
        hidden_burden_state: report.facts.hidden_burden_state,
        fastest_growing_state: report.facts.fastest_growing.map(|g| g.region),
    }
}

pub fn totals_to_json(totals: NationalTotals) -> NationalTotalsJson {
    NationalTotalsJson {
        year: totals.year,
        population_millions: totals.population,
        total_diabetics_millions: totals.total_diabetics,
        total_pre_diabetics_millions: totals.total_pre_diabetics,
        diagnosed_millions: totals.diagnosed,
        undiagnosed_millions: totals.undiagnosed,
    }
}

/// Records keep their CSV column names
pub fn records_to_json(records: Vec<&YearlyRecord>) -> Vec<YearlyRecord> {
    records.into_iter().cloned().collect()
}

fn tile_to_json(tile: TileData) -> TileJson {
    let display = tile.display();
    TileJson {
        id: tile.id,
        title: tile.title,
        caption: tile.caption,
        value: tile.value,
        display,
    }
}

fn chart_to_json(chart: ChartData) -> ChartJson {
    let kind = match chart.kind {
        ChartKind::Treemap => "treemap",
        ChartKind::Bar => "bar",
        ChartKind::Line => "line",
        ChartKind::Area => "area",
    };

    ChartJson {
        id: chart.id,
        title: chart.title,
        unit: chart.unit,
        kind,
        series: chart.series.into_iter().map(series_to_json).collect(),
    }
}

fn series_to_json(series: SeriesData) -> SeriesJson {
    SeriesJson {
        id: series.id,
        name: series.name,
        points: series.points.into_iter().map(point_to_json).collect(),
    }
}

fn point_to_json(point: SeriesPoint) -> PointJson {
    PointJson {
        label: point.label,
        value: point.value,
        color: point.color_value,
    }
}
