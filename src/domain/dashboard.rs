// Dashboard domain model
use super::report::Report;
use super::widgets::{ChartData, TileData};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub year: i32,
    pub selected_states: Vec<String>,
    pub tiles: Vec<TileData>,
    pub charts: Vec<ChartData>,
    pub report: Report,
}

impl Dashboard {
    pub fn new(
        title: String,
        year: i32,
        selected_states: Vec<String>,
        tiles: Vec<TileData>,
        charts: Vec<ChartData>,
        report: Report,
    ) -> Self {
        Self {
            title,
            year,
            selected_states,
            tiles,
            charts,
            report,
        }
    }
}
