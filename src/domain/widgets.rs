// Dashboard widget domain models

#[derive(Debug, Clone, PartialEq)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub caption: String,
    pub value: f64,
    pub precision: usize,
}

impl TileData {
    pub fn new(
        id: String,
        title: String,
        unit: String,
        caption: String,
        value: f64,
        precision: usize,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            caption,
            value,
            precision,
        }
    }

    /// Headline text, e.g. "12.3 M"
    pub fn display(&self) -> String {
        if self.unit.is_empty() {
            format!("{:.*}", self.precision, self.value)
        } else {
            format!("{:.*} {}", self.precision, self.value, self.unit)
        }
    }
}

/// A point on a chart; `label` is a state name or a year
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
    pub color_value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(label: String, value: f64, color_value: Option<f64>) -> Self {
        Self {
            label,
            value,
            color_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, points: Vec<SeriesPoint>) -> Self {
        Self { id, name, points }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Treemap,
    Bar,
    Line,
    Area,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(
        id: String,
        title: String,
        unit: Option<String>,
        kind: ChartKind,
        series: Vec<SeriesData>,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            kind,
            series,
        }
    }
}
