// Region endpoint tables - built-in defaults and TOML files
use crate::domain::error::DomainError;
use crate::domain::observation::{Endpoints, MetricEndpoints, Observation};
use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const START_YEAR: i32 = 2015;
const END_YEAR: i32 = 2025;

/// State, population, diabetes %, pre-diabetes %, diagnosis rate %;
/// each as (2015, 2025). Population in millions.
type StateRow = (&'static str, [f64; 2], [f64; 2], [f64; 2], [f64; 2]);

const STATES: [StateRow; 8] = [
    ("Goa", [1.48, 1.59], [16.8, 26.8], [18.5, 19.8], [55.0, 60.0]),
    ("New Delhi", [18.5, 22.28], [14.2, 17.8], [15.0, 18.0], [45.0, 50.0]),
    ("Tamil Nadu", [73.6, 77.4], [11.7, 15.1], [9.5, 12.6], [55.0, 60.0]),
    ("West Bengal", [94.5, 102.5], [11.5, 14.2], [13.0, 15.5], [38.0, 45.0]),
    ("Haryana", [27.5, 31.1], [9.5, 12.4], [12.0, 15.0], [35.0, 43.0]),
    ("Maharashtra", [118.0, 128.7], [9.2, 11.9], [12.8, 14.0], [35.0, 43.0]),
    ("Odisha", [43.5, 46.95], [8.0, 12.1], [11.0, 16.0], [35.0, 45.0]),
    ("Rajasthan", [73.5, 83.1], [4.5, 7.0], [13.0, 18.0], [30.0, 35.0]),
];

fn endpoints([start, end]: [f64; 2]) -> Endpoints {
    Endpoints::new(start, end)
}

/// The eight surveyed Indian states, 2015 to 2025
pub fn default_observations() -> Result<Vec<Observation>, DomainError> {
    STATES
        .iter()
        .map(|&(state, population, diabetes, pre_diabetes, diagnosis)| {
            Observation::new(
                state,
                START_YEAR,
                END_YEAR,
                MetricEndpoints {
                    population: endpoints(population),
                    diabetes_pct: endpoints(diabetes),
                    pre_diabetes_pct: endpoints(pre_diabetes),
                    diagnosis_pct: endpoints(diagnosis),
                },
            )
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ObservationsFile {
    observations: Vec<ObservationEntry>,
}

#[derive(Debug, Deserialize)]
struct EndpointsEntry {
    start: f64,
    end: f64,
}

#[derive(Debug, Deserialize)]
struct ObservationEntry {
    region: String,
    start_year: i32,
    end_year: i32,
    population: EndpointsEntry,
    diabetes_pct: EndpointsEntry,
    pre_diabetes_pct: EndpointsEntry,
    diagnosis_pct: EndpointsEntry,
}

impl From<EndpointsEntry> for Endpoints {
    fn from(entry: EndpointsEntry) -> Self {
        Endpoints::new(entry.start, entry.end)
    }
}

impl TryFrom<ObservationEntry> for Observation {
    type Error = DomainError;

    fn try_from(entry: ObservationEntry) -> Result<Self, Self::Error> {
        Observation::new(
            entry.region,
            entry.start_year,
            entry.end_year,
            MetricEndpoints {
                population: entry.population.into(),
                diabetes_pct: entry.diabetes_pct.into(),
                pre_diabetes_pct: entry.pre_diabetes_pct.into(),
                diagnosis_pct: entry.diagnosis_pct.into(),
            },
        )
    }
}

/// Read `[[observations]]` tables from a TOML file; every entry is validated.
pub fn load_observations(path: &Path) -> anyhow::Result<Vec<Observation>> {
    let settings = config::Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml))
        .build()
        .with_context(|| format!("Failed to read observations from {}", path.display()))?;

    let file: ObservationsFile = settings
        .try_deserialize()
        .with_context(|| format!("Malformed observations file {}", path.display()))?;

    let observations = file
        .observations
        .into_iter()
        .map(Observation::try_from)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid observation in {}", path.display()))?;

    tracing::info!(
        "Loaded {} observations from {}",
        observations.len(),
        path.display()
    );
    Ok(observations)
}
