// Observation domain model - a region's two endpoint data points
use super::error::{check_percentage, check_population, check_year_range, DomainError};

/// A metric observed at the start year and the end year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoints {
    pub start: f64,
    pub end: f64,
}

impl Endpoints {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// The four endpoint pairs interpolated for every region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricEndpoints {
    pub population: Endpoints,
    pub diabetes_pct: Endpoints,
    pub pre_diabetes_pct: Endpoints,
    pub diagnosis_pct: Endpoints,
}

impl MetricEndpoints {
    fn validate(&self) -> Result<(), DomainError> {
        for value in [self.population.start, self.population.end] {
            check_population(value)?;
        }
        for value in [self.diabetes_pct.start, self.diabetes_pct.end] {
            check_percentage("diabetes prevalence", value)?;
        }
        for value in [self.pre_diabetes_pct.start, self.pre_diabetes_pct.end] {
            check_percentage("pre-diabetes prevalence", value)?;
        }
        for value in [self.diagnosis_pct.start, self.diagnosis_pct.end] {
            check_percentage("diagnosis rate", value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    region: String,
    start_year: i32,
    end_year: i32,
    metrics: MetricEndpoints,
}

impl Observation {
    pub fn new(
        region: impl Into<String>,
        start_year: i32,
        end_year: i32,
        metrics: MetricEndpoints,
    ) -> Result<Self, DomainError> {
        let region = region.into();
        if region.trim().is_empty() {
            return Err(DomainError::EmptyRegion);
        }

        check_year_range(start_year, end_year).map_err(|e| e.in_region(&region))?;
        metrics.validate().map_err(|e| e.in_region(&region))?;

        Ok(Self {
            region,
            start_year,
            end_year,
            metrics,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn metrics(&self) -> &MetricEndpoints {
        &self.metrics
    }

    /// Number of yearly rows this observation expands to
    pub fn year_count(&self) -> usize {
        (i64::from(self.end_year) - i64::from(self.start_year) + 1) as usize
    }
}
