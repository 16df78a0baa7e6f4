// Domain validation errors
use thiserror::Error;

/// Longest accepted gap between start and end year
pub const MAX_YEAR_SPAN: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("region name must not be empty")]
    EmptyRegion,

    #[error("end year {end_year} is before start year {start_year}")]
    InvalidYearRange { start_year: i32, end_year: i32 },

    #[error("year range {start_year}..={end_year} spans more than {} years", MAX_YEAR_SPAN)]
    YearSpanTooLarge { start_year: i32, end_year: i32 },

    #[error("population must be a finite, non-negative number of millions, got {0}")]
    InvalidPopulation(f64),

    #[error("{metric} must be a percentage in [0, 100], got {value}")]
    PercentageOutOfRange { metric: &'static str, value: f64 },

    #[error("{region}: {source}")]
    InRegion {
        region: String,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Attach the offending region's name
    pub fn in_region(self, region: &str) -> Self {
        match self {
            already @ DomainError::InRegion { .. } => already,
            other => DomainError::InRegion {
                region: region.to_string(),
                source: Box::new(other),
            },
        }
    }
}

pub fn check_population(value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidPopulation(value))
    }
}

pub fn check_percentage(metric: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::PercentageOutOfRange { metric, value })
    }
}

pub fn check_year_range(start_year: i32, end_year: i32) -> Result<(), DomainError> {
    let span = i64::from(end_year) - i64::from(start_year);
    if span < 0 {
        return Err(DomainError::InvalidYearRange {
            start_year,
            end_year,
        });
    }
    if span > MAX_YEAR_SPAN {
        return Err(DomainError::YearSpanTooLarge {
            start_year,
            end_year,
        });
    }
    Ok(())
}
