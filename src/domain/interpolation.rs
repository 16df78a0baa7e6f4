// Linear interpolation of endpoint observations, one row per year
use super::error::{check_year_range, DomainError};
use super::observation::{Endpoints, MetricEndpoints};

/// Interpolated (unrounded) metric values for one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedYear {
    pub year: i32,
    pub population: f64,
    pub diabetes_pct: f64,
    pub pre_diabetes_pct: f64,
    pub diagnosis_pct: f64,
}

impl Endpoints {
    /// Value at `step` of `span` equal steps; the end value is returned
    /// exactly at the last step.
    fn at(&self, step: i32, span: i32) -> f64 {
        if span == 0 || step == 0 {
            self.start
        } else if step == span {
            self.end
        } else {
            self.start + (self.end - self.start) * f64::from(step) / f64::from(span)
        }
    }
}

/// Interpolate every metric independently over `[start_year, end_year]`.
pub fn interpolate(
    region: &str,
    start_year: i32,
    end_year: i32,
    metrics: &MetricEndpoints,
) -> Result<Vec<InterpolatedYear>, DomainError> {
    check_year_range(start_year, end_year).map_err(|e| e.in_region(region))?;

    let span = end_year - start_year;
    let rows = (start_year..=end_year)
        .map(|year| {
            let step = year - start_year;
            InterpolatedYear {
                year,
                population: metrics.population.at(step, span),
                diabetes_pct: metrics.diabetes_pct.at(step, span),
                pre_diabetes_pct: metrics.pre_diabetes_pct.at(step, span),
                diagnosis_pct: metrics.diagnosis_pct.at(step, span),
            }
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> MetricEndpoints {
        MetricEndpoints {
            population: Endpoints::new(1.48, 1.59),
            diabetes_pct: Endpoints::new(16.8, 26.8),
            pre_diabetes_pct: Endpoints::new(18.5, 19.8),
            diagnosis_pct: Endpoints::new(55.0, 60.0),
        }
    }

    #[test]
    fn test_one_row_per_year() {
        let rows = interpolate("Goa", 2015, 2025, &metrics()).unwrap();
        assert_eq!(rows.len(), 11);
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, (2015..=2025).collect::<Vec<_>>());
    }

    #[test]
    fn test_endpoints_are_exact() {
        let rows = interpolate("Goa", 2015, 2025, &metrics()).unwrap();
        let first = rows.first().unwrap();
        let last = rows.last().unwrap();
        assert_eq!(first.population, 1.48);
        assert_eq!(first.diabetes_pct, 16.8);
        assert_eq!(last.population, 1.59);
        assert_eq!(last.diabetes_pct, 26.8);
        assert_eq!(last.diagnosis_pct, 60.0);
    }

    #[test]
    fn test_midpoint_is_mean() {
        let rows = interpolate("Goa", 2015, 2025, &metrics()).unwrap();
        let mid = rows.iter().find(|r| r.year == 2020).unwrap();
        assert!((mid.population - (1.48 + 1.59) / 2.0).abs() < 1e-9);
        assert!((mid.diabetes_pct - 21.8).abs() < 1e-9);
        assert!((mid.pre_diabetes_pct - 19.15).abs() < 1e-9);
        assert!((mid.diagnosis_pct - 57.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_year_range() {
        let rows = interpolate("Goa", 2020, 2020, &metrics()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2020);
        assert_eq!(rows[0].population, 1.48);
    }

    #[test]
    fn test_reversed_range_fails_fast() {
        let err = interpolate("Goa", 2025, 2015, &metrics()).unwrap_err();
        assert!(matches!(err, DomainError::InRegion { ref region, .. } if region == "Goa"));
    }

    #[test]
    fn test_oversized_range_fails_fast() {
        let err = interpolate("Goa", 0, 2_000_000_000, &metrics()).unwrap_err();
        assert!(err.to_string().starts_with("Goa: year range 0..=2000000000 spans more than"));
    }

    #[test]
    fn test_range_ending_at_max_year() {
        let rows = interpolate("Goa", i32::MAX - 10, i32::MAX, &metrics()).unwrap();
        assert_eq!(rows.len(), 11);
        assert_eq!(rows.last().unwrap().year, i32::MAX);
        assert_eq!(rows.last().unwrap().diabetes_pct, 26.8);
    }
}
