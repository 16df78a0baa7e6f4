// Master dataset - assembly and read-only reporting queries
use std::collections::HashMap;

use super::error::DomainError;
use super::interpolation::interpolate;
use super::observation::Observation;
use super::record::{round3, Metric, YearlyRecord};

/// Every yearly record, regions in input order and years ascending within a region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterDataset {
    records: Vec<YearlyRecord>,
}

/// Per-year sums over all regions, re-rounded after summing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NationalTotals {
    pub year: i32,
    pub population: f64,
    pub total_diabetics: f64,
    pub total_pre_diabetics: f64,
    pub diagnosed: f64,
    pub undiagnosed: f64,
}

/// Change in a metric between a region's first and last year
#[derive(Debug, Clone, PartialEq)]
pub struct Growth {
    pub region: String,
    pub from: f64,
    pub to: f64,
}

/// Highest value of a metric reached by a region
#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    pub region: String,
    pub value: f64,
}

impl Growth {
    pub fn delta(&self) -> f64 {
        self.to - self.from
    }
}

impl MasterDataset {
    /// Interpolate and derive every observation. The first invalid region aborts.
    pub fn assemble(observations: &[Observation]) -> Result<Self, DomainError> {
        let mut records =
            Vec::with_capacity(observations.iter().map(Observation::year_count).sum());

        for obs in observations {
            let years = interpolate(
                obs.region(),
                obs.start_year(),
                obs.end_year(),
                obs.metrics(),
            )?;
            for values in &years {
                records.push(YearlyRecord::build(obs.region(), values)?);
            }
            tracing::debug!("Interpolated {} years for {}", years.len(), obs.region());
        }

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<YearlyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[YearlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct regions in first-seen order
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = Vec::new();
        for record in &self.records {
            if !regions.contains(&record.region.as_str()) {
                regions.push(&record.region);
            }
        }
        regions
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.records.iter().any(|r| r.region == region)
    }

    /// Inclusive (min, max) year, `None` for an empty dataset
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.records.iter().any(|r| r.year == year)
    }

    pub fn for_year(&self, year: i32) -> Vec<&YearlyRecord> {
        self.records.iter().filter(|r| r.year == year).collect()
    }

    pub fn for_region(&self, region: &str) -> Vec<&YearlyRecord> {
        self.records.iter().filter(|r| r.region == region).collect()
    }

    pub fn for_regions<S: AsRef<str>>(&self, regions: &[S]) -> Vec<&YearlyRecord> {
        self.records
            .iter()
            .filter(|r| regions.iter().any(|s| s.as_ref() == r.region))
            .collect()
    }

    /// Sums the already-rounded per-region values, then rounds the sum once more.
    pub fn national_totals(&self, year: i32) -> Option<NationalTotals> {
        let rows = self.for_year(year);
        if rows.is_empty() {
            return None;
        }

        let sum = |metric: Metric| round3(rows.iter().map(|r| r.value(metric)).sum());
        Some(NationalTotals {
            year,
            population: sum(Metric::Population),
            total_diabetics: sum(Metric::TotalDiabetics),
            total_pre_diabetics: sum(Metric::TotalPreDiabetics),
            diagnosed: sum(Metric::Diagnosed),
            undiagnosed: sum(Metric::Undiagnosed),
        })
    }

    /// Region with the highest value of `metric` in `year`. Ties go to the
    /// earlier region.
    pub fn max_in_year(&self, year: i32, metric: Metric) -> Option<&YearlyRecord> {
        self.for_year(year)
            .into_iter()
            .fold(None::<&YearlyRecord>, |best, r| match best {
                Some(b) if b.value(metric) >= r.value(metric) => Some(b),
                _ => Some(r),
            })
    }

    pub fn worst_state(&self, year: i32) -> Option<&YearlyRecord> {
        self.max_in_year(year, Metric::DiabetesPrevalence)
    }

    pub fn hidden_burden_state(&self, year: i32) -> Option<&YearlyRecord> {
        self.max_in_year(year, Metric::Undiagnosed)
    }

    /// First-to-last year change of `metric` for each selected region, in
    /// dataset order
    pub fn growth<S: AsRef<str>>(&self, regions: &[S], metric: Metric) -> Vec<Growth> {
        let mut spans: HashMap<&str, (&YearlyRecord, &YearlyRecord)> = HashMap::new();
        for record in self.for_regions(regions) {
            spans
                .entry(record.region.as_str())
                .and_modify(|(first, last)| {
                    if record.year < first.year {
                        *first = record;
                    }
                    if record.year > last.year {
                        *last = record;
                    }
                })
                .or_insert((record, record));
        }

        self.regions()
            .into_iter()
            .filter_map(|region| spans.get(region))
            .map(|(first, last)| Growth {
                region: first.region.clone(),
                from: first.value(metric),
                to: last.value(metric),
            })
            .collect()
    }

    /// Selected region with the highest peak diabetes prevalence over all
    /// years. Ties go to the alphabetically first region.
    pub fn fastest_growing<S: AsRef<str>>(&self, regions: &[S]) -> Option<Peak> {
        self.for_regions(regions)
            .into_iter()
            .fold(None::<&YearlyRecord>, |best, r| match best {
                Some(b) if b.diabetes_pct > r.diabetes_pct => Some(b),
                Some(b) if b.diabetes_pct == r.diabetes_pct && b.region <= r.region => Some(b),
                _ => Some(r),
            })
            .map(|r| Peak {
                region: r.region.clone(),
                value: r.diabetes_pct,
            })
    }

    /// Selected region whose diabetes prevalence rose the most between its
    /// first and last year
    pub fn largest_increase<S: AsRef<str>>(&self, regions: &[S]) -> Option<Growth> {
        self.growth(regions, Metric::DiabetesPrevalence)
            .into_iter()
            .fold(None::<Growth>, |best, g| match best {
                Some(b) if b.delta() >= g.delta() => Some(b),
                _ => Some(g),
            })
    }
}
