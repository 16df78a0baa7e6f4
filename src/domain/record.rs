// Yearly record domain model and derived case counts
use serde::{Deserialize, Serialize};

use super::error::{check_percentage, check_population, DomainError};
use super::interpolation::InterpolatedYear;

/// Output precision for every numeric column
pub const DECIMALS: i32 = 3;

/// Round half to even at output precision
pub fn round3(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    // Normalise -0.0 so the CSV never carries a signed zero
    (value * scale).round_ties_even() / scale + 0.0
}

/// Absolute counts (millions) derived from population and rates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub total_diabetics: f64,
    pub total_pre_diabetics: f64,
    pub diagnosed: f64,
    pub undiagnosed: f64,
}

impl DerivedMetrics {
    pub fn derive(
        population: f64,
        diabetes_pct: f64,
        pre_diabetes_pct: f64,
        diagnosis_pct: f64,
    ) -> Result<Self, DomainError> {
        let population = check_population(population)?;
        let diabetes_pct = check_percentage("diabetes prevalence", diabetes_pct)?;
        let pre_diabetes_pct = check_percentage("pre-diabetes prevalence", pre_diabetes_pct)?;
        let diagnosis_pct = check_percentage("diagnosis rate", diagnosis_pct)?;

        let total_diabetics = population * diabetes_pct / 100.0;
        let total_pre_diabetics = population * pre_diabetes_pct / 100.0;
        let diagnosed = total_diabetics * diagnosis_pct / 100.0;

        Ok(Self {
            total_diabetics,
            total_pre_diabetics,
            diagnosed,
            undiagnosed: total_diabetics - diagnosed,
        })
    }

    /// Round to output precision. Undiagnosed is recomputed from the rounded
    /// total and diagnosed counts so the gap identity holds in the output.
    pub fn rounded(&self) -> Self {
        let total_diabetics = round3(self.total_diabetics);
        let diagnosed = round3(self.diagnosed);
        Self {
            total_diabetics,
            total_pre_diabetics: round3(self.total_pre_diabetics),
            diagnosed,
            undiagnosed: round3(total_diabetics - diagnosed),
        }
    }
}

/// One row of the master dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    #[serde(rename = "State")]
    pub region: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Population_Millions")]
    pub population: f64,
    #[serde(rename = "Diabetes_Prev_Pct")]
    pub diabetes_pct: f64,
    #[serde(rename = "Pre_Diabetes_Prev_Pct")]
    pub pre_diabetes_pct: f64,
    #[serde(rename = "Diagnosis_Rate_Pct")]
    pub diagnosis_pct: f64,
    #[serde(rename = "Total_Diabetics_Millions")]
    pub total_diabetics: f64,
    #[serde(rename = "Total_Pre_Diabetics_Millions")]
    pub total_pre_diabetics: f64,
    #[serde(rename = "Diagnosed_Millions")]
    pub diagnosed: f64,
    #[serde(rename = "Undiagnosed_Millions")]
    pub undiagnosed: f64,
}

impl YearlyRecord {
    /// Derive counts from unrounded interpolated values, then round every field.
    pub fn build(region: &str, values: &InterpolatedYear) -> Result<Self, DomainError> {
        let derived = DerivedMetrics::derive(
            values.population,
            values.diabetes_pct,
            values.pre_diabetes_pct,
            values.diagnosis_pct,
        )
        .map_err(|e| e.in_region(region))?
        .rounded();

        Ok(Self {
            region: region.to_string(),
            year: values.year,
            population: round3(values.population),
            diabetes_pct: round3(values.diabetes_pct),
            pre_diabetes_pct: round3(values.pre_diabetes_pct),
            diagnosis_pct: round3(values.diagnosis_pct),
            total_diabetics: derived.total_diabetics,
            total_pre_diabetics: derived.total_pre_diabetics,
            diagnosed: derived.diagnosed,
            undiagnosed: derived.undiagnosed,
        })
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Population => self.population,
            Metric::DiabetesPrevalence => self.diabetes_pct,
            Metric::PreDiabetesPrevalence => self.pre_diabetes_pct,
            Metric::DiagnosisRate => self.diagnosis_pct,
            Metric::TotalDiabetics => self.total_diabetics,
            Metric::TotalPreDiabetics => self.total_pre_diabetics,
            Metric::Diagnosed => self.diagnosed,
            Metric::Undiagnosed => self.undiagnosed,
        }
    }
}

/// Numeric column selector used by widgets and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Population,
    DiabetesPrevalence,
    PreDiabetesPrevalence,
    DiagnosisRate,
    TotalDiabetics,
    TotalPreDiabetics,
    Diagnosed,
    Undiagnosed,
}
