// Narrative report domain model
use std::collections::HashMap;

use super::dataset::{MasterDataset, Peak};

/// The numbers behind the narrative for one year and state selection
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFacts {
    pub year: i32,
    pub worst_state: String,
    pub worst_prevalence: f64,
    pub hidden_burden_state: String,
    pub hidden_undiagnosed: f64,
    pub fastest_growing: Option<Peak>,
}

impl ReportFacts {
    /// `None` when the dataset has no rows for `year`
    pub fn gather<S: AsRef<str>>(
        dataset: &MasterDataset,
        year: i32,
        selection: &[S],
    ) -> Option<Self> {
        let worst = dataset.worst_state(year)?;
        let hidden = dataset.hidden_burden_state(year)?;

        Some(Self {
            year,
            worst_state: worst.region.clone(),
            worst_prevalence: worst.diabetes_pct,
            hidden_burden_state: hidden.region.clone(),
            hidden_undiagnosed: hidden.undiagnosed,
            fastest_growing: dataset.fastest_growing(selection),
        })
    }

    /// Template variables: `${year}`, `${worst_state}`, `${worst_prevalence}`,
    /// `${hidden_state}`, `${hidden_undiagnosed}` and, when a selection was
    /// given, `${fastest_state}` / `${fastest_peak}`
    pub fn variables(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("year".to_string(), self.year.to_string());
        vars.insert("worst_state".to_string(), self.worst_state.clone());
        vars.insert(
            "worst_prevalence".to_string(),
            self.worst_prevalence.to_string(),
        );
        vars.insert("hidden_state".to_string(), self.hidden_burden_state.clone());
        vars.insert(
            "hidden_undiagnosed".to_string(),
            format!("{:.2}", self.hidden_undiagnosed),
        );
        if let Some(peak) = &self.fastest_growing {
            vars.insert("fastest_state".to_string(), peak.region.clone());
            vars.insert("fastest_peak".to_string(), peak.value.to_string());
        }
        vars
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub year: i32,
    pub critical_alert: String,
    pub hidden_burden: String,
    pub outlook: String,
    pub facts: ReportFacts,
}
