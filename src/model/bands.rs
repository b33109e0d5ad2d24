use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AnalysisError;
use crate::input::InputError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub label: String,
    /// Inclusive. Omitted or `null` in JSON means negative infinity.
    #[serde(default = "neg_infinity", deserialize_with = "bound_or_neg_infinity")]
    pub lower_bound: f64,
}

impl ThresholdBand {
    pub fn new(label: impl Into<String>, lower_bound: f64) -> Self {
        Self {
            label: label.into(),
            lower_bound,
        }
    }
}

/// Ordered band ladder, highest lower bound first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub name: String,
    pub bands: Vec<ThresholdBand>,
    pub fallback_label: String,
}

impl BandTable {
    pub fn new(name: &str, bands: &[(&str, f64)], fallback_label: &str) -> Self {
        Self {
            name: name.to_string(),
            bands: bands
                .iter()
                .map(|&(label, bound)| ThresholdBand::new(label, bound))
                .collect(),
            fallback_label: fallback_label.to_string(),
        }
    }

    pub fn performance_v1() -> Self {
        Self::new(
            "performance",
            &[
                ("Excellent", 3.8),
                ("Very Good", 3.5),
                ("Good", 3.3),
                ("Satisfactory", 3.0),
            ],
            "Needs Improvement",
        )
    }

    pub fn letter_grade_v1() -> Self {
        Self::new(
            "letter_grade",
            &[
                ("A+", 3.9),
                ("A", 3.7),
                ("A-", 3.5),
                ("B+", 3.3),
                ("B", 3.0),
                ("B-", 2.7),
                ("C+", 2.3),
                ("C", 2.0),
            ],
            "F",
        )
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.bands.is_empty() {
            return Err(AnalysisError::configuration(&self.name, "no bands defined"));
        }

        let mut seen = HashSet::with_capacity(self.bands.len() + 1);
        for (idx, band) in self.bands.iter().enumerate() {
            if band.label.trim().is_empty() {
                return Err(AnalysisError::configuration(
                    &self.name,
                    format!("band {} has an empty label", idx),
                ));
            }
            if !seen.insert(band.label.as_str()) {
                return Err(AnalysisError::configuration(
                    &self.name,
                    format!("duplicate label '{}'", band.label),
                ));
            }
            if band.lower_bound.is_nan() {
                return Err(AnalysisError::configuration(
                    &self.name,
                    format!("band '{}' has a NaN lower bound", band.label),
                ));
            }
            if idx > 0 {
                let prev = &self.bands[idx - 1];
                if band.lower_bound >= prev.lower_bound {
                    return Err(AnalysisError::configuration(
                        &self.name,
                        format!(
                            "lower bounds must be strictly descending: '{}' ({}) follows '{}' ({})",
                            band.label, band.lower_bound, prev.label, prev.lower_bound
                        ),
                    ));
                }
            }
        }

        if self.fallback_label.trim().is_empty() {
            return Err(AnalysisError::configuration(
                &self.name,
                "fallback label is empty",
            ));
        }
        if seen.contains(self.fallback_label.as_str()) {
            return Err(AnalysisError::configuration(
                &self.name,
                format!(
                    "fallback label '{}' duplicates a band label",
                    self.fallback_label
                ),
            ));
        }

        Ok(())
    }

    /// Band index and label for `score`. The fallback reports index `bands.len()`.
    pub fn label_for(&self, score: f64) -> (usize, &str) {
        for (idx, band) in self.bands.iter().enumerate() {
            if band.lower_bound <= score {
                return (idx, band.label.as_str());
            }
        }
        (self.bands.len(), self.fallback_label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    pub performance: BandTable,
    pub letter_grade: BandTable,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            performance: BandTable::performance_v1(),
            letter_grade: BandTable::letter_grade_v1(),
        }
    }
}

impl BandConfig {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        if !path.exists() {
            return Err(InputError::MissingInput(format!(
                "band config not found at {}",
                path.display()
            )));
        }
        let reader = BufReader::new(File::open(path)?);
        let config: BandConfig = serde_json::from_reader(reader)?;
        tracing::info!(
            "loaded band config from {}: performance={} bands, letter_grade={} bands",
            path.display(),
            config.performance.bands.len(),
            config.letter_grade.bands.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.performance.validate()?;
        self.letter_grade.validate()
    }
}

fn neg_infinity() -> f64 {
    f64::NEG_INFINITY
}

fn bound_or_neg_infinity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bands.rs"]
mod tests;
