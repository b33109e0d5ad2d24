use serde::Serialize;

use crate::model::record::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapEntry {
    pub rank: usize,
    pub record: Record,
    /// Score difference to the next-ranked record; `None` for the last rank.
    pub gap_to_next: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysis {
    pub entries: Vec<GapEntry>,
    pub max_gap: Option<f64>,
    pub max_gap_pair: Option<(Record, Record)>,
    pub mean_gap: Option<f64>,
    pub skipped: Vec<String>,
}

impl GapAnalysis {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            max_gap: None,
            max_gap_pair: None,
            mean_gap: None,
            skipped: Vec::new(),
        }
    }

    pub fn top(&self, n: usize) -> &[GapEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn is_max_gap(&self, entry: &GapEntry) -> bool {
        match (entry.gap_to_next, self.max_gap) {
            (Some(gap), Some(max)) => gap == max,
            _ => false,
        }
    }
}
