use serde::Serialize;

use crate::error::AnalysisError;
use crate::model::bands::BandTable;
use crate::model::record::Record;
use crate::pipeline::{InvalidRecordPolicy, screen_records};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRecord {
    pub record: Record,
    pub label: String,
    /// Declaration position of the matched band; the fallback sorts last.
    pub band_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub table: String,
    pub labeled: Vec<LabeledRecord>,
    pub skipped: Vec<String>,
}

impl Classification {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

pub fn classify(
    records: &[Record],
    table: &BandTable,
    policy: InvalidRecordPolicy,
) -> Result<Classification, AnalysisError> {
    table.validate()?;
    let (finite, skipped) = screen_records(records, policy)?;

    let mut labeled = Vec::with_capacity(finite.len());
    for record in finite {
        let (band_index, label) = table.label_for(record.score);
        labeled.push(LabeledRecord {
            record: record.clone(),
            label: label.to_string(),
            band_index,
        });
    }

    tracing::debug!(
        "classified {} records with table '{}' ({} skipped)",
        labeled.len(),
        table.name,
        skipped.len()
    );

    Ok(Classification {
        table: table.name.clone(),
        labeled,
        skipped,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_classify.rs"]
mod tests;
