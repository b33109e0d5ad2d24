use crate::error::AnalysisError;
use crate::model::record::Record;

pub mod stage1_classify;
pub mod stage2_summarize;
pub mod stage3_rank_gaps;
pub mod stage4_report;

/// What to do with a record whose score is NaN or infinite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidRecordPolicy {
    #[default]
    FailFast,
    Skip,
}

impl InvalidRecordPolicy {
    pub fn name(self) -> &'static str {
        match self {
            InvalidRecordPolicy::FailFast => "fail-fast",
            InvalidRecordPolicy::Skip => "skip",
        }
    }
}

/// Splits `records` into finite-score records and the ids of skipped ones.
pub(crate) fn screen_records(
    records: &[Record],
    policy: InvalidRecordPolicy,
) -> Result<(Vec<&Record>, Vec<String>), AnalysisError> {
    let mut finite = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for record in records {
        if record.score.is_finite() {
            finite.push(record);
            continue;
        }
        match policy {
            InvalidRecordPolicy::FailFast => {
                return Err(AnalysisError::InvalidRecord {
                    id: record.id.clone(),
                    score: record.score,
                });
            }
            InvalidRecordPolicy::Skip => {
                tracing::warn!(
                    "skipping record '{}' with non-finite score {}",
                    record.id,
                    record.score
                );
                skipped.push(record.id.clone());
            }
        }
    }
    Ok((finite, skipped))
}
