use crate::error::AnalysisError;
use crate::model::gaps::{GapAnalysis, GapEntry};
use crate::model::record::Record;
use crate::pipeline::{InvalidRecordPolicy, screen_records};

pub fn analyze(records: &[Record]) -> Result<GapAnalysis, AnalysisError> {
    analyze_with_policy(records, InvalidRecordPolicy::FailFast)
}

pub fn analyze_with_policy(
    records: &[Record],
    policy: InvalidRecordPolicy,
) -> Result<GapAnalysis, AnalysisError> {
    let (mut sorted, skipped) = screen_records(records, policy)?;

    // stable: equal scores keep input order
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let gaps = consecutive_gaps(&sorted)?;

    let mut entries = Vec::with_capacity(sorted.len());
    for (idx, record) in sorted.iter().enumerate() {
        entries.push(GapEntry {
            rank: idx + 1,
            record: (*record).clone(),
            gap_to_next: gaps.get(idx).copied(),
        });
    }

    let mut analysis = GapAnalysis {
        entries,
        skipped,
        ..GapAnalysis::empty()
    };

    if let Some(max_idx) = first_max_index(&gaps) {
        analysis.max_gap = Some(gaps[max_idx]);
        analysis.max_gap_pair = Some((sorted[max_idx].clone(), sorted[max_idx + 1].clone()));
        let n = gaps.len() as f64;
        analysis.mean_gap = Some(gaps.iter().map(|g| g / n).sum());
    }

    tracing::debug!(
        "ranked {} records, max gap {:?}, mean gap {:?}",
        analysis.entries.len(),
        analysis.max_gap,
        analysis.mean_gap
    );

    Ok(analysis)
}

fn consecutive_gaps(sorted: &[&Record]) -> Result<Vec<f64>, AnalysisError> {
    let mut gaps = Vec::with_capacity(sorted.len().saturating_sub(1));
    for pair in sorted.windows(2) {
        let gap = pair[0].score - pair[1].score;
        if gap < 0.0 {
            return Err(AnalysisError::InvariantViolation {
                upper: pair[0].id.clone(),
                lower: pair[1].id.clone(),
                gap,
            });
        }
        if gap.is_infinite() {
            return Err(AnalysisError::GapOverflow {
                upper: pair[0].id.clone(),
                lower: pair[1].id.clone(),
            });
        }
        gaps.push(gap);
    }
    Ok(gaps)
}

/// Index of the largest gap; the lowest index wins ties.
fn first_max_index(gaps: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, &gap) in gaps.iter().enumerate() {
        match best {
            Some(b) if gaps[b] >= gap => {}
            _ => best = Some(idx),
        }
    }
    best
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_rank_gaps.rs"]
mod tests;
