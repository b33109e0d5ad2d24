use std::collections::BTreeMap;

use crate::model::stats::{CategoryStats, LabelShare, push_mean};
use crate::pipeline::stage1_classify::LabeledRecord;

struct Accumulator<'a> {
    label: &'a str,
    count: usize,
    min: f64,
    max: f64,
    mean: f64,
}

/// Per-label count/min/max/mean, ordered by descending `min` then band order.
pub fn summarize(labeled: &[LabeledRecord]) -> Vec<CategoryStats> {
    let mut groups: BTreeMap<usize, Accumulator<'_>> = BTreeMap::new();
    for item in labeled {
        let score = item.record.score;
        let acc = groups.entry(item.band_index).or_insert(Accumulator {
            label: item.label.as_str(),
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
        });
        acc.count += 1;
        acc.min = acc.min.min(score);
        acc.max = acc.max.max(score);
        acc.mean = push_mean(acc.mean, score, acc.count);
    }

    // BTreeMap iteration is already in band order; the stable sort keeps it on ties.
    let mut stats = groups
        .into_values()
        .map(|acc| CategoryStats {
            label: acc.label.to_string(),
            count: acc.count,
            min: acc.min,
            max: acc.max,
            mean: acc.mean,
        })
        .collect::<Vec<_>>();
    stats.sort_by(|a, b| {
        b.min
            .partial_cmp(&a.min)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}

/// Share of each label in the classified total.
pub fn distribution(stats: &[CategoryStats]) -> Vec<LabelShare> {
    let total: usize = stats.iter().map(|s| s.count).sum();
    stats
        .iter()
        .map(|s| LabelShare {
            label: s.label.clone(),
            count: s.count,
            percentage: if total == 0 {
                0.0
            } else {
                s.count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_summarize.rs"]
mod tests;
