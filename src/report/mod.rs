use std::collections::HashMap;

use serde::Serialize;

use crate::input::ImportReport;
use crate::model::gaps::{GapAnalysis, GapEntry};
use crate::model::record::Record;
use crate::model::stats::{CategoryStats, LabelShare, push_mean};
use crate::pipeline::stage1_classify::Classification;

pub mod json;
pub mod text;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportContext<'a> {
    pub tool_name: String,
    pub tool_version: String,
    pub input: String,
    pub import: ImportReport,
    pub invalid_record_policy: &'static str,

    pub records_by_id: Vec<&'a Record>,
    pub summary: Option<ScoreSummary>,
    pub top: &'a [GapEntry],

    pub performance: &'a Classification,
    pub performance_stats: Vec<CategoryStats>,

    pub grades: &'a Classification,
    pub grade_stats: Vec<CategoryStats>,
    pub grade_distribution: Vec<LabelShare>,

    pub ranking: &'a GapAnalysis,
}

/// Overall statistics over the finite scores; `None` when there are none.
pub fn score_summary(records: &[Record]) -> Option<ScoreSummary> {
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut mean = 0.0f64;
    for r in records.iter().filter(|r| r.score.is_finite()) {
        count += 1;
        min = min.min(r.score);
        max = max.max(r.score);
        mean = push_mean(mean, r.score, count);
    }
    if count == 0 {
        return None;
    }
    Some(ScoreSummary {
        count,
        min,
        max,
        mean,
    })
}

pub fn label_lookup(classification: &Classification) -> HashMap<&str, &str> {
    classification
        .labeled
        .iter()
        .map(|l| (l.record.id.as_str(), l.label.as_str()))
        .collect()
}

pub fn format_score(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn format_mean_gap(v: f64) -> String {
    format!("{:.3}", v)
}

pub fn format_percent(v: f64) -> String {
    format!("{:.1}%", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
