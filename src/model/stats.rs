use serde::Serialize;

/// Aggregate of the scores that landed in one band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub label: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Folds `value` into a mean over `count` values (including `value`).
/// Finite inputs keep the result finite.
pub fn push_mean(mean: f64, value: f64, count: usize) -> f64 {
    let n = count as f64;
    mean + (value / n - mean / n)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShare {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}
