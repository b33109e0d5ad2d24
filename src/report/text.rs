use crate::model::stats::CategoryStats;
use crate::report::{ReportContext, format_mean_gap, format_percent, format_score, label_lookup};

const RULE: &str = "--------------------------------------------------";

pub fn render_report_text(ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();

    out.push_str("Score Band & Rank Gap Report\n");
    out.push_str("============================\n\n");
    out.push_str(&format!("Input: {}\n", ctx.input));
    out.push_str(&format!(
        "Imported records: {} (skipped rows: {})\n",
        ctx.import.imported, ctx.import.skipped_rows
    ));
    out.push_str(&format!(
        "Invalid-record policy: {}\n",
        ctx.invalid_record_policy
    ));
    if !ctx.ranking.skipped.is_empty() {
        out.push_str(&format!(
            "Skipped non-finite records: {} ({})\n",
            ctx.ranking.skipped.len(),
            ctx.ranking.skipped.join(", ")
        ));
    }
    out.push('\n');

    out.push_str("1. All records\n");
    out.push_str(&format!("{:<10} {:<30} {:>6}\n", "ID", "NAME", "SCORE"));
    out.push_str(RULE);
    out.push('\n');
    for r in &ctx.records_by_id {
        out.push_str(&format!(
            "{:<10} {:<30} {:>6}\n",
            r.id,
            r.name,
            format_score(r.score)
        ));
    }
    out.push('\n');

    out.push_str("2. Summary statistics\n");
    match &ctx.summary {
        Some(s) => {
            out.push_str(&format!("Total records: {}\n", s.count));
            out.push_str(&format!("Minimum score: {}\n", format_score(s.min)));
            out.push_str(&format!("Maximum score: {}\n", format_score(s.max)));
            out.push_str(&format!("Average score: {}\n", format_score(s.mean)));
            out.push_str(&format!("Top {} records:\n", ctx.top.len()));
            for entry in ctx.top {
                out.push_str(&format!(
                    "  {:>3}. {:<10} {:<30} {:>6}\n",
                    entry.rank,
                    entry.record.id,
                    entry.record.name,
                    format_score(entry.record.score)
                ));
            }
        }
        None => out.push_str("No records available for statistics.\n"),
    }
    out.push('\n');

    out.push_str("3. Performance categories\n");
    push_stats_table(&mut out, "CATEGORY", &ctx.performance_stats);
    out.push('\n');

    out.push_str("4. Letter grades\n");
    let grades = label_lookup(ctx.grades);
    out.push_str(&format!(
        "{:<10} {:<30} {:>6} {:>6}\n",
        "ID", "NAME", "SCORE", "GRADE"
    ));
    out.push_str(RULE);
    out.push('\n');
    for entry in &ctx.ranking.entries {
        let grade = grades.get(entry.record.id.as_str()).copied().unwrap_or("-");
        out.push_str(&format!(
            "{:<10} {:<30} {:>6} {:>6}\n",
            entry.record.id,
            entry.record.name,
            format_score(entry.record.score),
            grade
        ));
    }
    out.push_str("Grade distribution:\n");
    for share in &ctx.grade_distribution {
        out.push_str(&format!(
            "  {:<6} {:>5} {:>7}\n",
            share.label,
            share.count,
            format_percent(share.percentage)
        ));
    }
    out.push('\n');

    out.push_str("5. Rank gap analysis\n");
    out.push_str(&format!(
        "{:>4} {:<10} {:<30} {:>6} {:>6}\n",
        "RANK", "ID", "NAME", "SCORE", "GAP"
    ));
    out.push_str(RULE);
    out.push('\n');
    for entry in &ctx.ranking.entries {
        let gap = match entry.gap_to_next {
            Some(g) if ctx.ranking.is_max_gap(entry) => format!("{}*", format_score(g)),
            Some(g) => format_score(g),
            None => "N/A".to_string(),
        };
        out.push_str(&format!(
            "{:>4} {:<10} {:<30} {:>6} {:>6}\n",
            entry.rank,
            entry.record.id,
            entry.record.name,
            format_score(entry.record.score),
            gap
        ));
    }
    match (
        &ctx.ranking.max_gap,
        &ctx.ranking.max_gap_pair,
        &ctx.ranking.mean_gap,
    ) {
        (Some(max), Some((upper, lower)), Some(mean)) => {
            out.push_str(&format!(
                "The largest score gap ({}) is between:\n",
                format_score(*max)
            ));
            out.push_str(&format!(
                "  - {} (score: {})\n",
                upper.name,
                format_score(upper.score)
            ));
            out.push_str(&format!(
                "  - {} (score: {})\n",
                lower.name,
                format_score(lower.score)
            ));
            out.push_str(&format!(
                "The average gap between consecutive records is {}\n",
                format_mean_gap(*mean)
            ));
        }
        _ => out.push_str("Fewer than two ranked records; no gap to report.\n"),
    }

    out
}

fn push_stats_table(out: &mut String, heading: &str, stats: &[CategoryStats]) {
    out.push_str(&format!(
        "{:<20} {:>5} {:>6} {:>6} {:>6}\n",
        heading, "COUNT", "MIN", "MAX", "AVG"
    ));
    out.push_str(RULE);
    out.push('\n');
    if stats.is_empty() {
        out.push_str("(no classified records)\n");
        return;
    }
    for s in stats {
        out.push_str(&format!(
            "{:<20} {:>5} {:>6} {:>6} {:>6}\n",
            s.label,
            s.count,
            format_score(s.min),
            format_score(s.max),
            format_score(s.mean)
        ));
    }
}
