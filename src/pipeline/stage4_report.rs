use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::input::ImportReport;
use crate::model::gaps::GapAnalysis;
use crate::model::record::Record;
use crate::pipeline::InvalidRecordPolicy;
use crate::pipeline::stage1_classify::Classification;
use crate::pipeline::stage2_summarize::{distribution, summarize};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{ReportContext, format_score, label_lookup, score_summary};

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub source: String,
    pub import: ImportReport,
    pub policy: InvalidRecordPolicy,
    pub top_n: usize,

    pub records: &'a [Record],
    pub performance: &'a Classification,
    pub grades: &'a Classification,
    pub ranking: &'a GapAnalysis,

    pub tool_name: String,
    pub tool_version: String,
}

pub fn build_report_context<'a>(input: &Stage4Input<'a>) -> ReportContext<'a> {
    let mut records_by_id = input.records.iter().collect::<Vec<_>>();
    records_by_id.sort_by(|a, b| a.id.cmp(&b.id));

    let grade_stats = summarize(&input.grades.labeled);
    let grade_distribution = distribution(&grade_stats);

    ReportContext {
        tool_name: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        input: input.source.clone(),
        import: input.import,
        invalid_record_policy: input.policy.name(),
        records_by_id,
        summary: score_summary(input.records),
        top: input.ranking.top(input.top_n),
        performance: input.performance,
        performance_stats: summarize(&input.performance.labeled),
        grades: input.grades,
        grade_stats,
        grade_distribution,
        ranking: input.ranking,
    }
}

pub fn write_reports(ctx: &ReportContext<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(ctx))?;

    let summary_path = out_dir.join("summary.json");
    write_text(&summary_path, &render_summary_json(ctx)?)?;

    let ranking_path = out_dir.join("ranking.tsv");
    write_ranking_tsv(ctx, &ranking_path)?;

    tracing::info!(
        "wrote report.txt, summary.json and ranking.tsv to {}",
        out_dir.display()
    );
    Ok(())
}

fn write_ranking_tsv(ctx: &ReportContext<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "rank",
        "id",
        "name",
        "score",
        "gap_to_next",
        "max_gap",
        "performance",
        "letter_grade",
    ];
    writeln!(w, "{}", header.join("\t"))?;

    let performance = label_lookup(ctx.performance);
    let grades = label_lookup(ctx.grades);
    for entry in &ctx.ranking.entries {
        let id = entry.record.id.as_str();
        let gap = entry.gap_to_next.map(format_score).unwrap_or_default();
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            entry.rank,
            id,
            entry.record.name,
            format_score(entry.record.score),
            gap,
            ctx.ranking.is_max_gap(entry),
            performance.get(id).copied().unwrap_or(""),
            grades.get(id).copied().unwrap_or("")
        )?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
