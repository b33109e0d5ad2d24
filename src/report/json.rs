use crate::report::ReportContext;

pub fn render_summary_json(ctx: &ReportContext<'_>) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(ctx)?;
    out.push('\n');
    Ok(out)
}
