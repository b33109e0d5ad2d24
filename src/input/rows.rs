use std::collections::HashMap;
use std::io::Read;

use crate::input::{ImportReport, InputError};
use crate::model::record::Record;

const EXPECTED_COLUMNS: usize = 3;

pub fn parse_records<R: Read>(reader: R) -> Result<(Vec<Record>, ImportReport), InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = rdr.headers()?.iter().collect::<Vec<_>>().join(", ");
    if header.is_empty() {
        tracing::warn!("record file is empty; nothing to import");
        return Ok((Vec::new(), ImportReport::default()));
    }
    tracing::debug!("CSV header: {}", header);

    let mut records = Vec::new();
    let mut report = ImportReport::default();
    let mut first_line_by_id: HashMap<String, u64> = HashMap::new();

    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() != EXPECTED_COLUMNS {
            tracing::warn!(
                "skipping row with {} columns (expected {}) on line {}",
                row.len(),
                EXPECTED_COLUMNS,
                line
            );
            report.skipped_rows += 1;
            continue;
        }

        let id = &row[0];
        let name = &row[1];
        let raw_score = &row[2];

        if id.is_empty() || name.is_empty() {
            tracing::warn!("skipping row with empty id or name on line {}", line);
            report.skipped_rows += 1;
            continue;
        }

        let score = match raw_score.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    "skipping row with invalid score '{}' on line {} (id {})",
                    raw_score,
                    line,
                    id
                );
                report.skipped_rows += 1;
                continue;
            }
        };

        if let Some(first) = first_line_by_id.get(id) {
            tracing::debug!("id '{}' first seen on line {}", id, first);
            return Err(InputError::DuplicateId {
                id: id.to_string(),
                line,
            });
        }
        first_line_by_id.insert(id.to_string(), line);

        records.push(Record::new(id, name, score));
        report.imported += 1;
    }

    Ok((records, report))
}
