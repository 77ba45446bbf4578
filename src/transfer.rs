use std::io;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::solve::{self, Solve, MAX_SOLVES};

/// Identifier stamped into every export document.
pub const EXPORT_NAME: &str = "rubiks-timer";
pub const EXPORT_VERSION: u32 = 1;

/// Import failures that abort the whole operation. Individual bad records
/// are not errors; they are filtered out silently.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("not a valid JSON document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("document has no `solves` array")]
    MissingSolves,
}

/// Full-fidelity dump of the in-memory sequence, newest first.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub name: &'static str,
    pub version: u32,
    #[serde(rename = "exportedAt")]
    pub exported_at: DateTime<Local>,
    pub solves: &'a [Solve],
}

impl<'a> ExportDocument<'a> {
    pub fn new(solves: &'a [Solve]) -> Self {
        Self {
            name: EXPORT_NAME,
            version: EXPORT_VERSION,
            exported_at: Local::now(),
            solves,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// How many entries the document carried vs. how many survived validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub kept: usize,
    pub total: usize,
}

/// Parse an import document and merge its solves with the existing sequence.
///
/// Accepts any JSON object carrying a `solves` array; each element may be a
/// bare number (legacy) or a `{ms, at}` record. Imported entries are treated
/// as newest and prepended, then the combined sequence is truncated to
/// [`MAX_SOLVES`]. Shape problems fail the whole import; bad records are
/// dropped per entry.
pub fn import_document(
    raw: &str,
    existing: &[Solve],
) -> Result<(Vec<Solve>, ImportSummary), ImportError> {
    let document: Value = serde_json::from_str(raw)?;
    let entries = document
        .get("solves")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingSolves)?;

    let imported = entries
        .iter()
        .filter_map(solve::coerce_entry)
        .collect::<Vec<Solve>>();
    let summary = ImportSummary {
        kept: imported.len(),
        total: entries.len(),
    };

    Ok((merge_capped(imported, existing), summary))
}

fn merge_capped(imported: Vec<Solve>, existing: &[Solve]) -> Vec<Solve> {
    let mut merged = imported;
    merged.extend_from_slice(existing);
    merged.truncate(MAX_SOLVES);
    merged
}

/// Flat `ms,at` rows for spreadsheet use.
pub fn export_csv<W: io::Write>(solves: &[Solve], writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["ms", "at"])?;
    for solve in solves {
        wtr.write_record([solve.ms.to_string(), solve.at.to_rfc3339()])?;
    }
    wtr.flush()?;
    Ok(())
}
