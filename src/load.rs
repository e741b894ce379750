use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::StringRecord;

use crate::db::DbSession;
use crate::encode::{classify_row, encode_row};
use crate::logger::{debug, info};
use crate::schema::MANIFEST;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows: u64,
}

/// Bulk-load a manifest file: one INSERT per data row, one transaction,
/// committed only after every row went in.
pub fn load_file(session: &mut dyn DbSession, path: &Path) -> Result<LoadSummary> {
    let columns = MANIFEST.column_names();
    let numeric = MANIFEST.numeric_positions();

    session.begin()?;
    let rows = for_each_row(path, |line, record| {
        let fields: Vec<&str> = record.iter().collect();
        let values = classify_row(&fields, &numeric);
        session
            .insert(MANIFEST.name, &columns, &values)
            .with_context(|| format!("insert failed at line {}", line))?;
        Ok(())
    })?;
    session.commit()?;

    info(&format!("loaded {} manifest rows from {}", rows, path.display()));
    Ok(LoadSummary { rows })
}

/// Render the literal INSERT statements instead of executing them.
/// This is what `--dry-run` prints; the value lists come straight from
/// the row encoder.
pub fn render_sql(path: &Path, out: &mut dyn Write) -> Result<LoadSummary> {
    let numeric = MANIFEST.numeric_positions();

    let rows = for_each_row(path, |_, record| {
        let fields: Vec<&str> = record.iter().collect();
        writeln!(
            out,
            "INSERT INTO {} VALUES {};",
            MANIFEST.name,
            encode_row(&fields, &numeric)
        )?;
        Ok(())
    })?;

    Ok(LoadSummary { rows })
}

/// Iterate data rows of a manifest file. The header record and the spacer
/// record that follows it are skipped; every data record must match the
/// manifest column count exactly.
fn for_each_row(
    path: &Path,
    mut f: impl FnMut(u64, &StringRecord) -> Result<()>,
) -> Result<u64> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let expected = MANIFEST.columns.len();
    let mut rows = 0u64;
    let mut spacer_skipped = false;

    for result in reader.records() {
        let record = result.with_context(|| format!("failed to read {}", path.display()))?;
        let line = record.position().map_or(0, |p| p.line());

        if !spacer_skipped {
            spacer_skipped = true;
            debug(&format!("skipping spacer row at line {}", line));
            continue;
        }
        // whitespace-only stragglers at the end of the file
        if record.len() == 1 && record.get(0).is_some_and(|s| s.trim().is_empty()) {
            continue;
        }
        if record.len() != expected {
            bail!(
                "line {}: expected {} fields, found {}",
                line,
                expected,
                record.len()
            );
        }

        f(line, &record)?;
        rows += 1;
    }

    Ok(rows)
}
