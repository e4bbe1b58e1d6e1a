use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::data::model::{LogTable, SourceCategory};
use crate::data::summary::SummaryReport;
use crate::state::LoadedLog;

// ---------------------------------------------------------------------------
// Export assembler
// ---------------------------------------------------------------------------

/// Fixed artifact names; conventions, not configuration.
pub const WORKBOOK_FILE_NAME: &str = "A_merged_raw_data.xlsx";
pub const RAW_CSV_FILE_NAME: &str = "selected_raw_data.csv";

/// Concatenated trimmed tables per category, in fixed sheet order.
/// Categories with no files are omitted.
pub fn merged_by_category(logs: &[LoadedLog]) -> Vec<(SourceCategory, LogTable)> {
    SourceCategory::ALL
        .iter()
        .filter_map(|&category| {
            let tables: Vec<&LogTable> = logs
                .iter()
                .filter(|l| l.category == category)
                .map(|l| &l.table)
                .collect();
            if tables.is_empty() {
                None
            } else {
                Some((category, LogTable::concat(&tables)))
            }
        })
        .collect()
}

/// Write the multi-sheet workbook: one sheet per source category holding the
/// concatenated trimmed tables in upload order, plus a `Summary` sheet when
/// a summary is available.
pub fn export_workbook(
    logs: &[LoadedLog],
    summary: Option<&SummaryReport>,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    for (category, table) in merged_by_category(logs) {
        let worksheet = workbook
            .add_worksheet()
            .set_name(category.sheet_name())
            .with_context(|| format!("creating sheet '{category}'"))?;

        for (c, column) in table.columns.iter().enumerate() {
            worksheet.write_string(0, c as u16, column.as_str())?;
        }
        for (r, row) in table.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                // Numeric cells become numbers so spreadsheet formulas work
                // on the exported sheets.
                match cell.trim().parse::<f64>() {
                    Ok(n) => worksheet.write_number((r + 1) as u32, c as u16, n)?,
                    Err(_) => worksheet.write_string((r + 1) as u32, c as u16, cell.as_str())?,
                };
            }
        }
    }

    if let Some(report) = summary {
        let worksheet = workbook
            .add_worksheet()
            .set_name("Summary")
            .context("creating summary sheet")?;
        worksheet.write_string(0, 0, "Parameter")?;
        worksheet.write_string(0, 1, "Mean")?;
        for (r, row) in report.rows.iter().enumerate() {
            worksheet.write_string((r + 1) as u32, 0, row.parameter)?;
            worksheet.write_string((r + 1) as u32, 1, row.value.to_string())?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Flat CSV of the user-selected columns over each file's selected row
/// range, concatenated side by side. UTF-8 with BOM so spreadsheet tools
/// pick the encoding up.
pub fn export_selected_csv(logs: &[LoadedLog], path: &Path) -> Result<()> {
    let mut headers: Vec<String> = Vec::new();
    let mut series: Vec<Vec<String>> = Vec::new();

    for log in logs {
        let (start, end) = log.range;
        let end = end.min(log.table.len());
        let start = start.min(end);
        for &col in &log.selected {
            headers.push(log.table.columns[col].clone());
            series.push(
                (start..end)
                    .map(|r| log.table.cell(r, col).to_string())
                    .collect(),
            );
        }
    }

    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(b"\xef\xbb\xbf").context("writing BOM")?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&headers).context("writing CSV header")?;

    let height = series.iter().map(Vec::len).max().unwrap_or(0);
    for r in 0..height {
        let record: Vec<&str> = series
            .iter()
            .map(|s| s.get(r).map(String::as_str).unwrap_or(""))
            .collect();
        writer.write_record(&record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
