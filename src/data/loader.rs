use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use thiserror::Error;

use super::model::{LogTable, SourceCategory};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Per-file size cap. Uploads are held fully in memory, so unbounded files
/// are a resource-exhaustion risk; anything over the cap fails per-file.
pub const MAX_FILE_BYTES: u64 = 64 * 1024 * 1024;

/// GPUmon CSV exports carry a fixed preamble ahead of the header line.
const GPUMON_PREAMBLE_LINES: usize = 35;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("file is {0} bytes, over the {MAX_FILE_BYTES}-byte limit")]
    TooLarge(u64),
    #[error("file is not valid cp950/Big5 text")]
    Decode,
    #[error("file has no header row")]
    Empty,
}

/// Load one classified file into a [`LogTable`]. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – legacy cp950/Big5 text; GPUmon files skip the vendor preamble
/// * `.xls` / `.xlsx` / `.xlsb` / `.ods` – first sheet, first row as header
///
/// The result is untrimmed: category row offsets are applied separately by
/// [`super::trim::trim_rows`] so a policy change can re-trim without
/// re-reading the file.
pub fn load_file(path: &Path, category: SourceCategory) -> Result<LogTable> {
    let meta = fs::metadata(path).context("reading file metadata")?;
    if meta.len() > MAX_FILE_BYTES {
        bail!(LoadError::TooLarge(meta.len()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let bytes = fs::read(path).context("reading CSV file")?;
            parse_csv_bytes(&bytes, category)
        }
        "xls" | "xlsx" | "xlsb" | "ods" => load_excel(path),
        other => bail!(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Decode and parse CSV bytes for the given category.
pub fn parse_csv_bytes(bytes: &[u8], category: SourceCategory) -> Result<LogTable> {
    let text = decode_cp950(bytes)?;

    let text = if category == SourceCategory::GpuMon {
        skip_preamble(&text, GPUMON_PREAMBLE_LINES)
    } else {
        text
    };

    if text.trim().is_empty() {
        bail!(LoadError::Empty);
    }
    parse_csv_text(&text, category)
}

/// The vendor tools write a legacy regional 8-bit encoding (cp950). A file
/// that does not decode under it is a hard per-file error — skipped by the
/// caller, never fatal to the session.
fn decode_cp950(bytes: &[u8]) -> Result<String> {
    let (decoded, _, had_errors) = encoding_rs::BIG5.decode(bytes);
    if had_errors {
        bail!(LoadError::Decode);
    }
    Ok(decoded.into_owned())
}

/// Drop the first `n` raw lines; the next line becomes the header row.
fn skip_preamble(text: &str, n: usize) -> String {
    text.lines()
        .skip(n)
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_csv_text(text: &str, category: SourceCategory) -> Result<LogTable> {
    let mut builder = csv::ReaderBuilder::new();
    builder.flexible(true);
    if category == SourceCategory::Hw64 {
        // HW64 logs contain stray quote characters mid-field; quote
        // interpretation mangles them.
        builder.quoting(false);
    }
    let mut reader = builder.from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if columns.iter().all(|c| c.is_empty()) {
        bail!(LoadError::Empty);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record.iter().map(|f| f.to_string()).collect()),
            Err(e) => {
                // Malformed lines are skipped, matching the vendor exports'
                // habit of mixing non-tabular trailers into the data.
                log::debug!("skipping malformed CSV record: {e}");
            }
        }
    }

    Ok(LogTable::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// First sheet only; the first row is the header. Vendor Excel exports are
/// already free of the CSV preambles, so no line skip applies.
fn load_excel(path: &Path) -> Result<LogTable> {
    let mut workbook = open_workbook_auto(path).context("opening Excel file")?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .cloned()
        .context("Excel file contains no sheets")?;
    let range = workbook
        .worksheet_range(&first)
        .with_context(|| format!("reading sheet '{first}'"))?;

    let mut rows_iter = range.rows();
    let header = match rows_iter.next() {
        Some(h) => h,
        None => bail!(LoadError::Empty),
    };

    let columns: Vec<String> = header
        .iter()
        .map(|c| cell_to_string(c).trim().to_string())
        .collect();
    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(LogTable::new(columns, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_csv_parses_with_trimmed_headers() {
        let bytes = b"Time , Value \n0,1.5\n1,2.5\n";
        let table = parse_csv_bytes(bytes, SourceCategory::Ptat).unwrap();
        assert_eq!(table.columns, vec!["Time", "Value"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 1), "2.5");
    }

    #[test]
    fn gpumon_skips_fixed_preamble() {
        let mut text = String::new();
        for i in 0..35 {
            text.push_str(&format!("preamble line {i}\n"));
        }
        text.push_str("Date, 1:TGP (W)\n");
        text.push_str("2024/01/01,95.0\n");

        let table = parse_csv_bytes(text.as_bytes(), SourceCategory::GpuMon).unwrap();
        assert_eq!(table.columns, vec!["Date", "1:TGP (W)"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 1), "95.0");
    }

    #[test]
    fn hw64_keeps_stray_quotes_literal() {
        let bytes = b"Sensor \"A\",Value\nx,1\n";
        let table = parse_csv_bytes(bytes, SourceCategory::Hw64).unwrap();
        assert_eq!(table.columns[0], "Sensor \"A\"");
    }

    #[test]
    fn cp950_text_round_trips() {
        // Self-consistent: encode a label through the same codec the vendor
        // tools use, then decode it back.
        let source = "時間,溫度(℃)\n0,45.5\n";
        let (encoded, _, _) = encoding_rs::BIG5.encode(source);
        let table = parse_csv_bytes(&encoded, SourceCategory::Ptat).unwrap();
        assert_eq!(table.columns, vec!["時間", "溫度(℃)"]);
        assert_eq!(table.cell(0, 1), "45.5");
    }

    #[test]
    fn undecodable_bytes_are_a_hard_error() {
        let bytes = b"Value\n\xff\xff\n";
        let err = parse_csv_bytes(bytes, SourceCategory::Ptat).unwrap_err();
        assert!(err.to_string().contains("cp950"));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(parse_csv_bytes(b"", SourceCategory::Ptat).is_err());
        assert!(parse_csv_bytes(b"\n\n", SourceCategory::Ptat).is_err());
    }

    #[test]
    fn ragged_rows_are_kept() {
        let bytes = b"a,b,c\n1,2,3\n4,5\n6\n";
        let table = parse_csv_bytes(bytes, SourceCategory::Ptat).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(1, 2), "");
        assert_eq!(table.cell(2, 0), "6");
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.parquet");
        fs::write(&path, b"whatever").unwrap();
        let err = load_file(&path, SourceCategory::Ptat).unwrap_err();
        assert!(err.to_string().contains("parquet"));
    }
}
