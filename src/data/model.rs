use std::fmt;

// ---------------------------------------------------------------------------
// SourceCategory – the vendor-log family a file belongs to
// ---------------------------------------------------------------------------

/// Vendor-log family, derived purely from the filename (see [`super::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    Hw64,
    Ptat,
    GpuMon,
}

impl SourceCategory {
    /// Fixed sheet order for the export workbook.
    pub const ALL: [SourceCategory; 3] = [
        SourceCategory::Hw64,
        SourceCategory::Ptat,
        SourceCategory::GpuMon,
    ];

    pub fn sheet_name(&self) -> &'static str {
        match self {
            SourceCategory::Hw64 => "HW64",
            SourceCategory::Ptat => "PTAT",
            SourceCategory::GpuMon => "GPUmon",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

// ---------------------------------------------------------------------------
// LogTable – one parsed vendor table
// ---------------------------------------------------------------------------

/// An ordered table of string cells as loaded from one export file.
///
/// Cells stay text until aggregation; numeric coercion is parse-based and
/// per-cell (see [`super::summary`]). Rows may be ragged — vendor CSVs carry
/// short lines — so cell access is bounds-checked with empty as the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LogTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        LogTable { columns, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, col), empty string when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Column-union concatenation in table order.
    ///
    /// Column order is first-seen across the inputs; cells missing from a
    /// table are empty.
    pub fn concat(tables: &[&LogTable]) -> LogTable {
        let mut columns: Vec<String> = Vec::new();
        for table in tables {
            for col in &table.columns {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(tables.iter().map(|t| t.len()).sum());
        for table in tables {
            // Per-table mapping: output column → local column index.
            let mapping: Vec<Option<usize>> = columns
                .iter()
                .map(|col| table.columns.iter().position(|c| c == col))
                .collect();

            for r in 0..table.len() {
                rows.push(
                    mapping
                        .iter()
                        .map(|src| match src {
                            Some(c) => table.cell(r, *c).to_string(),
                            None => String::new(),
                        })
                        .collect(),
                );
            }
        }

        LogTable { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> LogTable {
        LogTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn cell_is_empty_outside_ragged_rows() {
        let t = table(&["a", "b"], &[&["1"], &["2", "3"]]);
        assert_eq!(t.cell(0, 0), "1");
        assert_eq!(t.cell(0, 1), "");
        assert_eq!(t.cell(1, 1), "3");
        assert_eq!(t.cell(9, 0), "");
    }

    #[test]
    fn concat_unions_columns_in_first_seen_order() {
        let a = table(&["x", "y"], &[&["1", "2"]]);
        let b = table(&["y", "z"], &[&["3", "4"]]);
        let merged = LogTable::concat(&[&a, &b]);

        assert_eq!(merged.columns, vec!["x", "y", "z"]);
        assert_eq!(merged.rows[0], vec!["1", "2", ""]);
        assert_eq!(merged.rows[1], vec!["", "3", "4"]);
    }

    #[test]
    fn concat_keeps_upload_order() {
        let a = table(&["v"], &[&["1"], &["2"]]);
        let b = table(&["v"], &[&["3"]]);
        let merged = LogTable::concat(&[&a, &b]);
        let cells: Vec<&str> = (0..3).map(|r| merged.cell(r, 0)).collect();
        assert_eq!(cells, vec!["1", "2", "3"]);
    }
}
