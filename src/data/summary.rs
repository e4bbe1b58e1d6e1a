use std::fmt;

use super::catalog::{resolve_column, Parameter, CATALOG};
use super::model::LogTable;

// ---------------------------------------------------------------------------
// Row window
// ---------------------------------------------------------------------------

/// Half-open row range `[start, end)` into the concatenation of all loaded
/// tables in upload order. `end > start` is enforced at the widget boundary;
/// here an over-long window is silently clipped and an empty one simply
/// yields no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
}

impl RowWindow {
    pub fn new(start: usize, end: usize) -> Self {
        RowWindow { start, end }
    }

    /// Clip to the available row count.
    pub fn clip(self, total: usize) -> RowWindow {
        RowWindow {
            start: self.start.min(total),
            end: self.end.min(total),
        }
    }

    /// Intersection with a table spanning global rows `[offset, offset+len)`,
    /// as local indices into that table.
    fn local(self, offset: usize, len: usize) -> (usize, usize) {
        let lo = self.start.saturating_sub(offset).min(len);
        let hi = self.end.saturating_sub(offset).min(len);
        (lo, hi.max(lo))
    }
}

// ---------------------------------------------------------------------------
// Summary values
// ---------------------------------------------------------------------------

/// Outcome for one canonical parameter. Both sentinels render as `-`;
/// only `NotFound` enters the missing-columns diagnostic list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryValue {
    Mean(f64),
    /// A column resolved somewhere, but the window held no numeric cells.
    NoData,
    /// No table has a column for this parameter.
    NotFound,
}

impl SummaryValue {
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, SummaryValue::Mean(_))
    }
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Mean(m) => write!(f, "{m:.2}"),
            SummaryValue::NoData | SummaryValue::NotFound => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub parameter: &'static str,
    pub value: SummaryValue,
}

/// One row per catalog entry, in catalog order, plus the canonical names
/// that matched no column in any table.
#[derive(Debug, Clone, Default)]
pub struct SummaryReport {
    pub rows: Vec<SummaryRow>,
    pub missing: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Summarize the default catalog over the given tables and window.
pub fn summarize(tables: &[&LogTable], window: RowWindow) -> SummaryReport {
    summarize_catalog(tables, CATALOG, window)
}

/// Per canonical name, scan tables in upload order; the first table whose
/// resolved column yields at least one numeric value in the window supplies
/// the mean and ends the scan — a later file never overwrites a computed
/// value. No value anywhere is a sentinel, never zero.
pub fn summarize_catalog(
    tables: &[&LogTable],
    catalog: &[Parameter],
    window: RowWindow,
) -> SummaryReport {
    let total: usize = tables.iter().map(|t| t.len()).sum();
    let window = window.clip(total);

    let mut rows = Vec::with_capacity(catalog.len());
    let mut missing = Vec::new();

    for param in catalog {
        let mut resolved_anywhere = false;
        let mut mean = None;

        let mut offset = 0usize;
        for table in tables {
            if let Some(col) = resolve_column(&table.columns, param) {
                resolved_anywhere = true;
                let (lo, hi) = window.local(offset, table.len());
                let values = window_values(table, col, lo, hi);
                if !values.is_empty() {
                    mean = Some(values.iter().sum::<f64>() / values.len() as f64);
                    break;
                }
            }
            offset += table.len();
        }

        let value = match mean {
            Some(m) => SummaryValue::Mean(m),
            None if resolved_anywhere => SummaryValue::NoData,
            None => {
                missing.push(param.canonical);
                SummaryValue::NotFound
            }
        };
        rows.push(SummaryRow {
            parameter: param.canonical,
            value,
        });
    }

    SummaryReport { rows, missing }
}

/// Numeric coercion for a single cell. Cells that fail to parse contribute
/// nothing to an aggregate and are not errors.
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn window_values(table: &LogTable, col: usize, lo: usize, hi: usize) -> Vec<f64> {
    (lo..hi)
        .filter_map(|r| coerce_numeric(table.cell(r, col)))
        .collect()
}

// ---------------------------------------------------------------------------
// Per-column statistics (per-file readout)
// ---------------------------------------------------------------------------

/// Max/min/mean of one column over a per-file row range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

/// `None` when the range holds no numeric cells.
pub fn column_stats(table: &LogTable, col: usize, start: usize, end: usize) -> Option<ColumnStats> {
    let end = end.min(table.len());
    let start = start.min(end);
    let values = window_values(table, col, start, end);
    if values.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in &values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    Some(ColumnStats {
        min,
        max,
        mean: sum / values.len() as f64,
        count: values.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LogTable;

    fn table(columns: &[&str], rows: &[&[&str]]) -> LogTable {
        LogTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    const VALUE: &[Parameter] = &[Parameter {
        canonical: "Value",
        aliases: &[],
    }];

    const POWER: &[Parameter] = &[Parameter {
        canonical: "Power [W]",
        aliases: &[],
    }];

    #[test]
    fn mean_over_window_is_two_decimal() {
        let t = table(
            &["Value", "Tag"],
            &[&["10", "x"], &["20", "y"], &["30", "z"]],
        );
        let report = summarize_catalog(&[&t], VALUE, RowWindow::new(0, 3));
        assert_eq!(report.rows[0].value.to_string(), "20.00");
        assert!(report.missing.is_empty());
    }

    #[test]
    fn first_table_with_values_wins() {
        let a = table(&["Power [W]"], &[&["10"], &["10"]]);
        let b = table(&["power[w]"], &[&["20"], &["20"]]);
        let report = summarize_catalog(&[&a, &b], POWER, RowWindow::new(0, 4));
        assert_eq!(report.rows[0].value, SummaryValue::Mean(10.0));
    }

    #[test]
    fn oversized_window_is_clipped() {
        let t = table(&["Value"], &[&["1"], &["2"], &["3"], &["4"], &["5"]]);
        let report = summarize_catalog(&[&t], VALUE, RowWindow::new(0, 1000));
        assert_eq!(report.rows[0].value, SummaryValue::Mean(3.0));
    }

    #[test]
    fn unparseable_cells_contribute_nothing() {
        let t = table(&["Value"], &[&["12.5"], &["abc"], &[""], &["7.0"]]);
        let report = summarize_catalog(&[&t], VALUE, RowWindow::new(0, 4));
        assert_eq!(report.rows[0].value.to_string(), "9.75");
    }

    #[test]
    fn empty_window_is_sentinel_for_every_parameter() {
        let t = table(&["Value", "Power [W]"], &[&["1", "2"]]);
        let catalog: Vec<Parameter> = VALUE.iter().chain(POWER).copied().collect();
        let report = summarize_catalog(&[&t], &catalog, RowWindow::new(1, 1));
        assert_eq!(report.rows.len(), 2);
        for row in &report.rows {
            assert!(row.value.is_sentinel(), "{}", row.parameter);
            assert_eq!(row.value.to_string(), "-");
        }
    }

    #[test]
    fn window_spans_table_boundaries_with_global_indices() {
        let a = table(&["Value"], &[&["100"], &["100"]]);
        let b = table(&["Value"], &[&["50"], &["70"]]);
        // Global rows 2..4 lie entirely in table b, but table a resolves
        // first and holds no rows there — the scan moves on to b.
        let report = summarize_catalog(&[&a, &b], VALUE, RowWindow::new(2, 4));
        assert_eq!(report.rows[0].value, SummaryValue::Mean(60.0));
    }

    #[test]
    fn not_found_and_no_data_are_distinct() {
        let t = table(&["Value"], &[&["abc"]]);
        let catalog: Vec<Parameter> = VALUE.iter().chain(POWER).copied().collect();
        let report = summarize_catalog(&[&t], &catalog, RowWindow::new(0, 1));

        assert_eq!(report.rows[0].value, SummaryValue::NoData);
        assert_eq!(report.rows[1].value, SummaryValue::NotFound);
        assert_eq!(report.missing, vec!["Power [W]"]);
    }

    #[test]
    fn no_tables_marks_everything_missing() {
        let report = summarize_catalog(&[], VALUE, RowWindow::new(0, 10));
        assert_eq!(report.rows[0].value, SummaryValue::NotFound);
        assert_eq!(report.missing, vec!["Value"]);
    }

    #[test]
    fn column_stats_over_range() {
        let t = table(&["Value"], &[&["1"], &["5"], &["3"], &["oops"]]);
        let stats = column_stats(&t, 0, 0, 4).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.count, 3);

        assert!(column_stats(&t, 0, 3, 4).is_none());
    }
}
