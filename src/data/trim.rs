use super::model::{LogTable, SourceCategory};

// ---------------------------------------------------------------------------
// Vendor boilerplate row trimming
// ---------------------------------------------------------------------------

/// Rows of vendor metadata before the data proper in HW64 and PTAT exports.
const LEADING_METADATA_ROWS: usize = 5;

/// HW64 exports end in a summary/footer pair under the strict policy.
const HW64_TRAILING_ROWS: usize = 2;

/// How HW64 tables are trimmed. Two policies circulate among the vendor
/// scripts and produce different row counts on the same file; they are never
/// merged silently — the session picks one, `StrictOffsets` by default.
///
/// PTAT always drops the first [`LEADING_METADATA_ROWS`] rows. GPUmon tables
/// arrive pre-trimmed: the loader already skipped the preamble lines ahead
/// of the header (see [`super::loader`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimPolicy {
    /// HW64 drops the first 5 and last 2 rows.
    #[default]
    StrictOffsets,
    /// HW64 keeps leading rows and drops the last row only when its
    /// non-empty cells do not all parse as numbers (a trailing
    /// average/footer line).
    ConditionalTail,
}

impl TrimPolicy {
    pub const ALL: [TrimPolicy; 2] = [TrimPolicy::StrictOffsets, TrimPolicy::ConditionalTail];

    pub fn label(&self) -> &'static str {
        match self {
            TrimPolicy::StrictOffsets => "Fixed offsets",
            TrimPolicy::ConditionalTail => "Conditional tail",
        }
    }
}

/// Strip vendor boilerplate rows for the given category and policy.
/// Deterministic; saturates on tables shorter than the offsets.
pub fn trim_rows(table: &LogTable, category: SourceCategory, policy: TrimPolicy) -> LogTable {
    let rows: Vec<Vec<String>> = match (category, policy) {
        (SourceCategory::GpuMon, _) => table.rows.clone(),
        (SourceCategory::Ptat, _) => drop_leading(&table.rows, LEADING_METADATA_ROWS),
        (SourceCategory::Hw64, TrimPolicy::StrictOffsets) => {
            let rows = drop_leading(&table.rows, LEADING_METADATA_ROWS);
            let keep = rows.len().saturating_sub(HW64_TRAILING_ROWS);
            rows[..keep].to_vec()
        }
        (SourceCategory::Hw64, TrimPolicy::ConditionalTail) => {
            let mut rows = table.rows.clone();
            if rows.last().is_some_and(|row| !is_fully_numeric(row)) {
                rows.pop();
            }
            rows
        }
    };

    LogTable::new(table.columns.clone(), rows)
}

fn drop_leading(rows: &[Vec<String>], n: usize) -> Vec<Vec<String>> {
    rows.get(n.min(rows.len())..).unwrap_or(&[]).to_vec()
}

/// True when every non-empty cell parses as a number. A row of only empty
/// cells counts as numeric, matching the observed footer heuristic.
fn is_fully_numeric(row: &[String]) -> bool {
    row.iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .all(|cell| cell.parse::<f64>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_table(n: usize) -> LogTable {
        LogTable::new(
            vec!["v".to_string()],
            (0..n).map(|i| vec![i.to_string()]).collect(),
        )
    }

    #[test]
    fn strict_offsets_hw64_drops_head_and_tail() {
        let trimmed = trim_rows(
            &numbered_table(10),
            SourceCategory::Hw64,
            TrimPolicy::StrictOffsets,
        );
        assert_eq!(trimmed.rows.len(), 3);
        assert_eq!(trimmed.cell(0, 0), "5");
        assert_eq!(trimmed.cell(2, 0), "7");
    }

    #[test]
    fn strict_offsets_ptat_drops_head_only() {
        let trimmed = trim_rows(
            &numbered_table(8),
            SourceCategory::Ptat,
            TrimPolicy::StrictOffsets,
        );
        assert_eq!(trimmed.rows.len(), 3);
        assert_eq!(trimmed.cell(0, 0), "5");
    }

    #[test]
    fn gpumon_is_untouched() {
        for policy in TrimPolicy::ALL {
            let trimmed = trim_rows(&numbered_table(4), SourceCategory::GpuMon, policy);
            assert_eq!(trimmed.rows.len(), 4);
        }
    }

    #[test]
    fn short_tables_saturate_to_empty() {
        let trimmed = trim_rows(
            &numbered_table(6),
            SourceCategory::Hw64,
            TrimPolicy::StrictOffsets,
        );
        assert!(trimmed.is_empty());

        let trimmed = trim_rows(
            &numbered_table(3),
            SourceCategory::Ptat,
            TrimPolicy::StrictOffsets,
        );
        assert!(trimmed.is_empty());
    }

    #[test]
    fn conditional_tail_drops_textual_footer() {
        let mut table = numbered_table(4);
        table
            .rows
            .push(vec!["Average: 12.3".to_string()]);

        let trimmed = trim_rows(&table, SourceCategory::Hw64, TrimPolicy::ConditionalTail);
        assert_eq!(trimmed.rows.len(), 4);
        assert_eq!(trimmed.cell(3, 0), "3");
    }

    #[test]
    fn conditional_tail_keeps_numeric_last_row() {
        let table = numbered_table(4);
        let trimmed = trim_rows(&table, SourceCategory::Hw64, TrimPolicy::ConditionalTail);
        assert_eq!(trimmed.rows.len(), 4);
    }

    #[test]
    fn conditional_tail_keeps_all_empty_last_row() {
        let mut table = numbered_table(2);
        table.rows.push(vec![String::new(), String::new()]);
        let trimmed = trim_rows(&table, SourceCategory::Hw64, TrimPolicy::ConditionalTail);
        assert_eq!(trimmed.rows.len(), 3);
    }

    #[test]
    fn deterministic_for_same_input() {
        let table = numbered_table(12);
        for policy in TrimPolicy::ALL {
            let a = trim_rows(&table, SourceCategory::Hw64, policy);
            let b = trim_rows(&table, SourceCategory::Hw64, policy);
            assert_eq!(a, b);
        }
    }
}
