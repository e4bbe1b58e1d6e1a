use std::collections::BTreeSet;
use std::path::Path;

use crate::data::classify::classify;
use crate::data::loader;
use crate::data::model::{LogTable, SourceCategory};
use crate::data::summary::{summarize, RowWindow, SummaryReport};
use crate::data::trim::{trim_rows, TrimPolicy};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One uploaded file, keyed by its short name, in upload order.
pub struct LoadedLog {
    pub file_name: String,
    pub category: SourceCategory,
    /// As parsed (GPUmon preamble skip already applied), before trimming.
    raw: LogTable,
    /// After the session trim policy. What every downstream consumer sees.
    pub table: LogTable,
    /// Column indices picked for the plot, stats readout, and raw CSV export.
    /// Indices, not labels: vendor logs can repeat a label.
    pub selected: BTreeSet<usize>,
    /// Per-file row range `[start, end)` for the plot and stats readout.
    pub range: (usize, usize),
}

impl LoadedLog {
    pub fn new(
        file_name: String,
        category: SourceCategory,
        raw: LogTable,
        policy: TrimPolicy,
    ) -> Self {
        let table = trim_rows(&raw, category, policy);
        let range = (0, table.len());
        LoadedLog {
            file_name,
            category,
            raw,
            table,
            selected: BTreeSet::new(),
            range,
        }
    }

    /// Re-apply trimming after a policy change; selections survive, ranges
    /// clamp to the new length.
    fn retrim(&mut self, policy: TrimPolicy) {
        self.table = trim_rows(&self.raw, self.category, policy);
        let len = self.table.len();
        if self.range.1 == 0 {
            // The previous policy left nothing; start over with everything.
            self.range = (0, len);
        } else {
            self.range.1 = self.range.1.min(len);
            self.range.0 = self.range.0.min(self.range.1.saturating_sub(1));
        }
        self.selected.retain(|&c| c < self.table.columns.len());
    }
}

/// The full per-session state, independent of rendering. Built fresh per
/// session and passed explicitly through the pipeline — uploads, selections,
/// and ranges live here, not in ambient maps.
pub struct SessionState {
    /// Loaded files in upload order.
    pub logs: Vec<LoadedLog>,

    /// HW64 trimming policy for the whole session.
    pub trim_policy: TrimPolicy,

    /// Summary row window over the concatenation of all tables.
    pub window_start: usize,
    pub window_end: usize,

    /// Canonical parameter summary (None until a file loads).
    pub summary: Option<SummaryReport>,

    /// Editable comparison-chart title.
    pub chart_title: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            trim_policy: TrimPolicy::default(),
            window_start: 0,
            window_end: 0,
            summary: None,
            chart_title: "Cross-file comparison".to_string(),
            status_message: None,
        }
    }
}

impl SessionState {
    /// Total rows across all loaded tables, in upload order.
    pub fn total_rows(&self) -> usize {
        self.logs.iter().map(|l| l.table.len()).sum()
    }

    /// Ingest one picked file: classify by name, load, trim, and refresh the
    /// summary. Every failure is per-file — warn and keep the session going.
    pub fn add_file(&mut self, path: &Path) {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let Some(category) = classify(&file_name) else {
            log::warn!("'{file_name}' matches no known log family, skipped");
            self.status_message = Some(format!("'{file_name}' unrecognized, skipped"));
            return;
        };

        match loader::load_file(path, category) {
            Ok(raw) => {
                let loaded = LoadedLog::new(file_name.clone(), category, raw, self.trim_policy);
                log::info!(
                    "loaded '{}' as {} ({} rows, {} columns)",
                    file_name,
                    category,
                    loaded.table.len(),
                    loaded.table.columns.len()
                );
                self.logs.push(loaded);
                self.status_message = None;
                self.window_end = self.total_rows();
                self.recompute_summary();
            }
            Err(e) => {
                log::error!("failed to load '{file_name}': {e:#}");
                self.status_message = Some(format!("Error: {file_name}: {e:#}"));
            }
        }
    }

    /// Switch the HW64 trimming policy and re-trim every table from its raw
    /// form; no file is re-read.
    pub fn set_trim_policy(&mut self, policy: TrimPolicy) {
        if policy == self.trim_policy {
            return;
        }
        self.trim_policy = policy;
        for log in &mut self.logs {
            log.retrim(policy);
        }
        self.window_end = self.window_end.min(self.total_rows());
        self.window_start = self.window_start.min(self.window_end.saturating_sub(1));
        self.recompute_summary();
    }

    /// Full re-run of the aggregation over the current window. Cheap enough
    /// to call on every interaction that changes inputs.
    pub fn recompute_summary(&mut self) {
        if self.logs.is_empty() {
            self.summary = None;
            return;
        }
        let tables: Vec<&LogTable> = self.logs.iter().map(|l| &l.table).collect();
        let window = RowWindow::new(self.window_start, self.window_end);
        self.summary = Some(summarize(&tables, window));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_hw64_csv(dir: &Path, name: &str, data_rows: usize) -> std::path::PathBuf {
        let mut text = String::from("Time,CPU Package Power [W]\n");
        for i in 0..data_rows {
            text.push_str(&format!("{i},{}\n", 40 + i));
        }
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn add_file_classifies_loads_and_summarizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_hw64_csv(dir.path(), "hw64_run.csv", 10);

        let mut state = SessionState::default();
        state.add_file(&path);

        assert_eq!(state.logs.len(), 1);
        assert_eq!(state.logs[0].category, SourceCategory::Hw64);
        // Strict offsets: 10 rows − 5 leading − 2 trailing.
        assert_eq!(state.logs[0].table.len(), 3);
        assert_eq!(state.window_end, 3);
        assert!(state.summary.is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn unrecognized_file_is_skipped_with_warning() {
        let mut state = SessionState::default();
        state.add_file(Path::new("/nonexistent/fan_curve.csv"));
        assert!(state.logs.is_empty());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("unrecognized")));
    }

    #[test]
    fn load_failure_is_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_hw64_csv(dir.path(), "hw64_a.csv", 10);

        let mut state = SessionState::default();
        state.add_file(&good);
        state.add_file(&dir.path().join("hw64_missing.csv"));

        assert_eq!(state.logs.len(), 1);
        assert!(state.status_message.is_some());
        assert!(state.summary.is_some());
    }

    #[test]
    fn policy_switch_retrims_without_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_hw64_csv(dir.path(), "hw64_run.csv", 10);

        let mut state = SessionState::default();
        state.add_file(&path);
        assert_eq!(state.logs[0].table.len(), 3);

        state.set_trim_policy(TrimPolicy::ConditionalTail);
        // All data rows are numeric, so the conditional policy keeps them.
        assert_eq!(state.logs[0].table.len(), 10);
        // The narrower window survives the switch; the UI lets it grow.
        assert_eq!(state.window_end, 3);
        assert!(state.summary.is_some());
    }
}
