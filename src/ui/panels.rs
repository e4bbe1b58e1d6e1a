use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::summary::column_stats;
use crate::data::trim::TrimPolicy;
use crate::export;
use crate::state::SessionState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut SessionState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_files_dialog(state);
                ui.close_menu();
            }
            ui.separator();

            let can_export = !state.logs.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export workbook…"))
                .clicked()
            {
                export_workbook_dialog(state);
                ui.close_menu();
            }

            let any_selected = state.logs.iter().any(|l| !l.selected.is_empty());
            if ui
                .add_enabled(any_selected, egui::Button::new("Export raw CSV…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.logs.is_empty() {
            ui.label(format!(
                "{} file(s) loaded, {} rows",
                state.logs.len(),
                state.total_rows()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – session settings and per-file controls
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut SessionState) {
    ui.heading("Session");
    ui.separator();

    if state.logs.is_empty() {
        ui.label("No logs loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- HW64 trimming policy ----
            ui.strong("HW64 trimming");
            let mut policy = state.trim_policy;
            egui::ComboBox::from_id_salt("trim_policy")
                .selected_text(policy.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for p in TrimPolicy::ALL {
                        ui.selectable_value(&mut policy, p, p.label());
                    }
                });
            if policy != state.trim_policy {
                state.set_trim_policy(policy);
            }
            ui.separator();

            // ---- Summary row window ----
            ui.strong("Summary window");
            let total = state.total_rows();
            let mut window_changed = false;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Rows");
                let start_cap = state.window_end.saturating_sub(1);
                window_changed |= ui
                    .add(egui::DragValue::new(&mut state.window_start).range(0..=start_cap))
                    .changed();
                ui.label("to");
                let end_floor = state.window_start + 1;
                window_changed |= ui
                    .add(
                        egui::DragValue::new(&mut state.window_end)
                            .range(end_floor..=total.max(end_floor)),
                    )
                    .changed();
            });
            if window_changed {
                state.recompute_summary();
            }
            ui.separator();

            // ---- Chart title ----
            ui.strong("Chart title");
            ui.text_edit_singleline(&mut state.chart_title);
            ui.separator();

            // ---- Per-file controls ----
            for (i, log) in state.logs.iter_mut().enumerate() {
                let header = format!(
                    "{}  ({}, {} rows)",
                    log.file_name,
                    log.category,
                    log.table.len()
                );
                egui::CollapsingHeader::new(RichText::new(header).strong())
                    .id_salt(i)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        let len = log.table.len();
                        if len == 0 {
                            ui.label("No data rows after trimming.");
                            return;
                        }

                        ui.horizontal(|ui: &mut Ui| {
                            ui.label("Range");
                            let start_cap = log.range.1.saturating_sub(1);
                            ui.add(egui::DragValue::new(&mut log.range.0).range(0..=start_cap));
                            ui.label("to");
                            let end_floor = log.range.0 + 1;
                            ui.add(
                                egui::DragValue::new(&mut log.range.1)
                                    .range(end_floor..=len),
                            );
                        });

                        ui.add_space(4.0);
                        for c in 0..log.table.columns.len() {
                            let mut checked = log.selected.contains(&c);
                            let label = log.table.columns[c].clone();
                            if ui.checkbox(&mut checked, label).changed() {
                                if checked {
                                    log.selected.insert(c);
                                } else {
                                    log.selected.remove(&c);
                                }
                            }
                        }

                        if !log.selected.is_empty() {
                            ui.add_space(4.0);
                            ui.strong("Statistics");
                            for &c in &log.selected {
                                let name = &log.table.columns[c];
                                match column_stats(&log.table, c, log.range.0, log.range.1) {
                                    Some(stats) => {
                                        ui.label(format!(
                                            "{name}: max {:.2}, min {:.2}, mean {:.2}",
                                            stats.max, stats.min, stats.mean
                                        ));
                                    }
                                    None => {
                                        ui.label(format!("{name}: no numeric data in range"));
                                    }
                                }
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Bottom panel – canonical parameter summary
// ---------------------------------------------------------------------------

pub fn summary_panel(ui: &mut Ui, state: &SessionState) {
    ui.heading("Parameter summary");

    let Some(report) = &state.summary else {
        ui.label("No summary yet.");
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(240.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Parameter");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Mean");
            });
        })
        .body(|mut body| {
            body.rows(18.0, report.rows.len(), |mut row| {
                let entry = &report.rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(entry.parameter);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(entry.value.to_string());
                });
            });
        });

    if !report.missing.is_empty() {
        egui::CollapsingHeader::new(format!("Unmatched parameters ({})", report.missing.len()))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                for name in &report.missing {
                    ui.monospace(*name);
                }
            });
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_files_dialog(state: &mut SessionState) {
    let files = rfd::FileDialog::new()
        .set_title("Open thermal logs")
        .add_filter("Thermal logs", &["csv", "xls", "xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xls", "xlsx"])
        .pick_files();

    if let Some(paths) = files {
        for path in paths {
            state.add_file(&path);
        }
    }
}

fn export_workbook_dialog(state: &mut SessionState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export workbook")
        .set_file_name(export::WORKBOOK_FILE_NAME)
        .save_file()
    else {
        return;
    };

    match export::export_workbook(&state.logs, state.summary.as_ref(), &path) {
        Ok(()) => {
            log::info!("exported workbook to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("workbook export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn export_csv_dialog(state: &mut SessionState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export selected raw data")
        .set_file_name(export::RAW_CSV_FILE_NAME)
        .save_file()
    else {
        return;
    };

    match export::export_selected_csv(&state.logs, &path) {
        Ok(()) => {
            log::info!("exported raw CSV to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("raw CSV export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
