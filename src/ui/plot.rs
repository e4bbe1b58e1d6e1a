use eframe::egui::Ui;
use egui_plot::{Line, Plot, PlotPoints};

use crate::color::generate_palette;
use crate::data::summary::coerce_numeric;
use crate::state::SessionState;

// ---------------------------------------------------------------------------
// Cross-file comparison plot (central panel)
// ---------------------------------------------------------------------------

/// Render one line per (file, selected column) pair over that file's row
/// range. Unparseable cells are skipped; x is the position among the
/// surviving values.
pub fn comparison_plot(ui: &mut Ui, state: &SessionState) {
    if state.logs.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open thermal logs to begin  (File → Open…)");
        });
        return;
    }

    ui.heading(&state.chart_title);

    let series = collect_series(state);
    let colors = generate_palette(series.len());

    Plot::new("comparison_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Index")
        .y_axis_label("Value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, (name, values)) in series.iter().enumerate() {
                let points: PlotPoints = values
                    .iter()
                    .enumerate()
                    .map(|(x, &y)| [x as f64, y])
                    .collect();

                let line = Line::new(points)
                    .name(name)
                    .color(colors[i])
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

/// `{file} - {column}` label plus the coerced values, in upload order then
/// table column order.
fn collect_series(state: &SessionState) -> Vec<(String, Vec<f64>)> {
    let mut series = Vec::new();
    for log in &state.logs {
        let (start, end) = log.range;
        let end = end.min(log.table.len());
        let start = start.min(end);
        for &col in &log.selected {
            let values: Vec<f64> = (start..end)
                .filter_map(|r| coerce_numeric(log.table.cell(r, col)))
                .collect();
            let name = format!("{} - {}", log.file_name, log.table.columns[col]);
            series.push((name, values));
        }
    }
    series
}
