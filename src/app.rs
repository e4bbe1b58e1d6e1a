use eframe::egui;

use crate::state::SessionState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ThermalogApp {
    pub state: SessionState,
}

impl eframe::App for ThermalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: session settings, per-file controls ----
        egui::SidePanel::left("session_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: canonical parameter summary ----
        egui::TopBottomPanel::bottom("summary_panel")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::summary_panel(ui, &self.state);
            });

        // ---- Central panel: comparison plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::comparison_plot(ui, &self.state);
        });
    }
}
