use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, report};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MovieExplorerApp {
    pub state: AppState,
}

impl MovieExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MovieExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis toggles ----
        egui::SidePanel::left("toggle_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: views and reports ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = &self.state.load_error {
                report::blocking_error(ui, message);
                return;
            }
            let Some(dataset) = &self.state.dataset else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a movie metadata file  (File → Open…)");
                });
                return;
            };

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Interactive Movie Analysis");
                    if dataset.is_empty() {
                        ui.label("No row has all numeric fields; the charts will be empty.");
                    }
                    ui.separator();
                    for view in self.state.active_views() {
                        plot::view(ui, view);
                    }
                    report::stat_reports(ui, &self.state.settings);
                });
        });
    }
}
