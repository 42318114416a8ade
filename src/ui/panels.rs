use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::analysis::ViewKind;
use crate::state::{AppState, FeedbackRating};

// ---------------------------------------------------------------------------
// Left side panel – view toggles and feedback
// ---------------------------------------------------------------------------

/// Render the left panel: one toggle per analysis, then the rating control.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analyses");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for kind in ViewKind::ALL {
                let mut enabled = state.is_view_enabled(kind);
                if ui.checkbox(&mut enabled, kind.question()).changed() {
                    state.set_view_enabled(kind, enabled);
                }
                ui.add_space(2.0);
            }

            ui.add_space(12.0);
            ui.separator();
            feedback(ui, state);
        });
}

fn feedback(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Rate this dashboard");
    ui.horizontal(|ui: &mut Ui| {
        for rating in FeedbackRating::ALL {
            let lit = state.feedback.is_some_and(|r| r >= rating);
            let star = if lit { "★" } else { "☆" };
            let response = ui
                .selectable_label(state.feedback == Some(rating), RichText::new(star).size(18.0))
                .on_hover_text(format!("{} star(s)", rating.stars()));
            if response.clicked() {
                state.feedback = Some(rating);
            }
        }
    });
    if let Some(rating) = state.feedback {
        ui.label(rating.message());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} movies loaded, {} incomplete rows dropped",
                ds.len(),
                ds.dropped_rows()
            ));
        }
        if let Some(path) = &state.source_path {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if state.load_error.is_some() {
            ui.separator();
            ui.label(RichText::new("Load failed").color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open movie metadata")
        .add_filter("Supported files", &["csv", "tsv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
        }
    }
}
