use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::chart::CorrelationMatrix;
use crate::analysis::reports::{precomputed_reports, Severity};
use crate::config::AnalysisSettings;

fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Error => Color32::from_rgb(220, 70, 70),
        Severity::Warning => Color32::from_rgb(230, 180, 40),
        Severity::Success => Color32::from_rgb(80, 180, 90),
    }
}

/// Pearson matrix as a small table.
pub fn correlation_table(ui: &mut Ui, id: &str, matrix: &CorrelationMatrix) {
    ui.label(RichText::new("Correlation matrix:").strong());
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(90.0))
            .columns(Column::auto().at_least(80.0), matrix.columns.len())
            .header(20.0, |mut header| {
                header.col(|_ui| {});
                for column in &matrix.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(column.source_name());
                    });
                }
            })
            .body(|mut body| {
                for (column, values) in matrix.columns.iter().zip(&matrix.values) {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.strong(column.source_name());
                        });
                        for value in values {
                            row.col(|ui: &mut Ui| {
                                match value {
                                    Some(r) => ui.monospace(format!("{r:.6}")),
                                    None => ui.monospace("NaN"),
                                };
                            });
                        }
                    });
                }
            });
    });
}

/// The two precomputed test results with their selected text branch.
pub fn stat_reports(ui: &mut Ui, settings: &AnalysisSettings) {
    ui.heading("Normality and comparison tests");
    for report in precomputed_reports() {
        ui.add_space(6.0);
        ui.strong(format!("Result: {}", report.title()));
        ui.label(
            RichText::new("Precomputed result; not derived from the loaded dataset.")
                .italics()
                .weak(),
        );
        for line in report.value_lines() {
            ui.label(format!("• {line}"));
        }

        let outcome = report.outcome(settings.significance_level);
        ui.label(RichText::new(outcome.headline).color(severity_color(outcome.severity)));
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label(RichText::new("Conclusion:").strong());
            ui.label(outcome.conclusion);
        });
    }
}

/// Shown instead of any view while the dataset cannot be loaded.
pub fn blocking_error(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(RichText::new("The movie dataset could not be loaded").color(Color32::RED));
            ui.add_space(8.0);
            ui.label(message);
            ui.add_space(8.0);
            ui.label("Open another file with File → Open…");
        });
    });
}
