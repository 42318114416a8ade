use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, Points,
};

use crate::analysis::chart::{BoxPlotChart, ChartSpec, HistogramChart, ScatterChart};
use crate::analysis::ViewResult;
use crate::color::ColorMap;
use crate::ui::report;

const PLOT_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// View rendering (central panel)
// ---------------------------------------------------------------------------

/// Render one computed view: its charts, then its conclusion.
pub fn view(ui: &mut Ui, view: &ViewResult) {
    ui.heading(view.title);

    for (i, chart) in view.charts.iter().enumerate() {
        let id = format!("{:?}-{i}", view.kind);
        match chart {
            ChartSpec::Scatter(c) => scatter(ui, &id, c),
            ChartSpec::Histogram(c) => histogram(ui, &id, c),
            ChartSpec::BoxPlot(c) => box_plot(ui, &id, c),
            ChartSpec::Correlation(c) => report::correlation_table(ui, &id, c),
        }
        ui.add_space(8.0);
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(RichText::new("Conclusion:").strong());
        ui.label(view.conclusion);
    });
    ui.separator();
}

fn scatter(ui: &mut Ui, id: &str, chart: &ScatterChart) {
    ui.label(RichText::new(&chart.title).strong());
    let points: PlotPoints = chart.points.iter().map(|p| [p.x, p.y]).collect();

    // Hovering a point reports its exact coordinates; map them back to the title.
    let labels: Vec<(f64, f64, String)> = chart
        .points
        .iter()
        .filter_map(|p| p.label.clone().map(|l| (p.x, p.y, l)))
        .collect();
    let (x_label, y_label) = (chart.x.label(), chart.y.label());

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .label_formatter(move |_name, value: &PlotPoint| {
            let title = labels
                .iter()
                .find(|(x, y, _)| *x == value.x && *y == value.y)
                .map(|(_, _, t)| format!("{t}\n"))
                .unwrap_or_default();
            format!("{title}{x_label}: {:.0}\n{y_label}: {:.0}", value.x, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(2.0)
                    .color(Color32::LIGHT_BLUE)
                    .name(&chart.title),
            );
        });
}

fn histogram(ui: &mut Ui, id: &str, chart: &HistogramChart) {
    ui.label(RichText::new(&chart.title).strong());
    let bins = chart.bin_count();
    let colors = ColorMap::new(chart.series.iter().filter_map(|s| s.group.as_ref()));

    let mut plot = Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(chart.column.label())
        .y_axis_label("Count");
    if let Some(label) = &chart.color_label {
        plot = plot.legend(Legend::default());
        ui.label(RichText::new(label).weak());
    }

    plot.show(ui, |plot_ui| {
        for series in &chart.series {
            let color = colors.color_for(series.group.as_ref());
            let fill = if chart.overlay {
                color.gamma_multiply(0.55)
            } else {
                color
            };
            let bars: Vec<Bar> = (0..bins)
                .map(|b| {
                    let (lo, hi) = (chart.edges[b], chart.edges[b + 1]);
                    Bar::new((lo + hi) / 2.0, series.counts[b] as f64)
                        .width(hi - lo)
                        .fill(fill)
                })
                .collect();
            let name = series
                .group
                .as_ref()
                .map(|g| g.to_string())
                .unwrap_or_else(|| chart.column.label().to_string());
            plot_ui.bar_chart(BarChart::new(bars).color(color).name(name));
        }
    });
}

fn box_plot(ui: &mut Ui, id: &str, chart: &BoxPlotChart) {
    ui.label(RichText::new(&chart.title).strong());
    let colors = ColorMap::new(chart.groups.iter().map(|g| &g.key));
    let names: Vec<String> = chart.groups.iter().map(|g| g.key.to_string()).collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.group_label.as_str())
        .y_axis_label(chart.value.label())
        .x_axis_formatter(move |mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            names.get(slot as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, group) in chart.groups.iter().enumerate() {
                let color = colors.color_for(Some(&group.key));
                let s = &group.summary;
                let name = group.key.to_string();
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                )
                .name(&name)
                .box_width(0.6)
                .fill(color.gamma_multiply(0.35))
                .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&name).color(color));

                if !s.outliers.is_empty() {
                    let outliers: PlotPoints = s.outliers.iter().map(|&v| [i as f64, v]).collect();
                    plot_ui.points(Points::new(outliers).radius(1.5).color(color).name(&name));
                }
            }
        });
}
