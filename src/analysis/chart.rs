use serde::Serialize;

use crate::data::model::{GroupKey, NumericColumn};

// ---------------------------------------------------------------------------
// ChartSpec – declarative description handed to the renderer
// ---------------------------------------------------------------------------

/// One chart of a view. Holds the bound data, not pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Scatter(ScatterChart),
    Histogram(HistogramChart),
    BoxPlot(BoxPlotChart),
    Correlation(CorrelationMatrix),
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Hover text (the movie's original title).
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x: NumericColumn,
    pub y: NumericColumn,
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Counts of one colour series over the chart's shared bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    /// `None` for an uncoloured histogram.
    pub group: Option<GroupKey>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramChart {
    pub title: String,
    pub column: NumericColumn,
    /// Legend title of the colour grouping, if any.
    pub color_label: Option<String>,
    /// `bins + 1` ascending edges; the last bin is closed on the right.
    pub edges: Vec<f64>,
    pub series: Vec<HistogramSeries>,
    /// Series are drawn on top of each other rather than stacked.
    pub overlay: bool,
}

impl HistogramChart {
    pub fn single(title: &str, column: NumericColumn, values: &[f64], bins: usize) -> Self {
        let edges = bin_edges(values, bins);
        let counts = bin_counts(&edges, values);
        HistogramChart {
            title: title.to_string(),
            column,
            color_label: None,
            edges,
            series: vec![HistogramSeries {
                group: None,
                counts,
            }],
            overlay: false,
        }
    }

    /// Histogram coloured by group; every series shares the same edges.
    pub fn overlay(
        title: &str,
        column: NumericColumn,
        color_label: &str,
        groups: &[(GroupKey, Vec<f64>)],
        bins: usize,
    ) -> Self {
        let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        let edges = bin_edges(&all, bins);
        let series = groups
            .iter()
            .map(|(key, values)| HistogramSeries {
                group: Some(key.clone()),
                counts: bin_counts(&edges, values),
            })
            .collect();
        HistogramChart {
            title: title.to_string(),
            column,
            color_label: Some(color_label.to_string()),
            edges,
            series,
            overlay: true,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }
}

/// Equal-width edges over the finite range of `values`.
///
/// No finite values → no edges. A single distinct value gets one bin of
/// width 1 centred on it.
pub fn bin_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if bins == 0 || min > max {
        return Vec::new();
    }
    if min == max {
        return vec![min - 0.5, min + 0.5];
    }
    let width = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| min + width * i as f64).collect();
    edges.push(max);
    edges
}

fn bin_counts(edges: &[f64], values: &[f64]) -> Vec<usize> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0; bins];
    if bins == 0 {
        return counts;
    }
    let lo = edges[0];
    let width = (edges[bins] - lo) / bins as f64;
    for &v in values.iter().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / width).floor().max(0.0) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Five-number summary plus Tukey whiskers (1.5 × IQR).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.50);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (fence_lo, fence_hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let within = |v: &&f64| **v >= fence_lo && **v <= fence_hi;
        let lower_whisker = sorted.iter().find(within).copied().unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().find(within).copied().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < fence_lo || v > fence_hi)
            .collect();

        Some(BoxSummary {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub key: GroupKey,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotChart {
    pub title: String,
    pub value: NumericColumn,
    /// Axis label of the grouping.
    pub group_label: String,
    pub groups: Vec<BoxGroup>,
}

impl BoxPlotChart {
    pub fn new(
        title: &str,
        value: NumericColumn,
        group_label: &str,
        groups: &[(GroupKey, Vec<f64>)],
    ) -> Self {
        let groups = groups
            .iter()
            .filter_map(|(key, values)| {
                BoxSummary::from_values(values).map(|summary| BoxGroup {
                    key: key.clone(),
                    summary,
                })
            })
            .collect();
        BoxPlotChart {
            title: title.to_string(),
            value,
            group_label: group_label.to_string(),
            groups,
        }
    }
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson coefficients; `None` where undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn new(columns: &[(NumericColumn, Vec<f64>)]) -> Self {
        let values = columns
            .iter()
            .map(|(_, a)| columns.iter().map(|(_, b)| pearson(a, b)).collect())
            .collect();
        CorrelationMatrix {
            columns: columns.iter().map(|(c, _)| *c).collect(),
            values,
        }
    }

    pub fn get(&self, row: NumericColumn, col: NumericColumn) -> Option<f64> {
        let r = self.columns.iter().position(|&c| c == row)?;
        let c = self.columns.iter().position(|&c| c == col)?;
        self.values[r][c]
    }
}

/// Pearson correlation of two equally long series.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let mean = |s: &[f64]| s[..n].iter().sum::<f64>() / n as f64;
    let (mx, my) = (mean(x), mean(y));

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x[..n].iter().zip(&y[..n]) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn histogram_uses_requested_bins_and_counts_every_value() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let h = HistogramChart::single("t", NumericColumn::Budget, &values, 50);
        assert_eq!(h.bin_count(), 50);
        assert_eq!(h.edges[0], 0.0);
        assert_eq!(h.edges[50], 100.0);
        assert_eq!(h.series[0].counts.iter().sum::<usize>(), 101);
        // max lands in the closed last bin
        assert_eq!(h.series[0].counts[49], 3);
    }

    #[test]
    fn histogram_edge_cases() {
        assert!(bin_edges(&[], 50).is_empty());
        assert_eq!(bin_edges(&[4.0, 4.0], 50), vec![3.5, 4.5]);
        let h = HistogramChart::single("t", NumericColumn::Budget, &[4.0, 4.0], 50);
        assert_eq!(h.series[0].counts, vec![2]);
    }

    #[test]
    fn overlay_series_share_edges() {
        let groups = vec![
            (GroupKey::Flag(true), vec![0.0, 0.5]),
            (GroupKey::Flag(false), vec![9.5, 10.0]),
        ];
        let h = HistogramChart::overlay("t", NumericColumn::Popularity, "slogan", &groups, 10);
        assert!(h.overlay);
        assert_eq!(h.edges.first(), Some(&0.0));
        assert_eq!(h.edges.last(), Some(&10.0));
        assert_eq!(h.series[0].counts[0], 2);
        assert_eq!(h.series[1].counts[9], 2);
    }

    #[test]
    fn box_summary_matches_linear_quartiles() {
        let s = BoxSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]).expect("summary");
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q3, 4.0);
        assert_eq!(s.lower_whisker, 1.0);
        assert_eq!(s.upper_whisker, 4.0);
        assert_eq!(s.outliers, vec![100.0]);
        assert_eq!(s.max, 100.0);
        assert!(BoxSummary::from_values(&[]).is_none());
    }

    #[test]
    fn pearson_of_linear_series_is_one() {
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.0, 6.0];
        let r = pearson(&x, &y).expect("defined");
        assert!((r - 1.0).abs() < 1e-12);
        assert_eq!(pearson(&x, &[5.0, 5.0, 5.0]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
    }
}
