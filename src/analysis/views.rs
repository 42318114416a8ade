use std::collections::BTreeSet;

use crate::config::AnalysisSettings;
use crate::data::filter::{filtered_indices, group_values, top_n_by_frequency, RowFilter};
use crate::data::model::{GroupKey, Movie, MovieDataset, NumericColumn};

use super::chart::{
    BoxPlotChart, ChartSpec, CorrelationMatrix, HistogramChart, ScatterChart, ScatterPoint,
};
use super::{ViewKind, ViewResult};

/// Compute one view from the shared dataset.
pub fn compute_view(
    kind: ViewKind,
    dataset: &MovieDataset,
    settings: &AnalysisSettings,
) -> ViewResult {
    let charts = match kind {
        ViewKind::BudgetVsRevenue => budget_vs_revenue(dataset, settings),
        ViewKind::RuntimeByLanguage => runtime_by_language(dataset, settings),
        ViewKind::PopularityVsSlogan => popularity_vs_slogan(dataset, settings),
        ViewKind::RatingByLanguageOrCountry => rating_by_language_or_country(dataset, settings),
        ViewKind::CollectionVsRevenue => collection_vs_revenue(dataset, settings),
    };
    log::debug!("computed '{}' with {} chart(s)", kind.title(), charts.len());
    ViewResult {
        kind,
        title: kind.title(),
        charts,
        conclusion: kind.conclusion(),
    }
}

fn rows<'a>(dataset: &'a MovieDataset, filters: &[RowFilter]) -> Vec<&'a Movie> {
    filtered_indices(dataset, filters)
        .into_iter()
        .map(|i| &dataset.movies()[i])
        .collect()
}

fn languages(movies: &[&Movie], n: usize) -> BTreeSet<String> {
    top_n_by_frequency(movies.iter().filter_map(|m| m.original_language.as_deref()), n)
        .into_iter()
        .collect()
}

fn grouped_by<F>(movies: &[&Movie], value: NumericColumn, key: F) -> Vec<(GroupKey, Vec<f64>)>
where
    F: Fn(&Movie) -> Option<GroupKey>,
{
    group_values(
        movies
            .iter()
            .filter_map(|&m| key(m).map(|k| (k, m.value(value)))),
    )
}

fn budget_vs_revenue(dataset: &MovieDataset, settings: &AnalysisSettings) -> Vec<ChartSpec> {
    let points = dataset
        .movies()
        .iter()
        .map(|m| ScatterPoint {
            x: m.budget,
            y: m.revenue,
            label: m.original_title.clone(),
        })
        .collect();
    let budget = dataset.column(NumericColumn::Budget);
    let revenue = dataset.column(NumericColumn::Revenue);
    let bins = settings.histogram_bins;

    vec![
        ChartSpec::Scatter(ScatterChart {
            title: "Budget vs Revenue".to_string(),
            x: NumericColumn::Budget,
            y: NumericColumn::Revenue,
            points,
        }),
        ChartSpec::Histogram(HistogramChart::single(
            "Budget distribution",
            NumericColumn::Budget,
            &budget,
            bins,
        )),
        ChartSpec::Histogram(HistogramChart::single(
            "Revenue distribution",
            NumericColumn::Revenue,
            &revenue,
            bins,
        )),
        ChartSpec::Correlation(CorrelationMatrix::new(&[
            (NumericColumn::Budget, budget),
            (NumericColumn::Revenue, revenue),
        ])),
    ]
}

fn runtime_by_language(dataset: &MovieDataset, settings: &AnalysisSettings) -> Vec<ChartSpec> {
    let short_runtime = RowFilter::Below {
        column: NumericColumn::Runtime,
        limit: settings.runtime_cutoff,
    };
    let top = languages(&rows(dataset, &[short_runtime.clone()]), settings.runtime_top_languages);
    let shown = rows(dataset, &[short_runtime, RowFilter::LanguageIn(top)]);

    let groups = grouped_by(&shown, NumericColumn::Runtime, |m| {
        m.original_language.clone().map(GroupKey::Text)
    });
    vec![ChartSpec::BoxPlot(BoxPlotChart::new(
        "Runtime by language",
        NumericColumn::Runtime,
        "Original language",
        &groups,
    ))]
}

fn popularity_vs_slogan(dataset: &MovieDataset, settings: &AnalysisSettings) -> Vec<ChartSpec> {
    let all = rows(dataset, &[]);
    let groups = grouped_by(&all, NumericColumn::Popularity, |m| {
        Some(GroupKey::Flag(m.has_slogan))
    });
    vec![
        ChartSpec::BoxPlot(BoxPlotChart::new(
            "Popularity by slogan",
            NumericColumn::Popularity,
            "Has a slogan?",
            &groups,
        )),
        ChartSpec::Histogram(HistogramChart::overlay(
            "Popularity distribution",
            NumericColumn::Popularity,
            "Has a slogan?",
            &groups,
            settings.histogram_bins,
        )),
    ]
}

fn rating_by_language_or_country(
    dataset: &MovieDataset,
    settings: &AnalysisSettings,
) -> Vec<ChartSpec> {
    let all = rows(dataset, &[]);

    let top_languages = languages(&all, settings.rating_top_languages);
    let by_language = rows(dataset, &[RowFilter::LanguageIn(top_languages)]);
    let language_groups = grouped_by(&by_language, NumericColumn::VoteAverage, |m| {
        m.original_language.clone().map(GroupKey::Text)
    });

    let top_countries: BTreeSet<String> = top_n_by_frequency(
        all.iter().filter_map(|m| m.production_country.as_deref()),
        settings.rating_top_countries,
    )
    .into_iter()
    .collect();
    let by_country = rows(dataset, &[RowFilter::CountryIn(top_countries)]);
    let country_groups = grouped_by(&by_country, NumericColumn::VoteAverage, |m| {
        m.production_country.clone().map(GroupKey::Text)
    });

    vec![
        ChartSpec::BoxPlot(BoxPlotChart::new(
            "Rating by language",
            NumericColumn::VoteAverage,
            "Original language",
            &language_groups,
        )),
        ChartSpec::BoxPlot(BoxPlotChart::new(
            "Rating by country",
            NumericColumn::VoteAverage,
            "Production country",
            &country_groups,
        )),
    ]
}

fn collection_vs_revenue(dataset: &MovieDataset, settings: &AnalysisSettings) -> Vec<ChartSpec> {
    let below = rows(
        dataset,
        &[RowFilter::Below {
            column: NumericColumn::Revenue,
            limit: settings.revenue_cutoff,
        }],
    );
    let groups = grouped_by(&below, NumericColumn::Revenue, |m| {
        Some(GroupKey::Flag(m.belongs_to_collection))
    });
    vec![
        ChartSpec::BoxPlot(BoxPlotChart::new(
            "Revenue by collection",
            NumericColumn::Revenue,
            "Belongs to a collection?",
            &groups,
        )),
        ChartSpec::Histogram(HistogramChart::overlay(
            "Revenue distribution",
            NumericColumn::Revenue,
            "Belongs to a collection?",
            &groups,
            settings.histogram_bins,
        )),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Row {
        budget: f64,
        revenue: f64,
        popularity: f64,
        vote: f64,
        runtime: f64,
        lang: &'static str,
        country: Option<&'static str>,
        slogan: bool,
        collection: bool,
    }

    impl Default for Row {
        fn default() -> Self {
            Row {
                budget: 1.0,
                revenue: 1.0,
                popularity: 1.0,
                vote: 5.0,
                runtime: 100.0,
                lang: "en",
                country: None,
                slogan: false,
                collection: false,
            }
        }
    }

    fn dataset(rows: Vec<Row>) -> MovieDataset {
        let n = rows.len();
        let movies = rows
            .into_iter()
            .map(|r| Movie {
                original_title: Some("t".into()),
                budget: r.budget,
                revenue: r.revenue,
                popularity: r.popularity,
                vote_average: r.vote,
                runtime: r.runtime,
                original_language: Some(r.lang.to_string()),
                belongs_to_collection: r.collection,
                has_slogan: r.slogan,
                production_country: r.country.map(str::to_string),
            })
            .collect();
        MovieDataset::new(movies, n)
    }

    fn box_plots(view: &ViewResult) -> Vec<&BoxPlotChart> {
        view.charts
            .iter()
            .filter_map(|c| match c {
                ChartSpec::BoxPlot(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    fn group_names(chart: &BoxPlotChart) -> Vec<String> {
        chart.groups.iter().map(|g| g.key.to_string()).collect()
    }

    #[test]
    fn budget_vs_revenue_plots_every_clean_row() {
        let ds = dataset(vec![
            Row { budget: 1000.0, revenue: 5000.0, ..Row::default() },
            Row { budget: 2000.0, revenue: 1000.0, ..Row::default() },
        ]);
        let view = compute_view(ViewKind::BudgetVsRevenue, &ds, &AnalysisSettings::default());
        assert_eq!(view.charts.len(), 4);

        let ChartSpec::Scatter(scatter) = &view.charts[0] else {
            panic!("first chart should be the scatter");
        };
        assert_eq!(scatter.points.len(), 2);

        for chart in &view.charts[1..3] {
            let ChartSpec::Histogram(h) = chart else {
                panic!("expected histogram");
            };
            assert_eq!(h.bin_count(), 50);
        }

        let ChartSpec::Correlation(corr) = &view.charts[3] else {
            panic!("expected correlation matrix");
        };
        let r = corr
            .get(NumericColumn::Budget, NumericColumn::Revenue)
            .expect("defined");
        assert!((r + 1.0).abs() < 1e-12);
        assert_eq!(corr.get(NumericColumn::Budget, NumericColumn::Budget), Some(1.0));
    }

    #[test]
    fn runtime_view_keeps_eight_most_frequent_languages_under_cutoff() {
        let counts = [
            ("en", 50),
            ("fr", 12),
            ("es", 9),
            ("ja", 8),
            ("de", 7),
            ("it", 6),
            ("ru", 5),
            ("ko", 4),
            ("zh", 3),
            ("hi", 2),
        ];
        let mut rows = Vec::new();
        for (lang, n) in counts {
            for _ in 0..n {
                rows.push(Row { lang, ..Row::default() });
            }
        }
        // long enough to be excluded, and would otherwise make "xx" frequent
        for _ in 0..20 {
            rows.push(Row { lang: "xx", runtime: 300.0, ..Row::default() });
        }
        let ds = dataset(rows);
        let view = compute_view(ViewKind::RuntimeByLanguage, &ds, &AnalysisSettings::default());
        let plots = box_plots(&view);
        assert_eq!(plots.len(), 1);

        let names: BTreeSet<String> = group_names(plots[0]).into_iter().collect();
        let expected: BTreeSet<String> = ["en", "fr", "es", "ja", "de", "it", "ru", "ko"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
        assert!(plots[0].groups.iter().all(|g| g.summary.max < 300.0));
    }

    #[test]
    fn slogan_view_groups_by_flag_with_overlay() {
        let ds = dataset(vec![
            Row { slogan: true, popularity: 10.0, ..Row::default() },
            Row { slogan: false, popularity: 1.0, ..Row::default() },
            Row { slogan: true, popularity: 12.0, ..Row::default() },
        ]);
        let view = compute_view(ViewKind::PopularityVsSlogan, &ds, &AnalysisSettings::default());
        let plots = box_plots(&view);
        assert_eq!(group_names(plots[0]), vec!["True", "False"]);
        assert_eq!(plots[0].groups[0].summary.count, 2);

        let ChartSpec::Histogram(h) = &view.charts[1] else {
            panic!("expected histogram");
        };
        assert!(h.overlay);
        assert_eq!(h.series.len(), 2);
        assert_eq!(h.bin_count(), 50);
    }

    #[test]
    fn rating_view_ranks_languages_and_countries_independently() {
        let mut rows = Vec::new();
        for (lang, country, n) in [
            ("en", Some("United States"), 10),
            ("fr", Some("France"), 3),
            ("en", Some("United Kingdom"), 4),
            ("ja", None, 5),
        ] {
            for _ in 0..n {
                rows.push(Row { lang, country, ..Row::default() });
            }
        }
        let settings = AnalysisSettings {
            rating_top_languages: 2,
            rating_top_countries: 2,
            ..AnalysisSettings::default()
        };
        let view = compute_view(ViewKind::RatingByLanguageOrCountry, &dataset(rows), &settings);
        let plots = box_plots(&view);
        assert_eq!(plots.len(), 2);
        assert_eq!(group_names(plots[0]), vec!["en", "ja"]);
        assert_eq!(group_names(plots[1]), vec!["United States", "United Kingdom"]);
        assert_eq!(plots[1].groups[0].summary.count, 10);
    }

    #[test]
    fn collection_view_excludes_billion_dollar_revenues_only_locally() {
        let ds = dataset(vec![
            Row { revenue: 2e9, collection: true, ..Row::default() },
            Row { revenue: 5e8, collection: true, ..Row::default() },
            Row { revenue: 1e6, collection: false, ..Row::default() },
        ]);
        let view = compute_view(ViewKind::CollectionVsRevenue, &ds, &AnalysisSettings::default());
        let plots = box_plots(&view);
        let counts: Vec<usize> = plots[0].groups.iter().map(|g| g.summary.count).collect();
        assert_eq!(group_names(plots[0]), vec!["True", "False"]);
        assert_eq!(counts, vec![1, 1]);
        // shared dataset untouched
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn views_are_idempotent() {
        let ds = dataset(vec![
            Row { lang: "fr", country: Some("France"), ..Row::default() },
            Row::default(),
        ]);
        let settings = AnalysisSettings::default();
        for kind in ViewKind::ALL {
            assert_eq!(
                compute_view(kind, &ds, &settings),
                compute_view(kind, &ds, &settings)
            );
        }
    }
}
