use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use super::model::{Movie, MovieDataset, NumericColumn};

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// A predicate a view applies to the shared dataset. Never written back.
#[derive(Debug, Clone, PartialEq)]
pub enum RowFilter {
    /// Keep rows whose value is strictly below `limit`.
    Below { column: NumericColumn, limit: f64 },
    /// Keep rows whose original language is in the set.
    LanguageIn(BTreeSet<String>),
    /// Keep rows whose production country is in the set.
    CountryIn(BTreeSet<String>),
}

impl RowFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            RowFilter::Below { column, limit } => movie.value(*column) < *limit,
            RowFilter::LanguageIn(selected) => movie
                .original_language
                .as_ref()
                .is_some_and(|l| selected.contains(l)),
            RowFilter::CountryIn(selected) => movie
                .production_country
                .as_ref()
                .is_some_and(|c| selected.contains(c)),
        }
    }
}

/// Return indices of movies that pass all filters, in row order.
pub fn filtered_indices(dataset: &MovieDataset, filters: &[RowFilter]) -> Vec<usize> {
    dataset
        .movies()
        .iter()
        .enumerate()
        .filter(|(_, m)| filters.iter().all(|f| f.matches(m)))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Frequency ranking and grouping
// ---------------------------------------------------------------------------

/// The `n` most frequent values, most frequent first.
///
/// Ties keep the order in which the values were first seen.
pub fn top_n_by_frequency<'a, I>(values: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, (usize, usize)> = HashMap::new();
    for (pos, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(n)
        .map(|(value, _, _)| value.to_string())
        .collect()
}

/// Collect values per key; groups come out in order of first appearance.
pub fn group_values<K, I>(pairs: I) -> Vec<(K, Vec<f64>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<f64>)> = Vec::new();
    for (key, value) in pairs {
        let slot = *slots.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(value);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(lang: &str, runtime: f64) -> Movie {
        Movie {
            original_title: None,
            budget: 1.0,
            revenue: 1.0,
            popularity: 1.0,
            vote_average: 5.0,
            runtime,
            original_language: Some(lang.to_string()),
            belongs_to_collection: false,
            has_slogan: false,
            production_country: None,
        }
    }

    #[test]
    fn top_n_keeps_highest_counts() {
        let mut langs = Vec::new();
        for (lang, n) in [("ja", 40), ("en", 500), ("fr", 120), ("es", 90), ("it", 30)] {
            langs.extend(std::iter::repeat(lang).take(n));
        }
        assert_eq!(
            top_n_by_frequency(langs.iter().copied(), 3),
            vec!["en", "fr", "es"]
        );
    }

    #[test]
    fn top_n_breaks_ties_by_first_appearance() {
        let values = ["b", "a", "a", "b", "c"];
        assert_eq!(top_n_by_frequency(values, 2), vec!["b", "a"]);
    }

    #[test]
    fn top_n_with_fewer_values_than_n() {
        assert_eq!(top_n_by_frequency(["x"], 8), vec!["x"]);
        assert!(top_n_by_frequency(Vec::<&str>::new(), 8).is_empty());
    }

    #[test]
    fn filters_compose() {
        let ds = MovieDataset::new(
            vec![movie("en", 100.0), movie("fr", 350.0), movie("fr", 90.0)],
            3,
        );
        let below = RowFilter::Below {
            column: NumericColumn::Runtime,
            limit: 300.0,
        };
        assert_eq!(filtered_indices(&ds, &[below.clone()]), vec![0, 2]);

        let french = RowFilter::LanguageIn(BTreeSet::from(["fr".to_string()]));
        assert_eq!(filtered_indices(&ds, &[below, french]), vec![2]);
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let groups = group_values([(true, 1.0), (false, 2.0), (true, 3.0)]);
        assert_eq!(groups, vec![(true, vec![1.0, 3.0]), (false, vec![2.0])]);
    }
}
