use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// NumericColumn – the five columns coerced to numbers during cleaning
// ---------------------------------------------------------------------------

/// Columns that are coerced to `f64` and must be present after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Budget,
    Revenue,
    Popularity,
    VoteAverage,
    Runtime,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 5] = [
        NumericColumn::Budget,
        NumericColumn::Revenue,
        NumericColumn::Popularity,
        NumericColumn::VoteAverage,
        NumericColumn::Runtime,
    ];

    /// Header name in the source file.
    pub fn source_name(self) -> &'static str {
        match self {
            NumericColumn::Budget => "budget",
            NumericColumn::Revenue => "revenue",
            NumericColumn::Popularity => "popularity",
            NumericColumn::VoteAverage => "vote_average",
            NumericColumn::Runtime => "runtime",
        }
    }

    /// Axis label used by the charts.
    pub fn label(self) -> &'static str {
        match self {
            NumericColumn::Budget => "Budget",
            NumericColumn::Revenue => "Revenue",
            NumericColumn::Popularity => "Popularity",
            NumericColumn::VoteAverage => "Vote average",
            NumericColumn::Runtime => "Runtime (min)",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}

// ---------------------------------------------------------------------------
// GroupKey – a category a view groups or colours by
// ---------------------------------------------------------------------------

/// A grouping value: either a derived boolean or a categorical string.
///
/// Derives `Ord` so it can key `BTreeMap`s (colour maps, legends).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Flag(bool),
    Text(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Flag(true) => write!(f, "True"),
            GroupKey::Flag(false) => write!(f, "False"),
            GroupKey::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Movie – one cleaned row
// ---------------------------------------------------------------------------

/// A single cleaned record. The numeric fields are plain `f64` because
/// rows missing any of them never make it past the cleaner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub original_title: Option<String>,
    pub budget: f64,
    pub revenue: f64,
    pub popularity: f64,
    pub vote_average: f64,
    pub runtime: f64,
    pub original_language: Option<String>,
    /// `true` iff the raw collection field was non-null.
    pub belongs_to_collection: bool,
    /// `true` iff the raw tagline was non-null and not blank after trimming.
    pub has_slogan: bool,
    /// First country name found in the raw `production_countries` field.
    pub production_country: Option<String>,
}

impl Movie {
    pub fn value(&self, column: NumericColumn) -> f64 {
        match column {
            NumericColumn::Budget => self.budget,
            NumericColumn::Revenue => self.revenue,
            NumericColumn::Popularity => self.popularity,
            NumericColumn::VoteAverage => self.vote_average,
            NumericColumn::Runtime => self.runtime,
        }
    }
}

// ---------------------------------------------------------------------------
// MovieDataset – the immutable cleaned table
// ---------------------------------------------------------------------------

/// The cleaned dataset. Built once by the loader, never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct MovieDataset {
    movies: Vec<Movie>,
    /// Rows read from the source before the missing-value filter.
    raw_rows: usize,
}

impl MovieDataset {
    pub fn new(movies: Vec<Movie>, raw_rows: usize) -> Self {
        MovieDataset { movies, raw_rows }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Column-oriented view of one numeric column, in row order.
    pub fn column(&self, column: NumericColumn) -> Vec<f64> {
        self.movies.iter().map(|m| m.value(column)).collect()
    }

    /// Number of cleaned movies.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Rows removed by the cleaning filter.
    pub fn dropped_rows(&self) -> usize {
        self.raw_rows.saturating_sub(self.movies.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(budget: f64, revenue: f64) -> Movie {
        Movie {
            original_title: None,
            budget,
            revenue,
            popularity: 1.0,
            vote_average: 5.0,
            runtime: 90.0,
            original_language: Some("en".into()),
            belongs_to_collection: false,
            has_slogan: false,
            production_country: None,
        }
    }

    #[test]
    fn column_preserves_row_order() {
        let ds = MovieDataset::new(vec![movie(1.0, 10.0), movie(2.0, 20.0)], 3);
        assert_eq!(ds.column(NumericColumn::Budget), vec![1.0, 2.0]);
        assert_eq!(ds.column(NumericColumn::Revenue), vec![10.0, 20.0]);
        assert_eq!(ds.dropped_rows(), 1);
    }

    #[test]
    fn group_key_display_matches_dataframe_booleans() {
        assert_eq!(GroupKey::Flag(true).to_string(), "True");
        assert_eq!(GroupKey::Text("fr".into()).to_string(), "fr");
    }
}
