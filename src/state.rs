use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::analysis::views::compute_view;
use crate::analysis::{ViewKind, ViewResult};
use crate::config::AnalysisSettings;
use crate::data::cache::DatasetCache;
use crate::data::model::MovieDataset;

// ---------------------------------------------------------------------------
// Feedback rating
// ---------------------------------------------------------------------------

/// Five-point rating of the dashboard itself. Independent of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeedbackRating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl FeedbackRating {
    pub const ALL: [FeedbackRating; 5] = [
        FeedbackRating::One,
        FeedbackRating::Two,
        FeedbackRating::Three,
        FeedbackRating::Four,
        FeedbackRating::Five,
    ];

    pub fn word(self) -> &'static str {
        match self {
            FeedbackRating::One => "one",
            FeedbackRating::Two => "two",
            FeedbackRating::Three => "three",
            FeedbackRating::Four => "four",
            FeedbackRating::Five => "five",
        }
    }

    pub fn stars(self) -> usize {
        self as usize + 1
    }

    pub fn message(self) -> String {
        format!("You selected {} star(s).", self.word())
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: AnalysisSettings,

    /// Loads each source once per session.
    cache: DatasetCache,

    /// Path of the current (or last attempted) source.
    pub source_path: Option<PathBuf>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<MovieDataset>>,

    /// Blocking error: while set, no view is rendered.
    pub load_error: Option<String>,

    /// Results of the views that are switched on. Absent = toggled off.
    views: BTreeMap<ViewKind, Option<ViewResult>>,

    pub feedback: Option<FeedbackRating>,
}

impl AppState {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self {
            settings,
            cache: DatasetCache::default(),
            source_path: None,
            dataset: None,
            load_error: None,
            views: BTreeMap::new(),
            feedback: None,
        }
    }

    /// Load (or fetch from the cache) a dataset and make it current.
    ///
    /// On failure the previous dataset is discarded and the error becomes
    /// the blocking state shown instead of the views.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        self.source_path = Some(path.to_path_buf());
        let loaded = self
            .cache
            .get_or_load(path)
            .with_context(|| format!("loading movie metadata from {}", path.display()));

        match loaded {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} movies from {} ({} incomplete rows dropped)",
                    dataset.len(),
                    path.display(),
                    dataset.dropped_rows()
                );
                self.dataset = Some(dataset);
                self.load_error = None;
                self.recompute_views();
                Ok(())
            }
            Err(e) => {
                self.dataset = None;
                self.load_error = Some(format!("{e:#}"));
                for result in self.views.values_mut() {
                    *result = None;
                }
                Err(e)
            }
        }
    }

    pub fn is_view_enabled(&self, kind: ViewKind) -> bool {
        self.views.contains_key(&kind)
    }

    /// Switching a view on computes it; switching it off discards it.
    pub fn set_view_enabled(&mut self, kind: ViewKind, enabled: bool) {
        if enabled {
            let result = self
                .dataset
                .as_deref()
                .map(|ds| compute_view(kind, ds, &self.settings));
            self.views.insert(kind, result);
        } else {
            self.views.remove(&kind);
        }
    }

    /// Computed results of the enabled views, in display order.
    pub fn active_views(&self) -> impl Iterator<Item = &ViewResult> {
        self.views.values().filter_map(|r| r.as_ref())
    }

    fn recompute_views(&mut self) {
        let Some(dataset) = self.dataset.as_deref() else {
            return;
        };
        for (kind, result) in self.views.iter_mut() {
            *result = Some(compute_view(*kind, dataset, &self.settings));
        }
    }
}
