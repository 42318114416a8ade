/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read raw cells → coerce, derive, drop incomplete rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  one MovieDataset per source version, shared via Arc
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  per-view predicates, top-N ranking, grouping
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
