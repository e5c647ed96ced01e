/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → LaunchDataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site index, payload range
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  ViewState → proportion slices / scatter records
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
