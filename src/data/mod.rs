/// Data layer: classification, decoding, trimming, matching, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .xlsx upload
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  filename → source category (or skip + warn)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode cp950 / read sheet → LogTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   trim    │  category row offsets (policy-selectable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  catalog + aliases → windowed means
///   └──────────┘
/// ```
pub mod catalog;
pub mod classify;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod summary;
pub mod trim;
