//! Data layer: core types, loading, filtering, and summaries.
//!
//! Architecture:
//! ```text
//!  registrations .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  fetch → sniff delimiter → parse → map/validate
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │   Dataset    │  Vec<Vehicle>, precomputed filter options
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  apply exact-match predicates → filtered indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ summary   │  metrics / counts / table rows for the view
//!   └──────────┘
//! ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
pub mod summary;
