//! Market-snapshot presentation pipeline.
//!
//! ```text
//! GET /reports/latest ─┐                       ┌─ MetricFormatter
//!                      ├─ session ─ assemble ──┼─ ChangeClassifier ─→ DisplaySnapshot
//! GET /signals ────────┘      │                └─ ReasonMapper
//!                             └─ timestamp (generated_at, once per payload)
//! ```

pub mod assemble;
pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod i18n;
pub mod models;
pub mod session;
pub mod timestamp;
pub mod upstream;
pub mod utils;

pub use assemble::assemble;
pub use error::ViewError;
pub use i18n::Locale;
pub use models::{DisplaySnapshot, RawSignal, RawSnapshot};
