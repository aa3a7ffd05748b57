//! # esg-engine — Engine Context and Pipeline
//!
//! Wires the layers together:
//!
//! ```text
//! MetricStore ─▶ validation ─▶ mapping ─▶ scoring ─▶ benchmark ─▶ DashboardView
//! ```
//!
//! - [`EngineConfig`]: YAML configuration with `ESG_*` overrides, validated
//!   once at startup.
//! - [`EngineContext`]: catalog, peer table and configuration behind `Arc`,
//!   passed explicitly to every call.
//! - [`MetricStore`]: read-only seam to wherever metric entries live.
//! - [`Assessment`] / [`DashboardView`]: pipeline output and its
//!   dashboard condensation.
//!
//! The pipeline does no I/O after the context is built. Report timestamps
//! are supplied by the caller so every call stays deterministic.

pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod store;

pub use config::EngineConfig;
pub use context::{AssessRequest, EngineContext};
pub use dashboard::{Assessment, DashboardView, FrameworkScore};
pub use error::EngineError;
pub use store::{InMemoryMetricStore, MetricStore, StoreError};
