//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request path and token source produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Metric calls are no-ops until an exporter is installed
//! - Token values are never logged

pub mod logging;
pub mod metrics;
