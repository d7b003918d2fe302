//! # nagios-exposition
//!
//! Metric descriptors, per-scrape snapshots, the Prometheus text exposition
//! format, and a small hyper server that runs a fresh scrape for every
//! request to the metrics path.
//!
//! ## Example
//!
//! ```rust
//! use nagios_exposition::{format_prometheus, MetricDesc, ScrapeOutcome, Snapshot};
//!
//! let up = MetricDesc::gauge("nagios", "up", "Whether Nagios can be reached");
//! let snapshot = Snapshot::builder().sample(up.sample(1.0)).build(ScrapeOutcome::Success);
//!
//! let text = format_prometheus(&[up], &snapshot);
//! assert!(text.contains("# TYPE nagios_up gauge"));
//! assert!(text.contains("nagios_up 1\n"));
//! ```

pub mod error;
mod format;
mod metric;
pub mod server;

pub use error::ServerError;
pub use format::{escape_label_value, format_prometheus, format_value};
pub use metric::{
    fq_name, MetricDesc, MetricKind, Sample, ScrapeOutcome, Snapshot, SnapshotBuilder,
};
pub use server::{MetricsServer, ScrapeHandler, ServerConfig, ServerConfigBuilder};
