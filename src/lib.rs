//! # nagios-exporter
//!
//! Prometheus exporter for Nagios XI. Every request to the metrics path runs
//! one scrape against the Nagios XI REST API and answers with a fresh
//! snapshot; nothing is cached between scrapes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  GET /metrics  ┌────────────────────────────────────────┐
//! │  Prometheus  │ ─────────────▶ │ MetricsServer (nagios-exposition)      │
//! └──────────────┘                │   └─▶ Collector::collect               │
//!                                 │         ├─ status  (liveness → up)     │
//!                                 │         ├─ info ┐                      │
//!                                 │         ├─ hosts├─ joined, then        │
//!                                 │         └─ svcs ┘  aggregated          │
//!                                 └───────────────┬────────────────────────┘
//!                                                 │ NagiosClient (nagios-client)
//!                                                 ▼
//!                                      /nagiosxi/api/v1/...
//! ```
//!
//! - **[`collector`]**: the scrape state machine and the metric descriptors
//! - **[`config`]**: API key file loading and listen-address handling
//! - **[`duration`]**: parsing of `--nagios.timeout` style durations
//!
//! ## Usage
//!
//! ```bash
//! nagios-exporter --web.remote-address nagios.example.com \
//!     --config.path /etc/nagios_exporter/config.toml
//! ```

pub mod collector;
pub mod config;
pub mod duration;

pub use collector::{Collector, Descriptors, Metric, NAMESPACE};
