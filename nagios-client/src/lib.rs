//! # nagios-client
//!
//! HTTP client for the Nagios XI REST API (`/nagiosxi/api/v1`).
//!
//! The client issues authenticated `GET` requests for a small catalogue of
//! [`Resource`]s and returns the raw body. [`decode`] turns that body into
//! one of the payload types from `nagios-types`, recognising the API's
//! `{"error": "..."}` envelope on the way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nagios_client::{fetch_decoded, NagiosClient, Resource};
//! use nagios_types::HostStatusList;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NagiosClient::builder()
//!         .endpoint(NagiosClient::base_url("http", "nagios.example.com"))
//!         .api_key("secret")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let hosts: HostStatusList = fetch_decoded(&client, Resource::HostStatus).await?;
//!     println!("{} hosts", hosts.hoststatus.len());
//!     Ok(())
//! }
//! ```

mod client;
mod decode;
pub mod error;
mod resource;

pub use client::{Backend, NagiosClient, NagiosClientBuilder, API_PREFIX, DEFAULT_TIMEOUT};
pub use decode::{decode, fetch_decoded};
pub use error::ClientError;
pub use resource::Resource;
