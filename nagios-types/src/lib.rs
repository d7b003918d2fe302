//! # nagios-types
//!
//! Typed views of the Nagios XI REST payloads consumed by the exporter, and
//! the single-pass aggregation that turns host and service records into
//! bucket counters.
//!
//! Nagios XI encodes almost every number as a JSON string (`"0"`, `"1"`).
//! The types here accept both the quoted and the bare form, keep the raw
//! value on the record, and classify it through typed accessors.
//!
//! ## Example
//!
//! ```rust
//! use nagios_types::{HostStatusList, HostSummary};
//!
//! let json = r#"{
//!     "recordcount": "2",
//!     "hoststatus": [
//!         {"host_object_id": "101", "check_type": "0", "current_state": "0",
//!          "is_flapping": "0", "scheduled_downtime_depth": "0"},
//!         {"host_object_id": "102", "check_type": "1", "current_state": "1",
//!          "is_flapping": "1", "scheduled_downtime_depth": "1"}
//!     ]
//! }"#;
//!
//! let list: HostStatusList = serde_json::from_str(json).unwrap();
//! let summary = HostSummary::from_records(&list.hoststatus);
//!
//! assert_eq!(summary.total, 2);
//! assert_eq!(summary.actively_checked, 1);
//! assert_eq!(summary.down, 1);
//! assert_eq!(summary.in_downtime, 1);
//! ```

pub mod numeric;
mod records;
mod status;
mod summary;

pub use records::*;
pub use status::*;
pub use summary::*;
