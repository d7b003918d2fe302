//! System-level payloads: liveness and version.

use serde::Deserialize;

use crate::numeric;

/// Response of `GET /system/status`.
///
/// Only the liveness flag is read; everything else the backend sends
/// (process id, program start time, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemStatus {
    /// `1` while the Nagios core process is running.
    #[serde(deserialize_with = "numeric::deserialize_f64")]
    pub is_currently_running: f64,
}

impl SystemStatus {
    pub fn is_running(&self) -> bool {
        self.is_currently_running == 1.0
    }
}

/// Response of `GET /system/info`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemInfo {
    /// Free-form product version, e.g. `5.8.10` or `2024R1.3`.
    #[serde(deserialize_with = "numeric::deserialize_string")]
    pub version: String,
}
