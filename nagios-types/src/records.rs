//! Host and service status records.

use serde::Deserialize;

use crate::numeric;
use crate::{HostSummary, ServiceSummary};

/// How the backend obtains a check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckType {
    /// Nagios schedules and runs the check itself.
    Active,
    /// Results are submitted from outside.
    Passive,
}

impl CheckType {
    /// `0` is active; every other value, known or not, is passive.
    pub fn from_raw(raw: f64) -> Self {
        if raw == 0.0 {
            CheckType::Active
        } else {
            CheckType::Passive
        }
    }
}

/// Host state as reported in `current_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostState {
    Up,
    Down,
    Unreachable,
}

const HOST_STATES: [(f64, HostState); 3] = [
    (0.0, HostState::Up),
    (1.0, HostState::Down),
    (2.0, HostState::Unreachable),
];

impl HostState {
    /// Exact match against the known state codes; anything else is `None`.
    pub fn from_raw(raw: f64) -> Option<Self> {
        lookup(&HOST_STATES, raw)
    }
}

/// Service state as reported in `current_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

const SERVICE_STATES: [(f64, ServiceState); 4] = [
    (0.0, ServiceState::Ok),
    (1.0, ServiceState::Warning),
    (2.0, ServiceState::Critical),
    (3.0, ServiceState::Unknown),
];

impl ServiceState {
    /// Exact match against the known state codes; anything else is `None`.
    pub fn from_raw(raw: f64) -> Option<Self> {
        lookup(&SERVICE_STATES, raw)
    }
}

fn lookup<T: Copy>(table: &[(f64, T)], raw: f64) -> Option<T> {
    table
        .iter()
        .find(|(code, _)| *code == raw)
        .map(|(_, state)| *state)
}

/// Boolean overlays (flapping, downtime) trigger only on exactly `1`.
fn flag_set(raw: Option<f64>) -> bool {
    raw == Some(1.0)
}

/// One entry of `GET /objects/hoststatus`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostRecord {
    #[serde(default, deserialize_with = "numeric::deserialize_opt_u64")]
    pub host_object_id: Option<u64>,

    #[serde(deserialize_with = "numeric::deserialize_f64")]
    pub check_type: f64,

    #[serde(deserialize_with = "numeric::deserialize_f64")]
    pub current_state: f64,

    #[serde(default, deserialize_with = "numeric::deserialize_opt_f64")]
    pub is_flapping: Option<f64>,

    /// Number of overlapping downtimes; `1` means "in downtime".
    #[serde(default, deserialize_with = "numeric::deserialize_opt_f64")]
    pub scheduled_downtime_depth: Option<f64>,
}

impl HostRecord {
    /// Create a record with only the classification fields set.
    pub fn new(check_type: f64, current_state: f64) -> Self {
        Self {
            host_object_id: None,
            check_type,
            current_state,
            is_flapping: None,
            scheduled_downtime_depth: None,
        }
    }

    pub fn with_flapping(mut self, raw: f64) -> Self {
        self.is_flapping = Some(raw);
        self
    }

    pub fn with_downtime_depth(mut self, raw: f64) -> Self {
        self.scheduled_downtime_depth = Some(raw);
        self
    }

    pub fn check_type(&self) -> CheckType {
        CheckType::from_raw(self.check_type)
    }

    pub fn state(&self) -> Option<HostState> {
        HostState::from_raw(self.current_state)
    }

    pub fn is_flapping(&self) -> bool {
        flag_set(self.is_flapping)
    }

    pub fn in_downtime(&self) -> bool {
        flag_set(self.scheduled_downtime_depth)
    }
}

/// One entry of `GET /objects/servicestatus`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceRecord {
    #[serde(default, deserialize_with = "numeric::deserialize_opt_f64")]
    pub has_been_checked: Option<f64>,

    #[serde(default, deserialize_with = "numeric::deserialize_opt_f64")]
    pub should_be_scheduled: Option<f64>,

    #[serde(deserialize_with = "numeric::deserialize_f64")]
    pub check_type: f64,

    #[serde(deserialize_with = "numeric::deserialize_f64")]
    pub current_state: f64,

    #[serde(default, deserialize_with = "numeric::deserialize_opt_f64")]
    pub is_flapping: Option<f64>,

    #[serde(default, deserialize_with = "numeric::deserialize_opt_f64")]
    pub scheduled_downtime_depth: Option<f64>,
}

impl ServiceRecord {
    /// Create a record with only the classification fields set.
    pub fn new(check_type: f64, current_state: f64) -> Self {
        Self {
            has_been_checked: None,
            should_be_scheduled: None,
            check_type,
            current_state,
            is_flapping: None,
            scheduled_downtime_depth: None,
        }
    }

    pub fn with_flapping(mut self, raw: f64) -> Self {
        self.is_flapping = Some(raw);
        self
    }

    pub fn with_downtime_depth(mut self, raw: f64) -> Self {
        self.scheduled_downtime_depth = Some(raw);
        self
    }

    pub fn check_type(&self) -> CheckType {
        CheckType::from_raw(self.check_type)
    }

    pub fn state(&self) -> Option<ServiceState> {
        ServiceState::from_raw(self.current_state)
    }

    pub fn is_flapping(&self) -> bool {
        flag_set(self.is_flapping)
    }

    pub fn in_downtime(&self) -> bool {
        flag_set(self.scheduled_downtime_depth)
    }
}

/// A disagreement between the backend's `recordcount` and the number of
/// records actually present in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCountMismatch {
    pub reported: u64,
    pub actual: u64,
}

fn check_record_count(reported: Option<u64>, actual: usize) -> Option<RecordCountMismatch> {
    let actual = actual as u64;
    match reported {
        Some(reported) if reported != actual => Some(RecordCountMismatch { reported, actual }),
        _ => None,
    }
}

/// Response of `GET /objects/hoststatus`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostStatusList {
    #[serde(default, deserialize_with = "numeric::deserialize_opt_u64")]
    pub recordcount: Option<u64>,
    pub hoststatus: Vec<HostRecord>,
}

impl HostStatusList {
    /// Cross-check `recordcount` against the decoded list.
    pub fn record_count_mismatch(&self) -> Option<RecordCountMismatch> {
        check_record_count(self.recordcount, self.hoststatus.len())
    }

    /// Aggregate every decoded host record.
    pub fn summarize(&self) -> HostSummary {
        HostSummary::from_records(&self.hoststatus)
    }
}

/// Response of `GET /objects/servicestatus`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceStatusList {
    #[serde(default, deserialize_with = "numeric::deserialize_opt_u64")]
    pub recordcount: Option<u64>,
    pub servicestatus: Vec<ServiceRecord>,
}

impl ServiceStatusList {
    /// Cross-check `recordcount` against the decoded list.
    pub fn record_count_mismatch(&self) -> Option<RecordCountMismatch> {
        check_record_count(self.recordcount, self.servicestatus.len())
    }

    /// Aggregate every decoded service record.
    pub fn summarize(&self) -> ServiceSummary {
        ServiceSummary::from_records(&self.servicestatus)
    }
}
