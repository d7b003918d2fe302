//! Single-pass aggregation of status records into bucket counters.
//!
//! Each record lands in exactly one check-type bucket and at most one state
//! bucket. Records whose state code is outside the known set are counted in
//! `total` only. Flapping and downtime are overlays counted independently of
//! the state buckets.

use crate::{CheckType, HostRecord, HostState, ServiceRecord, ServiceState};

/// Counters derived from a host status list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostSummary {
    pub total: u64,
    pub actively_checked: u64,
    pub passively_checked: u64,
    pub up: u64,
    pub down: u64,
    pub unreachable: u64,
    pub flapping: u64,
    pub in_downtime: u64,
}

impl HostSummary {
    pub fn from_records(records: &[HostRecord]) -> Self {
        records.iter().collect()
    }

    /// Fold one record into the counters.
    pub fn record(&mut self, host: &HostRecord) {
        self.total += 1;

        match host.check_type() {
            CheckType::Active => self.actively_checked += 1,
            CheckType::Passive => self.passively_checked += 1,
        }

        match host.state() {
            Some(HostState::Up) => self.up += 1,
            Some(HostState::Down) => self.down += 1,
            Some(HostState::Unreachable) => self.unreachable += 1,
            None => {}
        }

        if host.is_flapping() {
            self.flapping += 1;
        }
        if host.in_downtime() {
            self.in_downtime += 1;
        }
    }

    /// Sum of the state buckets; below `total` when unknown codes were seen.
    pub fn classified(&self) -> u64 {
        self.up + self.down + self.unreachable
    }
}

impl<'a> FromIterator<&'a HostRecord> for HostSummary {
    fn from_iter<I: IntoIterator<Item = &'a HostRecord>>(iter: I) -> Self {
        let mut summary = HostSummary::default();
        for host in iter {
            summary.record(host);
        }
        summary
    }
}

/// Counters derived from a service status list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceSummary {
    pub total: u64,
    pub actively_checked: u64,
    pub passively_checked: u64,
    pub ok: u64,
    pub warning: u64,
    pub critical: u64,
    pub unknown: u64,
    pub flapping: u64,
    pub in_downtime: u64,
}

impl ServiceSummary {
    pub fn from_records(records: &[ServiceRecord]) -> Self {
        records.iter().collect()
    }

    /// Fold one record into the counters.
    pub fn record(&mut self, service: &ServiceRecord) {
        self.total += 1;

        match service.check_type() {
            CheckType::Active => self.actively_checked += 1,
            CheckType::Passive => self.passively_checked += 1,
        }

        match service.state() {
            Some(ServiceState::Ok) => self.ok += 1,
            Some(ServiceState::Warning) => self.warning += 1,
            Some(ServiceState::Critical) => self.critical += 1,
            Some(ServiceState::Unknown) => self.unknown += 1,
            None => {}
        }

        if service.is_flapping() {
            self.flapping += 1;
        }
        if service.in_downtime() {
            self.in_downtime += 1;
        }
    }

    /// Sum of the state buckets; below `total` when unknown codes were seen.
    pub fn classified(&self) -> u64 {
        self.ok + self.warning + self.critical + self.unknown
    }
}

impl<'a> FromIterator<&'a ServiceRecord> for ServiceSummary {
    fn from_iter<I: IntoIterator<Item = &'a ServiceRecord>>(iter: I) -> Self {
        let mut summary = ServiceSummary::default();
        for service in iter {
            summary.record(service);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(states: &[f64], check_types: &[f64]) -> Vec<HostRecord> {
        states
            .iter()
            .zip(check_types)
            .map(|(&state, &check)| HostRecord::new(check, state))
            .collect()
    }

    fn mixed_services() -> Vec<ServiceRecord> {
        vec![
            ServiceRecord::new(0.0, 0.0),
            ServiceRecord::new(0.0, 1.0).with_flapping(1.0),
            ServiceRecord::new(1.0, 2.0).with_downtime_depth(1.0),
            ServiceRecord::new(2.0, 3.0),
            ServiceRecord::new(0.0, 9.0).with_flapping(1.0),
            ServiceRecord::new(0.0, 2.0).with_downtime_depth(2.0),
            ServiceRecord::new(1.0, 0.0).with_flapping(0.5),
        ]
    }

    /// A handful of distinct orderings: reversed and every rotation.
    fn orderings<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
        let mut out = Vec::new();
        for shift in 0..items.len() {
            let mut rotated = items.to_vec();
            rotated.rotate_left(shift);
            out.push(rotated.clone());
            rotated.reverse();
            out.push(rotated);
        }
        out
    }

    #[test]
    fn test_three_hosts_one_per_state() {
        let summary = HostSummary::from_records(&hosts(&[0.0, 1.0, 2.0], &[0.0, 0.0, 1.0]));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.actively_checked, 2);
        assert_eq!(summary.passively_checked, 1);
        assert_eq!(summary.up, 1);
        assert_eq!(summary.down, 1);
        assert_eq!(summary.unreachable, 1);
        assert_eq!(summary.flapping, 0);
        assert_eq!(summary.in_downtime, 0);
    }

    #[test]
    fn test_four_services_one_per_state() {
        let services: Vec<_> = [0.0, 1.0, 2.0, 3.0]
            .iter()
            .map(|&state| ServiceRecord::new(0.0, state))
            .collect();
        let summary = ServiceSummary::from_records(&services);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.ok, 1);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.actively_checked, 4);
        assert_eq!(summary.passively_checked, 0);
    }

    #[test]
    fn test_unknown_host_state_counts_in_total_only() {
        let summary = HostSummary::from_records(&hosts(&[0.0, 5.0, 1.5], &[0.0, 3.0, 0.0]));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.up, 1);
        assert_eq!(summary.down, 0);
        assert_eq!(summary.unreachable, 0);
        assert_eq!(summary.classified(), 1);
        assert_eq!(summary.actively_checked + summary.passively_checked, 3);
    }

    #[test]
    fn test_service_partitions() {
        let summary = ServiceSummary::from_records(&mixed_services());

        assert_eq!(summary.total, 7);
        assert_eq!(summary.actively_checked, 4);
        assert_eq!(summary.passively_checked, 3);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.critical, 2);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.classified(), 6);
        assert_eq!(summary.flapping, 2);
        assert_eq!(summary.in_downtime, 1);
    }

    #[test]
    fn test_passive_and_critical_come_from_service_counters() {
        let services = vec![
            ServiceRecord::new(1.0, 2.0),
            ServiceRecord::new(1.0, 2.0),
            ServiceRecord::new(0.0, 1.0),
        ];
        let summary = ServiceSummary::from_records(&services);

        assert_eq!(summary.passively_checked, 2);
        assert_eq!(summary.critical, 2);
        assert_eq!(summary.warning, 1);
    }

    #[test]
    fn test_overlays_are_independent_of_state() {
        let records = vec![
            HostRecord::new(0.0, 1.0)
                .with_flapping(1.0)
                .with_downtime_depth(1.0),
            HostRecord::new(1.0, 7.0).with_flapping(1.0),
        ];
        let summary = HostSummary::from_records(&records);

        assert_eq!(summary.flapping, 2);
        assert_eq!(summary.in_downtime, 1);
        assert_eq!(summary.down, 1);
        assert_eq!(summary.classified(), 1);
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(HostSummary::from_records(&[]), HostSummary::default());
        assert_eq!(ServiceSummary::from_records(&[]), ServiceSummary::default());
    }

    #[test]
    fn test_partition_sums_hold() {
        let records = hosts(
            &[0.0, 1.0, 2.0, 3.0, 0.0, 2.0, 0.25],
            &[0.0, 1.0, 0.0, 1.0, 4.0, 0.0, 0.0],
        );
        let summary = HostSummary::from_records(&records);
        let n = records.len() as u64;

        assert_eq!(summary.total, n);
        assert_eq!(summary.actively_checked + summary.passively_checked, n);
        assert!(summary.classified() <= n);

        let summary = ServiceSummary::from_records(&mixed_services());
        assert_eq!(summary.actively_checked + summary.passively_checked, summary.total);
        assert!(summary.classified() <= summary.total);
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let records = hosts(
            &[0.0, 1.0, 2.0, 1.0, 9.0],
            &[0.0, 1.0, 1.0, 0.0, 0.0],
        );
        let expected = HostSummary::from_records(&records);
        assert_eq!(HostSummary::from_records(&records), expected);
        for permuted in orderings(&records) {
            assert_eq!(HostSummary::from_records(&permuted), expected);
        }

        let services = mixed_services();
        let expected = ServiceSummary::from_records(&services);
        assert_eq!(ServiceSummary::from_records(&services), expected);
        for permuted in orderings(&services) {
            assert_eq!(ServiceSummary::from_records(&permuted), expected);
        }
    }

    #[test]
    fn test_incremental_matches_batch() {
        let services = mixed_services();
        let mut incremental = ServiceSummary::default();
        for service in &services {
            incremental.record(service);
        }
        assert_eq!(incremental, ServiceSummary::from_records(&services));
    }
}
