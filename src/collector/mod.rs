//! The scrape state machine.
//!
//! A [`Collector`] owns its metric descriptors and a [`Backend`]. Each call
//! to [`Collector::collect`] runs one independent scrape:
//!
//! 1. probe liveness via `/system/status`; on failure emit `up = 0` and stop
//! 2. fetch info, hosts and services concurrently and wait for all three
//! 3. decode and aggregate each group on its own, so one failing group does
//!    not hide the others
//! 4. return every sample as one [`Snapshot`]
//!
//! Errors never escape `collect`; they show up as `up`, `scrape_success`
//! and `scrape_resource_success` values and as `warn!` log lines.

mod descriptors;

pub use descriptors::{Descriptors, Metric, NAMESPACE};

use std::time::Instant;

use async_trait::async_trait;
use nagios_client::{fetch_decoded, Backend, ClientError, Resource};
use nagios_exposition::{MetricDesc, ScrapeHandler, ScrapeOutcome, Snapshot, SnapshotBuilder};
use nagios_types::{HostStatusList, ServiceStatusList, SystemInfo, SystemStatus};
use tracing::{debug, warn};

use crate::duration::format_duration;

/// Scrapes one Nagios XI instance into metric snapshots.
#[derive(Debug)]
pub struct Collector<B> {
    backend: B,
    descriptors: Descriptors,
}

impl<B: Backend> Collector<B> {
    pub fn new(backend: B, namespace: &str) -> Self {
        Self {
            backend,
            descriptors: Descriptors::new(namespace),
        }
    }

    /// Every metric family this collector may emit. No network access.
    pub fn describe(&self) -> &[MetricDesc] {
        self.descriptors.all()
    }

    pub fn descriptors(&self) -> &Descriptors {
        &self.descriptors
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one scrape and return its snapshot.
    pub async fn collect(&self) -> Snapshot {
        let started = Instant::now();
        let mut out = SnapshotBuilder::new();

        let outcome = self.run_scrape(&mut out).await;

        let elapsed = started.elapsed();
        out.push(
            self.descriptors
                .sample(Metric::ScrapeDurationSeconds, elapsed.as_secs_f64()),
        );

        debug!(
            outcome = outcome.as_str(),
            duration = %format_duration(elapsed),
            "Scrape finished"
        );
        out.build(outcome)
    }

    async fn run_scrape(&self, out: &mut SnapshotBuilder) -> ScrapeOutcome {
        let status: SystemStatus = match fetch_decoded(&self.backend, Resource::SystemStatus).await
        {
            Ok(status) => status,
            Err(err) => {
                warn!(resource = %Resource::SystemStatus, error = %err, "Nagios liveness probe failed");
                out.push(self.descriptors.sample(Metric::Up, 0.0));
                out.push(self.descriptors.sample(Metric::ScrapeSuccess, 0.0));
                return ScrapeOutcome::Degraded;
            }
        };
        out.push(
            self.descriptors
                .sample(Metric::Up, status.is_currently_running),
        );
        if !status.is_running() {
            warn!(
                is_currently_running = status.is_currently_running,
                "Nagios reports its core process is not running"
            );
        }

        let (info, hosts, services) = tokio::join!(
            fetch_decoded::<_, SystemInfo>(&self.backend, Resource::SystemInfo),
            fetch_decoded::<_, HostStatusList>(&self.backend, Resource::HostStatus),
            fetch_decoded::<_, ServiceStatusList>(&self.backend, Resource::ServiceStatus),
        );

        let results = [
            (Resource::SystemInfo, self.emit_info(info, out)),
            (Resource::HostStatus, self.emit_hosts(hosts, out)),
            (Resource::ServiceStatus, self.emit_services(services, out)),
        ];

        for (resource, ok) in &results {
            out.push(self.descriptors.labeled_sample(
                Metric::ScrapeResourceSuccess,
                &[resource.name()],
                bool_value(*ok),
            ));
        }

        let all_ok = results.iter().all(|(_, ok)| *ok);
        out.push(
            self.descriptors
                .sample(Metric::ScrapeSuccess, bool_value(all_ok)),
        );

        if all_ok {
            ScrapeOutcome::Success
        } else {
            ScrapeOutcome::PartialFailure
        }
    }

    fn emit_info(&self, info: Result<SystemInfo, ClientError>, out: &mut SnapshotBuilder) -> bool {
        let Some(info) = accept(Resource::SystemInfo, info) else {
            return false;
        };
        out.push(
            self.descriptors
                .labeled_sample(Metric::VersionInfo, &[&info.version], 1.0),
        );
        true
    }

    fn emit_hosts(
        &self,
        hosts: Result<HostStatusList, ClientError>,
        out: &mut SnapshotBuilder,
    ) -> bool {
        let Some(hosts) = accept(Resource::HostStatus, hosts) else {
            return false;
        };
        if let Some(mismatch) = hosts.record_count_mismatch() {
            warn!(
                resource = %Resource::HostStatus,
                reported = mismatch.reported,
                actual = mismatch.actual,
                "recordcount disagrees with the number of records"
            );
        }

        let summary = hosts.summarize();
        let d = &self.descriptors;
        out.push(d.sample(Metric::HostsTotal, summary.total as f64));
        out.push(d.sample(Metric::HostsActivelyChecked, summary.actively_checked as f64));
        out.push(d.sample(Metric::HostsPassivelyChecked, summary.passively_checked as f64));
        out.push(d.sample(Metric::HostsUp, summary.up as f64));
        out.push(d.sample(Metric::HostsDown, summary.down as f64));
        out.push(d.sample(Metric::HostsUnreachable, summary.unreachable as f64));
        out.push(d.sample(Metric::HostsFlapping, summary.flapping as f64));
        out.push(d.sample(Metric::HostsDowntime, summary.in_downtime as f64));
        true
    }

    fn emit_services(
        &self,
        services: Result<ServiceStatusList, ClientError>,
        out: &mut SnapshotBuilder,
    ) -> bool {
        let Some(services) = accept(Resource::ServiceStatus, services) else {
            return false;
        };
        if let Some(mismatch) = services.record_count_mismatch() {
            warn!(
                resource = %Resource::ServiceStatus,
                reported = mismatch.reported,
                actual = mismatch.actual,
                "recordcount disagrees with the number of records"
            );
        }

        let summary = services.summarize();
        let d = &self.descriptors;
        out.push(d.sample(Metric::ServicesTotal, summary.total as f64));
        out.push(d.sample(Metric::ServicesActivelyChecked, summary.actively_checked as f64));
        out.push(d.sample(Metric::ServicesPassivelyChecked, summary.passively_checked as f64));
        out.push(d.sample(Metric::ServicesOk, summary.ok as f64));
        out.push(d.sample(Metric::ServicesWarn, summary.warning as f64));
        out.push(d.sample(Metric::ServicesCritical, summary.critical as f64));
        out.push(d.sample(Metric::ServicesUnknown, summary.unknown as f64));
        out.push(d.sample(Metric::ServicesFlapping, summary.flapping as f64));
        out.push(d.sample(Metric::ServicesDowntime, summary.in_downtime as f64));
        true
    }
}

/// Log a failed resource group and drop it.
fn accept<T>(resource: Resource, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                resource = %resource,
                error = %err,
                transient = err.is_transient(),
                "Failed to collect resource"
            );
            None
        }
    }
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[async_trait]
impl<B: Backend + 'static> ScrapeHandler for Collector<B> {
    fn descriptors(&self) -> &[MetricDesc] {
        self.describe()
    }

    async fn scrape(&self) -> Snapshot {
        self.collect().await
    }
}
