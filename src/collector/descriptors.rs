//! The fixed set of metric families the exporter can emit.

use nagios_exposition::{MetricDesc, Sample};

/// Default namespace prefix for every metric name.
pub const NAMESPACE: &str = "nagios";

/// Identifies one metric family.
///
/// The discriminant doubles as the index into [`Descriptors`], so the order
/// here is also the exposition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Up,

    HostsTotal,
    HostsActivelyChecked,
    HostsPassivelyChecked,
    HostsUp,
    HostsDown,
    HostsUnreachable,
    HostsFlapping,
    HostsDowntime,

    ServicesTotal,
    ServicesActivelyChecked,
    ServicesPassivelyChecked,
    ServicesOk,
    ServicesWarn,
    ServicesCritical,
    ServicesUnknown,
    ServicesFlapping,
    ServicesDowntime,

    VersionInfo,

    ScrapeSuccess,
    ScrapeResourceSuccess,
    ScrapeDurationSeconds,
}

impl Metric {
    pub const ALL: [Metric; 22] = [
        Metric::Up,
        Metric::HostsTotal,
        Metric::HostsActivelyChecked,
        Metric::HostsPassivelyChecked,
        Metric::HostsUp,
        Metric::HostsDown,
        Metric::HostsUnreachable,
        Metric::HostsFlapping,
        Metric::HostsDowntime,
        Metric::ServicesTotal,
        Metric::ServicesActivelyChecked,
        Metric::ServicesPassivelyChecked,
        Metric::ServicesOk,
        Metric::ServicesWarn,
        Metric::ServicesCritical,
        Metric::ServicesUnknown,
        Metric::ServicesFlapping,
        Metric::ServicesDowntime,
        Metric::VersionInfo,
        Metric::ScrapeSuccess,
        Metric::ScrapeResourceSuccess,
        Metric::ScrapeDurationSeconds,
    ];

    /// Name without the namespace prefix.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Up => "up",
            Metric::HostsTotal => "hosts_total",
            Metric::HostsActivelyChecked => "hosts_actively_checked_total",
            Metric::HostsPassivelyChecked => "hosts_passively_checked_total",
            Metric::HostsUp => "hosts_up_total",
            Metric::HostsDown => "hosts_down_total",
            Metric::HostsUnreachable => "hosts_unreachable_total",
            Metric::HostsFlapping => "hosts_flapping_total",
            Metric::HostsDowntime => "hosts_downtime_total",
            Metric::ServicesTotal => "services_total",
            Metric::ServicesActivelyChecked => "services_actively_checked_total",
            Metric::ServicesPassivelyChecked => "services_passively_checked_total",
            Metric::ServicesOk => "services_ok_total",
            Metric::ServicesWarn => "services_warn_total",
            Metric::ServicesCritical => "services_critical_total",
            Metric::ServicesUnknown => "services_unknown_total",
            Metric::ServicesFlapping => "services_flapping_total",
            Metric::ServicesDowntime => "services_downtime_total",
            Metric::VersionInfo => "version_info",
            Metric::ScrapeSuccess => "scrape_success",
            Metric::ScrapeResourceSuccess => "scrape_resource_success",
            Metric::ScrapeDurationSeconds => "scrape_duration_seconds",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Metric::Up => "Whether Nagios can be reached",
            Metric::HostsTotal => "Amount of hosts present in configuration",
            Metric::HostsActivelyChecked => "Amount of hosts actively checked",
            Metric::HostsPassivelyChecked => "Amount of hosts passively checked",
            Metric::HostsUp => "Amount of hosts in 'up' state",
            Metric::HostsDown => "Amount of hosts in 'down' state",
            Metric::HostsUnreachable => "Amount of hosts in 'unreachable' state",
            Metric::HostsFlapping => "Amount of hosts in 'flapping' state",
            Metric::HostsDowntime => "Amount of hosts in downtime",
            Metric::ServicesTotal => "Amount of services present in configuration",
            Metric::ServicesActivelyChecked => "Amount of services actively checked",
            Metric::ServicesPassivelyChecked => "Amount of services passively checked",
            Metric::ServicesOk => "Amount of services in 'ok' state",
            Metric::ServicesWarn => "Amount of services in 'warn' state",
            Metric::ServicesCritical => "Amount of services in 'critical' state",
            Metric::ServicesUnknown => "Amount of services in 'unknown' state",
            Metric::ServicesFlapping => "Amount of services in 'flapping' state",
            Metric::ServicesDowntime => "Amount of services in downtime",
            Metric::VersionInfo => "Nagios version information",
            Metric::ScrapeSuccess => "Whether every resource of the last scrape was collected",
            Metric::ScrapeResourceSuccess => "Whether a resource group was fetched and decoded",
            Metric::ScrapeDurationSeconds => "Duration of the scrape in seconds",
        }
    }

    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Metric::VersionInfo => &["version"],
            Metric::ScrapeResourceSuccess => &["resource"],
            _ => &[],
        }
    }
}

/// Descriptors for every [`Metric`], built once per collector.
#[derive(Debug, Clone)]
pub struct Descriptors {
    all: Vec<MetricDesc>,
}

impl Descriptors {
    pub fn new(namespace: &str) -> Self {
        let all = Metric::ALL
            .iter()
            .map(|m| MetricDesc::gauge(namespace, m.name(), m.help()).with_labels(m.labels()))
            .collect();
        Self { all }
    }

    pub fn all(&self) -> &[MetricDesc] {
        &self.all
    }

    pub fn get(&self, metric: Metric) -> &MetricDesc {
        &self.all[metric as usize]
    }

    /// Fully qualified name of `metric`.
    pub fn name(&self, metric: Metric) -> &str {
        &self.get(metric).name
    }

    pub fn sample(&self, metric: Metric, value: f64) -> Sample {
        self.get(metric).sample(value)
    }

    pub fn labeled_sample(&self, metric: Metric, labels: &[&str], value: f64) -> Sample {
        self.get(metric).labeled_sample(labels, value)
    }
}
