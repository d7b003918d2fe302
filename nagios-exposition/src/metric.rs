//! Metric descriptors and the samples of one scrape.

/// Build a fully qualified metric name, skipping empty parts.
///
/// `fq_name("nagios", "", "up")` is `nagios_up`.
pub fn fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

/// Prometheus metric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Static description of a metric family: name, help text and label names.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDesc {
    pub name: String,
    pub help: &'static str,
    pub kind: MetricKind,
    pub labels: &'static [&'static str],
}

impl MetricDesc {
    /// An unlabeled gauge named `<namespace>_<name>`.
    pub fn gauge(namespace: &str, name: &str, help: &'static str) -> Self {
        Self {
            name: fq_name(namespace, "", name),
            help,
            kind: MetricKind::Gauge,
            labels: &[],
        }
    }

    /// Declare the label names samples of this family carry.
    pub fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// An unlabeled sample of this family.
    pub fn sample(&self, value: f64) -> Sample {
        Sample {
            name: self.name.clone(),
            labels: Vec::new(),
            value,
        }
    }

    /// A labeled sample; `values` pair up with the declared label names.
    pub fn labeled_sample(&self, values: &[&str], value: f64) -> Sample {
        debug_assert_eq!(values.len(), self.labels.len(), "label arity of {}", self.name);
        Sample {
            name: self.name.clone(),
            labels: self
                .labels
                .iter()
                .zip(values)
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            value,
        }
    }
}

/// One measured value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

impl Sample {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// How far a scrape got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// Every resource was fetched and decoded.
    Success,
    /// The backend was reachable but some resource groups failed.
    PartialFailure,
    /// The liveness probe failed; only `up` and scrape metadata were emitted.
    Degraded,
}

impl ScrapeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeOutcome::Success => "success",
            ScrapeOutcome::PartialFailure => "partial_failure",
            ScrapeOutcome::Degraded => "degraded",
        }
    }
}

/// Immutable result of one scrape.
///
/// Built fresh for every request and never merged with an earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub outcome: ScrapeOutcome,
    pub samples: Vec<Sample>,
}

impl Snapshot {
    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Whether any sample of the family `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.samples.iter().any(|s| s.name == name)
    }

    /// Value of the unlabeled sample `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.name == name && s.labels.is_empty())
            .map(|s| s.value)
    }

    /// Value of the sample `name` whose `label` equals `value`.
    pub fn get_labeled(&self, name: &str, label: &str, value: &str) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.name == name && s.label(label) == Some(value))
            .map(|s| s.value)
    }
}

/// Builder for `Snapshot` instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    samples: Vec<Sample>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample (chaining form).
    pub fn sample(mut self, sample: Sample) -> Self {
        self.samples.push(sample);
        self
    }

    /// Add a sample in place.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn build(self, outcome: ScrapeOutcome) -> Snapshot {
        Snapshot {
            outcome,
            samples: self.samples,
        }
    }
}
