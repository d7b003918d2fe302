//! Prometheus text exposition format (version 0.0.4).

use std::fmt::Write;

use crate::{MetricDesc, Snapshot};

/// Render `snapshot` in the Prometheus text format.
///
/// Families are written in descriptor order. A family without samples is
/// omitted entirely, and samples without a descriptor are not rendered.
pub fn format_prometheus(descs: &[MetricDesc], snapshot: &Snapshot) -> String {
    let mut output = String::new();

    for desc in descs {
        let mut samples = snapshot.iter().filter(|s| s.name == desc.name).peekable();
        if samples.peek().is_none() {
            continue;
        }

        // Writing to a String cannot fail.
        let _ = writeln!(output, "# HELP {} {}", desc.name, escape_help(desc.help));
        let _ = writeln!(output, "# TYPE {} {}", desc.name, desc.kind.as_str());

        for sample in samples {
            output.push_str(&sample.name);
            if !sample.labels.is_empty() {
                let labels = sample
                    .labels
                    .iter()
                    .map(|(name, value)| format!("{}=\"{}\"", name, escape_label_value(value)))
                    .collect::<Vec<_>>()
                    .join(",");
                output.push('{');
                output.push_str(&labels);
                output.push('}');
            }
            output.push(' ');
            output.push_str(&format_value(sample.value));
            output.push('\n');
        }
    }

    output
}

/// Format a sample value the way Prometheus parses it.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}

/// Escape a label value for Prometheus format.
/// Backslash, double-quote, and newline must be escaped.
pub fn escape_label_value(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScrapeOutcome, Snapshot};

    fn descs() -> Vec<MetricDesc> {
        vec![
            MetricDesc::gauge("nagios", "up", "Whether Nagios can be reached"),
            MetricDesc::gauge("nagios", "hosts_total", "Amount of hosts present in configuration"),
            MetricDesc::gauge("nagios", "version_info", "Nagios version information")
                .with_labels(&["version"]),
        ]
    }

    #[test]
    fn test_format_basic() {
        let descs = descs();
        let snapshot = Snapshot::builder()
            .sample(descs[0].sample(1.0))
            .sample(descs[1].sample(42.0))
            .sample(descs[2].labeled_sample(&["5.8.10"], 1.0))
            .build(ScrapeOutcome::Success);

        let output = format_prometheus(&descs, &snapshot);

        assert_eq!(
            output,
            "# HELP nagios_up Whether Nagios can be reached\n\
             # TYPE nagios_up gauge\n\
             nagios_up 1\n\
             # HELP nagios_hosts_total Amount of hosts present in configuration\n\
             # TYPE nagios_hosts_total gauge\n\
             nagios_hosts_total 42\n\
             # HELP nagios_version_info Nagios version information\n\
             # TYPE nagios_version_info gauge\n\
             nagios_version_info{version=\"5.8.10\"} 1\n"
        );
    }

    #[test]
    fn test_families_without_samples_are_omitted() {
        let descs = descs();
        let snapshot = Snapshot::builder()
            .sample(descs[0].sample(0.0))
            .build(ScrapeOutcome::Degraded);

        let output = format_prometheus(&descs, &snapshot);

        assert!(output.contains("nagios_up 0\n"));
        assert!(!output.contains("nagios_hosts_total"));
        assert!(!output.contains("nagios_version_info"));
    }

    #[test]
    fn test_undescribed_samples_are_skipped() {
        let stray = MetricDesc::gauge("other", "thing", "not registered");
        let snapshot = Snapshot::builder()
            .sample(stray.sample(3.0))
            .build(ScrapeOutcome::Success);

        assert_eq!(format_prometheus(&descs(), &snapshot), "");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(17.0), "17");
        assert_eq!(format_value(0.25), "0.25");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn test_escape_label_value() {
        assert_eq!(escape_label_value("simple"), "simple");
        assert_eq!(escape_label_value("with\"quote"), "with\\\"quote");
        assert_eq!(escape_label_value("with\\backslash"), "with\\\\backslash");
        assert_eq!(escape_label_value("with\nnewline"), "with\\nnewline");
    }

    #[test]
    fn test_escaped_label_in_output() {
        let descs = descs();
        let snapshot = Snapshot::builder()
            .sample(descs[2].labeled_sample(&["5.8 \"beta\""], 1.0))
            .build(ScrapeOutcome::Success);

        let output = format_prometheus(&descs, &snapshot);
        assert!(output.contains("nagios_version_info{version=\"5.8 \\\"beta\\\"\"} 1\n"));
    }
}
