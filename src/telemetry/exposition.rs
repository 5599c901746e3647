//! Prometheus text exposition for the sidecar's fixed metric schema
//!
//! Metric names, HELP text and TYPE declarations are a scrape-compatibility
//! surface and must not change.

use std::fmt::Write;
use super::ProcessSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

pub struct MetricFamily {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
}

pub const HEARTBEAT_COUNT: MetricFamily = MetricFamily {
    name: "swap_optimizer_heartbeat_count",
    help: "Total number of heartbeats",
    kind: MetricKind::Counter,
};
pub const LAST_HEARTBEAT_SECONDS: MetricFamily = MetricFamily {
    name: "swap_optimizer_last_heartbeat_seconds",
    help: "Seconds since last heartbeat",
    kind: MetricKind::Gauge,
};
pub const MEMORY_RSS_BYTES: MetricFamily = MetricFamily {
    name: "swap_optimizer_memory_rss_bytes",
    help: "Resident Set Size",
    kind: MetricKind::Gauge,
};
pub const MEMORY_HEAP_USED_BYTES: MetricFamily = MetricFamily {
    name: "swap_optimizer_memory_heap_used_bytes",
    help: "Heap memory used",
    kind: MetricKind::Gauge,
};
pub const CPU_USER_USEC: MetricFamily = MetricFamily {
    name: "swap_optimizer_cpu_user_usec",
    help: "User CPU time",
    kind: MetricKind::Counter,
};
pub const CPU_SYSTEM_USEC: MetricFamily = MetricFamily {
    name: "swap_optimizer_cpu_system_usec",
    help: "System CPU time",
    kind: MetricKind::Counter,
};

/// Everything one `/metrics` response reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub heartbeat_count: u64,
    /// `-1` when no heartbeat has ever been recorded.
    pub seconds_since_last: i64,
    pub process: ProcessSample,
}

pub fn render_metrics(snapshot: &MetricsSnapshot) -> String {
    let process = &snapshot.process;
    let series: [(&MetricFamily, i128); 6] = [
        (&HEARTBEAT_COUNT, snapshot.heartbeat_count.into()),
        (&LAST_HEARTBEAT_SECONDS, snapshot.seconds_since_last.into()),
        (&MEMORY_RSS_BYTES, process.rss_bytes.into()),
        (&MEMORY_HEAP_USED_BYTES, process.heap_used_bytes.into()),
        (&CPU_USER_USEC, process.cpu_user_usec.into()),
        (&CPU_SYSTEM_USEC, process.cpu_system_usec.into()),
    ];

    let mut output = String::new();
    for (i, (family, value)) in series.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let _ = writeln!(output, "# HELP {} {}", family.name, family.help);
        let _ = writeln!(output, "# TYPE {} {}", family.name, family.kind.as_str());
        let _ = writeln!(output, "{} {}", family.name, value);
    }
    output
}

/// Body served instead of the exposition when the log cannot be read; a
/// comment line so scrapers never mistake it for a sample.
pub fn render_error(message: &str) -> String {
    let single_line = message.replace(['\r', '\n'], " ");
    format!("# ERROR reading logs: {}", single_line)
}
