//! Prometheus counters for runs and comparisons.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use sortrace_runner::{RaceReport, RunStatus, RunSummary};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    runs_total: IntCounterVec,
    comparisons_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let runs_total = IntCounterVec::new(
            Opts::new("sortrace_runs_total", "Runs and races by mode and outcome"),
            &["mode", "status"],
        )?;
        let comparisons_total = IntCounterVec::new(
            Opts::new("sortrace_comparisons_total", "Comparisons performed per algorithm"),
            &["algorithm"],
        )?;
        registry.register(Box::new(runs_total.clone()))?;
        registry.register(Box::new(comparisons_total.clone()))?;
        Ok(Self {
            registry,
            runs_total,
            comparisons_total,
        })
    }

    pub fn record_run(&self, summary: &RunSummary) {
        let status = match summary.status {
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
        };
        self.runs_total.with_label_values(&["single", status]).inc();
        self.comparisons_total
            .with_label_values(&[summary.algorithm.id()])
            .inc_by(summary.comparisons);
    }

    pub fn record_race(&self, report: &RaceReport) {
        let status = if report.cancelled { "cancelled" } else { "completed" };
        self.runs_total.with_label_values(&["race", status]).inc();
        for lane in &report.lanes {
            self.comparisons_total
                .with_label_values(&[lane.algorithm.id()])
                .inc_by(lane.comparisons);
        }
    }

    /// Text exposition format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
