//! Benchmark reporting utilities.
//!
//! Produces structured summaries of harness measurements for CI/CD
//! integration and human-readable terminal output.

use std::collections::BTreeMap;

use spmd_bench::perf::PerfResult;

/// A single harness measurement for custom reporting.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Measurement {
    pub task: String,
    pub group: String,
    pub result: PerfResult,
    pub notes: Option<String>,
}

impl Measurement {
    pub fn new(task: &str, group: &str, result: PerfResult) -> Self {
        Self {
            task: task.to_string(),
            group: group.to_string(),
            result,
            notes: None,
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.notes = Some(note.to_string());
        self
    }
}

/// Accumulates measurements and produces reports.
#[derive(Debug, Default, serde::Serialize)]
pub struct BenchReport {
    pub suite_name: String,
    pub timestamp: String,
    pub measurements: Vec<Measurement>,
}

impl BenchReport {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            measurements: Vec::new(),
        }
    }

    pub fn add(&mut self, m: Measurement) {
        self.measurements.push(m);
    }

    /// Produce a grouped summary table as a string.
    pub fn summary(&self) -> String {
        let mut groups: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
        for m in &self.measurements {
            groups.entry(&m.group).or_default().push(m);
        }

        let mut out = String::new();
        out.push_str(&format!(
            "\n=== spmd-bench report: {} ({}) ===\n\n",
            self.suite_name, self.timestamp
        ));

        for (group, measurements) in &groups {
            out.push_str(&format!("-- {} --\n", group));
            out.push_str(&format!(
                "  {:<28} {:>14} {:>6} {:>6} {:>16}\n",
                "Task", "Mode", "Iters", "Procs", "Avg (s)"
            ));
            for m in measurements {
                out.push_str(&format!(
                    "  {:<28} {:>14} {:>6} {:>6} {:>16.9}\n",
                    m.task,
                    m.result.mode.label(),
                    m.result.iterations,
                    m.result.participants,
                    m.result.average_seconds
                ));
            }
            out.push('\n');
        }
        out
    }

    /// Serialize the report to JSON for CI integration.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
