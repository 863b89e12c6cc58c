use serde::Serialize;

use crate::engine::{CpuSummary, Priority};
use crate::report::CycleReport;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a CpuSummary,
    cores: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    processes: Option<JsonRanking<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonRanking<'a> {
    count: usize,
    top: Vec<JsonProcess<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonProcess<'a> {
    pid: u32,
    /// `None` for real-time priorities.
    priority: Option<i64>,
    realtime: bool,
    nice: i64,
    state: char,
    usage_percent: f64,
    load: u64,
    comm: &'a str,
}

/// One JSON object per cycle, no trailing newline.
pub fn render(report: &CycleReport<'_>) -> serde_json::Result<String> {
    let total = report.summary.total;
    let processes = report.processes.as_ref().map(|ranking| JsonRanking {
        count: ranking.count,
        top: ranking
            .top
            .iter()
            .map(|row| {
                let priority = row.priority();
                JsonProcess {
                    pid: row.sample.pid,
                    priority: match priority {
                        Priority::Normal(value) => Some(value),
                        Priority::RealTime => None,
                    },
                    realtime: priority == Priority::RealTime,
                    nice: row.sample.nice,
                    state: row.sample.state,
                    usage_percent: row.usage_percent(total),
                    load: row.load,
                    comm: &row.sample.comm,
                }
            })
            .collect(),
    });

    serde_json::to_string(&JsonReport {
        summary: &report.summary,
        cores: &report.cores,
        processes,
    })
}
