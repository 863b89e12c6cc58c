use crate::engine::{CpuSummary, Delta, RankedProcess, core_usage, rank_processes};
use crate::system::snapshot::Snapshot;

/// Everything printed for one polling cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleReport<'a> {
    pub summary: CpuSummary,
    /// Per-core usage percentages; empty when cores are not sampled.
    pub cores: Vec<f64>,
    pub processes: Option<ProcessRanking<'a>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRanking<'a> {
    /// Processes present in the `after` snapshot.
    pub count: usize,
    pub top: Vec<RankedProcess<'a>>,
}

/// Diffs `before` against `after`. Rows in the ranking borrow from `after`.
pub fn build_report<'a>(before: &Snapshot, after: &'a Snapshot, top_n: usize) -> CycleReport<'a> {
    let _build_span = tracing::debug_span!("report.build").entered();

    let aggregate = Delta::between(&before.aggregate, &after.aggregate);
    if aggregate.was_reset() {
        tracing::debug!("aggregate counters went backwards, clamped to zero");
    }
    let summary = CpuSummary::from_delta(&aggregate);

    let cores = before
        .cores
        .iter()
        .zip(&after.cores)
        .enumerate()
        .map(|(core, (b, a))| {
            let delta = Delta::between(b, a);
            if delta.was_reset() {
                tracing::debug!(core, "core counters went backwards, clamped to zero");
            }
            core_usage(&delta)
        })
        .collect();

    let processes = after.processes.as_deref().map(|current| {
        let previous = before.processes.as_deref().unwrap_or_default();
        ProcessRanking {
            count: current.len(),
            top: rank_processes(previous, current, top_n),
        }
    });

    CycleReport {
        summary,
        cores,
        processes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::counters::CounterRecord;
    use crate::system::process::ProcessSample;

    fn busy(user: u64, idle: u64) -> CounterRecord {
        CounterRecord {
            user,
            idle,
            ..Default::default()
        }
    }

    fn proc(pid: u32, utime: u64) -> ProcessSample {
        ProcessSample {
            pid,
            comm: "worker".into(),
            state: 'R',
            utime,
            stime: 0,
            cutime: 0,
            cstime: 0,
            priority: 20,
            nice: 0,
        }
    }

    #[test]
    fn reset_core_reports_zero_not_wrapped() {
        let before = Snapshot {
            aggregate: busy(100, 100),
            cores: vec![busy(50, 50), busy(5000, 5000)],
            processes: None,
        };
        let after = Snapshot {
            aggregate: busy(150, 150),
            cores: vec![busy(75, 75), busy(1, 1)],
            processes: None,
        };
        let report = build_report(&before, &after, 10);
        assert_eq!(report.cores, vec![50.0, 0.0]);
        assert!((report.summary.usage_percent - 50.0).abs() < 1e-9);
        assert!(report.processes.is_none());
    }

    #[test]
    fn aggregate_is_not_derived_from_cores() {
        let before = Snapshot {
            aggregate: busy(0, 0),
            cores: vec![busy(0, 0), busy(0, 0)],
            processes: None,
        };
        let after = Snapshot {
            aggregate: busy(10, 90),
            cores: vec![busy(100, 0), busy(100, 0)],
            processes: None,
        };
        let report = build_report(&before, &after, 10);
        assert!((report.summary.usage_percent - 10.0).abs() < 1e-9);
        assert_eq!(report.cores, vec![100.0, 100.0]);
    }

    #[test]
    fn ranking_counts_after_processes() {
        let before = Snapshot {
            processes: Some(vec![proc(1, 10), proc(2, 10)]),
            ..Default::default()
        };
        let after = Snapshot {
            aggregate: busy(100, 100),
            processes: Some(vec![proc(1, 30), proc(3, 5), proc(4, 1)]),
            ..Default::default()
        };
        let report = build_report(&before, &after, 2);
        let ranking = report.processes.unwrap();
        assert_eq!(ranking.count, 3);
        let rows: Vec<(u32, u64)> = ranking.top.iter().map(|r| (r.sample.pid, r.load)).collect();
        assert_eq!(rows, vec![(1, 20), (3, 5)]);
    }
}
