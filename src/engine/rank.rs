use std::cmp::Reverse;

use super::aggregate::usage_percent;
use super::delta::clamped_diff;
use crate::system::process::ProcessSample;

pub const DEFAULT_TOP_N: usize = 10;

/// Priorities outside this range belong to real-time scheduled tasks.
const NORMAL_PRIORITY_RANGE: std::ops::RangeInclusive<i64> = -99..=999;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    Normal(i64),
    RealTime,
}

impl Priority {
    pub fn classify(raw: i64) -> Self {
        if NORMAL_PRIORITY_RANGE.contains(&raw) {
            Priority::Normal(raw)
        } else {
            Priority::RealTime
        }
    }
}

/// A process from the `after` snapshot with its load over the interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedProcess<'a> {
    pub sample: &'a ProcessSample,
    pub load: u64,
}

impl RankedProcess<'_> {
    /// Share of the aggregate interval total, not of one core.
    pub fn usage_percent(&self, aggregate_total: u64) -> f64 {
        usage_percent(self.load, aggregate_total)
    }

    pub fn priority(&self) -> Priority {
        Priority::classify(self.sample.priority)
    }
}

/// Aligns two pid-sorted process lists, computes each surviving process's
/// load and returns the `top_n` busiest, load descending then pid ascending.
///
/// A pid missing from `before` is new and keeps its full utime+stime. A pid
/// missing from `after` has exited and is dropped.
pub fn rank_processes<'a>(
    before: &[ProcessSample],
    after: &'a [ProcessSample],
    top_n: usize,
) -> Vec<RankedProcess<'a>> {
    let mut ranked = Vec::with_capacity(after.len());
    let mut cursor = 0;

    for sample in after {
        while cursor < before.len() && before[cursor].pid < sample.pid {
            cursor += 1;
        }
        let load = match before.get(cursor) {
            Some(prev) if prev.pid == sample.pid => {
                clamped_diff(prev.load_basis(), sample.load_basis())
            }
            _ => sample.load_basis(),
        };
        ranked.push(RankedProcess { sample, load });
    }

    ranked.sort_by_key(|r| (Reverse(r.load), r.sample.pid));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pid: u32, utime: u64, stime: u64) -> ProcessSample {
        ProcessSample {
            pid,
            comm: format!("p{pid}"),
            state: 'R',
            utime,
            stime,
            cutime: 0,
            cstime: 0,
            priority: 20,
            nice: 0,
        }
    }

    fn pids_and_loads(ranked: &[RankedProcess<'_>]) -> Vec<(u32, u64)> {
        ranked.iter().map(|r| (r.sample.pid, r.load)).collect()
    }

    #[test]
    fn new_process_outranks_known_one() {
        let before = vec![sample(10, 3, 2)];
        let after = vec![sample(10, 20, 5), sample(11, 30, 10)];
        let ranked = rank_processes(&before, &after, DEFAULT_TOP_N);
        assert_eq!(pids_and_loads(&ranked), vec![(11, 40), (10, 20)]);
    }

    #[test]
    fn exited_processes_are_dropped() {
        let before = vec![sample(1, 0, 0), sample(2, 5, 5), sample(3, 0, 0)];
        let after = vec![sample(1, 4, 0), sample(3, 1, 0)];
        let ranked = rank_processes(&before, &after, DEFAULT_TOP_N);
        assert_eq!(pids_and_loads(&ranked), vec![(1, 4), (3, 1)]);
    }

    #[test]
    fn ties_break_by_pid() {
        let after = vec![sample(3, 5, 0), sample(7, 2, 3), sample(9, 5, 0)];
        let ranked = rank_processes(&[], &after, DEFAULT_TOP_N);
        assert_eq!(pids_and_loads(&ranked), vec![(3, 5), (7, 5), (9, 5)]);
    }

    #[test]
    fn reused_pid_with_smaller_counters_clamps() {
        let before = vec![sample(42, 1000, 500)];
        let after = vec![sample(42, 3, 1)];
        let ranked = rank_processes(&before, &after, DEFAULT_TOP_N);
        assert_eq!(pids_and_loads(&ranked), vec![(42, 0)]);
    }

    #[test]
    fn truncates_to_top_n() {
        let after: Vec<_> = (1..=25).map(|pid| sample(pid, pid as u64, 0)).collect();
        let ranked = rank_processes(&[], &after, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].sample.pid, 25);
        assert_eq!(ranked[9].sample.pid, 16);
    }

    #[test]
    fn usage_uses_aggregate_total() {
        let after = vec![sample(1, 25, 25)];
        let ranked = rank_processes(&[], &after, 1);
        assert!((ranked[0].usage_percent(200) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn priority_classification_bounds() {
        assert_eq!(Priority::classify(20), Priority::Normal(20));
        assert_eq!(Priority::classify(-99), Priority::Normal(-99));
        assert_eq!(Priority::classify(999), Priority::Normal(999));
        assert_eq!(Priority::classify(-100), Priority::RealTime);
        assert_eq!(Priority::classify(1000), Priority::RealTime);
    }
}
