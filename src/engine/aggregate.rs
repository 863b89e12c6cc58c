use serde::Serialize;

use super::delta::Delta;

/// `load / total * 100`, with the denominator floored at 1 so an all-zero
/// interval reports 0%.
pub fn usage_percent(load: u64, total: u64) -> f64 {
    load as f64 / total.max(1) as f64 * 100.0
}

/// Utilization and per-category tick counts for one interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CpuSummary {
    pub usage_percent: f64,
    pub total: u64,
    pub load: u64,
    /// idle + iowait
    pub idle: u64,
    pub iowait: u64,
    pub system: u64,
    /// user + nice
    pub user: u64,
    /// irq + softirq
    pub irq: u64,
    /// guest + guest_nice
    pub guest: u64,
}

impl CpuSummary {
    pub fn from_delta(delta: &Delta) -> Self {
        let c = delta.counters();
        let total = delta.total();
        let load = delta.load();
        CpuSummary {
            usage_percent: usage_percent(load, total),
            total,
            load,
            idle: c.idle + c.iowait,
            iowait: c.iowait,
            system: c.system,
            user: c.user + c.nice,
            irq: c.irq + c.softirq,
            guest: c.guest + c.guest_nice,
        }
    }
}

/// Per-core figures are percentage only.
pub fn core_usage(delta: &Delta) -> f64 {
    usage_percent(delta.load(), delta.total())
}
