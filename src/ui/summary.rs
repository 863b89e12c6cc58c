use std::fmt::Write;

use crate::report::CycleReport;

/// The per-cycle utilization line: aggregate usage, category ticks, then one
/// percentage per core.
pub fn summary_line(report: &CycleReport<'_>) -> String {
    let s = &report.summary;
    let mut out = format!(
        "{:5.1}% (T:{:4} I:{:4} IO:{:4} S:{:4} U:{:4} IRQ:{:4} G:{:4})",
        s.usage_percent, s.total, s.idle, s.iowait, s.system, s.user, s.irq, s.guest
    );
    for usage in &report.cores {
        let _ = write!(out, "{usage:5.1}%");
    }
    out
}
