use std::fmt::Write;

use crate::engine::{Priority, RankedProcess};
use crate::report::ProcessRanking;

pub const COLUMN_HEADER: &str = "  PID  PR  NI S    CPU  CNT COMMAND";

pub fn priority_label(priority: Priority) -> String {
    match priority {
        Priority::Normal(value) => format!("{value:3}"),
        Priority::RealTime => " rt".to_string(),
    }
}

pub fn process_row(row: &RankedProcess<'_>, aggregate_total: u64) -> String {
    let p = row.sample;
    format!(
        "{:5} {} {:3} {} {:5.1}% {:4} {}",
        p.pid,
        priority_label(row.priority()),
        p.nice,
        p.state,
        row.usage_percent(aggregate_total),
        row.load,
        p.comm
    )
}

/// Process count, column header, ranked rows and a trailing blank line.
pub fn render(ranking: &ProcessRanking<'_>, aggregate_total: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} processes", ranking.count);
    let _ = writeln!(out, "{COLUMN_HEADER}");
    for row in &ranking.top {
        let _ = writeln!(out, "{}", process_row(row, aggregate_total));
    }
    out.push('\n');
    out
}
