pub mod header;
pub mod json;
pub mod process_table;
pub mod summary;


use crate::report::CycleReport;

/// Text for one cycle, newline terminated.
pub fn render_text(report: &CycleReport<'_>) -> String {
    let mut out = summary::summary_line(report);
    out.push('\n');
    if let Some(ranking) = &report.processes {
        out.push_str(&process_table::render(ranking, report.summary.total));
    }
    out
}
