use std::fmt::Write;

const SUMMARY_COLUMNS: &str = "  load ( total   idle  iowait system   user      irq  guest)";

/// Column title printed once at startup. `core_columns` is the number of
/// per-core columns the report lines will carry (0 for none).
pub fn title_line(core_columns: usize) -> String {
    let mut out = String::from(SUMMARY_COLUMNS);
    for core in 0..core_columns {
        let _ = write!(out, "  cpu{core}");
    }
    out
}
