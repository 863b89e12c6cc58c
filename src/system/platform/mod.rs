use std::io;

use sysinfo::{CpuRefreshKind, RefreshKind, System};

use crate::error::SourceError;

mod procfs;

pub use procfs::{DEFAULT_PROC_ROOT, ProcFs};

/// Where counter text comes from. Each call re-reads the underlying feed.
pub trait CounterSource {
    /// Replaces `buf` with the system/per-core counter feed.
    fn read_cpu_counters(&self, buf: &mut String) -> Result<(), SourceError>;

    /// Replaces `out` with the ids of currently live processes, unordered.
    fn process_ids(&self, out: &mut Vec<u32>) -> Result<(), SourceError>;

    /// Replaces `buf` with one process's stat record. Failure here only
    /// drops that process.
    fn read_process_stat(&self, pid: u32, buf: &mut String) -> io::Result<()>;
}

/// Number of online logical CPUs, at least 1.
pub fn online_core_count() -> usize {
    let sys =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
    sys.cpus().len().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_count_is_never_zero() {
        assert!(online_core_count() >= 1);
    }
}
