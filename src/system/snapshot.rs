use super::counters::CounterRecord;
use super::process::ProcessSample;

/// One point-in-time read of the counter sources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub aggregate: CounterRecord,
    /// One entry per core, in the order the source lists them. Empty on
    /// single-core machines.
    pub cores: Vec<CounterRecord>,
    /// Sorted ascending by pid. `None` when processes are not sampled.
    pub processes: Option<Vec<ProcessSample>>,
}

/// The `before`/`after` double buffer driven by the polling loop.
///
/// Both snapshots are owned here and refilled in place, so their vectors keep
/// their capacity from one cycle to the next.
#[derive(Debug, Default)]
pub struct SnapshotPair {
    before: Snapshot,
    after: Snapshot,
}

impl SnapshotPair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before(&self) -> &Snapshot {
        &self.before
    }

    pub fn after(&self) -> &Snapshot {
        &self.after
    }

    pub fn before_mut(&mut self) -> &mut Snapshot {
        &mut self.before
    }

    pub fn after_mut(&mut self) -> &mut Snapshot {
        &mut self.after
    }

    pub fn pair(&self) -> (&Snapshot, &Snapshot) {
        (&self.before, &self.after)
    }

    /// Makes the latest sample the baseline for the next cycle.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.before, &mut self.after);
    }
}
