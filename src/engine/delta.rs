use crate::system::counters::CounterRecord;

/// `after - before`, or 0 when the counter went backwards (core hot-unplug,
/// source restart). Under-reports for exactly one cycle after a reset.
pub fn clamped_diff(before: u64, after: u64) -> u64 {
    if after < before { 0 } else { after - before }
}

/// Field-wise, non-negative difference between two counter records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Delta {
    counters: CounterRecord,
    reset: bool,
}

impl Delta {
    pub fn between(before: &CounterRecord, after: &CounterRecord) -> Self {
        let mut reset = false;
        let mut diff = |b: u64, a: u64| {
            reset |= a < b;
            clamped_diff(b, a)
        };
        let counters = CounterRecord {
            user: diff(before.user, after.user),
            nice: diff(before.nice, after.nice),
            system: diff(before.system, after.system),
            idle: diff(before.idle, after.idle),
            iowait: diff(before.iowait, after.iowait),
            irq: diff(before.irq, after.irq),
            softirq: diff(before.softirq, after.softirq),
            steal: diff(before.steal, after.steal),
            guest: diff(before.guest, after.guest),
            guest_nice: diff(before.guest_nice, after.guest_nice),
        };
        Delta { counters, reset }
    }

    pub fn counters(&self) -> &CounterRecord {
        &self.counters
    }

    /// True if at least one field was clamped to zero.
    pub fn was_reset(&self) -> bool {
        self.reset
    }

    pub fn total(&self) -> u64 {
        self.counters.total()
    }

    pub fn load(&self) -> u64 {
        self.counters.load()
    }
}
