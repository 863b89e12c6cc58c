use serde::Serialize;

use super::tokenizer::FieldCursor;
use crate::error::ParseFailure;

/// Fields an aggregate or per-core line must carry. Older kernels stop at
/// idle; everything after it defaults to zero.
pub const MIN_COUNTER_FIELDS: usize = 4;

/// Cumulative ticks spent in each CPU state since boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CounterRecord {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CounterRecord {
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
            + self.guest
            + self.guest_nice
    }

    /// Ticks spent doing work: everything except idle and iowait.
    pub fn load(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.irq
            + self.softirq
            + self.steal
            + self.guest
            + self.guest_nice
    }

    fn fields_mut(&mut self) -> [&mut u64; 10] {
        [
            &mut self.user,
            &mut self.nice,
            &mut self.system,
            &mut self.idle,
            &mut self.iowait,
            &mut self.irq,
            &mut self.softirq,
            &mut self.steal,
            &mut self.guest,
            &mut self.guest_nice,
        ]
    }
}

/// Which `cpu*` line is being parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterLine {
    Aggregate,
    Core,
}

impl CounterLine {
    fn accepts(self, label: &str) -> bool {
        match self {
            CounterLine::Aggregate => label == "cpu",
            CounterLine::Core => label
                .strip_prefix("cpu")
                .is_some_and(|idx| !idx.is_empty() && idx.bytes().all(|b| b.is_ascii_digit())),
        }
    }
}

/// Parses one `cpu`/`cpuN` line of the stat feed.
pub fn parse_counter_line(line: &str, kind: CounterLine) -> Result<CounterRecord, ParseFailure> {
    let line = line.trim_start();
    let (label, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    if !kind.accepts(label) {
        return Err(ParseFailure::UnexpectedLabel(label.to_string()));
    }

    let mut record = CounterRecord::default();
    let mut cursor = FieldCursor::new(rest);
    for field in record.fields_mut() {
        match cursor.next_parsed::<u64>() {
            Some(value) => *field = value,
            None => break,
        }
    }

    if cursor.bound() < MIN_COUNTER_FIELDS {
        return Err(ParseFailure::TooFewFields {
            bound: cursor.bound(),
            required: MIN_COUNTER_FIELDS,
        });
    }
    Ok(record)
}
