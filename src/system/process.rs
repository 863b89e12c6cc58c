use serde::Serialize;

use super::tokenizer::FieldCursor;
use crate::error::ParseFailure;
use crate::format::truncate_width;

/// Display columns kept from a command name.
pub const COMM_MAX_WIDTH: usize = 15;

/// state, utime, stime, cutime, cstime, priority, nice.
const REQUIRED_STAT_FIELDS: usize = 7;
/// ppid pgrp session tty_nr tpgid
const IGNORED_SIGNED_FIELDS: usize = 5;
/// flags minflt cminflt majflt cmajflt
const IGNORED_UNSIGNED_FIELDS: usize = 5;

/// One process's scheduling counters at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub comm: String,
    pub state: char,
    pub utime: u64,
    pub stime: u64,
    pub cutime: u64,
    pub cstime: u64,
    pub priority: i64,
    pub nice: i64,
}

impl ProcessSample {
    /// Cumulative ticks the ranker diffs: own user plus own system time.
    pub fn load_basis(&self) -> u64 {
        self.utime + self.stime
    }
}

/// Parses a `<pid>/stat` line. `pid` comes from the directory name.
pub fn parse_process_stat(pid: u32, line: &str) -> Result<ProcessSample, ParseFailure> {
    let open = line.find('(').ok_or(ParseFailure::MissingCommand)?;
    let close = line.rfind(')').ok_or(ParseFailure::MissingCommand)?;
    if close < open {
        return Err(ParseFailure::MissingCommand);
    }
    let comm = truncate_width(&line[open + 1..close], COMM_MAX_WIDTH);

    let mut cursor = FieldCursor::new(&line[close + 1..]);
    let too_few = |bound: usize| ParseFailure::TooFewFields {
        bound,
        required: REQUIRED_STAT_FIELDS,
    };

    // Count only the seven fields we keep; the ignored ones still have to
    // parse for binding to continue.
    let mut kept = 0;
    let state = cursor.next_char().ok_or(too_few(kept))?;
    kept += 1;
    if !cursor.skip_parsed::<i64>(IGNORED_SIGNED_FIELDS)
        || !cursor.skip_parsed::<u64>(IGNORED_UNSIGNED_FIELDS)
    {
        return Err(too_few(kept));
    }

    let mut times = [0u64; 4];
    for slot in &mut times {
        *slot = cursor.next_parsed().ok_or(too_few(kept))?;
        kept += 1;
    }
    let priority = cursor.next_parsed().ok_or(too_few(kept))?;
    kept += 1;
    let nice = cursor.next_parsed().ok_or(too_few(kept))?;

    let [utime, stime, cutime, cstime] = times;
    Ok(ProcessSample {
        pid,
        comm,
        state,
        utime,
        stime,
        cutime,
        cstime,
        priority,
        nice,
    })
}
