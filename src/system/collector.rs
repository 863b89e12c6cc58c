use super::counters::{CounterLine, parse_counter_line};
use super::platform::CounterSource;
use super::process::{ProcessSample, parse_process_stat};
use super::snapshot::Snapshot;
use crate::error::{ParseFailure, ProcessReadSkipped, SourceError};

/// What a collector samples on each read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleScope {
    pub core_count: usize,
    pub cores: bool,
    pub processes: bool,
}

/// Snapshot reader: turns counter source text into a [`Snapshot`].
pub struct Collector<S> {
    source: S,
    scope: SampleScope,
    text: String,
    process_text: String,
    pids: Vec<u32>,
}

impl<S: CounterSource> Collector<S> {
    pub fn new(source: S, scope: SampleScope) -> Self {
        Collector {
            source,
            scope,
            text: String::new(),
            process_text: String::new(),
            pids: Vec::new(),
        }
    }

    pub fn scope(&self) -> SampleScope {
        self.scope
    }

    /// Whether per-core lines are read at all. Single-core machines only
    /// carry the aggregate line.
    pub fn reads_cores(&self) -> bool {
        self.scope.cores && self.scope.core_count > 1
    }

    /// Refills `snapshot` in place. Any error leaves it partially written and
    /// must end the run.
    pub fn read_into(&mut self, snapshot: &mut Snapshot) -> Result<(), SourceError> {
        let _read_span = tracing::debug_span!("collector.read").entered();

        self.read_counters(snapshot)?;

        if self.scope.processes {
            let processes = snapshot.processes.get_or_insert_with(Vec::new);
            self.read_processes(processes)?;
        } else {
            snapshot.processes = None;
        }
        Ok(())
    }

    fn read_counters(&mut self, snapshot: &mut Snapshot) -> Result<(), SourceError> {
        self.source.read_cpu_counters(&mut self.text)?;
        let mut lines = self.text.lines();

        let first = lines
            .next()
            .ok_or_else(|| SourceError::malformed("cpu", ParseFailure::MissingLine))?;
        snapshot.aggregate = parse_counter_line(first, CounterLine::Aggregate)
            .map_err(|reason| SourceError::malformed("cpu", reason))?;

        snapshot.cores.clear();
        if !self.reads_cores() {
            return Ok(());
        }
        for index in 0..self.scope.core_count {
            let record = lines
                .next()
                .ok_or(ParseFailure::MissingLine)
                .and_then(|line| parse_counter_line(line, CounterLine::Core))
                .map_err(|reason| SourceError::malformed(format!("cpu{index}"), reason))?;
            snapshot.cores.push(record);
        }
        Ok(())
    }

    fn read_processes(&mut self, out: &mut Vec<ProcessSample>) -> Result<(), SourceError> {
        out.clear();
        self.source.process_ids(&mut self.pids)?;

        for &pid in &self.pids {
            match read_process(&self.source, pid, &mut self.process_text) {
                Ok(sample) => out.push(sample),
                Err(skipped) => tracing::trace!(pid, %skipped, "process skipped"),
            }
        }

        out.sort_unstable_by_key(|p| p.pid);
        tracing::debug!(
            listed = self.pids.len(),
            sampled = out.len(),
            "process list read"
        );
        Ok(())
    }
}

fn read_process<S: CounterSource>(
    source: &S,
    pid: u32,
    buf: &mut String,
) -> Result<ProcessSample, ProcessReadSkipped> {
    source.read_process_stat(pid, buf)?;
    let line = buf.lines().next().unwrap_or_default();
    Ok(parse_process_stat(pid, line)?)
}
