use std::time::Duration;

use crate::config::Config;
use crate::engine::DEFAULT_TOP_N;
use crate::error::{CycleError, SourceError};
use crate::report::build_report;
use crate::system::collector::{Collector, SampleScope};
use crate::system::platform::{CounterSource, ProcFs};
use crate::system::snapshot::SnapshotPair;
use crate::ui;

/// Time between two samples. Fixed.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(5);

/// How much each cycle reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Aggregate line only.
    Total,
    /// Aggregate line plus one percentage per core.
    Cores,
    /// Per-core line plus the top-N process table.
    #[default]
    Processes,
}

impl Mode {
    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "total" | "system" => Mode::Total,
            "cores" | "cpu" => Mode::Cores,
            _ => Mode::Processes,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Total => "total",
            Mode::Cores => "cores",
            Mode::Processes => "processes",
        }
    }

    pub fn samples_cores(self) -> bool {
        matches!(self, Mode::Cores | Mode::Processes)
    }

    pub fn samples_processes(self) -> bool {
        self == Mode::Processes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Resolved run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub mode: Mode,
    pub output: OutputFormat,
    pub top_n: usize,
    pub core_count: usize,
}

impl Settings {
    pub fn from_config(config: &Config, core_count: usize) -> Self {
        let top_n = if config.general.top_n == 0 {
            DEFAULT_TOP_N
        } else {
            config.general.top_n
        };
        Settings {
            mode: Mode::from_str_config(&config.general.mode),
            output: OutputFormat::from_str_config(&config.output.format),
            top_n,
            core_count: core_count.max(1),
        }
    }
}

/// Owns the collector and the snapshot double buffer for the polling loop.
pub struct App<S = ProcFs> {
    collector: Collector<S>,
    buffers: SnapshotPair,
    settings: Settings,
}

impl App<ProcFs> {
    pub fn from_config(config: &Config, core_count: usize) -> Self {
        let source = ProcFs::new(&config.general.proc_root);
        App::new(source, Settings::from_config(config, core_count))
    }
}

impl<S: CounterSource> App<S> {
    pub fn new(source: S, settings: Settings) -> Self {
        let scope = SampleScope {
            core_count: settings.core_count,
            cores: settings.mode.samples_cores(),
            processes: settings.mode.samples_processes(),
        };
        App {
            collector: Collector::new(source, scope),
            buffers: SnapshotPair::new(),
            settings,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Title printed once before the first report; none for JSON output.
    pub fn title(&self) -> Option<String> {
        if self.settings.output == OutputFormat::Json {
            return None;
        }
        let core_columns = if self.collector.reads_cores() {
            self.settings.core_count
        } else {
            0
        };
        Some(ui::header::title_line(core_columns))
    }

    /// Takes the baseline sample the first cycle is diffed against.
    pub fn prime(&mut self) -> Result<(), SourceError> {
        self.collector.read_into(self.buffers.before_mut())
    }

    /// Reads a new sample, renders the interval since the previous one and
    /// makes the new sample the next baseline.
    pub fn cycle(&mut self) -> Result<String, CycleError> {
        self.collector.read_into(self.buffers.after_mut())?;

        let (before, after) = self.buffers.pair();
        let report = build_report(before, after, self.settings.top_n);
        let rendered = match self.settings.output {
            OutputFormat::Text => ui::render_text(&report),
            OutputFormat::Json => {
                let mut line = ui::json::render(&report)?;
                line.push('\n');
                line
            }
        };

        self.buffers.swap();
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;

    use super::*;

    /// Serves a scripted sequence of stat feeds, one per read.
    struct ScriptedSource {
        feeds: RefCell<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(feeds: &[&str]) -> Self {
            let mut feeds: Vec<String> = feeds.iter().map(|s| s.to_string()).collect();
            feeds.reverse();
            Self {
                feeds: RefCell::new(feeds),
            }
        }
    }

    impl CounterSource for ScriptedSource {
        fn read_cpu_counters(&self, buf: &mut String) -> Result<(), SourceError> {
            let next = self.feeds.borrow_mut().pop().ok_or_else(|| {
                SourceError::unavailable("scripted", io::Error::other("script exhausted"))
            })?;
            buf.clear();
            buf.push_str(&next);
            Ok(())
        }

        fn process_ids(&self, out: &mut Vec<u32>) -> Result<(), SourceError> {
            out.clear();
            Ok(())
        }

        fn read_process_stat(&self, _pid: u32, _buf: &mut String) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn settings(mode: Mode, output: OutputFormat, core_count: usize) -> Settings {
        Settings {
            mode,
            output,
            top_n: DEFAULT_TOP_N,
            core_count,
        }
    }

    #[test]
    fn mode_from_config_strings() {
        assert_eq!(Mode::from_str_config("total"), Mode::Total);
        assert_eq!(Mode::from_str_config("CORES"), Mode::Cores);
        assert_eq!(Mode::from_str_config("processes"), Mode::Processes);
        assert_eq!(Mode::from_str_config("bogus"), Mode::Processes);
    }

    #[test]
    fn zero_top_n_falls_back_to_default() {
        let mut config = Config::default();
        config.general.top_n = 0;
        assert_eq!(Settings::from_config(&config, 4).top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn title_lists_cores_only_when_sampled() {
        let source = ScriptedSource::new(&[]);
        let app = App::new(source, settings(Mode::Cores, OutputFormat::Text, 2));
        assert!(app.title().unwrap().ends_with("  cpu0  cpu1"));

        let source = ScriptedSource::new(&[]);
        let app = App::new(source, settings(Mode::Total, OutputFormat::Text, 2));
        assert!(!app.title().unwrap().contains("cpu0"));

        let source = ScriptedSource::new(&[]);
        let app = App::new(source, settings(Mode::Cores, OutputFormat::Json, 2));
        assert!(app.title().is_none());
    }

    #[test]
    fn cycles_diff_against_previous_sample() {
        let source = ScriptedSource::new(&[
            "cpu 100 0 50 800 20 5 0 0 0 0\n",
            "cpu 120 0 60 820 20 5 0 0 0 0\n",
            "cpu 120 0 60 870 20 5 0 0 0 0\n",
        ]);
        let mut app = App::new(source, settings(Mode::Total, OutputFormat::Text, 1));
        app.prime().unwrap();

        let first = app.cycle().unwrap();
        assert!(first.starts_with(" 60.0% (T:  50"));

        let second = app.cycle().unwrap();
        assert!(second.starts_with("  0.0% (T:  50 I:  50"));

        assert!(matches!(app.cycle(), Err(CycleError::Source(_))));
    }

    #[test]
    fn json_cycle_is_one_line() {
        let source = ScriptedSource::new(&["cpu 1 0 1 8\n", "cpu 2 0 2 16\n"]);
        let mut app = App::new(source, settings(Mode::Total, OutputFormat::Json, 1));
        app.prime().unwrap();
        let line = app.cycle().unwrap();
        assert_eq!(line.lines().count(), 1);
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["summary"]["total"], 10);
    }
}
