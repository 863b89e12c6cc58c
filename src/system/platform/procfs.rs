use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::CounterSource;
use crate::error::SourceError;

pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Counter source backed by a procfs mount (or a tree laid out like one).
#[derive(Clone, Debug)]
pub struct ProcFs {
    root: PathBuf,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn read_into(path: &Path, buf: &mut String) -> io::Result<()> {
    buf.clear();
    File::open(path)?.read_to_string(buf)?;
    Ok(())
}

impl CounterSource for ProcFs {
    fn read_cpu_counters(&self, buf: &mut String) -> Result<(), SourceError> {
        let path = self.root.join("stat");
        read_into(&path, buf).map_err(|e| SourceError::unavailable(path, e))
    }

    fn process_ids(&self, out: &mut Vec<u32>) -> Result<(), SourceError> {
        out.clear();
        let entries =
            fs::read_dir(&self.root).map_err(|e| SourceError::unavailable(&self.root, e))?;
        // Entries can vanish mid-listing; only numeric names are processes.
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if let Ok(pid) = name.parse::<u32>() {
                out.push(pid);
            }
        }
        Ok(())
    }

    fn read_process_stat(&self, pid: u32, buf: &mut String) -> io::Result<()> {
        read_into(&self.root.join(pid.to_string()).join("stat"), buf)
    }
}
