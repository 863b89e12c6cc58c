use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single line of counter text could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("bound {bound} fields, at least {required} required")]
    TooFewFields { bound: usize, required: usize },

    #[error("line is missing")]
    MissingLine,

    #[error("unexpected label `{0}`")]
    UnexpectedLabel(String),

    #[error("command name is not enclosed in parentheses")]
    MissingCommand,
}

/// Fatal conditions raised while reading a snapshot. Either one ends the run.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("counter source {} is unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {record} record: {reason}")]
    MalformedRecord {
        record: String,
        #[source]
        reason: ParseFailure,
    },
}

impl SourceError {
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SourceError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(record: impl Into<String>, reason: ParseFailure) -> Self {
        SourceError::MalformedRecord {
            record: record.into(),
            reason,
        }
    }
}

/// A process that was dropped from the current snapshot. Never fatal.
#[derive(Debug, Error)]
pub enum ProcessReadSkipped {
    #[error("stat record unreadable: {0}")]
    Unreadable(#[from] io::Error),

    #[error("stat record malformed: {0}")]
    Malformed(#[from] ParseFailure),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure of one polling cycle. Always fatal.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),
}
