//! Rolling record of hand outcomes shared by the whole table.

use log::{error, info};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use super::errors::HistoryError;
use crate::game::entities::Winner;

/// Outcomes from every session interleave into one buffer. Once the buffer
/// holds `batch_size` outcomes it's appended to the log as a single
/// comma-joined line and cleared.
#[derive(Debug)]
pub struct GameHistory {
    buffer: Mutex<Vec<Winner>>,
    log_path: PathBuf,
    batch_size: usize,
    flushed_lines: AtomicUsize,
}

impl GameHistory {
    /// Start a fresh history, truncating any log left by a previous run.
    pub fn create(log_path: impl Into<PathBuf>, batch_size: usize) -> Result<Self, HistoryError> {
        let log_path = log_path.into();
        fs::File::create(&log_path).map_err(|source| HistoryError::Io {
            path: log_path.clone(),
            source,
        })?;
        Ok(Self {
            buffer: Mutex::new(Vec::with_capacity(batch_size)),
            log_path,
            batch_size,
            flushed_lines: AtomicUsize::new(0),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Winner>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Outcomes recorded since the last flush.
    #[must_use]
    pub fn pending(&self) -> Vec<Winner> {
        self.lock().clone()
    }

    /// Lines appended to the log since the history was created.
    #[must_use]
    pub fn flushed_lines(&self) -> usize {
        self.flushed_lines.load(Ordering::SeqCst)
    }

    /// Append `outcome`, flushing the batch if it's now full. Returns
    /// whether a flush happened.
    ///
    /// The append and the flush happen under one lock. The buffer is
    /// cleared even when the log write fails so its length keeps tracking
    /// the outcome count modulo the batch size.
    pub fn record(&self, outcome: Winner) -> Result<bool, HistoryError> {
        let mut buffer = self.lock();
        buffer.push(outcome);
        if buffer.len() < self.batch_size {
            return Ok(false);
        }

        let line = buffer
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        buffer.clear();

        match self.append_line(&line) {
            Ok(()) => {
                let count = self.flushed_lines.fetch_add(1, Ordering::SeqCst) + 1;
                info!("Flushed history batch #{count}: {line}");
                Ok(true)
            }
            Err(e) => {
                error!("Dropped history batch {line}: {e}");
                Err(e)
            }
        }
    }

    fn append_line(&self, line: &str) -> Result<(), HistoryError> {
        let io_error = |source| HistoryError::Io {
            path: self.log_path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.log_path)
            .map_err(io_error)?;
        writeln!(file, "{line}").map_err(io_error)
    }
}
