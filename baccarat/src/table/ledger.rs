//! Per-user wager balances, one file per user.
//!
//! Reads and writes aren't synchronized across sessions. Two sessions
//! logged in as the same user can interleave a `get` and a `set` and lose
//! an update.

use log::{error, warn};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::errors::LedgerError;
use crate::game::entities::{Chips, Username};

pub const RECORD_EXTENSION: &str = "db";

#[derive(Clone, Debug)]
pub struct Ledger {
    dir: PathBuf,
}

impl Ledger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn record_path(&self, username: &Username) -> PathBuf {
        self.dir
            .join(format!("{}.{RECORD_EXTENSION}", username.as_str()))
    }

    /// Read the balance on record for `username`.
    pub fn get(&self, username: &Username) -> Result<Chips, LedgerError> {
        let path = self.record_path(username);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LedgerError::NotFound(username.to_string()));
            }
            Err(source) => return Err(LedgerError::Io { path, source }),
        };
        let parsed: Result<Chips, _> = content.trim().parse();
        parsed.map_err(|_| LedgerError::Corrupt { path, content })
    }

    /// Overwrite the balance on record for `username`.
    pub fn set(&self, username: &Username, balance: Chips) -> Result<(), LedgerError> {
        let path = self.record_path(username);
        fs::write(&path, balance.to_string()).map_err(|source| LedgerError::Io { path, source })
    }

    /// Balance on record, treating any failure as zero.
    ///
    /// A missing record is expected for users who never logged in and is
    /// only a warning; anything else is a storage failure and logged as an
    /// error.
    #[must_use]
    pub fn balance_or_zero(&self, username: &Username) -> Chips {
        match self.get(username) {
            Ok(balance) => balance,
            Err(e) if e.is_not_found() => {
                warn!("{e}, treating as 0");
                0
            }
            Err(e) => {
                error!("Failed to read balance: {e}, treating as 0");
                0
            }
        }
    }
}
