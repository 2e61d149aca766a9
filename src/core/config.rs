//! Connection open options

use rusqlite::OpenFlags;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the backing store is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenMode {
    /// The file must already exist
    #[default]
    ReadWrite,
    /// The file is created if absent
    ReadWriteCreate,
}

/// Options applied when opening a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenOptions {
    /// Whether a missing file is created
    pub mode: OpenMode,
    /// How long the engine retries on a locked store
    pub busy_timeout: Option<Duration>,
    /// Enforce foreign key constraints
    pub foreign_keys: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            mode: OpenMode::ReadWrite,
            busy_timeout: None,
            foreign_keys: true,
        }
    }
}

impl OpenOptions {
    /// Create options for the given mode
    pub fn new(mode: OpenMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the busy timeout
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = Some(timeout);
        self
    }

    /// Enable or disable foreign key enforcement
    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Engine flags for these options.
    ///
    /// Read-write is always requested. The engine may still hand back a
    /// read-only handle, so the caller has to check after opening.
    pub fn flags(&self) -> OpenFlags {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match self.mode {
            OpenMode::ReadWrite => flags,
            OpenMode::ReadWriteCreate => flags | OpenFlags::SQLITE_OPEN_CREATE,
        }
    }
}
