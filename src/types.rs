use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::DirhookError;

/// Kind of filesystem change the pipeline reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Create,
    Rename,
    Write,
    Remove,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Create => "create",
            EventKind::Rename => "rename",
            EventKind::Write => "write",
            EventKind::Remove => "remove",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw change reported by the notification source, normalized to an
/// absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    path: PathBuf,
    kind: EventKind,
}

impl FsEvent {
    pub fn new(path: impl AsRef<Path>, kind: EventKind) -> io::Result<Self> {
        Ok(Self {
            path: std::path::absolute(path)?,
            kind,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// Unit of work on the task queue: which file, and which change triggered it.
///
/// The path is always absolute; both constructors guarantee it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskDescriptor {
    path: PathBuf,
    kind: EventKind,
}

impl TaskDescriptor {
    pub fn new(path: impl AsRef<Path>, kind: EventKind) -> io::Result<Self> {
        Ok(Self {
            path: std::path::absolute(path)?,
            kind,
        })
    }

    /// Build a task straight from an already-normalized event.
    pub fn from_event(event: &FsEvent) -> Self {
        Self {
            path: event.path.clone(),
            kind: event.kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// What happens to a file after its command succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcessAction {
    DoNothing,
    Move,
    Delete,
}

impl TryFrom<i64> for PostProcessAction {
    type Error = DirhookError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PostProcessAction::DoNothing),
            1 => Ok(PostProcessAction::Move),
            -1 => Ok(PostProcessAction::Delete),
            other => Err(DirhookError::InvalidPostProcess(other)),
        }
    }
}
