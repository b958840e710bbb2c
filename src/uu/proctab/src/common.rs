// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::io;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::record::RecordFields;

/// Errors that can occur when reading the process table
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The kernel query itself failed (permission, resource limits, unsupported platform)
    #[error("failed to {context}: {source}")]
    QueryFailed {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Process with given PID does not exist
    #[error("no process found with PID {0}")]
    NotFound(i32),

    /// The requested PID is unusable, or the kernel answered for another process
    #[error("invalid PID {pid}: {reason}")]
    InvalidArgument { pid: i32, reason: String },

    /// A record buffer whose length does not slice into whole records
    #[error("malformed process buffer: length {len} is not a multiple of record size {record_size}")]
    MalformedBuffer { len: usize, record_size: usize },
}

impl ProcessError {
    pub(crate) fn query_failed(context: impl Into<String>, source: io::Error) -> Self {
        Self::QueryFailed {
            context: context.into(),
            source,
        }
    }
}

/// One entry of a process table snapshot.
///
/// A `Process` is an immutable value: it is built once from a decoded kernel
/// record plus the (optional) argument buffer and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: i32,
    ppid: i32,
    uid: Option<u32>,
    gid: Option<u32>,
    command: String,
    executable_path: String,
    executable_args: Vec<String>,
    creation_time: DateTime<Utc>,
}

impl Process {
    /// Build a process from its decoded record fields and the executable
    /// path and arguments recovered from the argument buffer (empty when the
    /// platform does not expose one).
    pub fn from_parts(
        fields: RecordFields,
        executable_path: String,
        executable_args: Vec<String>,
    ) -> Self {
        Self {
            pid: fields.pid,
            ppid: fields.ppid,
            uid: fields.uid,
            gid: fields.gid,
            creation_time: creation_time(fields.start_sec, fields.start_usec),
            command: fields.command,
            executable_path,
            executable_args,
        }
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    /// Parent PID, `0` for a process without a parent.
    pub fn ppid(&self) -> i32 {
        self.ppid
    }

    /// Owning user, `None` when the kernel did not report one.
    pub fn uid(&self) -> Option<u32> {
        self.uid
    }

    /// First entry of the kernel's group list, `None` when unavailable.
    pub fn gid(&self) -> Option<u32> {
        self.gid
    }

    /// Short scheduler name, truncated by the kernel.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Resolved executable path, empty if the kernel does not expose it.
    pub fn executable_path(&self) -> &str {
        &self.executable_path
    }

    /// `argv` as passed at exec time, empty under the same conditions as
    /// [`Process::executable_path`].
    pub fn executable_args(&self) -> &[String] {
        &self.executable_args
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }
}

/// `epoch + sec + usec`, clamped to the epoch when the kernel value is out of range.
pub(crate) fn creation_time(sec: i64, usec: i64) -> DateTime<Utc> {
    TimeDelta::try_seconds(sec)
        .and_then(|delta| delta.checked_add(&TimeDelta::microseconds(usec)))
        .and_then(|delta| DateTime::<Utc>::UNIX_EPOCH.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
