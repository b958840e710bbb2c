// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! OS-independent view of the running process table
//!
//! This crate decodes the binary process records exposed by BSD-family
//! kernels (`kinfo_proc`) and, on macOS, the packed `KERN_PROCARGS2`
//! argument buffer, into a uniform [`Process`] value.
//!
//! # Example
//!
//! ```ignore
//! use uu_proctab::list_processes;
//!
//! for process in list_processes()? {
//!     println!("PID: {}, Command: {}", process.pid(), process.command());
//! }
//! ```

pub mod common;
pub mod cursor;
pub mod platform;
pub mod procargs;
pub mod record;
pub mod table;

// Re-export commonly used types and functions
pub use common::{Process, ProcessError};
pub use platform::{NativeLayout, NativeQuery};
pub use procargs::{argument_buffer_supported, parse_argument_buffer};
pub use record::{
    decode_record, DarwinLayout, DragonFlyLayout, Field, FreeBsdLayout, OpenBsdLayout,
    RecordFields, RecordLayout,
};
pub use table::{KernelQuery, ProcessTable};

/// Process table bound to the running kernel.
pub type NativeProcessTable = ProcessTable<NativeQuery, NativeLayout>;

impl NativeProcessTable {
    pub fn native() -> Self {
        Self::new(NativeQuery)
    }
}

/// Snapshot of every process visible to the caller. The order is
/// unspecified; sort by PID if a stable order is needed.
pub fn list_processes() -> Result<Vec<Process>, ProcessError> {
    NativeProcessTable::native().list_processes()
}

/// Look up the process with the given PID.
pub fn find_process(pid: i32) -> Result<Process, ProcessError> {
    NativeProcessTable::native().find_process(pid)
}
