// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::io;
use std::marker::PhantomData;

use crate::common::{Process, ProcessError};
use crate::procargs::{argument_buffer_supported, parse_argument_buffer};
use crate::record::{decode_record, RecordFields, RecordLayout};

/// Source of raw kernel data.
///
/// Implementations issue read-only kernel queries and hand back the bytes
/// untouched; all interpretation happens in the decoder and facade.
pub trait KernelQuery {
    /// Concatenation of one record per visible process.
    fn all_process_records(&self) -> io::Result<Vec<u8>>;

    /// Record of a single process. A buffer shorter than one record means
    /// the process does not exist.
    fn process_record(&self, pid: i32) -> io::Result<Vec<u8>>;

    /// Raw `KERN_PROCARGS2`-style buffer of a process.
    fn process_argument_buffer(&self, pid: i32) -> io::Result<Vec<u8>>;

    /// Major kernel release, `0` if it cannot be determined.
    fn kernel_version(&self) -> u32;

    /// Whether this kernel has argument buffers at all.
    fn exposes_argument_buffer(&self) -> bool {
        false
    }
}

/// Process table facade over a kernel query and a record layout.
///
/// Holds no state besides the query: every call re-reads the kernel.
#[derive(Debug, Clone)]
pub struct ProcessTable<Q, L> {
    query: Q,
    _layout: PhantomData<L>,
}

impl<Q: KernelQuery, L: RecordLayout> ProcessTable<Q, L> {
    pub fn new(query: Q) -> Self {
        Self {
            query,
            _layout: PhantomData,
        }
    }

    /// Snapshot of every visible process, in kernel order.
    ///
    /// # Errors
    ///
    /// [`ProcessError::QueryFailed`] if the kernel query fails and
    /// [`ProcessError::MalformedBuffer`] if the returned buffer does not
    /// split into whole records. No partial list is returned in either case.
    pub fn list_processes(&self) -> Result<Vec<Process>, ProcessError> {
        let buf = self
            .query
            .all_process_records()
            .map_err(|err| ProcessError::query_failed("list processes", err))?;

        if buf.len() % L::RECORD_SIZE != 0 {
            return Err(ProcessError::MalformedBuffer {
                len: buf.len(),
                record_size: L::RECORD_SIZE,
            });
        }

        let args_supported = self.argument_buffers_supported();
        let processes = buf
            .chunks_exact(L::RECORD_SIZE)
            .map(|record| self.assemble(decode_record::<L>(record), args_supported))
            .collect::<Vec<_>>();
        log::debug!(
            "listed {} processes from {} records",
            processes.len(),
            L::NAME
        );
        Ok(processes)
    }

    /// Look up a single process.
    ///
    /// # Errors
    ///
    /// - [`ProcessError::InvalidArgument`] for a non-positive PID, or when
    ///   the kernel answers with a record for a different PID
    /// - [`ProcessError::NotFound`] if no such process exists
    /// - [`ProcessError::QueryFailed`] for any other kernel failure
    pub fn find_process(&self, pid: i32) -> Result<Process, ProcessError> {
        if pid <= 0 {
            return Err(ProcessError::InvalidArgument {
                pid,
                reason: "PID must be positive".to_string(),
            });
        }

        let buf = self.query.process_record(pid).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ProcessError::NotFound(pid)
            } else {
                ProcessError::query_failed(format!("read process {pid}"), err)
            }
        })?;

        let Some(record) = buf.get(..L::RECORD_SIZE) else {
            return Err(ProcessError::NotFound(pid));
        };

        let fields = decode_record::<L>(record);
        if fields.pid != pid {
            return Err(ProcessError::InvalidArgument {
                pid,
                reason: format!("kernel returned a record for PID {}", fields.pid),
            });
        }

        Ok(self.assemble(fields, self.argument_buffers_supported()))
    }

    fn argument_buffers_supported(&self) -> bool {
        if !self.query.exposes_argument_buffer() {
            return false;
        }
        let version = self.query.kernel_version();
        let supported = argument_buffer_supported(version);
        if !supported {
            log::debug!("argument buffers not decoded on kernel release {version}");
        }
        supported
    }

    fn assemble(&self, fields: RecordFields, args_supported: bool) -> Process {
        let (path, args) = if args_supported {
            self.executable(fields.pid)
        } else {
            (String::new(), Vec::new())
        };
        Process::from_parts(fields, path, args)
    }

    fn executable(&self, pid: i32) -> (String, Vec<String>) {
        match self.query.process_argument_buffer(pid) {
            Ok(buf) => parse_argument_buffer(&buf),
            Err(err) => {
                log::debug!("no argument buffer for PID {pid}: {err}");
                (String::new(), Vec::new())
            }
        }
    }
}
