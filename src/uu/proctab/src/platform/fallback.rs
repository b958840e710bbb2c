// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::record::DarwinLayout;
use crate::table::KernelQuery;
use std::io;

/// Any layout will do: no records are ever returned.
pub type NativeLayout = DarwinLayout;

/// Kernels without a binary `kinfo_proc` interface (text `/proc` systems,
/// Windows, ...). Every query fails and surfaces as
/// [`ProcessError::QueryFailed`](crate::ProcessError::QueryFailed).
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeQuery;

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!(
            "process table queries are not supported on {}",
            std::env::consts::OS
        ),
    )
}

impl KernelQuery for NativeQuery {
    fn all_process_records(&self) -> io::Result<Vec<u8>> {
        Err(unsupported())
    }

    fn process_record(&self, _pid: i32) -> io::Result<Vec<u8>> {
        Err(unsupported())
    }

    fn process_argument_buffer(&self, _pid: i32) -> io::Result<Vec<u8>> {
        Err(unsupported())
    }

    fn kernel_version(&self) -> u32 {
        0
    }
}
