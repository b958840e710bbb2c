// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::platform::helpers::{sysctl_call, sysctl_string, CTL_KERN, KERN_OSRELEASE};
use crate::procargs::parse_kernel_release;
use crate::record::{OpenBsdLayout, RecordLayout};
use crate::table::KernelQuery;
use libc::{c_int, c_void};
use std::io;
use std::ptr;

// OpenBSD sysctl constants
const KERN_PROC: c_int = 66;
const KERN_PROC_ALL: c_int = 0;
const KERN_PROC_PID: c_int = 1;

pub type NativeLayout = OpenBsdLayout;

/// `sysctl(3)` access to the OpenBSD process table.
///
/// OpenBSD takes the record size and the number of records in the MIB, so
/// the kernel copies out exactly [`OpenBsdLayout::RECORD_SIZE`] bytes per
/// process regardless of how large its own structure has become.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeQuery;

impl NativeQuery {
    fn records(op: c_int, arg: c_int) -> io::Result<Vec<u8>> {
        let record_size = OpenBsdLayout::RECORD_SIZE as c_int;
        let mut mib = [CTL_KERN, KERN_PROC, op, arg, record_size, 0];

        let mut size: usize = 0;
        sysctl_call(&mib, ptr::null_mut(), &mut size)?;
        if size == 0 {
            return Ok(Vec::new());
        }

        size += size / 8;
        let count = size / OpenBsdLayout::RECORD_SIZE;
        mib[5] = c_int::try_from(count).unwrap_or(c_int::MAX);
        size = count * OpenBsdLayout::RECORD_SIZE;

        let mut buf = vec![0u8; size];
        sysctl_call(&mib, buf.as_mut_ptr() as *mut c_void, &mut size)?;
        buf.truncate(size);
        Ok(buf)
    }
}

impl KernelQuery for NativeQuery {
    fn all_process_records(&self) -> io::Result<Vec<u8>> {
        Self::records(KERN_PROC_ALL, 0)
    }

    fn process_record(&self, pid: i32) -> io::Result<Vec<u8>> {
        Self::records(KERN_PROC_PID, pid)
    }

    fn process_argument_buffer(&self, _pid: i32) -> io::Result<Vec<u8>> {
        Err(io::ErrorKind::Unsupported.into())
    }

    fn kernel_version(&self) -> u32 {
        sysctl_string(&[CTL_KERN, KERN_OSRELEASE])
            .map(|release| parse_kernel_release(&release))
            .unwrap_or(0)
    }
}
