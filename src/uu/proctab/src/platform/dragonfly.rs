// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::platform::helpers::{sysctl_raw, sysctl_string, CTL_KERN, KERN_OSRELEASE};
use crate::procargs::parse_kernel_release;
use crate::record::DragonFlyLayout;
use crate::table::KernelQuery;
use libc::c_int;
use std::io;

// DragonFly sysctl constants. Without `KERN_PROC_FLAG_LWP` the kernel
// reports one record per process.
const KERN_PROC: c_int = 14;
const KERN_PROC_ALL: c_int = 0;
const KERN_PROC_PID: c_int = 1;

pub type NativeLayout = DragonFlyLayout;

fn all_processes_mib() -> [c_int; 3] {
    [CTL_KERN, KERN_PROC, KERN_PROC_ALL]
}

fn process_mib(pid: i32) -> [c_int; 4] {
    [CTL_KERN, KERN_PROC, KERN_PROC_PID, pid]
}

/// `sysctl(3)` access to the DragonFly process table. Like FreeBSD, there
/// is no argument buffer to decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeQuery;

impl KernelQuery for NativeQuery {
    fn all_process_records(&self) -> io::Result<Vec<u8>> {
        sysctl_raw(&all_processes_mib())
    }

    fn process_record(&self, pid: i32) -> io::Result<Vec<u8>> {
        sysctl_raw(&process_mib(pid))
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
