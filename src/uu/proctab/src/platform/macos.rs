// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// spell-checker:ignore (kernel) procargs osrelease

use crate::platform::helpers::{sysctl_raw, sysctl_string, CTL_KERN, KERN_OSRELEASE};
use crate::procargs::parse_kernel_release;
use crate::record::DarwinLayout;
use crate::table::KernelQuery;
use libc::c_int;
use std::io;

// macOS sysctl constants
const KERN_PROC: c_int = 14;
const KERN_PROC_ALL: c_int = 0;
const KERN_PROC_PID: c_int = 1;
const KERN_PROCARGS2: c_int = 49;

pub type NativeLayout = DarwinLayout;

/// `sysctl(3)` access to the XNU process table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeQuery;

impl KernelQuery for NativeQuery {
    fn all_process_records(&self) -> io::Result<Vec<u8>> {
        sysctl_raw(&[CTL_KERN, KERN_PROC, KERN_PROC_ALL])
    }

    fn process_record(&self, pid: i32) -> io::Result<Vec<u8>> {
        sysctl_raw(&[CTL_KERN, KERN_PROC, KERN_PROC_PID, pid])
    }

    fn process_argument_buffer(&self, pid: i32) -> io::Result<Vec<u8>> {
        sysctl_raw(&[CTL_KERN, KERN_PROCARGS2, pid])
    }

    fn kernel_version(&self) -> u32 {
        match sysctl_string(&[CTL_KERN, KERN_OSRELEASE]) {
            Ok(release) => parse_kernel_release(&release),
            Err(err) => {
                log::debug!("kern.osrelease unavailable: {err}");
                0
            }
        }
    }

    fn exposes_argument_buffer(&self) -> bool {
        true
    }
}
