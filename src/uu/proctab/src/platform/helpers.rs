// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// spell-checker:ignore (libc) oldp oldlenp newp ESRCH

use libc::{c_int, c_uint, c_void, sysctl};
use std::io;
use std::ptr;

// sysctl constants shared by the BSD family
pub const CTL_KERN: c_int = 1;
pub const KERN_OSRELEASE: c_int = 2;

/// Read a sysctl node into a freshly sized buffer.
///
/// The first call asks the kernel for the current size; the buffer gets a
/// little headroom because tables such as `kern.proc.all` can grow between
/// the two calls. The result is truncated to what the kernel actually wrote.
pub fn sysctl_raw(mib: &[c_int]) -> io::Result<Vec<u8>> {
    let mut size: usize = 0;

    // First call to get the size
    sysctl_call(mib, ptr::null_mut(), &mut size)?;
    if size == 0 {
        return Ok(Vec::new());
    }

    size += size / 8;
    let mut buf = vec![0u8; size];

    // Second call to get the data
    sysctl_call(mib, buf.as_mut_ptr() as *mut c_void, &mut size)?;
    buf.truncate(size);
    Ok(buf)
}

/// Read a string-valued sysctl node, stopping at the trailing NUL.
pub fn sysctl_string(mib: &[c_int]) -> io::Result<String> {
    let buf = sysctl_raw(mib)?;
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    Ok(String::from_utf8_lossy(&buf[..len]).into_owned())
}

pub fn sysctl_call(mib: &[c_int], oldp: *mut c_void, oldlenp: &mut usize) -> io::Result<()> {
    let ret = unsafe {
        sysctl(
            mib.as_ptr() as *mut c_int,
            mib.len() as c_uint,
            oldp,
            oldlenp,
            ptr::null_mut(),
            0,
        )
    };
    if ret == -1 {
        return Err(translate_errno(io::Error::last_os_error()));
    }
    Ok(())
}

/// `ESRCH` means the process is gone; surface it as `NotFound` so callers
/// do not need to know errno values.
fn translate_errno(err: io::Error) -> io::Error {
    if err.raw_os_error() == Some(libc::ESRCH) {
        io::Error::new(io::ErrorKind::NotFound, err)
    } else {
        err
    }
}
