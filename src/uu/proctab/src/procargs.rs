// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// spell-checker:ignore (kernel) procargs argc argv envp applev osrelease getproclline

//! `KERN_PROCARGS2` decoding.
//!
//! The buffer is a C `int` holding `argc`, followed by the string area: the
//! NUL-terminated executable path, alignment padding made of extra NULs,
//! then `argv`, `envp` and the Apple-specific strings, each NUL-terminated.
//! Only the path and `argv` are of interest here. See `getproclline()` in
//! `adv_cmds/ps/print.c`.

use crate::cursor::ByteCursor;

/// Last Darwin major release whose `KERN_PROCARGS2` output we do not decode.
///
/// 19.x is macOS 10.15 (Catalina); earlier kernels lay the buffer out
/// differently.
pub const LAST_UNSUPPORTED_DARWIN_RELEASE: u32 = 19;

/// Whether the argument buffer of a kernel reporting `kernel_version` can be
/// decoded. `0` means the version is unknown and is treated as unsupported.
pub fn argument_buffer_supported(kernel_version: u32) -> bool {
    kernel_version > LAST_UNSUPPORTED_DARWIN_RELEASE
}

/// Major version from a `kern.osrelease` string such as `"23.4.0"`: the
/// leading decimal digits, or `0` when there are none.
pub fn parse_kernel_release(release: &str) -> u32 {
    release
        .bytes()
        .take_while(u8::is_ascii_digit)
        .try_fold(0u32, |acc, digit| {
            acc.checked_mul(10)?.checked_add(u32::from(digit - b'0'))
        })
        .unwrap_or(0)
}

/// Extract the executable path and `argv` from a raw argument buffer.
///
/// Never fails: a buffer that is too short or inconsistent degrades to an
/// empty path and argument list, and a buffer that runs out before `argc`
/// strings have been read yields the arguments recovered so far.
pub fn parse_argument_buffer(buf: &[u8]) -> (String, Vec<String>) {
    let mut cursor = ByteCursor::new(buf);

    let argc = match cursor.read_i32_le() {
        Some(argc) if argc >= 1 => argc,
        _ => return (String::new(), Vec::new()),
    };

    let Some(exe) = cursor.read_cstr().map(lossy) else {
        return (String::new(), Vec::new());
    };
    if argc == 1 {
        return (exe.clone(), vec![exe]);
    }

    cursor.skip_nuls();

    let argc = argc as usize;
    let mut args = Vec::new();
    while args.len() < argc && !cursor.is_empty() {
        match cursor.read_cstr() {
            Some(arg) => args.push(lossy(arg)),
            None => break,
        }
    }
    (exe, args)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
