// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// spell-checker:ignore (kernel) kinfo eproc ucred pcred ustart starttime comm

//! Fixed-size `kinfo_proc` record decoding.
//!
//! Each supported kernel gets its own [`RecordLayout`] with the byte offsets
//! of the handful of fields we read. The layouts are plain constants, so all
//! of them are compiled (and tested) everywhere; the one matching the build
//! target is exported as [`NativeLayout`](crate::platform::NativeLayout).

use crate::cursor::{cstr_at, int_at, u32_at};

/// Position of one field inside a kernel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub width: usize,
}

impl Field {
    pub const fn new(offset: usize, width: usize) -> Self {
        Self { offset, width }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// Byte layout of a kernel process record.
///
/// Integers are stored in the target's native byte order. `PID`, `PPID`,
/// `UID` and `GROUP0` are 32 bits wide; the start time halves are 4 or 8
/// bytes depending on the kernel's `timeval`.
pub trait RecordLayout {
    /// Kernel family, for diagnostics.
    const NAME: &'static str;
    /// `sizeof(struct kinfo_proc)`
    const RECORD_SIZE: usize;
    const PID: Field;
    const PPID: Field;
    /// Effective user id inside the credentials block.
    const UID: Field;
    /// Index 0 of the credentials group array.
    const GROUP0: Field;
    /// Scheduler command name (`MAXCOMLEN + 1` bytes or similar).
    const COMM: Field;
    const START_SEC: Field;
    const START_USEC: Field;
}

/// Apple `struct kinfo_proc` (LP64): `extern_proc` followed by `eproc`.
#[derive(Debug, Clone, Copy)]
pub struct DarwinLayout;

impl RecordLayout for DarwinLayout {
    const NAME: &'static str = "darwin";
    const RECORD_SIZE: usize = 648;
    // kp_proc.p_un.p_starttime
    const START_SEC: Field = Field::new(0, 8);
    const START_USEC: Field = Field::new(8, 4);
    const PID: Field = Field::new(40, 4);
    const COMM: Field = Field::new(243, 17);
    // kp_eproc.e_ucred, kp_eproc starts at 296
    const UID: Field = Field::new(420, 4);
    const GROUP0: Field = Field::new(428, 4);
    const PPID: Field = Field::new(560, 4);
}

/// FreeBSD `struct kinfo_proc` (LP64, `KINFO_PROC_SIZE` 1088).
#[derive(Debug, Clone, Copy)]
pub struct FreeBsdLayout;

impl RecordLayout for FreeBsdLayout {
    const NAME: &'static str = "freebsd";
    const RECORD_SIZE: usize = 1088;
    const PID: Field = Field::new(72, 4);
    const PPID: Field = Field::new(76, 4);
    const UID: Field = Field::new(168, 4);
    const GROUP0: Field = Field::new(192, 4);
    const START_SEC: Field = Field::new(336, 8);
    const START_USEC: Field = Field::new(344, 8);
    const COMM: Field = Field::new(447, 20);
}

/// DragonFly `struct kinfo_proc` (x86_64). Process fields come first,
/// followed by the credential and id blocks; the embedded `kinfo_lwp` and
/// spare words make up the tail.
#[derive(Debug, Clone, Copy)]
pub struct DragonFlyLayout;

impl RecordLayout for DragonFlyLayout {
    const NAME: &'static str = "dragonfly";
    const RECORD_SIZE: usize = 1048;
    // kp_start, a `timeval` with a `long` microseconds half
    const START_SEC: Field = Field::new(96, 8);
    const START_USEC: Field = Field::new(104, 8);
    const COMM: Field = Field::new(112, 17);
    const UID: Field = Field::new(132, 4);
    // kp_groups follows the `short` kp_ngroups
    const GROUP0: Field = Field::new(140, 4);
    const PID: Field = Field::new(220, 4);
    const PPID: Field = Field::new(224, 4);
}

/// OpenBSD `struct kinfo_proc`. Every member has a fixed width, so the
/// layout is the same on all architectures.
#[derive(Debug, Clone, Copy)]
pub struct OpenBsdLayout;

impl RecordLayout for OpenBsdLayout {
    const NAME: &'static str = "openbsd";
    const RECORD_SIZE: usize = 644;
    const PID: Field = Field::new(108, 4);
    const PPID: Field = Field::new(112, 4);
    const UID: Field = Field::new(128, 4);
    const GROUP0: Field = Field::new(144, 4);
    const COMM: Field = Field::new(312, 24);
    // p_ustart_sec / p_ustart_usec
    const START_SEC: Field = Field::new(408, 8);
    const START_USEC: Field = Field::new(416, 4);
}

/// Primitive fields of one decoded record, before the argument buffer is
/// merged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub pid: i32,
    pub ppid: i32,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub command: String,
    pub start_sec: i64,
    pub start_usec: i64,
}

/// Decode one record laid out as `L`.
///
/// The caller hands in exactly one record; slicing and length validation
/// belong to the facade. Reads never go out of bounds: a field the slice
/// does not cover decodes as zero (ids as `None`).
pub fn decode_record<L: RecordLayout>(record: &[u8]) -> RecordFields {
    let int = |field: Field| int_at(record, field.offset, field.width).unwrap_or(0);
    let pid = int(L::PID) as i32;
    let ppid = int(L::PPID) as i32;

    let fields = RecordFields {
        pid,
        ppid,
        uid: u32_at(record, L::UID.offset),
        gid: u32_at(record, L::GROUP0.offset),
        command: cstr_at(record, L::COMM.offset, L::COMM.width).unwrap_or_default(),
        start_sec: int(L::START_SEC),
        start_usec: int(L::START_USEC),
    };
    log::trace!("decoded {} record for PID {}", L::NAME, fields.pid);
    fields
}

/// Test helper that writes field values at a layout's offsets.
#[cfg(test)]
pub(crate) struct RecordBuilder<L> {
    buf: Vec<u8>,
    _layout: std::marker::PhantomData<L>,
}

#[cfg(test)]
impl<L: RecordLayout> RecordBuilder<L> {
    pub(crate) fn new() -> Self {
        Self {
            buf: vec![0; L::RECORD_SIZE],
            _layout: std::marker::PhantomData,
        }
    }

    fn put_int(&mut self, field: Field, value: i64) {
        let range = field.offset..field.end();
        match field.width {
            4 => self.buf[range].copy_from_slice(&(value as i32).to_ne_bytes()),
            8 => self.buf[range].copy_from_slice(&value.to_ne_bytes()),
            width => panic!("unsupported integer width {width}"),
        }
    }

    pub(crate) fn pid(mut self, pid: i32) -> Self {
        self.put_int(L::PID, pid.into());
        self
    }

    pub(crate) fn ppid(mut self, ppid: i32) -> Self {
        self.put_int(L::PPID, ppid.into());
        self
    }

    pub(crate) fn uid(mut self, uid: u32) -> Self {
        self.buf[L::UID.offset..L::UID.end()].copy_from_slice(&uid.to_ne_bytes());
        self
    }

    pub(crate) fn gid(mut self, gid: u32) -> Self {
        self.buf[L::GROUP0.offset..L::GROUP0.end()].copy_from_slice(&gid.to_ne_bytes());
        self
    }

    pub(crate) fn command(mut self, command: &[u8]) -> Self {
        let field = &mut self.buf[L::COMM.offset..L::COMM.end()];
        field.fill(0);
        field[..command.len()].copy_from_slice(command);
        self
    }

    pub(crate) fn start(mut self, sec: i64, usec: i64) -> Self {
        self.put_int(L::START_SEC, sec);
        self.put_int(L::START_USEC, usec);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.buf
    }
}
