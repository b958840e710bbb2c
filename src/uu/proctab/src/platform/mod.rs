// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

#[cfg(not(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd"
)))]
mod fallback;
#[cfg(target_os = "dragonfly")]
mod dragonfly;
#[cfg(target_os = "freebsd")]
mod freebsd;
#[cfg(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd"
))]
mod helpers;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "openbsd")]
mod openbsd;

#[cfg(not(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd"
)))]
pub use fallback::{NativeLayout, NativeQuery};
#[cfg(target_os = "dragonfly")]
pub use dragonfly::{NativeLayout, NativeQuery};
#[cfg(target_os = "freebsd")]
pub use freebsd::{NativeLayout, NativeQuery};
#[cfg(target_os = "macos")]
pub use macos::{NativeLayout, NativeQuery};
#[cfg(target_os = "openbsd")]
pub use openbsd::{NativeLayout, NativeQuery};

/// Whether this build talks to a kernel with a binary process table.
pub const SUPPORTED: bool = cfg!(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd"
));
