// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// spell-checker:ignore (kernel) kinfo

use std::io;

use pretty_assertions::assert_eq;
use uuproctab::{
    find_process, list_processes, parse_argument_buffer, DarwinLayout, DragonFlyLayout,
    FreeBsdLayout, KernelQuery, OpenBsdLayout, ProcessError, ProcessTable, RecordLayout,
};

// ============================================================================
// Synthetic kernel
// ============================================================================

/// Kernel double serving fixed buffers.
struct StaticKernel {
    all: Vec<u8>,
    single: Option<Vec<u8>>,
    args: Vec<u8>,
    version: u32,
}

impl KernelQuery for StaticKernel {
    fn all_process_records(&self) -> io::Result<Vec<u8>> {
        Ok(self.all.clone())
    }

    fn process_record(&self, _pid: i32) -> io::Result<Vec<u8>> {
        self.single
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such process"))
    }

    fn process_argument_buffer(&self, _pid: i32) -> io::Result<Vec<u8>> {
        Ok(self.args.clone())
    }

    fn kernel_version(&self) -> u32 {
        self.version
    }

    fn exposes_argument_buffer(&self) -> bool {
        true
    }
}

fn record<L: RecordLayout>(pid: i32, ppid: i32, uid: u32, comm: &str) -> Vec<u8> {
    let mut buf = vec![0u8; L::RECORD_SIZE];
    let mut put = |offset: usize, bytes: &[u8]| {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    };
    put(L::PID.offset, &pid.to_ne_bytes());
    put(L::PPID.offset, &ppid.to_ne_bytes());
    put(L::UID.offset, &uid.to_ne_bytes());
    put(L::GROUP0.offset, &uid.to_ne_bytes());
    put(L::COMM.offset, comm.as_bytes());
    buf
}

fn procargs(argc: i32, body: &[u8]) -> Vec<u8> {
    let mut buf = argc.to_le_bytes().to_vec();
    buf.extend_from_slice(body);
    buf
}

fn kernel(records: &[Vec<u8>]) -> StaticKernel {
    StaticKernel {
        all: records.concat(),
        single: records.first().cloned(),
        args: procargs(2, b"/usr/sbin/sshd\0\0\0sshd\0-D\0"),
        version: 23,
    }
}

// ============================================================================
// Facade over synthetic buffers
// ============================================================================

#[test]
fn test_list_synthetic_table_per_layout() {
    fn check<L: RecordLayout>() {
        let records = [
            record::<L>(1, 0, 0, "init"),
            record::<L>(812, 1, 0, "sshd"),
            record::<L>(900, 812, 1000, "bash"),
        ];
        let table = ProcessTable::<_, L>::new(kernel(&records));
        let processes = table.list_processes().unwrap();

        let summary = processes
            .iter()
            .map(|p| (p.pid(), p.ppid(), p.uid(), p.command().to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                (1, 0, Some(0), "init".to_string()),
                (812, 1, Some(0), "sshd".to_string()),
                (900, 812, Some(1000), "bash".to_string()),
            ]
        );
        assert_eq!(processes[2].gid(), Some(1000));
        assert_eq!(processes[1].executable_path(), "/usr/sbin/sshd");
        assert_eq!(processes[1].executable_args(), ["sshd", "-D"]);
    }

    check::<DarwinLayout>();
    check::<FreeBsdLayout>();
    check::<DragonFlyLayout>();
    check::<OpenBsdLayout>();
}

#[test]
fn test_list_rejects_partial_record() {
    let mut all = record::<FreeBsdLayout>(1, 0, 0, "init");
    all.extend_from_slice(&record::<FreeBsdLayout>(2, 0, 0, "pagedaemon"));
    all.pop();

    let table = ProcessTable::<_, FreeBsdLayout>::new(StaticKernel {
        all,
        single: None,
        args: Vec::new(),
        version: 14,
    });
    let err = table.list_processes().unwrap_err();
    assert!(matches!(err, ProcessError::MalformedBuffer { .. }));
    assert!(err.to_string().contains("not a multiple of record size 1088"));
}

#[test]
fn test_find_synthetic_process() {
    let records = [record::<DarwinLayout>(812, 1, 0, "sshd")];
    let table = ProcessTable::<_, DarwinLayout>::new(kernel(&records));

    let process = table.find_process(812).unwrap();
    assert_eq!(process.pid(), 812);
    assert_eq!(process.executable_args(), ["sshd", "-D"]);

    let err = table.find_process(813).unwrap_err();
    assert!(matches!(
        err,
        ProcessError::InvalidArgument { pid: 813, .. }
    ));
}

#[test]
fn test_find_missing_synthetic_process() {
    let mut kernel = kernel(&[]);
    kernel.single = None;
    let table = ProcessTable::<_, DarwinLayout>::new(kernel);
    assert!(matches!(
        table.find_process(4),
        Err(ProcessError::NotFound(4))
    ));
}

// ============================================================================
// Argument buffer
// ============================================================================

#[test]
fn test_argument_buffer_scenario_ls() {
    let (path, args) = parse_argument_buffer(&procargs(3, b"/bin/ls\0\0/bin/ls\0-l\0-a\0"));
    assert_eq!(path, "/bin/ls");
    assert_eq!(args, ["/bin/ls", "-l", "-a"]);
}

#[test]
fn test_argument_buffer_truncated() {
    let (path, args) = parse_argument_buffer(&procargs(3, b"/bin/ls\0\0/bin/ls\0-l\0"));
    assert_eq!(path, "/bin/ls");
    assert_eq!(args, ["/bin/ls", "-l"]);
}

#[test]
fn test_argument_buffer_single_argument() {
    let (path, args) = parse_argument_buffer(&procargs(1, b"/usr/libexec/logd\0"));
    assert_eq!(args, [path]);
}

#[test]
fn test_argument_buffer_without_arguments() {
    for argc in [0, -3] {
        let (path, args) = parse_argument_buffer(&procargs(argc, b"/bin/ls\0"));
        assert!(path.is_empty());
        assert!(args.is_empty());
    }
}

// ============================================================================
// Live kernel
// ============================================================================

#[test]
fn test_find_process_negative_pid() {
    let result = find_process(-1);
    assert!(matches!(
        result,
        Err(ProcessError::InvalidArgument { pid: -1, .. })
    ));
}

#[cfg(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd"
))]
mod live {
    use super::*;
    use chrono::Utc;
    use nix::unistd::{getgid, getppid, getuid};

    fn check_own_process(process: &uuproctab::Process) {
        assert_eq!(process.pid(), std::process::id() as i32);
        assert_eq!(process.ppid(), getppid().as_raw());
        assert_eq!(process.uid(), Some(getuid().as_raw()));
        assert_eq!(process.gid(), Some(getgid().as_raw()));

        let exe = std::env::current_exe().unwrap();
        let exe_name = exe.file_name().unwrap().to_string_lossy().into_owned();
        assert!(!process.command().is_empty());
        assert!(
            exe_name.starts_with(process.command()),
            "command {:?} is not a prefix of {exe_name:?}",
            process.command()
        );

        let age = Utc::now() - process.creation_time();
        assert!(age.num_seconds() >= -120, "process created in the future");
        assert!(age.num_minutes() < 30, "process created {age} ago");
    }

    #[test]
    fn test_find_own_process() {
        let process = find_process(std::process::id() as i32).unwrap();
        check_own_process(&process);

        #[cfg(target_os = "macos")]
        {
            if uuproctab::NativeQuery.kernel_version() > 19 {
                let exe = std::env::current_exe().unwrap();
                let exe_name = exe.file_name().unwrap().to_owned();
                assert_eq!(
                    std::path::Path::new(process.executable_path()).file_name(),
                    Some(exe_name.as_os_str())
                );
                assert!(!process.executable_args().is_empty());
            }
        }
    }

    #[test]
    fn test_find_own_process_twice() {
        let pid = std::process::id() as i32;
        let first = find_process(pid).unwrap();
        let second = find_process(pid).unwrap();
        assert_eq!(first.pid(), second.pid());
        assert_eq!(first.ppid(), second.ppid());
        assert_eq!(first.uid(), second.uid());
        assert_eq!(first.gid(), second.gid());
        assert_eq!(first.command(), second.command());
    }

    #[test]
    fn test_list_contains_own_process() {
        let processes = list_processes().unwrap();
        assert!(!processes.is_empty());

        let own = processes
            .iter()
            .find(|p| p.pid() == std::process::id() as i32)
            .expect("own process missing from listing");
        check_own_process(own);
    }

    #[test]
    fn test_list_pids_are_unique() {
        let processes = list_processes().unwrap();
        let mut pids = processes.iter().map(|p| p.pid()).collect::<Vec<_>>();
        let original_len = pids.len();
        pids.sort_unstable();
        pids.dedup();
        assert_eq!(pids.len(), original_len);
    }

    #[test]
    fn test_find_init_process() {
        let process = match find_process(1) {
            Err(ProcessError::QueryFailed { source, .. })
                if source.kind() == io::ErrorKind::PermissionDenied =>
            {
                return;
            }
            other => other.unwrap(),
        };
        assert_eq!(process.pid(), 1);
        assert_eq!(process.ppid(), 0);
        assert_eq!(process.uid(), Some(0));
        let expected = if cfg!(target_os = "macos") {
            "launchd"
        } else {
            "init"
        };
        assert_eq!(process.command(), expected);
    }

    #[test]
    fn test_find_process_not_found() {
        // PIDs are bounded well below this on every supported kernel.
        assert!(matches!(
            find_process(99_999_999),
            Err(ProcessError::NotFound(99_999_999))
        ));
    }
}

#[cfg(not(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd"
)))]
#[test]
fn test_unsupported_platform_fails_query() {
    assert!(!uuproctab::platform::SUPPORTED);
    assert!(matches!(
        list_processes(),
        Err(ProcessError::QueryFailed { .. })
    ));
    assert!(matches!(
        find_process(1),
        Err(ProcessError::QueryFailed { .. })
    ));
}
