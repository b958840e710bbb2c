// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use chrono::Local;
use clap::{crate_version, Arg, ArgAction, ArgMatches, Command};
use prettytable::{format::consts::FORMAT_CLEAN, Row, Table};
use uu_proctab::{NativeProcessTable, Process, ProcessError};
use uucore::error::{UResult, USimpleError};

#[uucore::main]
pub fn uumain(args: impl uucore::Args) -> UResult<()> {
    let matches = uu_app().try_get_matches_from(args)?;
    let settings = Settings::from_matches(&matches);
    let table = NativeProcessTable::native();

    let mut processes = match matches.get_many::<i32>("pid") {
        Some(pids) => {
            let mut found = Vec::new();
            for &pid in pids {
                match table.find_process(pid) {
                    Ok(process) => found.push(process),
                    Err(err) => {
                        uucore::show_error!("{err}");
                        uucore::error::set_exit_code(1);
                    }
                }
            }
            found
        }
        None => table
            .list_processes()
            .map_err(|err: ProcessError| USimpleError::new(1, err.to_string()))?,
    };

    processes.sort_by_key(Process::pid);

    print!("{}", render(&processes, &settings));
    Ok(())
}

/// Output options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub headers: bool,
    pub comm: bool,
    pub long: bool,
}

impl Settings {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            headers: !matches.get_flag("no-headers"),
            comm: matches.get_flag("comm"),
            long: matches.get_flag("long"),
        }
    }
}

/// Format processes as a borderless table.
pub fn render(processes: &[Process], settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);

    if settings.headers {
        let header: &[&str] = if settings.long {
            &["PID", "PPID", "UID", "GID", "START", "COMMAND"]
        } else {
            &["PID", "PPID", "UID", "COMMAND"]
        };
        table.add_row(Row::from_iter(header.iter().copied()));
    }

    for process in processes {
        let mut cells = vec![
            process.pid().to_string(),
            process.ppid().to_string(),
            id(process.uid()),
        ];
        if settings.long {
            cells.push(id(process.gid()));
            cells.push(
                process
                    .creation_time()
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            );
        }
        cells.push(command_line(process, settings.comm));
        table.add_row(Row::from_iter(cells));
    }

    table
}

/// Executable path followed by `argv[1..]`, or the kernel command name when
/// asked for or when no path is known.
pub fn command_line(process: &Process, comm: bool) -> String {
    if comm || process.executable_path().is_empty() {
        return process.command().to_string();
    }

    let mut line = process.executable_path().to_string();
    for arg in process.executable_args().iter().skip(1) {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn id(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |id| id.to_string())
}

pub fn uu_app() -> Command {
    Command::new(uucore::util_name())
        .version(crate_version!())
        .about("List running processes with their executable path and arguments")
        .override_usage("pslist [options]")
        .infer_long_args(true)
        .arg(
            Arg::new("pid")
                .short('p')
                .long("pid")
                .help("Only show the process with the given PID")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i32))
                .value_name("PID"),
        )
        .arg(
            Arg::new("no-headers")
                .long("no-headers")
                .help("Do not print the header line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("comm")
                .short('c')
                .long("comm")
                .help("Show the kernel command name instead of the command line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("long")
                .short('l')
                .long("long")
                .help("Also show the group id and start time")
                .action(ArgAction::SetTrue),
        )
}
