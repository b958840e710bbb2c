// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

type UtilMain = fn(std::vec::IntoIter<OsString>) -> i32;

fn utils() -> Vec<(&'static str, UtilMain)> {
    #[allow(unused_mut)]
    let mut map: Vec<(&'static str, UtilMain)> = Vec::new();
    #[cfg(feature = "pslist")]
    map.push(("pslist", pslist::uumain));
    map
}

fn usage(utils: &[(&'static str, UtilMain)], name: &str) {
    println!("{name} {VERSION} (multi-call binary)\n");
    println!("Usage: {name} [function [arguments...]]\n");
    println!("Currently defined functions:\n");
    let names = utils.iter().map(|(name, _)| *name).collect::<Vec<_>>();
    println!("    {}", names.join(", "));
}

fn util_name(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let utils = utils();
    let mut args = env::args_os().collect::<Vec<_>>();
    let binary = args.first().cloned().unwrap_or_default();
    let binary_name = util_name(Path::new(&binary)).unwrap_or_else(|| "proctab".to_string());

    // `pslist ...` through a symlink or hard link named after the util
    if let Some((_, uumain)) = utils.iter().find(|(name, _)| *name == binary_name) {
        process::exit(uumain(args.into_iter()));
    }

    // `proctab pslist ...`
    let Some(util) = args.get(1).map(|arg| arg.to_string_lossy().into_owned()) else {
        usage(&utils, &binary_name);
        process::exit(0);
    };

    match utils.iter().find(|(name, _)| *name == util) {
        Some((_, uumain)) => {
            uucore::set_utility_is_second_arg();
            args.remove(0);
            process::exit(uumain(args.into_iter()));
        }
        None => match util.as_str() {
            "--help" | "-h" => usage(&utils, &binary_name),
            "--version" | "-V" => println!("{binary_name} {VERSION} (multi-call binary)"),
            _ => {
                log::debug!("unknown utility requested: {util}");
                let _ = writeln!(io::stderr(), "{util}: function/utility not found");
                process::exit(1);
            }
        },
    }
}
