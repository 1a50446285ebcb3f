mod command_file;

use std::collections::BTreeMap;
use std::ffi::OsString;

use argtree_core::flags::{bool_flag, string_flag, string_list_flag};
use argtree_core::{Command, Context, Value};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::command_file::CommandFile;

/// Path of a YAML command file replacing the built-in command tree.
const COMMAND_FILE_VAR: &str = "ARGTREE_COMMAND_FILE";
/// Log filter directives, e.g. `argtree_core=trace`.
const LOG_VAR: &str = "ARGTREE_LOG";

/// Parse result written to stdout.
#[derive(Debug, Serialize)]
struct Report<'a> {
    path: &'a [String],
    named: &'a BTreeMap<String, Value>,
    positional: &'a [String],
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// The tree used when no command file is configured.
fn default_command() -> Result<Command, String> {
    Command::new("main")
        .with_help("Demonstrates the argument parser")
        .with_flags([
            string_flag("name", &["-n", "--name"]),
            bool_flag("confirm", &["--yes-i-am-really-sure"]),
            string_list_flag("multiple", &["-m", "--multi"]),
        ])
        .map_err(|e| e.to_string())
}

fn load_command() -> Result<Command, String> {
    match std::env::var_os(COMMAND_FILE_VAR) {
        Some(path) => {
            debug!(path = ?path, "Loading command file");
            CommandFile::load(&path)
                .and_then(|file| file.build())
                .map_err(|e| format!("{}: {e}", path.to_string_lossy()))
        }
        None => default_command(),
    }
}

/// Converts raw arguments, rejecting the first one that is not valid UTF-8.
fn collect_args(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>, String> {
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| format!("argument is not valid UTF-8: {}", raw.to_string_lossy()))
        })
        .collect()
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = collect_args(std::env::args_os().skip(1))?;
    let mut ctx = Context::new(load_command()?);
    ctx.parse(args).map_err(|e| e.to_string())?;

    let report = Report {
        path: ctx.path(),
        named: ctx.named(),
        positional: ctx.positional(),
    };
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
