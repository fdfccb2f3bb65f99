//! `nested-attrs`: read or change a JSON document by attribute path.
//!
//! Usage:
//!   nested-attrs [--silent] get <path>
//!   nested-attrs [--silent] set <path> '<json>'
//!   nested-attrs [--silent] unset <path>
//!   nested-attrs [--silent] merge '<json-object>'
//!
//! The document is read from stdin and the result written to stdout. Change
//! notifications go to stderr, one `change:<path>` per line. Set `RUST_LOG`
//! for diagnostics.

use std::io::{self, Read, Write};

use nested_attrs::json_cli::{run, Command};
use nested_attrs::SetOptions;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let (flags, args): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|arg| arg == "--silent");
    let options = SetOptions {
        silent: !flags.is_empty(),
    };

    let command = match Command::from_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&command, buf.trim(), &options) {
        Ok(result) => {
            for name in &result.notifications {
                eprintln!("{name}");
            }
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{}", result.output) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
