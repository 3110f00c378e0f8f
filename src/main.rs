//! envstash - Shell-compatible key/value snapshot files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = envstash::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
