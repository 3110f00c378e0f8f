//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `save <template> [KEY=VALUE]...` | Encode entries into a snapshot file |
//! | `load <source>` | Resolve a path or template and decode it |
//! | `files [dir]` | Show base/iteration grouping for a directory |
//!
//! All commands support `--format text|json`; `--verbose` adds debug
//! output on stderr. Call [`run()`] to parse arguments and execute.

mod app;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
