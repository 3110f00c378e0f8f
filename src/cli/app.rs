//! Main CLI application structure

use std::path::Path;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use crate::domain::Value;
use crate::storage::{self, Config, FileGroups, Mapping, SortOrder};

#[derive(Parser)]
#[command(name = "envstash")]
#[command(author, version, about = "Shell-compatible key/value snapshot files with templated paths")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save KEY=VALUE entries as a snapshot file
    Save {
        /// Destination path; `{name}` placeholders are filled from the entries
        template: String,

        /// Entries as KEY=VALUE (values are type-inferred)
        entries: Vec<String>,

        /// Zero-pad width for iteration suffixes
        #[arg(long)]
        pad: Option<usize>,
    },

    /// Load a snapshot file (exact path or `{placeholder}` template)
    Load {
        /// Source path or template
        source: String,

        /// Which match wins: latest (default) or first/earliest
        #[arg(long)]
        order: Option<String>,

        /// Require an exact filename match (no template fallback)
        #[arg(long)]
        exact: bool,
    },

    /// Show base/iteration grouping for a directory
    Files {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Save { template, entries, pad } => {
            let mapping = parse_entries(&entries)?;
            let pad = pad.unwrap_or(config.iteration_pad);
            output.verbose_ctx(
                "save",
                &format!("Encoding {} entries to: {}", mapping.len(), template),
            );
            let path = storage::save_mapping(&template, &mapping, pad)?;
            output.success(&format!("Saved {}", path.display()));
        }

        Commands::Load { source, order, exact } => {
            let order = order.map(|s| SortOrder::parse(&s)).unwrap_or(config.sort_order);
            output.verbose_ctx("load", &format!("Resolving {} ({:?})", source, order));
            let mapping = storage::load_mapping(&source, order, exact)?;
            if output.is_json() {
                output.data(&mapping);
            } else {
                for (name, value) in &mapping {
                    output.kv(name, &value.to_string());
                }
            }
        }

        Commands::Files { dir } => {
            output.verbose_ctx("files", &format!("Scanning directory: {}", dir));
            let groups = FileGroups::scan(Path::new(&dir))?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "base_files": display_paths(&groups.base_files),
                    "iter_files": display_paths(&groups.iter_files),
                    "all_files": display_paths(&groups.all_files),
                }));
            } else {
                for path in &groups.all_files {
                    let tag = if groups.is_iteration(path) { "iter" } else { "base" };
                    output.row(&[tag, &path.display().to_string()]);
                }
            }
        }
    }

    Ok(())
}

/// Parses KEY=VALUE arguments into a mapping, inferring value types
fn parse_entries(entries: &[String]) -> Result<Mapping> {
    let mut mapping = Mapping::new();
    for entry in entries {
        let (name, raw) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid entry '{}', expected KEY=VALUE", entry))?;
        mapping.insert(name.to_string(), Value::infer(raw));
    }
    Ok(mapping)
}

fn display_paths(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_type_inferred() {
        let entries = vec!["USER=Steve".to_string(), "COUNT=3".to_string()];
        let mapping = parse_entries(&entries).unwrap();

        assert_eq!(mapping.get("USER"), Some(&Value::Str("Steve".to_string())));
        assert_eq!(mapping.get("COUNT"), Some(&Value::Int(3)));
    }

    #[test]
    fn entry_value_may_contain_equals() {
        let entries = vec!["EXPR=a=b".to_string()];
        let mapping = parse_entries(&entries).unwrap();

        assert_eq!(mapping.get("EXPR"), Some(&Value::Str("a=b".to_string())));
    }

    #[test]
    fn entry_without_equals_fails() {
        let entries = vec!["NOVALUE".to_string()];
        assert!(parse_entries(&entries).is_err());
    }
}
