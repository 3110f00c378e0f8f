//! Shell-compatible snapshot files
//!
//! One file holds one mapping, written as `NAME="value"` lines a shell can
//! source. Destination paths may contain `{name}` placeholders filled from
//! the mapping itself; when the resolved path already exists, a zero-padded
//! numeric iteration suffix keeps every write unique. Loading accepts
//! either an exact path or a template whose placeholders match any text.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::iterations::FileGroups;
use crate::domain::{SegmentKind, Template, Value};

/// Insertion-ordered name/value mapping, the in-memory form of one file
pub type Mapping = IndexMap<String, Value>;

/// Synthetic key injected by [`load_mapping`], reporting the path read
pub const SELECTED_PATH_KEY: &str = "envstash--FilePath_Selected";

/// Default zero-pad width for iteration suffixes
pub const DEFAULT_ITERATION_PAD: usize = 6;

/// Here-document delimiters for multiline values
const HEREDOC_PREFIX: &str = "$(cat << EOMsg\n";
const HEREDOC_SUFFIX: &str = "\nEOMsg\n)";

/// Sentinel the decoder swaps in for the here-doc closer, so the
/// line-based scan can see where a multiline value ends
const HEREDOC_END_SENTINEL: &str = "::END::";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A file path must be provided")]
    MissingPath,

    #[error("No file or template pattern match for: {0}")]
    NotFound(String),

    #[error("Destination template references '{{{0}}}', which is missing from the mapping")]
    MissingKey(String),
}

/// Which candidate wins when a template matches several files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Earliest,
    #[default]
    Latest,
}

impl SortOrder {
    /// Accepts the usual synonyms by prefix: `fir(st)`, `ear(liest)` and
    /// `asc(ending)` pick the earliest match; anything else the latest.
    pub fn parse(s: &str) -> Self {
        match s.get(..3) {
            Some("fir") | Some("ear") | Some("asc") => SortOrder::Earliest,
            _ => SortOrder::Latest,
        }
    }
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Saves a mapping as a shell-sourceable snapshot file.
///
/// `{name}` placeholders in `template` are substituted with the string form
/// of the mapping's own values; a referenced name absent from the mapping
/// fails before any I/O. Parent directories are created as needed, and an
/// already-existing destination gains a `.NNNNNN` iteration suffix (width
/// `pad`) before the extension rather than being overwritten. Returns the
/// final absolute path written.
///
/// Suffix allocation is check-then-act without locking: concurrent writers
/// aiming at the same destination can observe the same free name. Callers
/// needing multi-writer safety must serialize externally.
pub fn save_mapping(template: &str, mapping: &Mapping, pad: usize) -> Result<PathBuf> {
    if template.is_empty() {
        return Err(StoreError::MissingPath.into());
    }

    let destination = if mapping.is_empty() {
        template.to_string()
    } else {
        substitute_placeholders(template, mapping)?
    };

    let resolved = std::path::absolute(&destination)
        .with_context(|| format!("Failed to resolve path: {}", destination))?;
    if let Some(parent) = resolved.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let path = next_free_path(&resolved, pad);

    let lines: Vec<String> = mapping
        .iter()
        .map(|(name, value)| encode_entry(name, value))
        .collect();

    fs::write(&path, lines.join("\n"))
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;

    Ok(path)
}

/// Loads a snapshot file back into a mapping.
///
/// When `source` does not resolve to an existing file it is treated as a
/// filename template: the static text around `{placeholders}` must appear
/// in a candidate's name in the same left-to-right order, and `order`
/// picks among the survivors. With `exact_match_only` the template
/// fallback is skipped and a missing file fails directly.
///
/// The returned mapping carries a synthetic [`SELECTED_PATH_KEY`] entry
/// naming the concrete file that was read.
pub fn load_mapping(source: &str, order: SortOrder, exact_match_only: bool) -> Result<Mapping> {
    if source.is_empty() {
        return Err(StoreError::MissingPath.into());
    }

    let resolved = std::path::absolute(source)
        .with_context(|| format!("Failed to resolve path: {}", source))?;

    let path = if resolved.exists() {
        resolved
    } else if exact_match_only {
        return Err(StoreError::NotFound(source.to_string()).into());
    } else {
        resolve_template(&resolved, order)?
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;

    let mut mapping = parse_content(&content);
    mapping.insert(
        SELECTED_PATH_KEY.to_string(),
        Value::Str(path.to_string_lossy().into_owned()),
    );
    Ok(mapping)
}

/// Fills every placeholder from the mapping's own values
fn substitute_placeholders(template: &str, mapping: &Mapping) -> Result<String> {
    let parsed = Template::parse(template);
    let mut out = String::with_capacity(template.len());
    for segment in parsed.segments() {
        match segment.kind {
            SegmentKind::Static => out.push_str(&segment.text),
            SegmentKind::Placeholder => {
                let name = segment.name().unwrap_or("");
                let value = mapping
                    .get(name)
                    .ok_or_else(|| StoreError::MissingKey(name.to_string()))?;
                out.push_str(&value.to_string());
            }
        }
    }
    Ok(out)
}

/// Appends `.NNNNNN` before the extension, counting up until the name is
/// free on disk
fn next_free_path(resolved: &Path, pad: usize) -> PathBuf {
    let ext = resolved
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let full = resolved.to_string_lossy();
    let base = full[..full.len() - ext.len()].to_string();

    let mut path = resolved.to_path_buf();
    let mut iteration = 0u64;
    while path.exists() {
        iteration += 1;
        path = PathBuf::from(format!("{}.{:0width$}{}", base, iteration, ext, width = pad));
    }
    path
}

/// Encodes one entry as a shell-compatible line.
///
/// Keys are sanitized to `[A-Za-z0-9_]`. Numeric values are written
/// unquoted, everything else double-quoted; a value containing a newline
/// is wrapped in a here-document block with one leading newline and any
/// trailing whitespace stripped.
fn encode_entry(name: &str, value: &Value) -> String {
    let key: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    let text = value.to_string();

    if text.contains('\n') {
        let body = text.strip_prefix('\n').unwrap_or(&text).trim_end();
        format!("{}={}{}{}", key, HEREDOC_PREFIX, body, HEREDOC_SUFFIX)
    } else if value.is_numeric() {
        format!("{}={}", key, text)
    } else {
        format!("{}=\"{}\"", key, text)
    }
}

/// Picks the earliest or latest file matching the template's static
/// segments
fn resolve_template(resolved: &Path, order: SortOrder) -> Result<PathBuf> {
    let filename = resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !filename.contains('{') {
        return Err(StoreError::NotFound(resolved.display().to_string()).into());
    }

    let template = Template::parse(&filename);
    let parent = resolved.parent().unwrap_or_else(|| Path::new("."));
    let groups = FileGroups::scan(parent)?;

    let candidates: Vec<&PathBuf> = groups
        .all_files
        .iter()
        .filter(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .is_some_and(|name| matches_static_segments(&name, &template))
        })
        .collect();

    let chosen = match order {
        SortOrder::Earliest => candidates.first(),
        SortOrder::Latest => candidates.last(),
    }
    .ok_or_else(|| StoreError::NotFound(resolved.display().to_string()))?;

    Ok((*chosen).clone())
}

/// True when every static segment occurs in `name`, left to right.
///
/// Each search resumes at the previous match's end, so placeholders may
/// match any text (including none) between segments but never reorder
/// them.
fn matches_static_segments(name: &str, template: &Template) -> bool {
    let mut pos = 0usize;
    for segment in template.static_segments() {
        match name.get(pos..).and_then(|tail| tail.find(&segment.text)) {
            Some(idx) => pos += idx + segment.len(),
            None => return false,
        }
    }
    true
}

/// Parses the line-oriented snapshot format into a mapping.
///
/// Lines without a `=` are skipped. A value wrapped in double quotes loses
/// one layer; a value opening a here-document collects the following lines
/// verbatim until the block closes. Every raw value goes through
/// [`Value::infer`].
fn parse_content(content: &str) -> Mapping {
    // The here-doc closer spans lines; swap in a sentinel line so the
    // line scan below can detect where a multiline value ends.
    let content = content.replace(HEREDOC_SUFFIX, &format!("\n{}", HEREDOC_END_SENTINEL));

    let mut mapping = Mapping::new();
    let mut lines = content.split('\n');

    while let Some(line) = lines.next() {
        let Some(eq) = line.find('=') else { continue };
        let name = &line[..eq];
        let mut value = line[eq + 1..].to_string();

        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value = value[1..value.len() - 1].to_string();
        }

        if value.starts_with(HEREDOC_PREFIX.trim_end()) {
            let mut body = Vec::new();
            for next in lines.by_ref() {
                if next.contains(HEREDOC_END_SENTINEL) {
                    break;
                }
                body.push(next);
            }
            value = body.join("\n");
        }

        mapping.insert(name.to_string(), Value::infer(&value));
    }

    mapping
}
