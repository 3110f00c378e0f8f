//! # Storage Layer
//!
//! Filesystem side of envstash: encoding mappings to snapshot files,
//! resolving path templates back to concrete files, and grouping the
//! numbered iterations that collision avoidance leaves behind.
//!
//! ## On-disk format
//!
//! One file holds one mapping, as UTF-8 text a shell can source:
//!
//! ```text
//! NAME1="string value"
//! NAME2=123
//! NAME3=4.56
//! NAME4=$(cat << EOMsg
//! multi
//! line
//! EOMsg
//! )
//! ```
//!
//! ## Iteration files
//!
//! Saving to an existing path never overwrites; the write lands at
//! `<base>.<NNNNNN><ext>` with a zero-padded counter instead. [`FileGroups`]
//! recovers the base/iteration structure from a directory listing.
//!
//! ## Concurrency
//!
//! Every operation is a fresh, synchronous sequence of filesystem calls
//! with no shared state. Suffix allocation is check-then-act without
//! locking, so concurrent writers aiming at the same destination can race
//! for the same name; callers needing multi-writer safety must serialize
//! externally.

mod envfile;
mod iterations;
mod config;

pub use envfile::{
    load_mapping, save_mapping, Mapping, SortOrder, StoreError, DEFAULT_ITERATION_PAD,
    SELECTED_PATH_KEY,
};
pub use iterations::{FileGroups, ScanError};
pub use config::{Config, ConfigError};
