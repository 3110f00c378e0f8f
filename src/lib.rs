//! envstash - persist name/value mappings as shell-sourceable snapshot files
//!
//! A snapshot file holds one flat mapping, written as `NAME="value"` lines a
//! shell can source. Destination paths may contain `{placeholder}` segments
//! filled from the mapping itself; saving to an already-existing path appends
//! a zero-padded numeric iteration suffix instead of overwriting, and loading
//! can resolve a path template to the earliest or latest matching file.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Template, Value};
pub use storage::{load_mapping, save_mapping, Mapping, SortOrder, SELECTED_PATH_KEY};
