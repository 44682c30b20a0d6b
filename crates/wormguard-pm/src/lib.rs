//! Dependency resolution through the package manager's own listing command.
//!
//! The resolver knows nothing about rules. It answers one question per project: which
//! version, if any, of each requested package name is installed.
//!
//! Layout:
//! - [`command`] spawns the external tool with a timeout and an output ceiling
//! - [`extract`] pulls the JSON document out of noisy tool output and walks the tree
//! - [`resolve`] partitions names into batches and merges what each batch yields

#![forbid(unsafe_code)]

pub mod command;
pub mod extract;
pub mod resolve;

pub use command::{CommandLister, DependencyLister};
pub use extract::{collect_versions, extract_json};
pub use resolve::{BatchOutcome, BatchStatus, Resolution, partition, resolve_installed};
