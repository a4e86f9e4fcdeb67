//! # VFS Types
//!
//! This crate defines the vocabulary shared by every layer of the virtual
//! filesystem: error kinds, open flags, stat records, node identifiers and
//! the tunable limits that bound path traversal.
//!
//! ## Key Types
//!
//! - [`FsError`]: Every failure a filesystem operation can surface
//! - [`OpenFlags`]: Access and creation flags passed to `open`
//! - [`Stat`]: Node classification returned by `stat`
//! - [`NodeId`]: Identity of a node inside one backend
//! - [`VfsConfig`]: Maximum nesting depth and canonical path length

pub mod config;
pub mod error;
pub mod flags;
pub mod ids;
pub mod stat;

pub use config::{ConfigError, VfsConfig, DEFAULT_MAX_RECURSION, DEFAULT_PATH_MAX};
pub use error::{FsError, FsResult};
pub use flags::OpenFlags;
pub use ids::NodeId;
pub use stat::{NodeKind, Stat};
