//! # VFS Path Scanning
//!
//! This crate turns path strings into the segment stream consumed by the
//! traversal engine.
//!
//! ## Rules
//!
//! - `/` separates segments; a leading `/` makes the path absolute
//! - Empty segments (repeated or trailing slashes) are skipped
//! - `.` is the current directory, `..` the parent
//! - Scanning can be capped at a byte length, which is how a creation
//!   resolves only the parent directory of its target
//!
//! Scanning never touches a backend: it only classifies text.

pub mod path;

pub use path::{is_absolute, is_valid_name, split_parent, Segment, Segments};
