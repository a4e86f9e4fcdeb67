//! # Virtual Filesystem Core
//!
//! Path resolution and working-directory tracking over pluggable inode
//! backends.
//!
//! ## Ownership
//!
//! - The working-directory stack owns the chain from the root to the
//!   current directory
//! - A traversal borrows a prefix of that chain and owns only the nodes it
//!   looked up itself
//! - Owned nodes are released exactly once: on `..`, on failure, or when
//!   the traversal is dropped
//! - `chdir` moves a traversal's owned nodes into the stack instead of
//!   releasing them
//!
//! ## Operations
//!
//! - `set_root(inode)`: Install the root and reset the current directory
//! - `mount(name, inode)`: Attach a backend under the root
//! - `open(path, flags)`: Open a file, optionally creating it
//! - `opendir(path)`: Open a directory for listing
//! - `chdir(path)`: Change the current directory
//! - `stat(path)`: Classify a node
//! - `realpath(path)`: Canonical absolute path
//! - `mkdir(path)`: Create a directory

pub mod context;
pub mod cwd;
pub mod operations;
pub mod traversal;

pub use context::FileSystem;
pub use cwd::{CwdStack, NamedInode};
pub use operations::FileSystemOperations;
pub use traversal::{resolve, Ownership, Traversal};
