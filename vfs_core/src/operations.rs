//! Filesystem operations
//!
//! This module defines the path-based operations a filesystem context
//! provides once a root has been installed.

use vfs_inode::{OpenDir, OpenFile};
use vfs_types::{FsResult, OpenFlags, Stat};

/// Filesystem operations trait
///
/// Every path is a `/`-separated string. Paths starting with `/` are
/// resolved from the root; all others from the current directory.
pub trait FileSystemOperations {
    /// Open a file
    ///
    /// With `OpenFlags::CREATE` the file is created first if it does not
    /// exist; adding `OpenFlags::EXCLUSIVE` makes an existing file an error.
    fn open(&self, path: &str, flags: OpenFlags) -> FsResult<Box<dyn OpenFile>>;

    /// Open a directory for listing
    fn opendir(&self, path: &str) -> FsResult<Box<dyn OpenDir>>;

    /// Change the current directory
    fn chdir(&mut self, path: &str) -> FsResult<()>;

    /// Classify the node at a path
    fn stat(&self, path: &str) -> FsResult<Stat>;

    /// Canonical absolute form of a path
    fn realpath(&self, path: &str) -> FsResult<String>;

    /// Create a directory
    ///
    /// Its parent must already exist.
    fn mkdir(&self, path: &str) -> FsResult<()>;

    /// Canonical path of the current directory
    fn getcwd(&self) -> FsResult<String> {
        self.realpath(".")
    }
}
