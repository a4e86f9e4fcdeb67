//! Inode capability trait
//!
//! Backends implement this trait to plug into the path layer. Every
//! operation borrows the node immutably; backends that mutate shared state
//! (creation, mounting) use interior mutability. Access is single-threaded,
//! so no `Send`/`Sync` bound is imposed.

use crate::handle::InodeHandle;
use crate::session::{OpenDir, OpenFile};
use vfs_types::{FsError, FsResult, NodeId, OpenFlags};

/// Operations every filesystem node exposes
///
/// Only [`node_id`](Inode::node_id) and [`is_dir`](Inode::is_dir) are
/// mandatory. The remaining operations default to
/// `Err(FsError::NotSupported)` (or a no-op for `release`).
pub trait Inode {
    /// Identity of the node this handle refers to
    fn node_id(&self) -> NodeId;

    /// Reports whether the node is a directory
    fn is_dir(&self) -> FsResult<bool>;

    /// Resolves a single named child
    ///
    /// Fails with `NotFound` if no child has that name and with
    /// `NotADirectory` if this node cannot have children. Must not change
    /// the node.
    fn lookup(&self, _name: &str) -> FsResult<InodeHandle> {
        Err(FsError::NotSupported)
    }

    /// Opens the node as a file session
    fn open_as_file(&self, _flags: OpenFlags) -> FsResult<Box<dyn OpenFile>> {
        Err(FsError::NotSupported)
    }

    /// Opens the node as a directory session
    fn open_as_dir(&self) -> FsResult<Box<dyn OpenDir>> {
        Err(FsError::NotSupported)
    }

    /// Creates an empty file named `name` under this directory
    ///
    /// Fails with `AlreadyExists` if a child of that name exists. Whether
    /// that is tolerated is the caller's decision.
    fn create_file(&self, _name: &str) -> FsResult<()> {
        Err(FsError::NotSupported)
    }

    /// Creates an empty directory named `name` under this directory
    fn create_dir(&self, _name: &str) -> FsResult<()> {
        Err(FsError::NotSupported)
    }

    /// Attaches `inode` as a child named `name`
    ///
    /// Only root backends that keep a mount table implement this.
    fn mount(&self, _name: &str, _inode: InodeHandle) -> FsResult<()> {
        Err(FsError::NotSupported)
    }

    /// Relinquishes backend resources held by this node
    ///
    /// Called exactly once, by [`InodeHandle`], when the handle goes away.
    /// Backends must not call it themselves.
    fn release(&mut self) {}
}
