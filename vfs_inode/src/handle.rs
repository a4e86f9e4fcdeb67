//! Owning inode handle
//!
//! `InodeHandle` is the only way the path layer holds a node. Whoever owns
//! the handle owns the node: moving the handle transfers ownership, and
//! dropping it releases the node. There is no way to release a handle twice
//! and no way to forget to release one.

use crate::inode::Inode;
use crate::session::{OpenDir, OpenFile};
use std::fmt;
use vfs_types::{FsResult, NodeId, OpenFlags};

/// A live, owned reference to a node inside exactly one backend
pub struct InodeHandle {
    inner: Box<dyn Inode>,
}

impl InodeHandle {
    /// Wraps a backend node
    pub fn new(inode: impl Inode + 'static) -> Self {
        Self {
            inner: Box::new(inode),
        }
    }

    /// Wraps an already boxed backend node
    pub fn from_box(inner: Box<dyn Inode>) -> Self {
        Self { inner }
    }

    /// Identity of the underlying node
    pub fn node_id(&self) -> NodeId {
        self.inner.node_id()
    }

    /// Reports whether the node is a directory
    pub fn is_dir(&self) -> FsResult<bool> {
        self.inner.is_dir()
    }

    /// Resolves a named child, returning a new owned handle
    pub fn lookup(&self, name: &str) -> FsResult<InodeHandle> {
        self.inner.lookup(name)
    }

    /// Opens the node as a file session
    pub fn open_as_file(&self, flags: OpenFlags) -> FsResult<Box<dyn OpenFile>> {
        self.inner.open_as_file(flags)
    }

    /// Opens the node as a directory session
    pub fn open_as_dir(&self) -> FsResult<Box<dyn OpenDir>> {
        self.inner.open_as_dir()
    }

    /// Creates an empty child file
    pub fn create_file(&self, name: &str) -> FsResult<()> {
        self.inner.create_file(name)
    }

    /// Creates an empty child directory
    pub fn create_dir(&self, name: &str) -> FsResult<()> {
        self.inner.create_dir(name)
    }

    /// Attaches another backend's node under this one
    pub fn mount(&self, name: &str, inode: InodeHandle) -> FsResult<()> {
        self.inner.mount(name, inode)
    }

    /// Releases the node now
    ///
    /// Equivalent to dropping the handle; spelled out where the release is
    /// part of the operation's contract.
    pub fn release(self) {
        drop(self)
    }
}

impl Drop for InodeHandle {
    fn drop(&mut self) {
        self.inner.release();
    }
}

impl fmt::Debug for InodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InodeHandle")
            .field("node", &self.inner.node_id())
            .finish()
    }
}
