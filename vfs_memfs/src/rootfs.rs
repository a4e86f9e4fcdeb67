//! Mount-table root backend
//!
//! The root of the namespace owns no files of its own. Its children are the
//! roots of other backends, attached by name. Looking up a mounted name
//! yields a handle that shares the mounted inode; the mounted inode itself
//! is released when the last `RootFs` reference goes away.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::debug;
use vfs_inode::{DirEntry, Inode, InodeHandle, OpenDir, OpenFile};
use vfs_path::is_valid_name;
use vfs_types::{FsError, FsResult, NodeId, NodeKind, OpenFlags};

#[derive(Debug)]
struct MountTable {
    id: NodeId,
    mounts: RefCell<BTreeMap<String, Rc<InodeHandle>>>,
}

/// A root directory built from mounted backends
///
/// # Examples
///
/// ```
/// use vfs_memfs::{MemFs, RootFs};
///
/// let sd = MemFs::new();
/// let rootfs = RootFs::new();
/// let root = rootfs.root();
/// root.mount("sd", sd.root()).unwrap();
///
/// let mounted = root.lookup("sd").unwrap();
/// assert_eq!(mounted.node_id(), sd.root_id());
/// assert_eq!(rootfs.mount_names(), vec!["sd".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct RootFs {
    table: Rc<MountTable>,
}

impl RootFs {
    /// Creates a root with an empty mount table
    pub fn new() -> Self {
        Self {
            table: Rc::new(MountTable {
                id: NodeId::new(),
                mounts: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    /// Returns a new handle to the root directory
    pub fn root(&self) -> InodeHandle {
        InodeHandle::new(RootInode {
            table: Rc::clone(&self.table),
        })
    }

    /// Identity of the root directory
    pub fn root_id(&self) -> NodeId {
        self.table.id
    }

    /// Names currently mounted, in sorted order
    pub fn mount_names(&self) -> Vec<String> {
        self.table.mounts.borrow().keys().cloned().collect()
    }
}

impl Default for RootFs {
    fn default() -> Self {
        Self::new()
    }
}

struct RootInode {
    table: Rc<MountTable>,
}

impl Inode for RootInode {
    fn node_id(&self) -> NodeId {
        self.table.id
    }

    fn is_dir(&self) -> FsResult<bool> {
        Ok(true)
    }

    fn lookup(&self, name: &str) -> FsResult<InodeHandle> {
        let mounts = self.table.mounts.borrow();
        let target = mounts.get(name).ok_or(FsError::NotFound)?;
        Ok(InodeHandle::new(MountPoint {
            target: Rc::clone(target),
        }))
    }

    fn open_as_dir(&self) -> FsResult<Box<dyn OpenDir>> {
        let mut entries = Vec::new();
        for (name, target) in self.table.mounts.borrow().iter() {
            entries.push(DirEntry::new(
                name.clone(),
                NodeKind::from_is_dir(target.is_dir()?),
            ));
        }
        Ok(Box::new(MountList {
            entries: entries.into_iter(),
        }))
    }

    fn mount(&self, name: &str, inode: InodeHandle) -> FsResult<()> {
        is_valid_name(name)?;
        // The table would own a handle to itself and never be freed
        if inode.node_id() == self.table.id {
            return Err(FsError::Backend("cannot mount a root inside itself".to_string()));
        }
        let mut mounts = self.table.mounts.borrow_mut();
        if mounts.contains_key(name) {
            return Err(FsError::AlreadyExists);
        }
        debug!(name, node = %inode.node_id(), "mounted");
        mounts.insert(name.to_string(), Rc::new(inode));
        Ok(())
    }
}

/// A handle onto a mounted backend's root
///
/// Every operation goes to the mounted inode. Releasing a mount point only
/// drops its share of the mounted inode.
struct MountPoint {
    target: Rc<InodeHandle>,
}

impl Inode for MountPoint {
    fn node_id(&self) -> NodeId {
        self.target.node_id()
    }

    fn is_dir(&self) -> FsResult<bool> {
        self.target.is_dir()
    }

    fn lookup(&self, name: &str) -> FsResult<InodeHandle> {
        self.target.lookup(name)
    }

    fn open_as_file(&self, flags: OpenFlags) -> FsResult<Box<dyn OpenFile>> {
        self.target.open_as_file(flags)
    }

    fn open_as_dir(&self) -> FsResult<Box<dyn OpenDir>> {
        self.target.open_as_dir()
    }

    fn create_file(&self, name: &str) -> FsResult<()> {
        self.target.create_file(name)
    }

    fn create_dir(&self, name: &str) -> FsResult<()> {
        self.target.create_dir(name)
    }
}

struct MountList {
    entries: std::vec::IntoIter<DirEntry>,
}

impl OpenDir for MountList {
    fn next_entry(&mut self) -> FsResult<Option<DirEntry>> {
        Ok(self.entries.next())
    }
}
