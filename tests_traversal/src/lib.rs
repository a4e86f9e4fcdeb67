//! Traversal Test Utilities
//!
//! This crate provides a backend built for checking the ownership rules of
//! path traversal.
//!
//! ## Test Philosophy
//!
//! - **Exactly-once release**: every handle a backend hands out comes back
//!   exactly once, never zero times and never twice
//! - **Borrowed means untouched**: nodes held by the working directory are
//!   never released by a traversal
//! - **Clean failure**: a failed operation leaves nothing live that it
//!   acquired
//! - **Deterministic faults**: lookup failures are injected by name

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use vfs_core::{CwdStack, FileSystem};
use vfs_inode::{DirEntry, Inode, InodeHandle, OpenDir, OpenFile};
use vfs_types::{FsError, FsResult, NodeId, NodeKind, OpenFlags};

#[derive(Debug)]
struct Node {
    id: NodeId,
    kind: NodeKind,
}

#[derive(Debug, Default)]
struct Shared {
    nodes: RefCell<BTreeMap<String, Node>>,
    live: RefCell<BTreeMap<String, usize>>,
    releases: RefCell<Vec<String>>,
    failures: RefCell<BTreeMap<String, FsError>>,
    acquired: Cell<usize>,
    over_released: Cell<usize>,
}

impl Shared {
    fn kind_of(&self, path: &str) -> FsResult<NodeKind> {
        self.nodes
            .borrow()
            .get(path)
            .map(|node| node.kind)
            .ok_or(FsError::NotFound)
    }

    fn insert(&self, path: &str, kind: NodeKind) -> FsResult<()> {
        let mut nodes = self.nodes.borrow_mut();
        if nodes.contains_key(path) {
            return Err(FsError::AlreadyExists);
        }
        nodes.insert(
            path.to_string(),
            Node {
                id: NodeId::new(),
                kind,
            },
        );
        Ok(())
    }
}

/// Joins a backend-relative parent path and a child name
fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

/// A backend that records every handle acquisition and release
///
/// Nodes are addressed by their backend-relative path: `""` is the root,
/// `"a/b"` is `b` inside `a`.
#[derive(Debug, Clone)]
pub struct CountingFs {
    shared: Rc<Shared>,
}

impl CountingFs {
    /// Creates a backend holding only the root directory
    pub fn new() -> Self {
        let shared = Rc::new(Shared::default());
        shared.nodes.borrow_mut().insert(
            String::new(),
            Node {
                id: NodeId::new(),
                kind: NodeKind::Directory,
            },
        );
        Self { shared }
    }

    /// Creates a backend with the given directories, parents included
    pub fn with_dirs(paths: &[&str]) -> Self {
        let fs = Self::new();
        for path in paths {
            fs.add_dirs(path);
        }
        fs
    }

    /// Adds a directory and any missing parents
    pub fn add_dirs(&self, path: &str) {
        let mut current = String::new();
        for name in path.split('/').filter(|s| !s.is_empty()) {
            current = join(&current, name);
            let _ = self.shared.insert(&current, NodeKind::Directory);
        }
    }

    /// Adds a file; its parent must exist
    pub fn add_file(&self, path: &str) -> FsResult<()> {
        if self.shared.kind_of(parent_of(path))? != NodeKind::Directory {
            return Err(FsError::NotADirectory);
        }
        self.shared.insert(path, NodeKind::File)
    }

    /// True if a node exists at `path`
    pub fn exists(&self, path: &str) -> bool {
        self.shared.nodes.borrow().contains_key(path)
    }

    /// Identity of the node at `path`
    pub fn node_id(&self, path: &str) -> Option<NodeId> {
        self.shared.nodes.borrow().get(path).map(|node| node.id)
    }

    /// Makes every lookup of `name` fail with `err`
    pub fn fail_lookup(&self, name: &str, err: FsError) {
        self.shared
            .failures
            .borrow_mut()
            .insert(name.to_string(), err);
    }

    /// Returns a new handle to the root directory
    pub fn root(&self) -> InodeHandle {
        acquire(&self.shared, String::new())
    }

    /// Live handles to the node at `path`
    pub fn live(&self, path: &str) -> usize {
        self.shared.live.borrow().get(path).copied().unwrap_or(0)
    }

    /// Live handles across every node
    pub fn total_live(&self) -> usize {
        self.shared.live.borrow().values().sum()
    }

    /// Handles handed out so far
    pub fn acquired(&self) -> usize {
        self.shared.acquired.get()
    }

    /// Handles released so far
    pub fn released(&self) -> usize {
        self.shared.releases.borrow().len()
    }

    /// Releases of nodes that had no live handle
    pub fn over_released(&self) -> usize {
        self.shared.over_released.get()
    }

    /// Paths of released nodes, in release order
    pub fn release_log(&self) -> Vec<String> {
        self.shared.releases.borrow().clone()
    }

    /// Forgets the release log
    pub fn clear_log(&self) {
        self.shared.releases.borrow_mut().clear();
    }
}

impl Default for CountingFs {
    fn default() -> Self {
        Self::new()
    }
}

fn acquire(shared: &Rc<Shared>, path: String) -> InodeHandle {
    shared.acquired.set(shared.acquired.get() + 1);
    *shared.live.borrow_mut().entry(path.clone()).or_insert(0) += 1;
    let id = shared
        .nodes
        .borrow()
        .get(&path)
        .map(|node| node.id)
        .unwrap_or_default();
    InodeHandle::new(CountingInode {
        path,
        id,
        shared: Rc::clone(shared),
    })
}

struct CountingInode {
    path: String,
    id: NodeId,
    shared: Rc<Shared>,
}

impl CountingInode {
    fn require_dir(&self) -> FsResult<()> {
        match self.shared.kind_of(&self.path)? {
            NodeKind::Directory => Ok(()),
            NodeKind::File => Err(FsError::NotADirectory),
        }
    }
}

impl Inode for CountingInode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn is_dir(&self) -> FsResult<bool> {
        Ok(self.shared.kind_of(&self.path)? == NodeKind::Directory)
    }

    fn lookup(&self, name: &str) -> FsResult<InodeHandle> {
        if let Some(err) = self.shared.failures.borrow().get(name) {
            return Err(err.clone());
        }
        self.require_dir()?;
        let child = join(&self.path, name);
        self.shared.kind_of(&child)?;
        Ok(acquire(&self.shared, child))
    }

    fn open_as_file(&self, _flags: OpenFlags) -> FsResult<Box<dyn OpenFile>> {
        match self.shared.kind_of(&self.path)? {
            NodeKind::File => Ok(Box::new(EmptyFile)),
            NodeKind::Directory => Err(FsError::NotAFile),
        }
    }

    fn open_as_dir(&self) -> FsResult<Box<dyn OpenDir>> {
        self.require_dir()?;
        let entries: Vec<DirEntry> = self
            .shared
            .nodes
            .borrow()
            .iter()
            .filter(|(path, _)| !path.is_empty() && parent_of(path) == self.path)
            .map(|(path, node)| {
                let name = path.rsplit('/').next().unwrap_or(path);
                DirEntry::new(name, node.kind)
            })
            .collect();
        Ok(Box::new(Listing {
            entries: entries.into_iter(),
        }))
    }

    fn create_file(&self, name: &str) -> FsResult<()> {
        self.require_dir()?;
        self.shared.insert(&join(&self.path, name), NodeKind::File)
    }

    fn create_dir(&self, name: &str) -> FsResult<()> {
        self.require_dir()?;
        self.shared
            .insert(&join(&self.path, name), NodeKind::Directory)
    }

    fn release(&mut self) {
        let mut live = self.shared.live.borrow_mut();
        match live.get_mut(&self.path) {
            Some(count) if *count > 0 => *count -= 1,
            _ => self.shared.over_released.set(self.shared.over_released.get() + 1),
        }
        self.shared.releases.borrow_mut().push(self.path.clone());
    }
}

struct EmptyFile;

impl OpenFile for EmptyFile {
    fn read(&mut self, _buf: &mut [u8]) -> FsResult<usize> {
        Ok(0)
    }

    fn seek(&mut self, _offset: u64) -> FsResult<u64> {
        Ok(0)
    }

    fn size(&self) -> FsResult<u64> {
        Ok(0)
    }
}

struct Listing {
    entries: std::vec::IntoIter<DirEntry>,
}

impl OpenDir for Listing {
    fn next_entry(&mut self) -> FsResult<Option<DirEntry>> {
        Ok(self.entries.next())
    }
}

/// Bootstrap helper for tests
///
/// Builds a backend with the given directories and a filesystem context
/// rooted at it.
pub fn test_bootstrap(dirs: &[&str]) -> (CountingFs, FileSystem) {
    let backend = CountingFs::with_dirs(dirs);
    let mut fs = FileSystem::new();
    fs.set_root(backend.root());
    (backend, fs)
}

/// Builds a working-directory stack rooted at `backend`, then moves it to
/// `path`
pub fn stack_at(backend: &CountingFs, path: &str) -> FsResult<CwdStack> {
    let mut cwd = CwdStack::new();
    cwd.install_root(backend.root());
    let (depth, owned) =
        vfs_core::resolve(&cwd, path, None, vfs_types::DEFAULT_MAX_RECURSION)?.into_owned();
    cwd.commit(depth, owned);
    Ok(cwd)
}
