//! In-memory filesystem backend
//!
//! A directory is a map from names to child nodes; a file is a byte vector.
//! Nodes are shared between the tree and any handles or sessions that refer
//! to them, so a file opened through one handle stays readable after the
//! handle is released.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::trace;
use vfs_inode::{DirEntry, Inode, InodeHandle, OpenDir, OpenFile};
use vfs_path::{is_valid_name, split_parent, Segment, Segments};
use vfs_types::{FsError, FsResult, NodeId, NodeKind, OpenFlags};

type NodeRef = Rc<RefCell<MemNode>>;

#[derive(Debug)]
enum NodeData {
    Directory(BTreeMap<String, NodeRef>),
    File(Vec<u8>),
}

#[derive(Debug)]
struct MemNode {
    id: NodeId,
    data: NodeData,
}

impl MemNode {
    fn directory() -> NodeRef {
        Rc::new(RefCell::new(Self {
            id: NodeId::new(),
            data: NodeData::Directory(BTreeMap::new()),
        }))
    }

    fn file(contents: Vec<u8>) -> NodeRef {
        Rc::new(RefCell::new(Self {
            id: NodeId::new(),
            data: NodeData::File(contents),
        }))
    }

    fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Directory(_) => NodeKind::Directory,
            NodeData::File(_) => NodeKind::File,
        }
    }

    /// Adds a child entry
    ///
    /// Fails with `AlreadyExists` if the name is taken.
    fn add_child(&mut self, name: &str, child: NodeRef) -> FsResult<()> {
        is_valid_name(name)?;
        match &mut self.data {
            NodeData::Directory(entries) => {
                if entries.contains_key(name) {
                    return Err(FsError::AlreadyExists);
                }
                entries.insert(name.to_string(), child);
                Ok(())
            }
            NodeData::File(_) => Err(FsError::NotADirectory),
        }
    }

    fn child(&self, name: &str) -> FsResult<NodeRef> {
        match &self.data {
            NodeData::Directory(entries) => entries.get(name).cloned().ok_or(FsError::NotFound),
            NodeData::File(_) => Err(FsError::NotADirectory),
        }
    }
}

/// Counts handles handed out and handles released
#[derive(Debug, Default)]
struct HandleStats {
    acquired: Cell<usize>,
    released: Cell<usize>,
}

fn new_handle(stats: &Rc<HandleStats>, node: NodeRef) -> InodeHandle {
    stats.acquired.set(stats.acquired.get() + 1);
    InodeHandle::new(MemInode {
        node,
        stats: Rc::clone(stats),
    })
}

/// An in-memory filesystem
///
/// Cloning a `MemFs` yields another reference to the same tree.
///
/// # Examples
///
/// ```
/// use vfs_memfs::MemFs;
///
/// let fs = MemFs::new();
/// fs.create_dir_all("docs/notes").unwrap();
/// fs.write_file("docs/notes/todo.txt", b"milk").unwrap();
///
/// let root = fs.root();
/// let docs = root.lookup("docs").unwrap();
/// assert!(docs.is_dir().unwrap());
/// assert_eq!(fs.live_handles(), 2);
///
/// drop(docs);
/// drop(root);
/// assert_eq!(fs.live_handles(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MemFs {
    root: NodeRef,
    stats: Rc<HandleStats>,
}

impl MemFs {
    /// Creates a filesystem holding only an empty root directory
    pub fn new() -> Self {
        Self {
            root: MemNode::directory(),
            stats: Rc::new(HandleStats::default()),
        }
    }

    /// Returns a new handle to the root directory
    pub fn root(&self) -> InodeHandle {
        new_handle(&self.stats, Rc::clone(&self.root))
    }

    /// Identity of the root directory
    pub fn root_id(&self) -> NodeId {
        self.root.borrow().id
    }

    /// Creates a directory and any missing parents
    ///
    /// Paths are relative to the root and may only contain plain names.
    pub fn create_dir_all(&self, path: &str) -> FsResult<()> {
        let mut current = Rc::clone(&self.root);
        for segment in Segments::new(path) {
            let name = plain_name(segment)?;
            let existing = current.borrow().child(name);
            let next = match existing {
                Ok(child) => {
                    if child.borrow().kind() != NodeKind::Directory {
                        return Err(FsError::NotADirectory);
                    }
                    child
                }
                Err(FsError::NotFound) => {
                    let child = MemNode::directory();
                    current.borrow_mut().add_child(name, Rc::clone(&child))?;
                    child
                }
                Err(err) => return Err(err),
            };
            current = next;
        }
        Ok(())
    }

    /// Creates or replaces a file's contents; the parent must exist
    pub fn write_file(&self, path: &str, contents: &[u8]) -> FsResult<()> {
        let (parent_len, leaf) = split_parent(path);
        is_valid_name(leaf)?;
        let parent = self.walk(&path[..parent_len])?;

        let existing = parent.borrow().child(leaf);
        match existing {
            Ok(node) => {
                let mut node = node.borrow_mut();
                match &mut node.data {
                    NodeData::File(data) => {
                        *data = contents.to_vec();
                        Ok(())
                    }
                    NodeData::Directory(_) => Err(FsError::NotAFile),
                }
            }
            Err(FsError::NotFound) => parent
                .borrow_mut()
                .add_child(leaf, MemNode::file(contents.to_vec())),
            Err(err) => Err(err),
        }
    }

    /// Returns a copy of a file's contents
    pub fn read_file(&self, path: &str) -> FsResult<Vec<u8>> {
        let node = self.walk(path)?;
        let node = node.borrow();
        match &node.data {
            NodeData::File(data) => Ok(data.clone()),
            NodeData::Directory(_) => Err(FsError::NotAFile),
        }
    }

    /// Returns true if a node exists at `path`
    pub fn exists(&self, path: &str) -> bool {
        self.walk(path).is_ok()
    }

    /// Identity of the node at `path`
    pub fn node_id(&self, path: &str) -> FsResult<NodeId> {
        let node = self.walk(path)?;
        let id = node.borrow().id;
        Ok(id)
    }

    /// Number of handles acquired and not yet released
    pub fn live_handles(&self) -> usize {
        self.stats.acquired.get() - self.stats.released.get()
    }

    /// Total handles ever handed out
    pub fn acquired(&self) -> usize {
        self.stats.acquired.get()
    }

    /// Total handles released
    pub fn released(&self) -> usize {
        self.stats.released.get()
    }

    fn walk(&self, path: &str) -> FsResult<NodeRef> {
        let mut current = Rc::clone(&self.root);
        for segment in Segments::new(path) {
            let name = plain_name(segment)?;
            let next = current.borrow().child(name)?;
            current = next;
        }
        Ok(current)
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

fn plain_name(segment: Segment<'_>) -> FsResult<&str> {
    match segment {
        Segment::Name(name) => Ok(name),
        Segment::CurDir => Err(FsError::InvalidName(".".to_string())),
        Segment::ParentDir => Err(FsError::InvalidName("..".to_string())),
    }
}

struct MemInode {
    node: NodeRef,
    stats: Rc<HandleStats>,
}

impl Inode for MemInode {
    fn node_id(&self) -> NodeId {
        self.node.borrow().id
    }

    fn is_dir(&self) -> FsResult<bool> {
        Ok(self.node.borrow().kind() == NodeKind::Directory)
    }

    fn lookup(&self, name: &str) -> FsResult<InodeHandle> {
        let child = self.node.borrow().child(name)?;
        trace!(name, "memfs lookup");
        Ok(new_handle(&self.stats, child))
    }

    fn open_as_file(&self, flags: OpenFlags) -> FsResult<Box<dyn OpenFile>> {
        let size = match &mut self.node.borrow_mut().data {
            NodeData::File(data) => {
                if flags.is_writable() && flags.contains(OpenFlags::TRUNCATE) {
                    data.clear();
                }
                data.len()
            }
            NodeData::Directory(_) => return Err(FsError::NotAFile),
        };

        let append = flags.contains(OpenFlags::APPEND);
        Ok(Box::new(MemFile {
            node: Rc::clone(&self.node),
            pos: if append { size } else { 0 },
            writable: flags.is_writable(),
            append,
        }))
    }

    fn open_as_dir(&self) -> FsResult<Box<dyn OpenDir>> {
        let node = self.node.borrow();
        let entries: Vec<DirEntry> = match &node.data {
            NodeData::Directory(entries) => entries
                .iter()
                .map(|(name, child)| DirEntry::new(name.clone(), child.borrow().kind()))
                .collect(),
            NodeData::File(_) => return Err(FsError::NotADirectory),
        };
        Ok(Box::new(MemDir {
            entries: entries.into_iter(),
        }))
    }

    fn create_file(&self, name: &str) -> FsResult<()> {
        self.node
            .borrow_mut()
            .add_child(name, MemNode::file(Vec::new()))
    }

    fn create_dir(&self, name: &str) -> FsResult<()> {
        self.node.borrow_mut().add_child(name, MemNode::directory())
    }

    fn release(&mut self) {
        self.stats.released.set(self.stats.released.get() + 1);
    }
}

struct MemFile {
    node: NodeRef,
    pos: usize,
    writable: bool,
    append: bool,
}

impl OpenFile for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> FsResult<usize> {
        let node = self.node.borrow();
        let data = match &node.data {
            NodeData::File(data) => data,
            NodeData::Directory(_) => return Err(FsError::NotAFile),
        };

        let start = self.pos.min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        self.pos = start + n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> FsResult<usize> {
        if !self.writable {
            return Err(FsError::Backend("file not opened for writing".to_string()));
        }

        let mut node = self.node.borrow_mut();
        let data = match &mut node.data {
            NodeData::File(data) => data,
            NodeData::Directory(_) => return Err(FsError::NotAFile),
        };

        if self.append {
            self.pos = data.len();
        }
        // Files never have holes; a write may only start at or before the end
        if self.pos > data.len() {
            return Err(FsError::Backend("write offset past end of file".to_string()));
        }
        let end = self
            .pos
            .checked_add(buf.len())
            .ok_or_else(|| FsError::Backend("write extends past addressable size".to_string()))?;
        if data.len() < end {
            data.try_reserve(end - data.len())
                .map_err(|_| FsError::OutOfMemory)?;
            data.resize(end, 0);
        }
        data[self.pos..end].copy_from_slice(buf);
        self.pos = end;
        Ok(buf.len())
    }

    fn seek(&mut self, offset: u64) -> FsResult<u64> {
        self.pos = usize::try_from(offset)
            .map_err(|_| FsError::Backend("seek offset out of range".to_string()))?;
        Ok(offset)
    }

    fn size(&self) -> FsResult<u64> {
        match &self.node.borrow().data {
            NodeData::File(data) => Ok(data.len() as u64),
            NodeData::Directory(_) => Err(FsError::NotAFile),
        }
    }
}

struct MemDir {
    entries: std::vec::IntoIter<DirEntry>,
}

impl OpenDir for MemDir {
    fn next_entry(&mut self) -> FsResult<Option<DirEntry>> {
        Ok(self.entries.next())
    }
}
