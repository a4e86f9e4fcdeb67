//! Open file and directory sessions

use serde::{Deserialize, Serialize};
use vfs_types::{FsError, FsResult, NodeKind};

/// One entry produced by a directory session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Entry name, without any path
    pub name: String,
    /// Kind of node the entry names
    pub kind: NodeKind,
}

impl DirEntry {
    /// Creates a new directory entry
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// An open file
pub trait OpenFile {
    /// Reads from the current position into `buf`, returning the byte count
    fn read(&mut self, buf: &mut [u8]) -> FsResult<usize>;

    /// Writes `buf` at the current position, returning the byte count
    fn write(&mut self, _buf: &[u8]) -> FsResult<usize> {
        Err(FsError::NotSupported)
    }

    /// Moves the position to `offset` bytes from the start
    fn seek(&mut self, offset: u64) -> FsResult<u64>;

    /// Current file length in bytes
    fn size(&self) -> FsResult<u64>;

    /// Reads everything from the current position to the end
    fn read_to_end(&mut self, out: &mut Vec<u8>) -> FsResult<usize> {
        let mut chunk = [0u8; 512];
        let mut total = 0;
        loop {
            let n = self.read(&mut chunk)?;
            if n == 0 {
                return Ok(total);
            }
            out.extend_from_slice(&chunk[..n]);
            total += n;
        }
    }
}

/// An open directory
pub trait OpenDir {
    /// Returns the next entry, or `None` once the directory is exhausted
    fn next_entry(&mut self) -> FsResult<Option<DirEntry>>;

    /// Collects the remaining entries
    fn entries(&mut self) -> FsResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        while let Some(entry) = self.next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}
