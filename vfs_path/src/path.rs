//! Path segment scanning
//!
//! This module splits paths into segments and validates entry names.

use vfs_types::{FsError, FsResult};

/// A single classified path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `.`
    CurDir,
    /// `..`
    ParentDir,
    /// Any other non-empty segment
    Name(&'a str),
}

impl<'a> Segment<'a> {
    fn classify(text: &'a str) -> Self {
        match text {
            "." => Segment::CurDir,
            ".." => Segment::ParentDir,
            name => Segment::Name(name),
        }
    }
}

/// Iterator over the segments of a path
///
/// # Examples
///
/// ```
/// use vfs_path::{Segment, Segments};
///
/// let segments: Vec<_> = Segments::new("docs//./notes/..").collect();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Name("docs"),
///         Segment::CurDir,
///         Segment::Name("notes"),
///         Segment::ParentDir,
///     ]
/// );
///
/// // Bounded to the parent of the final component
/// let parent: Vec<_> = Segments::bounded("docs/notes/todo.txt", 10).collect();
/// assert_eq!(parent, vec![Segment::Name("docs"), Segment::Name("notes")]);
/// ```
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Segments<'a> {
    /// Scans the whole path
    pub fn new(path: &'a str) -> Self {
        Self { rest: path }
    }

    /// Scans at most `max_len` bytes of the path
    ///
    /// Running out of bytes ends the scan cleanly; it is not an error. Only
    /// segments that end before the cap are produced, so a cap landing inside
    /// a segment drops that segment rather than yielding a prefix of it.
    pub fn bounded(path: &'a str, max_len: usize) -> Self {
        let bytes = path.as_bytes();
        let mut end = max_len.min(path.len());
        if end < path.len() && bytes[end] != b'/' {
            end = bytes[..end]
                .iter()
                .rposition(|&b| b == b'/')
                .map_or(0, |idx| idx + 1);
        }
        Self { rest: &path[..end] }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let trimmed = self.rest.trim_start_matches('/');
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }

        let end = trimmed.find('/').unwrap_or(trimmed.len());
        let (segment, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(Segment::classify(segment))
    }
}

/// Returns true if the path starts at the root
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Splits a path into the byte length of its parent part and its final component
///
/// The parent part excludes the final `/`. A path without any `/` has an
/// empty parent (the current directory).
///
/// ```
/// use vfs_path::split_parent;
///
/// assert_eq!(split_parent("docs/todo.txt"), (4, "todo.txt"));
/// assert_eq!(split_parent("/todo.txt"), (0, "todo.txt"));
/// assert_eq!(split_parent("todo.txt"), (0, "todo.txt"));
/// assert_eq!(split_parent("docs/"), (4, ""));
/// ```
pub fn split_parent(path: &str) -> (usize, &str) {
    match path.rfind('/') {
        Some(idx) => (idx, &path[idx + 1..]),
        None => (0, path),
    }
}

/// Checks that a name can be used for a new directory entry
pub fn is_valid_name(name: &str) -> FsResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains('\0')
    {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}
