//! Console commands
//!
//! Each command maps to one filesystem operation and renders its result as
//! text. Failures are rendered too, prefixed with the command name.

use vfs_core::FileSystemOperations;
use vfs_types::OpenFlags;

/// Console command handler
pub struct CommandHandler<F> {
    /// Filesystem the commands operate on
    pub fs: F,
}

impl<F: FileSystemOperations> CommandHandler<F> {
    /// Creates a handler over a filesystem that already has a root
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Runs one input line
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>, String> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (line, ""),
        };
        let arg = rest.split_whitespace().next().unwrap_or("");

        let output = match command {
            "" => return Ok(None),
            "cd" => self.cd(if arg.is_empty() { "/" } else { arg })?,
            "pwd" => self.pwd()?,
            "ls" => self.ls(if arg.is_empty() { "." } else { arg })?.join("\n"),
            "stat" => self.stat(required(command, arg)?)?,
            "cat" => self.cat(required(command, arg)?)?,
            "touch" => self.touch(required(command, arg)?)?,
            "mkdir" => self.mkdir(required(command, arg)?)?,
            "realpath" => self.realpath(if arg.is_empty() { "." } else { arg })?,
            "write" => {
                let path = required(command, arg)?;
                let text = rest[path.len()..].trim_start();
                self.write(path, text)?
            }
            "help" => HELP.to_string(),
            other => return Err(format!("unknown command: {}", other)),
        };
        Ok(Some(output))
    }

    /// Changes the current directory
    ///
    /// Example: `cd /ram/docs`
    pub fn cd(&mut self, path: &str) -> Result<String, String> {
        self.fs
            .chdir(path)
            .map_err(|e| format!("cd failed: {}", e))?;
        Ok(String::new())
    }

    /// Prints the current directory
    pub fn pwd(&self) -> Result<String, String> {
        self.fs.getcwd().map_err(|e| format!("pwd failed: {}", e))
    }

    /// Lists directory contents
    ///
    /// Directories are shown with a trailing `/`.
    pub fn ls(&self, path: &str) -> Result<Vec<String>, String> {
        let entries = self
            .fs
            .opendir(path)
            .and_then(|mut dir| dir.entries())
            .map_err(|e| format!("ls failed: {}", e))?;

        Ok(entries
            .into_iter()
            .map(|entry| match entry.kind {
                vfs_types::NodeKind::Directory => format!("{}/", entry.name),
                vfs_types::NodeKind::File => entry.name,
            })
            .collect())
    }

    /// Displays node information
    ///
    /// Example: `stat docs/notes.txt`
    pub fn stat(&self, path: &str) -> Result<String, String> {
        let stat = self
            .fs
            .stat(path)
            .map_err(|e| format!("stat failed: {}", e))?;
        let canonical = self
            .fs
            .realpath(path)
            .map_err(|e| format!("stat failed: {}", e))?;
        Ok(format!("{}: {}", canonical, stat.kind()))
    }

    /// Reads a file as text
    pub fn cat(&self, path: &str) -> Result<String, String> {
        let mut contents = Vec::new();
        self.fs
            .open(path, OpenFlags::READ)
            .and_then(|mut file| file.read_to_end(&mut contents))
            .map_err(|e| format!("cat failed: {}", e))?;
        Ok(String::from_utf8_lossy(&contents).into_owned())
    }

    /// Creates an empty file if it does not exist
    pub fn touch(&self, path: &str) -> Result<String, String> {
        self.fs
            .open(path, OpenFlags::WRITE | OpenFlags::CREATE)
            .map_err(|e| format!("touch failed: {}", e))?;
        Ok(String::new())
    }

    /// Creates a directory
    ///
    /// Example: `mkdir docs/projects`
    pub fn mkdir(&self, path: &str) -> Result<String, String> {
        self.fs
            .mkdir(path)
            .map_err(|e| format!("mkdir failed: {}", e))?;
        Ok(format!("Created directory: {}", path))
    }

    /// Replaces a file's contents, creating it if needed
    ///
    /// Example: `write notes.txt buy milk`
    pub fn write(&self, path: &str, text: &str) -> Result<String, String> {
        let written = self
            .fs
            .open(
                path,
                OpenFlags::WRITE | OpenFlags::CREATE | OpenFlags::TRUNCATE,
            )
            .and_then(|mut file| file.write(text.as_bytes()))
            .map_err(|e| format!("write failed: {}", e))?;
        Ok(format!("Wrote {} bytes to {}", written, path))
    }

    /// Prints the canonical form of a path
    pub fn realpath(&self, path: &str) -> Result<String, String> {
        self.fs
            .realpath(path)
            .map_err(|e| format!("realpath failed: {}", e))
    }
}

const HELP: &str = "\
cd [path]           change directory
pwd                 print current directory
ls [path]           list directory
stat <path>         show node kind
cat <path>          print file
touch <path>        create empty file
mkdir <path>        create directory
write <path> <text> replace file contents
realpath [path]     print canonical path";

fn required<'a>(command: &str, arg: &'a str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("{}: missing path", command))
    } else {
        Ok(arg)
    }
}
