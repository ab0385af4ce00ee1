//! Byte sinks and sources the codec reads from and writes to.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait ByteSink {
    /// Replaces the sink's contents with `bytes`.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

pub trait ByteSource {
    fn read_bytes(&mut self) -> io::Result<Vec<u8>>;
}

impl ByteSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.clear();
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl ByteSource for &[u8] {
    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(bytes)
    }
}

/// A file on disk. Writing creates missing parent directories and replaces
/// the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    path: PathBuf,
}

impl FileLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSink for FileLocation {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)
    }
}

impl ByteSource for FileLocation {
    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}
