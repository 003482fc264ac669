//! Destinations for exported documents.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Receives a finished document.
///
/// Layout and serialization never touch the outside world; delivery happens
/// only through a sink, once the bytes are complete.
pub trait DocumentSink {
    /// Take ownership of a complete document under the given file name.
    fn accept(&mut self, bytes: &[u8], file_name: &str) -> Result<()>;
}

/// Writes documents into a directory.
///
/// Each file is written to a hidden temporary name first and renamed into
/// place, so readers never observe a partially written document.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    overwrite: bool,
    written: Vec<PathBuf>,
}

impl FileSink {
    /// Create a sink writing into `dir`. The directory must exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: true,
            written: Vec::new(),
        }
    }

    /// Refuse to replace existing files.
    pub fn no_overwrite(mut self) -> Self {
        self.overwrite = false;
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DocumentSink for FileSink {
    fn accept(&mut self, bytes: &[u8], file_name: &str) -> Result<()> {
        validate_file_name(file_name)?;

        let target = self.dir.join(file_name);
        if !self.overwrite && target.exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", target.display()),
            )));
        }

        let temp = self.dir.join(format!(".{}.part", file_name));
        if let Err(e) = fs::write(&temp, bytes).and_then(|_| fs::rename(&temp, &target)) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        log::info!("Wrote {} ({} bytes)", target.display(), bytes.len());
        self.written.push(target);
        Ok(())
    }
}

/// Collects documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents received, in order.
    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }

    /// Bytes of the most recent document with this name.
    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl DocumentSink for MemorySink {
    fn accept(&mut self, bytes: &[u8], file_name: &str) -> Result<()> {
        validate_file_name(file_name)?;
        self.files.push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

fn validate_file_name(file_name: &str) -> Result<()> {
    let bad = file_name.is_empty()
        || file_name.starts_with('.')
        || file_name.contains(['/', '\\'])
        || file_name.contains('\0');
    if bad {
        return Err(Error::InvalidOption(format!(
            "Invalid output file name: {:?}",
            file_name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.accept(b"%PDF-1.5", "a.pdf").unwrap();
        sink.accept(b"%PDF-1.7", "a.pdf").unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("a.pdf"), Some(&b"%PDF-1.7"[..]));
        assert_eq!(sink.get("b.pdf"), None);
    }

    #[test]
    fn test_file_name_validation() {
        let mut sink = MemorySink::new();
        assert!(sink.accept(b"x", "../escape.pdf").is_err());
        assert!(sink.accept(b"x", "dir\\file.pdf").is_err());
        assert!(sink.accept(b"x", ".hidden").is_err());
        assert!(sink.accept(b"x", "").is_err());
        assert!(sink.is_empty());
    }
}
