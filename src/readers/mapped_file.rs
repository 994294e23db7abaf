use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{ProcessingError, Result};

/// Read-only memory mapping of the input file.
///
/// Chunk tables borrow station names straight out of the mapping, so the
/// `MappedFile` must be held across the whole aggregate-and-render
/// pipeline. The borrow checker enforces this: the tables carry the
/// mapping's lifetime.
#[derive(Debug)]
pub struct MappedFile {
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Map the file at `path` read-only.
    ///
    /// Zero-length files cannot be mapped on every platform and are held
    /// as an empty byte range instead.
    pub fn open(path: &Path) -> Result<Self> {
        let map_err = |source| ProcessingError::Map {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(map_err)?;
        let len = file.metadata().map_err(map_err)?.len();

        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: the mapping is read-only and the input file is not
            // mutated for the lifetime of the run.
            Some(unsafe { Mmap::map(&file) }.map_err(map_err)?)
        };

        Ok(Self { mmap })
    }

    pub fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
