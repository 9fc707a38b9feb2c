//! Read-only memory map of an index file written by the indexer.
//!
//! The file is mapped once and shared by every scan, sort and lookup of that
//! index generation. The indexer must not rewrite a mapped file in place; a
//! new generation goes to a new file.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::{Mmap, MmapOptions};

use crate::error::Result;
use crate::layout::RecordLayout;
use crate::record::RecordTable;

pub struct MappedIndex {
    path: PathBuf,
    /// `None` for empty files, which cannot be mapped.
    map: Option<Mmap>,
}

impl std::fmt::Debug for MappedIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedIndex")
            .field("path", &self.path)
            .field("len", &self.len())
            .finish()
    }
}

impl MappedIndex {
    /// Maps the index file at `path` read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        let map = if len == 0 {
            None
        } else {
            // SAFETY: the indexer never truncates or rewrites a published index
            // file, so the mapping stays valid and unchanged while we hold it.
            Some(unsafe { MmapOptions::new().map(&file)? })
        };

        log::debug!("mapped index {} ({} bytes)", path.display(), len);
        Ok(Self {
            path: path.to_path_buf(),
            map,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// Views the mapped bytes as records laid out per `layout`.
    pub fn table(&self, layout: RecordLayout) -> RecordTable<'_> {
        RecordTable::new(self.bytes(), layout)
    }
}
