//! Archive discovery and decompressed line readers.
//!
//! Inputs are local `.json.bz2` or `.json.gz` files holding one JSON record
//! per line. Readers count compressed bytes so workers can report progress.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;

use crate::error::IngestError;

/// Buffer size for decompressed archive readers (256KB)
const ARCHIVE_BUF_SIZE: usize = 256 * 1024;

/// Glob suffixes matched under the input directory
const ARCHIVE_PATTERNS: [&str; 2] = ["**/*.json.bz2", "**/*.json.gz"];

/// Buffered reader over a decompressed archive
pub type ArchiveReader = BufReader<Box<dyn Read + Send>>;

/// Shared byte counter for progress tracking
pub type ByteCounter = Arc<AtomicU64>;

/// Compression scheme of an input archive, derived from its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Bzip2,
    Gzip,
}

impl Compression {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "bz2" => Some(Self::Bzip2),
            "gz" => Some(Self::Gzip),
            _ => None,
        }
    }
}

/// Recursively list every archive under `dir`, sorted by path.
///
/// A missing directory is a configuration error; an unreadable entry
/// inside it is an I/O error.
pub fn discover_archives(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::config(format!(
            "input directory {} does not exist",
            dir.display()
        )));
    }

    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();
    for suffix in ARCHIVE_PATTERNS {
        let pattern = format!("{base}/{suffix}");
        let entries = glob::glob(&pattern)
            .map_err(|e| IngestError::config(format!("bad archive pattern {pattern}: {e}")))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    let path = e.path().to_path_buf();
                    return Err(IngestError::io(path, e.into()));
                }
            }
        }
    }
    files.sort();
    files.dedup();
    log::debug!("Found {} archives under {}", files.len(), dir.display());
    Ok(files)
}

/// Open an archive for line reading.
///
/// Returns (reader, compressed_byte_counter, compressed_size)
pub fn open_archive(path: &Path) -> Result<(ArchiveReader, ByteCounter, u64), IngestError> {
    let compression = Compression::from_path(path).ok_or_else(|| {
        IngestError::config(format!("unsupported archive type: {}", path.display()))
    })?;

    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let total_bytes = file.metadata().map_err(|e| IngestError::io(path, e))?.len();

    let counter = Arc::new(AtomicU64::new(0));
    let counting = CountingReader {
        inner: BufReader::new(file),
        count: counter.clone(),
    };
    let decoder: Box<dyn Read + Send> = match compression {
        Compression::Bzip2 => Box::new(MultiBzDecoder::new(counting)),
        Compression::Gzip => Box::new(MultiGzDecoder::new(counting)),
    };

    Ok((
        BufReader::with_capacity(ARCHIVE_BUF_SIZE, decoder),
        counter,
        total_bytes,
    ))
}

/// Reader wrapper that tracks bytes read
pub struct CountingReader<R> {
    inner: R,
    count: ByteCounter,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}
