//! Random-access data sources backing a [`Searcher`](super::Searcher).
//!
//! Two families implement [`DataSource`]:
//! - [`FileSource`]: an exclusively owned file handle, seek + read per call
//! - [`BufferSource`]: any immutable byte container (`Arc<[u8]>`, `Mmap`, ...)
//!   windowed without copying

use parking_lot::Mutex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Read capability over an xdb image.
pub trait DataSource: Send + Sync {
    /// Read up to `len` bytes starting at `offset`.
    ///
    /// Returns fewer bytes only when the end of the data is reached. Seek and
    /// read failures, and reads on a released handle, are errors.
    fn read(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>>;

    /// Read exactly `len` bytes, treating a short window as truncation.
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        let buf = self.read(offset, len)?;
        if buf.len() < len {
            return Err(Error::Truncated {
                offset,
                len,
                available: buf.len(),
            });
        }
        Ok(buf)
    }

    /// Release any held resources. Must be safe to call more than once.
    fn close(&self) {}

    /// Short name used in logs.
    fn kind(&self) -> &'static str;
}

/// File-backed source.
///
/// The handle sits behind a mutex so that each seek + read pair is atomic,
/// which lets one searcher be shared across threads.
pub struct FileSource {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileSource {
    /// Open `path` for random-access reads.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        log::debug!("Opened xdb file {:?}", path);

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(Some(file)),
        })
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the handle has been released.
    pub fn is_closed(&self) -> bool {
        self.file.lock().is_none()
    }
}

impl DataSource for FileSource {
    fn read(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        let mut guard = self.file.lock();
        let file = guard.as_mut().ok_or(Error::Closed)?;

        file.seek(SeekFrom::Start(offset))?;

        let mut buf = Vec::with_capacity(len);
        file.take(len as u64).read_to_end(&mut buf)?;

        Ok(Cow::Owned(buf))
    }

    fn close(&self) {
        if self.file.lock().take().is_some() {
            log::debug!("Closed xdb file {:?}", self.path);
        }
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}

/// Buffer-backed source over an immutable byte container.
pub struct BufferSource<B> {
    data: B,
}

impl<B: AsRef<[u8]>> BufferSource<B> {
    pub fn new(data: B) -> Self {
        Self { data }
    }

    /// Total number of bytes available.
    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<B: AsRef<[u8]> + Send + Sync> DataSource for BufferSource<B> {
    fn read(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        let data = self.data.as_ref();
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(data.len());
        let end = start.saturating_add(len).min(data.len());

        Ok(Cow::Borrowed(&data[start..end]))
    }

    fn kind(&self) -> &'static str {
        "buffer"
    }
}
