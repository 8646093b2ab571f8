//! xdb searcher: vector index lookup, segment binary search, region read.

use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::format::*;
use super::loader::{load_content_from_file, load_vector_index_from_file};
use super::source::{BufferSource, DataSource, FileSource};
use crate::config::{CachePolicy, SearcherConfig};
use crate::{Error, Result};

/// IPv4 region searcher over an xdb image.
///
/// A searcher is fixed to one data source for its whole lifetime. Every
/// construction mode gives the same answers for the same bytes.
///
/// # Example
///
/// ```ignore
/// use ip2region::Searcher;
///
/// let searcher = Searcher::with_file_only("ip2region.xdb")?;
/// if let Some(region) = searcher.search("1.2.3.4")? {
///     println!("{}", String::from_utf8_lossy(&region));
/// }
/// searcher.close();
/// ```
pub struct Searcher {
    source: Box<dyn DataSource>,
    /// Preloaded vector index block, when cached.
    vector_index: Option<Arc<[u8]>>,
    io_count: AtomicU64,
}

impl Searcher {
    /// Search through the file with no preloading.
    pub fn with_file_only(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_source(FileSource::open(path)?))
    }

    /// Search through the file, with the vector index already in memory.
    pub fn with_vector_index(
        path: impl AsRef<Path>,
        vector_index: impl Into<Arc<[u8]>>,
    ) -> Result<Self> {
        let vector_index = vector_index.into();
        if vector_index.len() < VECTOR_INDEX_LENGTH {
            return Err(Error::Truncated {
                offset: HEADER_INFO_LENGTH as u64,
                len: VECTOR_INDEX_LENGTH,
                available: vector_index.len(),
            });
        }

        let mut searcher = Self::with_source(FileSource::open(path)?);
        searcher.vector_index = Some(vector_index);
        Ok(searcher)
    }

    /// Search entirely in memory over the full xdb content.
    pub fn with_buffer(content: impl Into<Arc<[u8]>>) -> Self {
        Self::with_source(BufferSource::new(content.into()))
    }

    /// Search over a read-only memory map of the file.
    pub fn with_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mmap = unsafe { Mmap::map(&file)? };

        log::debug!("Mapped {} bytes of {:?}", mmap.len(), path.as_ref());

        Ok(Self::with_source(BufferSource::new(mmap)))
    }

    /// Search over any data source.
    pub fn with_source<S: DataSource + 'static>(source: S) -> Self {
        log::debug!("Created xdb searcher over {} source", source.kind());

        Self {
            source: Box::new(source),
            vector_index: None,
            io_count: AtomicU64::new(0),
        }
    }

    /// Build a searcher as described by a configuration.
    pub fn from_config(config: &SearcherConfig) -> Result<Self> {
        let path = &config.db_path;
        match config.cache_policy {
            CachePolicy::File => Self::with_file_only(path),
            CachePolicy::VectorIndex => {
                let vector_index = load_vector_index_from_file(path)?;
                Self::with_vector_index(path, vector_index)
            }
            CachePolicy::Content => Ok(Self::with_buffer(load_content_from_file(path)?)),
            CachePolicy::Mmap => Self::with_mmap(path),
        }
    }

    /// Find the region of a dotted-quad IPv4 address.
    ///
    /// Returns `Ok(None)` when no segment covers the address.
    pub fn search(&self, ip: &str) -> Result<Option<Vec<u8>>> {
        self.search_u32(ip_to_u32(ip)?)
    }

    /// Find the region of an already parsed address.
    pub fn search_addr(&self, ip: Ipv4Addr) -> Result<Option<Vec<u8>>> {
        self.search_u32(u32::from(ip))
    }

    /// Find the region of an address given as its u32 value.
    pub fn search_u32(&self, ip: u32) -> Result<Option<Vec<u8>>> {
        let cell = self.vector_cell(ip)?;
        log::trace!(
            "{}: vector cell [{}, {})",
            u32_to_ip(ip),
            cell.start_ptr,
            cell.end_ptr
        );

        match self.find_segment(ip, cell)? {
            Some(record) => self.read_region(ip, &record),
            None => Ok(None),
        }
    }

    /// Decode the header of the underlying image.
    pub fn header(&self) -> Result<Header> {
        let buf = self.read_index(0, HEADER_INFO_LENGTH)?;
        Header::decode(&buf)
    }

    /// Release the underlying file handle, if any.
    ///
    /// Calling this more than once is harmless. Searches on a closed
    /// file-backed searcher fail with [`Error::Closed`].
    pub fn close(&self) {
        self.source.close();
    }

    /// Number of data-source reads issued so far.
    pub fn io_count(&self) -> u64 {
        self.io_count.load(Ordering::Relaxed)
    }

    /// Kind of the backing data source.
    pub fn source_kind(&self) -> &'static str {
        self.source.kind()
    }

    fn vector_cell(&self, ip: u32) -> Result<VectorCell> {
        let offset = vector_cell_offset(ip);
        if let Some(ref vector_index) = self.vector_index {
            return Ok(VectorCell::decode(
                &vector_index[offset..offset + VECTOR_INDEX_SIZE],
            ));
        }

        let buf = self.read_index((HEADER_INFO_LENGTH + offset) as u64, VECTOR_INDEX_SIZE)?;
        Ok(VectorCell::decode(&buf))
    }

    fn find_segment(&self, ip: u32, cell: VectorCell) -> Result<Option<SegmentRecord>> {
        let mut low = 0u64;
        let mut high = cell.record_count();

        while low < high {
            let mid = low + (high - low) / 2;
            let pos = u64::from(cell.start_ptr) + mid * SEGMENT_INDEX_SIZE as u64;

            let buf = self.read_index(pos, SEGMENT_INDEX_SIZE)?;
            let record = SegmentRecord::decode(&buf);

            if ip < record.start_ip {
                high = mid;
            } else if ip > record.end_ip {
                low = mid + 1;
            } else {
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    fn read_region(&self, ip: u32, record: &SegmentRecord) -> Result<Option<Vec<u8>>> {
        let offset = u64::from(record.data_ptr);
        let len = usize::from(record.data_len);

        self.io_count.fetch_add(1, Ordering::Relaxed);
        let buf = self.source.read(offset, len)?;

        // A payload cut short by a truncated image degrades to "no region".
        if buf.len() < len {
            log::warn!(
                "{}: region data truncated at offset {} ({} of {} bytes)",
                u32_to_ip(ip),
                offset,
                buf.len(),
                len
            );
            return Ok(None);
        }

        Ok(Some(buf.into_owned()))
    }

    fn read_index(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        self.io_count.fetch_add(1, Ordering::Relaxed);
        self.source.read_exact_at(offset, len)
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("source", &self.source.kind())
            .field("vector_index_cached", &self.vector_index.is_some())
            .field("io_count", &self.io_count())
            .finish()
    }
}
