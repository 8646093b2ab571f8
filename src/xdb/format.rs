//! xdb format constants, header and integer decoding.
//!
//! File structure:
//! ```text
//! +----------------------+
//! |  HEADER (256 bytes)  |  version, index policy, created_at, index pointers
//! +----------------------+
//! |  VECTOR INDEX        |  256 x 256 cells of (start_ptr, end_ptr), 8 bytes each
//! +----------------------+
//! |  REGION DATA         |  variable-length region strings
//! +----------------------+
//! |  SEGMENT INDEX       |  sorted 14-byte records (sip, eip, len, ptr)
//! +----------------------+
//! ```
//!
//! All integers are little-endian unsigned.

use std::net::Ipv4Addr;

use crate::{Error, Result};

/// Header block size in bytes.
pub const HEADER_INFO_LENGTH: usize = 256;

/// Vector index rows (first octet).
pub const VECTOR_INDEX_ROWS: usize = 256;

/// Vector index columns (second octet).
pub const VECTOR_INDEX_COLS: usize = 256;

/// Size of one vector index cell: two u32 pointers.
pub const VECTOR_INDEX_SIZE: usize = 8;

/// Total size of the vector index block (512 KiB).
pub const VECTOR_INDEX_LENGTH: usize = VECTOR_INDEX_ROWS * VECTOR_INDEX_COLS * VECTOR_INDEX_SIZE;

/// Size of one segment index record.
pub const SEGMENT_INDEX_SIZE: usize = 14;

/// Default database file name.
pub const DEFAULT_XDB_FILE: &str = "ip2region.xdb";

/// Read a little-endian u32 at `at`.
///
/// Panics if `buf` is shorter than `at + 4`; callers read fixed-size windows.
#[inline]
pub fn get_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Read a little-endian u16 at `at`.
#[inline]
pub fn get_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

/// Parse a strict dotted-quad IPv4 string into its u32 value.
pub fn ip_to_u32(ip: &str) -> Result<u32> {
    ip.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| Error::InvalidAddress(ip.to_string()))
}

/// Convert a u32 back to an address.
pub fn u32_to_ip(ip: u32) -> Ipv4Addr {
    Ipv4Addr::from(ip)
}

/// Offset of the vector cell for `ip`, relative to the end of the header.
#[inline]
pub fn vector_cell_offset(ip: u32) -> usize {
    let il0 = ((ip >> 24) & 0xFF) as usize;
    let il1 = ((ip >> 16) & 0xFF) as usize;
    il0 * VECTOR_INDEX_COLS * VECTOR_INDEX_SIZE + il1 * VECTOR_INDEX_SIZE
}

/// Index policy recorded in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexPolicy {
    VectorIndex,
    BTreeIndex,
    Unknown(u16),
}

impl IndexPolicy {
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => Self::VectorIndex,
            2 => Self::BTreeIndex,
            other => Self::Unknown(other),
        }
    }
}

/// Decoded header prefix.
///
/// The searcher never looks at these fields; they are exposed for tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version
    pub version: u16,
    /// Index policy
    pub index_policy: IndexPolicy,
    /// Unix timestamp when the file was generated
    pub created_at: u32,
    /// Offset of the first segment record
    pub start_index_ptr: u32,
    /// Offset of the last segment record
    pub end_index_ptr: u32,
}

impl Header {
    /// Decode the header from the first 256 bytes of an xdb image.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_INFO_LENGTH {
            return Err(Error::Truncated {
                offset: 0,
                len: HEADER_INFO_LENGTH,
                available: buf.len(),
            });
        }

        Ok(Self {
            version: get_u16(buf, 0),
            index_policy: IndexPolicy::from_u16(get_u16(buf, 2)),
            created_at: get_u32(buf, 4),
            start_index_ptr: get_u32(buf, 8),
            end_index_ptr: get_u32(buf, 12),
        })
    }

    /// Number of segment records between the two index pointers.
    pub fn segment_count(&self) -> u64 {
        if self.end_index_ptr < self.start_index_ptr {
            return 0;
        }
        u64::from(self.end_index_ptr - self.start_index_ptr) / SEGMENT_INDEX_SIZE as u64 + 1
    }
}

/// One vector index cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorCell {
    pub start_ptr: u32,
    pub end_ptr: u32,
}

impl VectorCell {
    /// Panics if `buf` is shorter than [`VECTOR_INDEX_SIZE`] bytes.
    pub fn decode(buf: &[u8]) -> Self {
        Self {
            start_ptr: get_u32(buf, 0),
            end_ptr: get_u32(buf, 4),
        }
    }

    /// Number of whole segment records addressed by this cell.
    pub fn record_count(&self) -> u64 {
        u64::from(self.end_ptr.saturating_sub(self.start_ptr)) / SEGMENT_INDEX_SIZE as u64
    }
}

/// One segment index record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRecord {
    pub start_ip: u32,
    pub end_ip: u32,
    pub data_len: u16,
    pub data_ptr: u32,
}

impl SegmentRecord {
    /// Panics if `buf` is shorter than [`SEGMENT_INDEX_SIZE`] bytes.
    pub fn decode(buf: &[u8]) -> Self {
        Self {
            start_ip: get_u32(buf, 0),
            end_ip: get_u32(buf, 4),
            data_len: get_u16(buf, 8),
            data_ptr: get_u32(buf, 10),
        }
    }
}
