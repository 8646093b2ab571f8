//! Helpers that pull xdb content into memory.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::format::{HEADER_INFO_LENGTH, VECTOR_INDEX_LENGTH};
use crate::Result;

/// Load the whole content of a seekable source.
///
/// The size is taken from the end position; a read that comes up short of
/// that size is an error.
pub fn load_content<R: Read + Seek>(reader: &mut R) -> Result<Vec<u8>> {
    let size = reader.seek(SeekFrom::End(0))?;
    let size = usize::try_from(size).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("xdb content of {} bytes does not fit in memory", size),
        )
    })?;

    reader.seek(SeekFrom::Start(0))?;

    let mut buf = vec![0u8; size];
    reader.read_exact(&mut buf)?;

    Ok(buf)
}

/// Load the whole content of the file at `path`.
pub fn load_content_from_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let buf = load_content(&mut file)?;

    log::debug!("Loaded {} bytes of xdb content from {:?}", buf.len(), path);
    Ok(buf)
}

/// Load the vector index block that follows the header.
pub fn load_vector_index<R: Read + Seek>(reader: &mut R) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(HEADER_INFO_LENGTH as u64))?;

    let mut buf = vec![0u8; VECTOR_INDEX_LENGTH];
    reader.read_exact(&mut buf)?;

    Ok(buf)
}

/// Load the vector index block of the file at `path`.
pub fn load_vector_index_from_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let mut file = File::open(path.as_ref())?;
    load_vector_index(&mut file)
}
