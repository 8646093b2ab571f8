//! xdb binary format and searcher.
//!
//! The xdb format is a two-level index over sorted IPv4 ranges: a fixed
//! 256x256 vector index keyed by the first two octets narrows each lookup to
//! a short run of 14-byte segment records, which is then binary searched.
//!
//! # File Structure
//!
//! ```text
//! +------------------+
//! |     HEADER       |  256 bytes (fixed)
//! +------------------+
//! |  VECTOR INDEX    |  512 KiB (fixed)
//! +------------------+
//! |   REGION DATA    |  variable
//! +------------------+
//! |  SEGMENT INDEX   |  variable, 14 bytes per record
//! +------------------+
//! ```

mod format;
mod loader;
mod searcher;
pub mod source;


pub use format::*;
pub use loader::{
    load_content, load_content_from_file, load_vector_index, load_vector_index_from_file,
};
pub use searcher::Searcher;
pub use source::{BufferSource, DataSource, FileSource};
