//! ip2region - offline IPv4 region lookup over the xdb format.
//!
//! This crate answers "which region does this IPv4 address belong to?" by
//! querying a prebuilt xdb database, without any network access.
//!
//! # Features
//!
//! - **Two-level index**: vector index + binary search over segment records
//! - **Interchangeable access modes**: file, cached vector index, in-memory
//!   buffer and memory-mapped file all give identical answers
//! - **Thread-safe**: a `Searcher` is `Send + Sync`
//! - **Bounded IO**: one cell read, O(log n) record reads, one payload read
//!
//! # Quick Start
//!
//! ```ignore
//! use ip2region::{load_content_from_file, Searcher};
//!
//! // Read straight from the file
//! let searcher = Searcher::with_file_only("ip2region.xdb")?;
//! let region = searcher.search("1.2.3.4")?;
//!
//! // Or keep the whole database in memory
//! let content = load_content_from_file("ip2region.xdb")?;
//! let searcher = Searcher::with_buffer(content);
//! let region = searcher.search("1.2.3.4")?;
//! ```
//!
//! # Outcomes
//!
//! - `Ok(Some(bytes))`: the raw region string of the matching segment
//! - `Ok(None)`: the address is not covered by the database
//! - `Err(Error::InvalidAddress)`: the input is not a dotted-quad address
//! - `Err(e)` with `e.is_io()`: the data source could not be read

mod config;
mod error;
mod global;
mod region;

pub mod xdb;

// Re-export core types
pub use config::{CachePolicy, SearcherConfig};
pub use error::{Error, Result};
pub use region::Region;
pub use xdb::{
    load_content, load_content_from_file, load_vector_index, load_vector_index_from_file,
    DataSource, Header, Searcher,
};

// Re-export global API functions
pub use global::{global_search, init_global, install_global, is_global_initialized, reload_global};
