//! Process-wide default searcher.

use arc_swap::ArcSwapOption;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::config::SearcherConfig;
use crate::error::{Error, Result};
use crate::Searcher;

/// Global searcher. Searches in flight keep the instance they loaded.
static GLOBAL_SEARCHER: Lazy<ArcSwapOption<Searcher>> = Lazy::new(ArcSwapOption::empty);

/// Install a global searcher built from `config`.
///
/// Replaces any previously installed searcher.
pub fn init_global(config: &SearcherConfig) -> Result<()> {
    let searcher = Searcher::from_config(config)?;
    install_global(searcher);

    log::info!(
        "Loaded global searcher from {:?} ({})",
        config.db_path,
        config.cache_policy.name()
    );
    Ok(())
}

/// Rebuild the global searcher, e.g. after the database file was replaced.
pub fn reload_global(config: &SearcherConfig) -> Result<()> {
    init_global(config)
}

/// Install an already constructed searcher as the global one.
pub fn install_global(searcher: Searcher) {
    GLOBAL_SEARCHER.store(Some(Arc::new(searcher)));
}

/// Check if a global searcher is installed.
pub fn is_global_initialized() -> bool {
    GLOBAL_SEARCHER.load().is_some()
}

/// Search with the global searcher.
///
/// # Examples
/// ```ignore
/// use ip2region::{global_search, init_global, SearcherConfig};
///
/// init_global(&SearcherConfig::default())?;
/// let region = global_search("1.2.3.4")?;
/// ```
pub fn global_search(ip: &str) -> Result<Option<Vec<u8>>> {
    let guard = GLOBAL_SEARCHER.load();
    match &*guard {
        Some(searcher) => searcher.search(ip),
        None => Err(Error::NotInitialized),
    }
}
