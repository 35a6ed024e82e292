//! Shared helpers for locating the project and its cache.

use std::path::PathBuf;

use parvaj_cache::{default_cache_dir, CacheStore};

use crate::GlobalArgs;

/// Returns the project root: `--root` when given, else the current directory.
pub fn project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let root = match &global.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(format!("project root is not a directory: {}", root.display()).into());
    }
    Ok(root)
}

/// Opens the cache store for the project rooted at `root`.
pub fn open_cache(root: &std::path::Path) -> Result<CacheStore, Box<dyn std::error::Error>> {
    let cache_dir = default_cache_dir()?;
    Ok(CacheStore::open(&cache_dir, root)?)
}
