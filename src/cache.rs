//! Offline asset cache used by the app shell's service worker.
//!
//! The worker pre-populates one versioned cache on install, drops every
//! other cache on activate and answers requests cache-first.

use serde::Serialize;
use tracing::debug;

pub const CACHE_NAME: &str = "pixelpalette-pro-v1";

const SHELL_ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "./styles.css",
    "./app.js",
    "./manifest.webmanifest",
    "./icons/icon-192.png",
    "./icons/icon-512.png",
    "./pkg/pixelpalette_wasm.js",
    "./pkg/pixelpalette_wasm_bg.wasm",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheManifest {
    pub name: String,
    pub assets: Vec<String>,
}

impl Default for CacheManifest {
    fn default() -> Self {
        Self {
            name: CACHE_NAME.to_string(),
            assets: SHELL_ASSETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CacheManifest {
    /// Cache names that belong to another version and must be deleted.
    pub fn stale_caches<'a>(&self, existing: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        existing
            .into_iter()
            .filter(|name| *name != self.name)
            .map(str::to_string)
            .collect()
    }
}

/// Somewhere a response for a request URL may come from.
pub trait AssetSource {
    type Response;
    type Error;

    fn lookup(&mut self, url: &str) -> Result<Option<Self::Response>, Self::Error>;
}

/// Cache-first lookup: a cache hit wins, otherwise the network is asked, and
/// a network failure degrades to whatever the cache had (a miss).
pub fn respond<C, N, R>(url: &str, cache: &mut C, network: &mut N) -> Option<R>
where
    C: AssetSource<Response = R>,
    N: AssetSource<Response = R>,
{
    let cached = cache.lookup(url).ok().flatten();
    if cached.is_some() {
        debug!(url, "cache hit");
        return cached;
    }
    match network.lookup(url) {
        Ok(response) => response,
        Err(_) => {
            debug!(url, "network failed, falling back to cache");
            cached
        }
    }
}
