// Asset Backend Module
//
// Collaborators the preloader dispatches to:
// - Async-load / sync-evict contract per kind
// - File-system cache with LRU budget
// - Web font registration

pub mod backend;
pub mod cache;
pub mod font;

pub use backend::{AssetBackend, Backends, LoadCallback};
pub use cache::{CacheStats, FileCache, FileCacheMode};
pub use font::{FontHost, StyleSheet};
