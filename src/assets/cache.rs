// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::assets::backend::{AssetBackend, LoadCallback};
use crate::error::{PreloadError, Result};
use crate::resources::extension_of;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default memory budget for one cache
pub const DEFAULT_CACHE_BUDGET: usize = 64 * 1024 * 1024;

/// How loaded bytes are validated before caching
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileCacheMode {
    /// Any bytes
    Bytes,
    /// UTF-8, and valid JSON for `json` / `ExportJson` paths
    Text,
}

/// Entry in the file cache
struct CacheEntry {
    data: Arc<[u8]>,
    access_count: u64,
    last_access: u64,
}

/// Cache statistics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_loads: u64,
}

/// File-system backed cache with LRU eviction.
///
/// Loads complete synchronously inside [`AssetBackend::load`].
pub struct FileCache {
    base_path: PathBuf,
    mode: FileCacheMode,
    entries: FxHashMap<String, CacheEntry>,
    total_size: usize,
    max_size: usize,
    access_counter: u64,
    stats: CacheStats,
}

impl FileCache {
    pub fn new(base_path: impl AsRef<Path>, mode: FileCacheMode) -> Self {
        Self::with_budget(base_path, mode, DEFAULT_CACHE_BUDGET)
    }

    /// Create new cache with memory budget
    pub fn with_budget(base_path: impl AsRef<Path>, mode: FileCacheMode, max_size: usize) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            mode,
            entries: FxHashMap::default(),
            total_size: 0,
            max_size,
            access_counter: 0,
            stats: CacheStats::default(),
        }
    }

    /// Read, validate and insert `path`
    pub fn fetch(&mut self, path: &str) -> Result<Arc<[u8]>> {
        if let Some(data) = self.get(path) {
            return Ok(data);
        }
        self.stats.misses += 1;

        let bytes = std::fs::read(self.base_path.join(strip_query(path)))?;
        if self.mode == FileCacheMode::Text {
            validate_text(path, &bytes)?;
        }
        Ok(self.insert(path, bytes))
    }

    /// Insert bytes under `path`, evicting older entries past the budget
    pub fn insert(&mut self, path: &str, bytes: Vec<u8>) -> Arc<[u8]> {
        let size = bytes.len();
        self.remove(path);

        while self.total_size + size > self.max_size && !self.entries.is_empty() {
            self.evict_lru();
        }

        let data: Arc<[u8]> = bytes.into();
        self.entries.insert(
            path.to_string(),
            CacheEntry {
                data: data.clone(),
                access_count: 1,
                last_access: self.access_counter,
            },
        );

        self.access_counter += 1;
        self.total_size += size;
        self.stats.total_loads += 1;
        data
    }

    /// Cached bytes for `path`, counting a hit
    pub fn get(&mut self, path: &str) -> Option<Arc<[u8]>> {
        let entry = self.entries.get_mut(path)?;
        entry.access_count += 1;
        entry.last_access = self.access_counter;
        self.access_counter += 1;
        self.stats.hits += 1;
        Some(entry.data.clone())
    }

    /// Cached text for `path`, if present and UTF-8
    pub fn get_text(&mut self, path: &str) -> Option<String> {
        self.get(path)
            .and_then(|data| std::str::from_utf8(&data).ok().map(str::to_string))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of reads served for `path` since it was cached
    pub fn access_count(&self, path: &str) -> Option<u64> {
        self.entries.get(path).map(|entry| entry.access_count)
    }

    pub fn remove(&mut self, path: &str) -> bool {
        if let Some(entry) = self.entries.remove(path) {
            self.total_size = self.total_size.saturating_sub(entry.data.len());
            true
        } else {
            false
        }
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(path, _)| path.clone());
        if let Some(path) = oldest {
            self.remove(&path);
            self.stats.evictions += 1;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_size = 0;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn memory_usage(&self) -> usize {
        self.total_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetBackend for FileCache {
    fn load(&mut self, path: &str, done: LoadCallback) {
        match self.fetch(path) {
            Ok(_) => done.succeed(),
            Err(err) => done.fail(err.to_string()),
        }
    }

    fn unload(&mut self, path: &str) {
        self.remove(path);
    }
}

fn strip_query(path: &str) -> &str {
    match path.find('?') {
        Some(index) if index > 0 => &path[..index],
        _ => path,
    }
}

fn validate_text(path: &str, bytes: &[u8]) -> Result<()> {
    let text = std::str::from_utf8(bytes).map_err(|e| PreloadError::ItemLoad {
        path: path.to_string(),
        reason: format!("UTF-8 decode error: {e}"),
    })?;

    if matches!(extension_of(path), "json" | "ExportJson") {
        serde_json::from_str::<serde_json::Value>(text).map_err(|e| PreloadError::ItemLoad {
            path: path.to_string(),
            reason: format!("JSON parse error: {e}"),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preloader::batch::BatchProgress;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scene_preloader_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = FileCache::with_budget("unused", FileCacheMode::Bytes, 250);
        cache.insert("a.bin", vec![0; 100]);
        cache.insert("b.bin", vec![0; 100]);
        cache.get("a.bin");
        cache.insert("c.bin", vec![0; 100]);

        assert!(cache.contains("a.bin"));
        assert!(!cache.contains("b.bin"));
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.memory_usage(), 200);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = scratch_dir("disk");
        std::fs::write(dir.join("notes.txt"), "hello").unwrap();

        let mut cache = FileCache::new(&dir, FileCacheMode::Text);
        let progress = BatchProgress::shared(1);
        cache.load("notes.txt?v=2", LoadCallback::new("notes.txt?v=2", progress.clone()));

        assert_eq!(progress.lock().loaded(), 1);
        assert!(progress.lock().failed().is_empty());
        assert_eq!(cache.get_text("notes.txt?v=2").as_deref(), Some("hello"));
    }

    #[test]
    fn test_missing_file_reports_failure() {
        let dir = scratch_dir("missing");
        let mut cache = FileCache::new(&dir, FileCacheMode::Bytes);
        let progress = BatchProgress::shared(1);
        cache.load("nope.png", LoadCallback::new("nope.png", progress.clone()));

        let progress = progress.lock();
        assert_eq!(progress.loaded(), 1);
        assert_eq!(progress.failed().len(), 1);
        assert!(!cache.contains("nope.png"));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = scratch_dir("json");
        std::fs::write(dir.join("broken.json"), "{ not json").unwrap();

        let mut cache = FileCache::new(&dir, FileCacheMode::Text);
        assert!(cache.fetch("broken.json").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unload_evicts() {
        let mut cache = FileCache::new("unused", FileCacheMode::Bytes);
        cache.insert("a.ccbi", vec![1, 2, 3]);
        cache.unload("a.ccbi");
        assert!(cache.is_empty());
        assert_eq!(cache.memory_usage(), 0);
    }
}
