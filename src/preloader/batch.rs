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

use crate::resources::ResourceDescriptor;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Identifier of a queued batch, increasing in enqueue order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u64);

/// Called once when a batch reaches 100%
pub type CompletionCallback = Box<dyn FnOnce(&BatchReport)>;

/// An item whose backend reported an error
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedItem {
    pub path: String,
    pub reason: String,
}

/// Completion counters written by load callbacks
#[derive(Debug, Default)]
pub struct BatchProgress {
    total: usize,
    loaded: usize,
    failed: Vec<FailedItem>,
}

pub type SharedProgress = Arc<Mutex<BatchProgress>>;

impl BatchProgress {
    pub fn shared(total: usize) -> SharedProgress {
        Arc::new(Mutex::new(BatchProgress {
            total,
            ..Default::default()
        }))
    }

    /// Count one finished item. `loaded` never passes `total`.
    pub fn record(&mut self, path: &str, result: Result<(), String>) {
        if self.loaded >= self.total {
            tracing::warn!(path, "completion reported past batch total, ignored");
            return;
        }
        self.loaded += 1;
        if let Err(reason) = result {
            self.failed.push(FailedItem {
                path: path.to_string(),
                reason,
            });
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failed(&self) -> &[FailedItem] {
        &self.failed
    }

    /// `floor(loaded / total * 100)`, 100 for an empty batch
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            100
        } else {
            (self.loaded * 100 / self.total) as u8
        }
    }
}

/// Outcome handed to the completion callback
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchReport {
    pub id: BatchId,
    pub total: usize,
    pub loaded: usize,
    pub failed: Vec<FailedItem>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.loaded - self.failed.len()
    }

    /// True when no item failed
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// One queued resource list sharing a completion callback
pub struct Batch {
    id: BatchId,
    pending: VecDeque<ResourceDescriptor>,
    total: usize,
    dispatched: usize,
    progress: SharedProgress,
    on_complete: Option<CompletionCallback>,
}

impl Batch {
    /// Copies `resources`; later changes to the caller's list are not seen
    pub fn new(id: BatchId, resources: &[ResourceDescriptor], on_complete: CompletionCallback) -> Self {
        Self {
            id,
            pending: resources.iter().cloned().collect(),
            total: resources.len(),
            dispatched: 0,
            progress: BatchProgress::shared(resources.len()),
            on_complete: Some(on_complete),
        }
    }

    pub fn id(&self) -> BatchId {
        self.id
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn loaded(&self) -> usize {
        self.progress.lock().loaded()
    }

    pub fn has_undispatched(&self) -> bool {
        self.dispatched < self.total
    }

    /// Pop the next item, advancing the consumed index
    pub(crate) fn next_item(&mut self) -> Option<ResourceDescriptor> {
        let item = self.pending.pop_front()?;
        self.dispatched += 1;
        Some(item)
    }

    pub fn progress(&self) -> SharedProgress {
        self.progress.clone()
    }

    pub fn percentage(&self) -> u8 {
        self.progress.lock().percentage()
    }

    pub fn report(&self) -> BatchReport {
        let progress = self.progress.lock();
        BatchReport {
            id: self.id,
            total: self.total,
            loaded: progress.loaded(),
            failed: progress.failed().to_vec(),
        }
    }

    /// Run the completion callback; later calls do nothing
    pub(crate) fn complete(&mut self) -> BatchReport {
        let report = self.report();
        if let Some(callback) = self.on_complete.take() {
            callback(&report);
        }
        report
    }
}

impl std::fmt::Debug for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch")
            .field("id", &self.id)
            .field("total", &self.total)
            .field("dispatched", &self.dispatched)
            .field("loaded", &self.loaded())
            .finish()
    }
}
