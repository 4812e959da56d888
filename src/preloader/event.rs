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

use crate::preloader::batch::BatchId;
use crate::resources::ResourceKind;
use std::collections::VecDeque;

/// Preloader lifecycle events, in the order they happened
#[derive(Clone, Debug, PartialEq)]
pub enum PreloadEvent {
    /// Batch accepted into the queue
    BatchQueued { id: BatchId, total: usize },

    /// Batch became current
    BatchStarted(BatchId),

    /// One item handed to its backend
    ItemDispatched {
        id: BatchId,
        path: String,
        kind: ResourceKind,
    },

    /// Tick skipped in frame-rate-aware mode
    TickSkipped { frame_rate: f32 },

    /// Completion callback has run
    BatchCompleted {
        id: BatchId,
        loaded: usize,
        failed: usize,
    },
}

impl PreloadEvent {
    /// Batch involved in this event, if any
    pub fn batch_id(&self) -> Option<BatchId> {
        match self {
            PreloadEvent::BatchQueued { id, .. }
            | PreloadEvent::ItemDispatched { id, .. }
            | PreloadEvent::BatchCompleted { id, .. } => Some(*id),
            PreloadEvent::BatchStarted(id) => Some(*id),
            PreloadEvent::TickSkipped { .. } => None,
        }
    }

    /// Get event type name for debugging
    pub fn event_type(&self) -> &'static str {
        match self {
            PreloadEvent::BatchQueued { .. } => "BatchQueued",
            PreloadEvent::BatchStarted(_) => "BatchStarted",
            PreloadEvent::ItemDispatched { .. } => "ItemDispatched",
            PreloadEvent::TickSkipped { .. } => "TickSkipped",
            PreloadEvent::BatchCompleted { .. } => "BatchCompleted",
        }
    }
}

/// Bounded ring of recent events; overflow drops the oldest event
pub struct EventQueue {
    events: VecDeque<PreloadEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: PreloadEvent) {
        if self.capacity == 0 {
            self.dropped += 1;
            return;
        }
        if self.events.len() >= self.capacity {
            if let Some(oldest) = self.events.pop_front() {
                self.dropped += 1;
                tracing::trace!(capacity = self.capacity, "preload event queue full, dropping {}", oldest.event_type());
            }
        }
        self.events.push_back(event);
    }

    /// Events discarded to make room since the queue was created
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn drain(&mut self) -> Vec<PreloadEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}
