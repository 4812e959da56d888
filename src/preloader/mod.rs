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

//! Sequential, tick-driven resource preloader.
//!
//! Batches are loaded strictly in FIFO order. Each [`Preloader::tick`]
//! dispatches at most one item of the current batch to its backend, then
//! checks whether the batch has reached 100%. Backends report back through a
//! [`LoadCallback`]; a failed item still counts as loaded, so a batch always
//! completes once every backend has answered.
//!
//! ```
//! use scene_preloader::prelude::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let dir = std::env::temp_dir();
//! let mut preloader = Preloader::new(Backends::from_dir(&dir));
//!
//! let done = Rc::new(Cell::new(false));
//! let flag = done.clone();
//! preloader.preload(&[], move |report| flag.set(report.total == 0));
//!
//! assert_eq!(preloader.percentage(), 100);
//! preloader.tick(None).unwrap();
//! assert!(done.get());
//! assert!(!preloader.is_running());
//! ```

pub mod batch;
pub mod event;

pub use batch::{Batch, BatchId, BatchProgress, BatchReport, CompletionCallback, FailedItem};
pub use event::{EventQueue, PreloadEvent};

use crate::assets::font::{register_face_font, unregister_face_font};
use crate::assets::{Backends, LoadCallback};
use crate::config::PreloaderConfig;
use crate::error::{PreloadError, Result};
use crate::resources::{ResourceDescriptor, ResourceKind};
use crate::scheduler::{FrameScheduler, UpdateScheduler};
use batch::SharedProgress;
use std::collections::VecDeque;

#[cfg(feature = "profiling")]
use tracing::info_span;

/// What a single tick did
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Frame rate below threshold in frame-rate-aware mode
    Skipped,
    /// No batch is current
    Idle,
    /// Current batch still below 100%
    Progressed { percentage: u8 },
    /// Current batch finished and its callback ran
    Completed(BatchReport),
}

enum LoaderState {
    /// Keeps the percentage of the last finished batch (0 before any)
    Idle { last_percentage: u8 },
    Loading(Batch),
}

/// Resource preloader service.
///
/// Owned by application start-up and passed by reference; all preload calls
/// share its one queue.
pub struct Preloader {
    state: LoaderState,
    queue: VecDeque<Batch>,
    frame_rate_aware: bool,
    backends: Backends,
    scheduler: Box<dyn UpdateScheduler>,
    config: PreloaderConfig,
    events: EventQueue,
    next_id: u64,
}

impl Preloader {
    pub fn new(backends: Backends) -> Self {
        Self::with_config(backends, FrameScheduler::new(), PreloaderConfig::default())
    }

    pub fn with_config(
        backends: Backends,
        scheduler: impl UpdateScheduler + 'static,
        config: PreloaderConfig,
    ) -> Self {
        Self {
            state: LoaderState::Idle { last_percentage: 0 },
            queue: VecDeque::new(),
            frame_rate_aware: false,
            backends,
            scheduler: Box::new(scheduler),
            events: EventQueue::with_capacity(config.event_capacity),
            config,
            next_id: 1,
        }
    }

    /// Queue `resources` as one batch.
    ///
    /// The list is copied. If nothing is loading the batch becomes current
    /// and the preloader registers for ticks; otherwise it waits behind the
    /// batches already queued.
    pub fn preload<F>(&mut self, resources: &[ResourceDescriptor], on_complete: F) -> &mut Self
    where
        F: FnOnce(&BatchReport) + 'static,
    {
        let id = BatchId(self.next_id);
        self.next_id += 1;

        let batch = Batch::new(id, resources, Box::new(on_complete));
        tracing::debug!(batch = id.0, total = batch.total(), "batch queued");
        self.events.push(PreloadEvent::BatchQueued {
            id,
            total: batch.total(),
        });

        if self.is_running() {
            self.queue.push_back(batch);
        } else {
            self.start(batch);
        }
        self
    }

    /// Like [`preload`](Self::preload), and switches the preloader into
    /// frame-rate-aware mode for good
    pub fn preload_async<F>(&mut self, resources: &[ResourceDescriptor], on_complete: F) -> &mut Self
    where
        F: FnOnce(&BatchReport) + 'static,
    {
        self.frame_rate_aware = true;
        self.preload(resources, on_complete)
    }

    pub fn set_frame_rate_aware(&mut self, enabled: bool) {
        self.frame_rate_aware = enabled;
    }

    pub fn is_frame_rate_aware(&self) -> bool {
        self.frame_rate_aware
    }

    /// Progress of the current batch, 0..=100.
    ///
    /// While idle this is the last finished batch's value (100), or 0 if no
    /// batch ever ran.
    pub fn percentage(&self) -> u8 {
        match &self.state {
            LoaderState::Loading(batch) => batch.percentage(),
            LoaderState::Idle { last_percentage } => *last_percentage,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoaderState::Loading(_))
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduler.is_scheduled()
    }

    pub fn current_batch(&self) -> Option<&Batch> {
        match &self.state {
            LoaderState::Loading(batch) => Some(batch),
            LoaderState::Idle { .. } => None,
        }
    }

    /// Batches waiting behind the current one
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    pub fn backends_mut(&mut self) -> &mut Backends {
        &mut self.backends
    }

    pub fn config(&self) -> &PreloaderConfig {
        &self.config
    }

    /// Take the recorded events, oldest first. The queue keeps the most
    /// recent `event_capacity` events between drains.
    pub fn drain_events(&mut self) -> Vec<PreloadEvent> {
        self.events.drain()
    }

    /// Events pushed out of the queue because it was full
    pub fn dropped_events(&self) -> u64 {
        self.events.dropped()
    }

    /// Periodic update.
    ///
    /// Dispatches at most one item, then completes the current batch if it
    /// reached 100% and promotes the next queued one. Classification and
    /// missing-backend errors abort the tick; the offending item is consumed
    /// and its batch can no longer complete.
    pub fn tick(&mut self, frame_rate: Option<f32>) -> Result<TickOutcome> {
        #[cfg(feature = "profiling")]
        let _span = info_span!("preloader_tick", queued = self.queue.len()).entered();

        if self.frame_rate_aware {
            if let Some(fps) = frame_rate.filter(|fps| *fps < self.config.min_frame_rate) {
                tracing::debug!(fps, "frame rate below {} fps, skip frame", self.config.min_frame_rate);
                self.events.push(PreloadEvent::TickSkipped { frame_rate: fps });
                return Ok(TickOutcome::Skipped);
            }
        }

        let batch = match &mut self.state {
            LoaderState::Loading(batch) => batch,
            LoaderState::Idle { .. } => return Ok(TickOutcome::Idle),
        };

        if let Some(item) = batch.next_item() {
            Self::load_one(
                &mut self.backends,
                &mut self.events,
                batch.id(),
                item,
                batch.progress(),
            )?;
        }

        let percentage = batch.percentage();
        if percentage < 100 {
            return Ok(TickOutcome::Progressed { percentage });
        }

        let finished = std::mem::replace(&mut self.state, LoaderState::Idle { last_percentage: 100 });
        match finished {
            LoaderState::Loading(batch) => Ok(TickOutcome::Completed(self.finish(batch))),
            LoaderState::Idle { .. } => Ok(TickOutcome::Idle),
        }
    }

    /// Evict every listed resource from its backend.
    ///
    /// Stops at the first unknown extension or missing audio engine; entries
    /// before it stay evicted. Fonts without a font host are skipped.
    pub fn purge_cached_data(&mut self, resources: &[ResourceDescriptor]) -> Result<()> {
        for descriptor in resources {
            match descriptor {
                ResourceDescriptor::Font(font) => match self.backends.fonts.as_deref_mut() {
                    Some(host) => unregister_face_font(host, font),
                    None => {
                        tracing::debug!(family = %font.font_name, "no font host, nothing to unregister");
                        continue;
                    }
                },
                _ => {
                    let path = descriptor.label();
                    match ResourceKind::from_path(path) {
                        ResourceKind::Unknown(ext) => {
                            return Err(PreloadError::UnknownResourceType(ext));
                        }
                        kind => self.backends.backend_for(&kind)?.unload(path),
                    }
                }
            }
            tracing::debug!(path = descriptor.label(), "purged cached resource");
        }
        Ok(())
    }

    fn start(&mut self, batch: Batch) {
        tracing::info!(batch = batch.id().0, total = batch.total(), "batch started");
        self.events.push(PreloadEvent::BatchStarted(batch.id()));
        self.state = LoaderState::Loading(batch);
        self.scheduler.schedule_update();
    }

    fn finish(&mut self, mut batch: Batch) -> BatchReport {
        let report = batch.complete();
        tracing::info!(
            batch = report.id.0,
            loaded = report.loaded,
            failed = report.failed.len(),
            "batch complete"
        );
        self.events.push(PreloadEvent::BatchCompleted {
            id: report.id,
            loaded: report.loaded,
            failed: report.failed.len(),
        });

        match self.queue.pop_front() {
            Some(next) => self.start(next),
            None => self.scheduler.unschedule_update(),
        }
        report
    }

    fn load_one(
        backends: &mut Backends,
        events: &mut EventQueue,
        id: BatchId,
        item: ResourceDescriptor,
        progress: SharedProgress,
    ) -> Result<()> {
        let (kind, path) = match &item {
            ResourceDescriptor::Font(_) => (ResourceKind::Font, item.label()),
            _ => (ResourceKind::from_path(item.label()), item.label()),
        };

        let dispatched = |events: &mut EventQueue, kind: &ResourceKind| {
            tracing::debug!(batch = id.0, path, kind = %kind, "dispatching resource");
            events.push(PreloadEvent::ItemDispatched {
                id,
                path: path.to_string(),
                kind: kind.clone(),
            });
        };

        let result = match (&kind, &item) {
            (ResourceKind::Font, ResourceDescriptor::Font(font)) => {
                backends.font_host().map(|host| {
                    dispatched(events, &kind);
                    register_face_font(host, font, LoadCallback::new(path, progress));
                })
            }
            (ResourceKind::Unknown(ext), _) => Err(PreloadError::UnknownResourceType(ext.clone())),
            _ => backends.backend_for(&kind).map(|backend| {
                dispatched(events, &kind);
                backend.load(path, LoadCallback::new(path, progress));
            }),
        };

        if let Err(err) = &result {
            tracing::error!(batch = id.0, path, "{err}");
        }
        result
    }
}
