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

//! Full-screen progress overlay.
//!
//! `Idle → Showing → Loading → Done`. Entering the screen arms a short
//! one-shot delay so the overlay renders before any loading starts; when it
//! fires the preload is queued and the label starts following
//! [`Preloader::percentage`]. The batch's own completion callback drives the
//! scene transition; this screen only drives the label.

use crate::config::LoadingScreenConfig;
use crate::preloader::{BatchReport, Preloader};
use crate::resources::ResourceDescriptor;
use crate::time::Timer;
use std::rc::Rc;
use std::time::Duration;

/// Completion kept by the screen and handed to every preload it starts
pub type ScreenCallback = Rc<dyn Fn(&BatchReport)>;

/// Observable phase of the loading screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingPhase {
    Idle,
    /// Visible, waiting for the start delay
    Showing,
    /// Preload queued, label polling
    Loading,
    /// Label reached 100%
    Done,
}

enum ScreenState {
    Idle,
    Showing { delay: Timer },
    Loading { poll: Timer },
    Done,
}

/// Loading screen reused across requests
pub struct LoadingScreen {
    config: LoadingScreenConfig,
    resources: Vec<ResourceDescriptor>,
    on_complete: Option<ScreenCallback>,
    label: String,
    state: ScreenState,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::with_config(LoadingScreenConfig::default())
    }

    pub fn with_config(config: LoadingScreenConfig) -> Self {
        Self {
            label: config.label(0),
            config,
            resources: Vec::new(),
            on_complete: None,
            state: ScreenState::Idle,
        }
    }

    /// Replace the resource list and completion callback. Both are kept,
    /// so entering the screen again reloads the same list and fires the
    /// callback again.
    pub fn init_with_resources<F>(&mut self, resources: &[ResourceDescriptor], on_complete: F) -> &mut Self
    where
        F: Fn(&BatchReport) + 'static,
    {
        self.resources = resources.to_vec();
        self.on_complete = Some(Rc::new(on_complete));
        self
    }

    /// Screen became visible: arm the start delay
    pub fn on_enter(&mut self) {
        self.state = ScreenState::Showing {
            delay: Timer::once(self.config.start_delay()),
        };
    }

    /// Screen hidden: reset the label for next use
    pub fn on_exit(&mut self) {
        self.state = ScreenState::Idle;
        self.label = self.config.label(0);
    }

    /// Advance timers by one frame
    pub fn update(&mut self, delta: Duration, preloader: &mut Preloader) -> LoadingPhase {
        let (start, poll) = match &mut self.state {
            ScreenState::Showing { delay } => (delay.tick(delta) > 0, false),
            ScreenState::Loading { poll } => (false, poll.tick(delta) > 0),
            ScreenState::Idle | ScreenState::Done => (false, false),
        };

        if start {
            self.start_loading(preloader);
        } else if poll {
            self.update_percent(preloader);
        }
        self.phase()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    pub fn phase(&self) -> LoadingPhase {
        match self.state {
            ScreenState::Idle => LoadingPhase::Idle,
            ScreenState::Showing { .. } => LoadingPhase::Showing,
            ScreenState::Loading { .. } => LoadingPhase::Loading,
            ScreenState::Done => LoadingPhase::Done,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase() != LoadingPhase::Idle
    }

    fn start_loading(&mut self, preloader: &mut Preloader) {
        tracing::debug!(resources = self.resources.len(), "loading screen starting preload");
        match self.on_complete.clone() {
            Some(on_complete) => preloader.preload(&self.resources, move |report| on_complete(report)),
            None => preloader.preload(&self.resources, |_| {}),
        };
        self.state = ScreenState::Loading {
            poll: Timer::repeating(self.config.poll_interval()),
        };
    }

    fn update_percent(&mut self, preloader: &Preloader) {
        let percent = preloader.percentage();
        self.label = self.config.label(percent);
        if percent >= 100 {
            self.state = ScreenState::Done;
        }
    }
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self::new()
    }
}
