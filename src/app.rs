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

use crate::assets::Backends;
use crate::config::AppConfig;
use crate::error::Result;
use crate::loading_screen::{LoadingPhase, LoadingScreen};
use crate::preloader::{BatchReport, Preloader};
use crate::resources::ResourceDescriptor;
use crate::scheduler::FrameScheduler;
use crate::time::Time;
use std::time::Duration;

/// Application entry point owning the preloader and loading screen
pub struct App {
    pub time: Time,
    pub preloader: Preloader,
    pub loading_screen: LoadingScreen,
}

impl App {
    pub fn new(backends: Backends) -> Self {
        Self::with_config(backends, AppConfig::default())
    }

    pub fn with_config(backends: Backends, config: AppConfig) -> Self {
        Self {
            time: Time::new(),
            preloader: Preloader::with_config(backends, FrameScheduler::new(), config.preloader),
            loading_screen: LoadingScreen::with_config(config.loading_screen),
        }
    }

    /// Show the loading screen for `resources`.
    ///
    /// The one screen instance is re-initialized; if it is already showing
    /// it is exited and entered again.
    pub fn show_loading_screen<F>(&mut self, resources: &[ResourceDescriptor], on_complete: F) -> &mut LoadingScreen
    where
        F: Fn(&BatchReport) + 'static,
    {
        if self.loading_screen.is_visible() {
            self.loading_screen.on_exit();
        }
        self.loading_screen.init_with_resources(resources, on_complete);
        self.loading_screen.on_enter();
        &mut self.loading_screen
    }

    pub fn hide_loading_screen(&mut self) {
        self.loading_screen.on_exit();
    }

    /// Run one frame
    pub fn update(&mut self, delta: Duration) -> Result<()> {
        self.time.advance(delta);
        self.loading_screen.update(delta, &mut self.preloader);
        if self.preloader.is_scheduled() {
            self.preloader.tick(self.time.frame_rate())?;
        }
        Ok(())
    }

    /// Run frames until nothing is loading and the screen has settled.
    /// Returns the number of frames run.
    pub fn run_until_idle(&mut self, delta: Duration, max_frames: usize) -> Result<usize> {
        for frame in 0..max_frames {
            let settling = self.preloader.is_running()
                || matches!(
                    self.loading_screen.phase(),
                    LoadingPhase::Showing | LoadingPhase::Loading
                );
            if !settling {
                return Ok(frame);
            }
            self.update(delta)?;
        }
        Ok(max_frames)
    }
}
