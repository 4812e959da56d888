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

//! Periodic-tick registration.
//!
//! The preloader registers itself when a batch becomes current and
//! unregisters when its queue drains. Whoever owns the frame loop asks
//! [`UpdateScheduler::is_scheduled`] to decide whether to call
//! [`Preloader::tick`](crate::preloader::Preloader::tick).

/// Register / unregister primitives for a per-frame update target
pub trait UpdateScheduler {
    fn schedule_update(&mut self);
    fn unschedule_update(&mut self);
    fn is_scheduled(&self) -> bool;
}

/// Flag-backed scheduler used by [`App`](crate::app::App)
#[derive(Clone, Debug, Default)]
pub struct FrameScheduler {
    scheduled: bool,
    registrations: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the target was registered
    pub fn registrations(&self) -> u64 {
        self.registrations
    }
}

impl UpdateScheduler for FrameScheduler {
    fn schedule_update(&mut self) {
        if !self.scheduled {
            self.scheduled = true;
            self.registrations += 1;
        }
    }

    fn unschedule_update(&mut self) {
        self.scheduled = false;
    }

    fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_idempotent() {
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule_update();
        scheduler.schedule_update();
        assert!(scheduler.is_scheduled());
        assert_eq!(scheduler.registrations(), 1);

        scheduler.unschedule_update();
        assert!(!scheduler.is_scheduled());
    }
}
