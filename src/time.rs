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

//! Frame timing and timers.
//!
//! This module provides:
//! - [`Time`] - Frame clock exposing the current frame rate
//! - [`Timer`] - One-shot or repeating accumulator driven by frame deltas
//!
//! # Examples
//!
//! ```
//! use scene_preloader::time::{Time, Timer};
//! use std::time::Duration;
//!
//! let mut time = Time::new();
//! let mut delay = Timer::once(Duration::from_millis(300));
//!
//! // In your frame loop:
//! time.advance(Duration::from_millis(16));
//! if delay.tick(time.delta()) > 0 {
//!     // fires once, after 300ms of frames
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame clock
#[derive(Clone, Debug)]
pub struct Time {
    /// Time since last frame
    delta: Duration,
    /// Total elapsed time since start
    elapsed: Duration,
    /// Frame counter
    frame_count: u64,
    /// Time of last frame
    last_update: Instant,
}

impl Time {
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            last_update: Instant::now(),
        }
    }

    /// Update from the wall clock (call once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(delta);
    }

    /// Update with an explicit frame delta
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second of the last frame; unknown before the first
    /// frame or after a zero-length one
    pub fn frame_rate(&self) -> Option<f32> {
        if self.frame_count == 0 || self.delta.is_zero() {
            None
        } else {
            Some(1.0 / self.delta.as_secs_f32())
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerMode {
    Once,
    Repeating,
}

/// Accumulates frame deltas and reports how many times it fired
#[derive(Clone, Debug)]
pub struct Timer {
    duration: Duration,
    accumulator: Duration,
    mode: TimerMode,
    finished: bool,
}

impl Timer {
    pub fn once(duration: Duration) -> Self {
        Self::new(duration, TimerMode::Once)
    }

    /// A zero interval fires on every tick
    pub fn repeating(interval: Duration) -> Self {
        Self::new(interval, TimerMode::Repeating)
    }

    fn new(duration: Duration, mode: TimerMode) -> Self {
        Self {
            duration,
            accumulator: Duration::ZERO,
            mode,
            finished: false,
        }
    }

    /// Advance by `delta` and return the number of firings
    pub fn tick(&mut self, delta: Duration) -> usize {
        if self.finished {
            return 0;
        }
        self.accumulator += delta;

        match self.mode {
            TimerMode::Once => {
                if self.accumulator >= self.duration {
                    self.finished = true;
                    1
                } else {
                    0
                }
            }
            TimerMode::Repeating if self.duration.is_zero() => 1,
            TimerMode::Repeating => {
                let mut fired = 0;
                while self.accumulator >= self.duration {
                    self.accumulator -= self.duration;
                    fired += 1;
                }
                fired
            }
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// A one-shot timer that has fired
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.finished = false;
    }
}
