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

//! Tunables for the preloader and loading screen.
//!
//! Every field has a default, so a JSON document only needs the keys it
//! changes:
//!
//! ```
//! use scene_preloader::config::AppConfig;
//!
//! let config = AppConfig::from_json_str(r#"{ "preloader": { "min_frame_rate": 30.0 } }"#).unwrap();
//! assert_eq!(config.preloader.min_frame_rate, 30.0);
//! assert_eq!(config.loading_screen.start_delay_ms, 300);
//! ```

use crate::error::{PreloadError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    /// Frame-rate-aware mode skips ticks below this many fps
    pub min_frame_rate: f32,
    /// Capacity of the lifecycle event queue
    pub event_capacity: usize,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            min_frame_rate: 20.0,
            event_capacity: 1024,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingScreenConfig {
    /// Debounce between showing the screen and starting the preload
    pub start_delay_ms: u64,
    /// Label refresh interval; 0 polls every frame
    pub poll_interval_ms: u64,
    pub label_prefix: String,
}

impl LoadingScreenConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Label text for `percent`
    pub fn label(&self, percent: u8) -> String {
        format!("{}{percent}%", self.label_prefix)
    }
}

impl Default for LoadingScreenConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 300,
            poll_interval_ms: 0,
            label_prefix: "Loading... ".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub preloader: PreloaderConfig,
    pub loading_screen: LoadingScreenConfig,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.preloader.min_frame_rate.is_finite() || self.preloader.min_frame_rate < 0.0 {
            return Err(PreloadError::Config(format!(
                "min_frame_rate must be a non-negative number, got {}",
                self.preloader.min_frame_rate
            )));
        }
        if self.preloader.event_capacity == 0 {
            return Err(PreloadError::Config("event_capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}
