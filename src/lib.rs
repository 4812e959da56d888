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

//! Scene Preloader - tick-driven resource preloading
//!
//! Sequential, budget-aware loading of heterogeneous assets with a
//! percentage progress model and a loading-screen state machine on top.

pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod loading_screen;
pub mod prelude;
pub mod preloader;
pub mod resources;
pub mod scheduler;
pub mod time;

pub use app::*;
pub use error::*;
pub use loading_screen::*;
pub use preloader::{Preloader, TickOutcome};
