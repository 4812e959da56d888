//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use scene_preloader::prelude::*;
//! ```

pub use crate::app::App;
pub use crate::assets::{AssetBackend, Backends, FileCache, FileCacheMode, FontHost, LoadCallback, StyleSheet};
pub use crate::config::{AppConfig, LoadingScreenConfig, PreloaderConfig};
pub use crate::error::{PreloadError, Result};
pub use crate::loading_screen::{LoadingPhase, LoadingScreen};
pub use crate::preloader::{BatchId, BatchReport, PreloadEvent, Preloader, TickOutcome};
pub use crate::resources::{FontSource, ResourceDescriptor, ResourceKind};
pub use crate::scheduler::{FrameScheduler, UpdateScheduler};
pub use crate::time::{Time, Timer};
