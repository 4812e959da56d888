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

use crate::assets::cache::{FileCache, FileCacheMode};
use crate::assets::font::{FontHost, StyleSheet};
use crate::error::{PreloadError, Result};
use crate::preloader::batch::SharedProgress;
use crate::resources::ResourceKind;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Completion handle passed to a backend with each load request.
///
/// Consuming methods make "exactly once" a property of ownership. The handle
/// is `Send`, so a backend may finish it from a worker thread or on a later
/// frame. Dropping it unfinished leaves the batch short of 100%.
pub struct LoadCallback {
    label: String,
    progress: Option<SharedProgress>,
}

impl LoadCallback {
    pub fn new(label: impl Into<String>, progress: SharedProgress) -> Self {
        Self {
            label: label.into(),
            progress: Some(progress),
        }
    }

    /// Path (or font family) this callback reports for
    pub fn path(&self) -> &str {
        &self.label
    }

    pub fn succeed(self) {
        self.finish(Ok(()))
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.finish(Err(reason.into()))
    }

    /// Report the outcome. Failures are logged and still count as loaded.
    pub fn finish(mut self, result: std::result::Result<(), String>) {
        if let Some(progress) = self.progress.take() {
            if let Err(reason) = &result {
                tracing::warn!(path = %self.label, "Failed loading resource: {reason}");
            }
            progress.lock().record(&self.label, result);
        }
    }
}

impl Drop for LoadCallback {
    fn drop(&mut self) {
        if self.progress.is_some() {
            tracing::warn!(
                path = %self.label,
                "load callback dropped without completion, batch will not reach 100%"
            );
        }
    }
}

impl std::fmt::Debug for LoadCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadCallback")
            .field("path", &self.label)
            .field("pending", &self.progress.is_some())
            .finish()
    }
}

/// Cache or engine performing the actual fetch / release for one kind
pub trait AssetBackend {
    /// Start loading `path`. `done` must be finished exactly once, now or later.
    fn load(&mut self, path: &str, done: LoadCallback);

    /// Evict `path` synchronously
    fn unload(&mut self, path: &str);
}

impl<T: AssetBackend + ?Sized> AssetBackend for Rc<RefCell<T>> {
    fn load(&mut self, path: &str, done: LoadCallback) {
        self.borrow_mut().load(path, done);
    }

    fn unload(&mut self, path: &str) {
        self.borrow_mut().unload(path);
    }
}

/// All backends the preloader dispatches to
pub struct Backends {
    pub images: Box<dyn AssetBackend>,
    pub plists: Box<dyn AssetBackend>,
    pub binaries: Box<dyn AssetBackend>,
    pub texts: Box<dyn AssetBackend>,
    /// Required by SOUND resources
    pub audio: Option<Box<dyn AssetBackend>>,
    /// Required by FONT resources
    pub fonts: Option<Box<dyn FontHost>>,
}

impl Backends {
    /// Backends with no audio engine and no font host installed
    pub fn new(
        images: impl AssetBackend + 'static,
        plists: impl AssetBackend + 'static,
        binaries: impl AssetBackend + 'static,
        texts: impl AssetBackend + 'static,
    ) -> Self {
        Self {
            images: Box::new(images),
            plists: Box::new(plists),
            binaries: Box::new(binaries),
            texts: Box::new(texts),
            audio: None,
            fonts: None,
        }
    }

    /// File caches rooted at `base_path` plus an in-memory style sheet
    pub fn from_dir<P: Into<PathBuf>>(base_path: P) -> Self {
        let base_path = base_path.into();
        Self::new(
            FileCache::new(&base_path, FileCacheMode::Bytes),
            FileCache::new(&base_path, FileCacheMode::Bytes),
            FileCache::new(&base_path, FileCacheMode::Bytes),
            FileCache::new(&base_path, FileCacheMode::Text),
        )
        .with_font_host(StyleSheet::default())
    }

    pub fn with_audio(mut self, audio: impl AssetBackend + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn with_font_host(mut self, host: impl FontHost + 'static) -> Self {
        self.fonts = Some(Box::new(host));
        self
    }

    /// Backend serving a path-based kind
    pub(crate) fn backend_for(
        &mut self,
        kind: &ResourceKind,
    ) -> Result<&mut (dyn AssetBackend + 'static)> {
        match kind {
            ResourceKind::Image => Ok(self.images.as_mut()),
            ResourceKind::Xml => Ok(self.plists.as_mut()),
            ResourceKind::Binary => Ok(self.binaries.as_mut()),
            ResourceKind::Text => Ok(self.texts.as_mut()),
            ResourceKind::Sound => self
                .audio
                .as_deref_mut()
                .ok_or(PreloadError::MissingCollaborator("AudioEngine")),
            ResourceKind::Font | ResourceKind::Unknown(_) => Err(
                PreloadError::UnknownResourceType(kind.name().to_string()),
            ),
        }
    }

    pub(crate) fn font_host(&mut self) -> Result<&mut (dyn FontHost + 'static)> {
        self.fonts
            .as_deref_mut()
            .ok_or(PreloadError::MissingCollaborator("FontHost"))
    }
}
