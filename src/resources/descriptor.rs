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

//! Resource descriptors as supplied by callers.
//!
//! A resource list is written as a JSON array whose entries are either a
//! plain path, an object with a `src` path, or a font object:
//!
//! ```
//! use scene_preloader::resources::ResourceDescriptor;
//!
//! let list = ResourceDescriptor::list_from_json(r#"[
//!     "res/Maps/zt.tmx",
//!     { "src": "res/Sprite/Sprite.png" },
//!     { "fontName": "PressStart", "src": [{ "src": "res/press.ttf", "type": "truetype" }] }
//! ]"#).unwrap();
//!
//! assert_eq!(list.len(), 3);
//! assert!(list[2].as_font().is_some());
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One `{src, type}` entry of a font descriptor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    pub src: String,
    #[serde(rename = "type")]
    pub format: String,
}

impl FontSource {
    pub fn new(src: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            format: format.into(),
        }
    }
}

/// Web font registration request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontResource {
    pub font_name: String,
    #[serde(default)]
    pub src: SmallVec<[FontSource; 2]>,
}

/// A single entry of a resource list. Immutable once enqueued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceDescriptor {
    /// Bare path string
    Path(String),
    /// `{ "fontName": .., "src": [..] }`
    Font(FontResource),
    /// `{ "src": path }`
    Source { src: String },
}

impl ResourceDescriptor {
    /// Structured `{src: path}` descriptor
    pub fn source(path: impl Into<String>) -> Self {
        ResourceDescriptor::Source { src: path.into() }
    }

    /// Font descriptor binding `font_name` to the given sources
    pub fn font<I>(font_name: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = FontSource>,
    {
        ResourceDescriptor::Font(FontResource {
            font_name: font_name.into(),
            src: sources.into_iter().collect(),
        })
    }

    /// File path of the resource, `None` for fonts
    pub fn path(&self) -> Option<&str> {
        match self {
            ResourceDescriptor::Path(path) | ResourceDescriptor::Source { src: path } => {
                Some(path)
            }
            ResourceDescriptor::Font(_) => None,
        }
    }

    pub fn as_font(&self) -> Option<&FontResource> {
        match self {
            ResourceDescriptor::Font(font) => Some(font),
            _ => None,
        }
    }

    /// Name used in logs and reports: the path, or the font family
    pub fn label(&self) -> &str {
        match self {
            ResourceDescriptor::Path(path) | ResourceDescriptor::Source { src: path } => path,
            ResourceDescriptor::Font(font) => &font.font_name,
        }
    }

    /// Parse a JSON resource list literal
    pub fn list_from_json(json: &str) -> Result<Vec<ResourceDescriptor>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&str> for ResourceDescriptor {
    fn from(path: &str) -> Self {
        ResourceDescriptor::Path(path.to_string())
    }
}

impl From<String> for ResourceDescriptor {
    fn from(path: String) -> Self {
        ResourceDescriptor::Path(path)
    }
}
