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

use crate::resources::ResourceDescriptor;
use std::fmt;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "bmp", "jpeg", "gif"];
pub const SOUND_EXTENSIONS: &[&str] = &["mp3", "ogg", "wav", "mp4", "m4a"];
pub const XML_EXTENSIONS: &[&str] = &["plist", "xml", "fnt", "tmx", "tsx"];
pub const BINARY_EXTENSIONS: &[&str] = &["ccbi"];
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "vsh", "fsh", "json", "ExportJson"];

/// Searched in order; the tables are disjoint.
const TABLES: &[(ResourceKind, &[&str])] = &[
    (ResourceKind::Image, IMAGE_EXTENSIONS),
    (ResourceKind::Sound, SOUND_EXTENSIONS),
    (ResourceKind::Xml, XML_EXTENSIONS),
    (ResourceKind::Binary, BINARY_EXTENSIONS),
    (ResourceKind::Text, TEXT_EXTENSIONS),
];

/// Classification of a descriptor, driving backend dispatch
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Sound,
    Xml,
    Binary,
    Text,
    Font,
    /// Raw extension that matched no table
    Unknown(String),
}

impl ResourceKind {
    /// Classify a descriptor: fonts by shape, everything else by extension
    pub fn classify(descriptor: &ResourceDescriptor) -> Self {
        match descriptor {
            ResourceDescriptor::Font(_) => ResourceKind::Font,
            ResourceDescriptor::Path(path) | ResourceDescriptor::Source { src: path } => {
                Self::from_path(path)
            }
        }
    }

    /// Case-sensitive lookup of the path's extension
    pub fn from_path(path: &str) -> Self {
        let ext = extension_of(path);
        TABLES
            .iter()
            .find(|(_, exts)| exts.contains(&ext))
            .map(|(kind, _)| kind.clone())
            .unwrap_or_else(|| ResourceKind::Unknown(ext.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            ResourceKind::Image => "IMAGE",
            ResourceKind::Sound => "SOUND",
            ResourceKind::Xml => "XML",
            ResourceKind::Binary => "BINARY",
            ResourceKind::Text => "TEXT",
            ResourceKind::Font => "FONT",
            ResourceKind::Unknown(ext) => ext,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text after the last `.`, cut at a `?` query suffix.
///
/// A path without a dot yields the whole path. A `?` in first position is
/// kept, so `"a.?x"` yields `"?x"`.
pub fn extension_of(path: &str) -> &str {
    let ext = match path.rfind('.') {
        Some(dot) => &path[dot + 1..],
        None => path,
    };
    match ext.find('?') {
        Some(query) if query > 0 => &ext[..query],
        _ => ext,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tables() {
        assert_eq!(ResourceKind::from_path("a.png"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_path("res/b.m4a"), ResourceKind::Sound);
        assert_eq!(ResourceKind::from_path("res/Maps/zt.tmx"), ResourceKind::Xml);
        assert_eq!(ResourceKind::from_path("ui.ccbi"), ResourceKind::Binary);
        assert_eq!(ResourceKind::from_path("anim.ExportJson"), ResourceKind::Text);
    }

    #[test]
    fn test_query_suffix_stripped() {
        assert_eq!(extension_of("foo.png?v=2"), "png");
        assert_eq!(ResourceKind::from_path("foo.png?v=2"), ResourceKind::Image);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(
            ResourceKind::from_path("a.PNG?v=3"),
            ResourceKind::Unknown("PNG".to_string())
        );
        assert_eq!(
            ResourceKind::from_path("anim.exportjson"),
            ResourceKind::Unknown("exportjson".to_string())
        );
    }

    #[test]
    fn test_extension_edge_cases() {
        assert_eq!(extension_of("README"), "README");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of("a.?x"), "?x");
        assert_eq!(extension_of("dir.v2/file.txt"), "txt");
    }

    #[test]
    fn test_font_descriptor_is_font() {
        let font = ResourceDescriptor::font("Arial", []);
        assert_eq!(ResourceKind::classify(&font), ResourceKind::Font);
        assert_eq!(ResourceKind::Font.to_string(), "FONT");
    }
}
