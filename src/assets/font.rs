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

//! Web font registration.
//!
//! A font resource becomes an `@font-face` rule injected into the host
//! document, followed by an off-screen element that forces the family to be
//! fetched. The load callback fires right after injection: glyph availability
//! is never awaited, so text may briefly render with a fallback face.

use crate::assets::backend::LoadCallback;
use crate::resources::{FontResource, FontSource};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::cell::RefCell;
use std::rc::Rc;

/// Document-side collaborator for font registration
pub trait FontHost {
    /// Add a style rule for `family`
    fn inject_style(&mut self, family: &str, rule: &str);

    /// Make an off-screen element use `family` so the engine fetches it eagerly
    fn preload_family(&mut self, family: &str);

    /// Drop whatever was registered for `family`
    fn remove_family(&mut self, _family: &str) {}
}

impl<T: FontHost + ?Sized> FontHost for Rc<RefCell<T>> {
    fn inject_style(&mut self, family: &str, rule: &str) {
        self.borrow_mut().inject_style(family, rule);
    }

    fn preload_family(&mut self, family: &str) {
        self.borrow_mut().preload_family(family);
    }

    fn remove_family(&mut self, family: &str) {
        self.borrow_mut().remove_family(family);
    }
}

/// Builds `@font-face { font-family:NAME; src:url('a') format('f'),url('b') format('g');};`
///
/// Returns `None` when there are no sources.
pub fn face_rule(font_name: &str, sources: &[FontSource]) -> Option<String> {
    if sources.is_empty() {
        return None;
    }

    let src = sources
        .iter()
        .map(|source| format!("url('{}') format('{}')", encode_uri(&source.src), source.format))
        .collect::<Vec<_>>()
        .join(",");

    Some(format!("@font-face {{ font-family:{font_name}; src:{src};}};"))
}

/// Register the face and complete `done` immediately
pub fn register_face_font(host: &mut dyn FontHost, font: &FontResource, done: LoadCallback) {
    if let Some(rule) = face_rule(&font.font_name, &font.src) {
        host.inject_style(&font.font_name, &rule);
        host.preload_family(&font.font_name);
        tracing::debug!(family = %font.font_name, sources = font.src.len(), "registered font face");
    }
    done.succeed();
}

pub fn unregister_face_font(host: &mut dyn FontHost, font: &FontResource) {
    host.remove_family(&font.font_name);
}

/// Bytes `encodeURI` escapes: everything but alphanumerics, unreserved marks and URI delimiters
const ENCODE_URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

fn encode_uri(path: &str) -> String {
    utf8_percent_encode(path, ENCODE_URI_SET).to_string()
}

/// In-memory document: keeps injected rules and preloaded families
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: Vec<(String, String)>,
    preloaded: Vec<String>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(_, rule)| rule.as_str())
    }

    /// Full text of the style element
    pub fn text(&self) -> String {
        self.rules().collect()
    }

    pub fn is_preloaded(&self, family: &str) -> bool {
        self.preloaded.iter().any(|name| name == family)
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.rules.iter().any(|(name, _)| name == family)
    }
}

impl FontHost for StyleSheet {
    fn inject_style(&mut self, family: &str, rule: &str) {
        self.rules.push((family.to_string(), rule.to_string()));
    }

    fn preload_family(&mut self, family: &str) {
        if !self.is_preloaded(family) {
            self.preloaded.push(family.to_string());
        }
    }

    fn remove_family(&mut self, family: &str) {
        self.rules.retain(|(name, _)| name != family);
        self.preloaded.retain(|name| name != family);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preloader::batch::BatchProgress;
    use crate::resources::ResourceDescriptor;

    fn press_start() -> FontResource {
        let descriptor = ResourceDescriptor::font(
            "PressStart",
            [
                FontSource::new("res/fonts/Press Start.ttf", "truetype"),
                FontSource::new("res/fonts/press.woff", "woff"),
            ],
        );
        descriptor.as_font().unwrap().clone()
    }

    #[test]
    fn test_face_rule_format() {
        let font = press_start();
        let rule = face_rule(&font.font_name, &font.src).unwrap();
        assert_eq!(
            rule,
            "@font-face { font-family:PressStart; src:url('res/fonts/Press%20Start.ttf') \
             format('truetype'),url('res/fonts/press.woff') format('woff');};"
        );
    }

    #[test]
    fn test_face_rule_encodes_like_encode_uri() {
        let sources = [
            FontSource::new("res/字体/100%.ttf", "truetype"),
            FontSource::new("res/a{b}|c^.woff?v=1&x=2#frag", "woff"),
        ];
        let rule = face_rule("F", &sources).unwrap();
        assert_eq!(
            rule,
            "@font-face { font-family:F; src:url('res/%E5%AD%97%E4%BD%93/100%25.ttf') \
             format('truetype'),url('res/a%7Bb%7D%7Cc%5E.woff?v=1&x=2#frag') format('woff');};"
        );
    }

    #[test]
    fn test_no_sources_no_rule() {
        assert_eq!(face_rule("Empty", &[]), None);
    }

    #[test]
    fn test_register_completes_immediately() {
        let mut sheet = StyleSheet::new();
        let progress = BatchProgress::shared(1);
        let font = press_start();

        register_face_font(&mut sheet, &font, LoadCallback::new("PressStart", progress.clone()));

        assert_eq!(progress.lock().loaded(), 1);
        assert!(sheet.has_family("PressStart"));
        assert!(sheet.is_preloaded("PressStart"));
        assert!(sheet.text().starts_with("@font-face"));

        unregister_face_font(&mut sheet, &font);
        assert!(!sheet.has_family("PressStart"));
    }
}
