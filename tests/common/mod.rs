#![allow(dead_code)]

use scene_preloader::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// How a stub answers load requests
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    Succeed,
    Fail,
    /// Keep the callback until `release` is called
    Hold,
}

/// Backend that records every call it receives
pub struct StubBackend {
    pub reply: Reply,
    pub loads: Vec<String>,
    pub unloads: Vec<String>,
    pub held: Vec<LoadCallback>,
}

pub type Shared = Rc<RefCell<StubBackend>>;

impl StubBackend {
    pub fn shared(reply: Reply) -> Shared {
        Rc::new(RefCell::new(StubBackend {
            reply,
            loads: Vec::new(),
            unloads: Vec::new(),
            held: Vec::new(),
        }))
    }

    /// Finish every held callback with `result`
    pub fn release(&mut self, result: std::result::Result<(), String>) {
        for done in self.held.drain(..) {
            done.finish(result.clone());
        }
    }
}

impl AssetBackend for StubBackend {
    fn load(&mut self, path: &str, done: LoadCallback) {
        self.loads.push(path.to_string());
        match self.reply {
            Reply::Succeed => done.succeed(),
            Reply::Fail => done.fail(format!("{path}: not found")),
            Reply::Hold => self.held.push(done),
        }
    }

    fn unload(&mut self, path: &str) {
        self.unloads.push(path.to_string());
    }
}

/// One stub per backend slot, kept so tests can inspect them
pub struct Stubs {
    pub images: Shared,
    pub plists: Shared,
    pub binaries: Shared,
    pub texts: Shared,
    pub audio: Shared,
}

impl Stubs {
    pub fn new(reply: Reply) -> Self {
        Self {
            images: StubBackend::shared(reply),
            plists: StubBackend::shared(reply),
            binaries: StubBackend::shared(reply),
            texts: StubBackend::shared(reply),
            audio: StubBackend::shared(reply),
        }
    }

    /// Backends with audio and an in-memory style sheet installed
    pub fn backends(&self) -> Backends {
        Backends::new(
            self.images.clone(),
            self.plists.clone(),
            self.binaries.clone(),
            self.texts.clone(),
        )
        .with_audio(self.audio.clone())
        .with_font_host(StyleSheet::new())
    }

    /// Every load across all stubs
    pub fn total_loads(&self) -> usize {
        [&self.images, &self.plists, &self.binaries, &self.texts, &self.audio]
            .iter()
            .map(|stub| stub.borrow().loads.len())
            .sum()
    }
}

pub fn list(paths: &[&str]) -> Vec<ResourceDescriptor> {
    paths.iter().map(|path| ResourceDescriptor::from(*path)).collect()
}
