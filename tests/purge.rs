mod common;

use common::{list, Reply, StubBackend, Stubs};
use scene_preloader::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_purge_empty_list_is_noop() {
    let stubs = Stubs::new(Reply::Succeed);
    let mut preloader = Preloader::new(stubs.backends());

    preloader.purge_cached_data(&[]).unwrap();
    for stub in [&stubs.images, &stubs.plists, &stubs.binaries, &stubs.texts, &stubs.audio] {
        assert!(stub.borrow().unloads.is_empty());
    }
}

#[test]
fn test_purge_single_image() {
    let stubs = Stubs::new(Reply::Succeed);
    let mut preloader = Preloader::new(stubs.backends());

    preloader.purge_cached_data(&list(&["res/hero.png"])).unwrap();
    assert_eq!(stubs.images.borrow().unloads, vec!["res/hero.png"]);
    assert!(stubs.plists.borrow().unloads.is_empty());
    assert!(stubs.texts.borrow().unloads.is_empty());
}

#[test]
fn test_purge_routes_by_kind() {
    let stubs = Stubs::new(Reply::Succeed);
    let mut preloader = Preloader::new(stubs.backends());

    let resources = vec![
        ResourceDescriptor::source("level.tmx"),
        ResourceDescriptor::from("menu.ccbi"),
        ResourceDescriptor::from("shader.fsh"),
        ResourceDescriptor::from("theme.ogg"),
    ];
    preloader.purge_cached_data(&resources).unwrap();

    assert_eq!(stubs.plists.borrow().unloads, vec!["level.tmx"]);
    assert_eq!(stubs.binaries.borrow().unloads, vec!["menu.ccbi"]);
    assert_eq!(stubs.texts.borrow().unloads, vec!["shader.fsh"]);
    assert_eq!(stubs.audio.borrow().unloads, vec!["theme.ogg"]);
}

#[test]
fn test_purge_fails_fast_on_unknown_extension() {
    let stubs = Stubs::new(Reply::Succeed);
    let mut preloader = Preloader::new(stubs.backends());

    let err = preloader
        .purge_cached_data(&list(&["a.png", "b.zzz", "c.png"]))
        .unwrap_err();
    assert_eq!(err, PreloadError::UnknownResourceType("zzz".to_string()));
    assert_eq!(stubs.images.borrow().unloads, vec!["a.png"]);
}

#[test]
fn test_purge_sound_without_audio_engine() {
    let images = StubBackend::shared(Reply::Succeed);
    let mut preloader = Preloader::new(Backends::new(
        images.clone(),
        StubBackend::shared(Reply::Succeed),
        StubBackend::shared(Reply::Succeed),
        StubBackend::shared(Reply::Succeed),
    ));

    let err = preloader
        .purge_cached_data(&list(&["a.png", "b.wav"]))
        .unwrap_err();
    assert_eq!(err, PreloadError::MissingCollaborator("AudioEngine"));
    assert_eq!(images.borrow().unloads, vec!["a.png"]);
}

#[test]
fn test_purge_font_removes_face() {
    let sheet = Rc::new(RefCell::new(StyleSheet::new()));
    let stubs = Stubs::new(Reply::Succeed);
    let backends = stubs.backends().with_font_host(sheet.clone());
    let mut preloader = Preloader::new(backends);

    let font = ResourceDescriptor::font(
        "Marker Felt",
        [FontSource::new("fonts/Marker Felt.ttf", "truetype")],
    );
    preloader.preload(std::slice::from_ref(&font), |_| {});
    preloader.tick(None).unwrap();

    assert!(sheet.borrow().has_family("Marker Felt"));
    assert!(sheet.borrow().is_preloaded("Marker Felt"));
    assert!(sheet.borrow().text().contains("url('fonts/Marker%20Felt.ttf') format('truetype')"));

    preloader.purge_cached_data(&[font]).unwrap();
    assert!(!sheet.borrow().has_family("Marker Felt"));
    assert!(sheet.borrow().text().is_empty());
}

#[test]
fn test_purge_does_not_touch_running_batch() {
    let stubs = Stubs::new(Reply::Hold);
    let mut preloader = Preloader::new(stubs.backends());
    preloader.preload(&list(&["a.png", "b.png"]), |_| {});
    preloader.tick(None).unwrap();

    preloader.purge_cached_data(&list(&["a.png"])).unwrap();
    assert!(preloader.is_running());
    assert_eq!(preloader.current_batch().unwrap().dispatched(), 1);
}

#[test]
fn test_purge_font_without_host_is_skipped() {
    let images = StubBackend::shared(Reply::Succeed);
    let mut preloader = Preloader::new(Backends::new(
        images.clone(),
        StubBackend::shared(Reply::Succeed),
        StubBackend::shared(Reply::Succeed),
        StubBackend::shared(Reply::Succeed),
    ));

    let resources = vec![
        ResourceDescriptor::font("Arial", [FontSource::new("fonts/arial.ttf", "truetype")]),
        ResourceDescriptor::from("a.png"),
    ];
    preloader.purge_cached_data(&resources).unwrap();
    assert_eq!(images.borrow().unloads, vec!["a.png"]);
}
