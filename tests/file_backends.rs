use scene_preloader::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

fn asset_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("scene_preloader_it_{name}_{}", std::process::id()));
    std::fs::create_dir_all(dir.join("res")).unwrap();
    std::fs::write(dir.join("res/hero.png"), [0x89, b'P', b'N', b'G', 0, 1, 2, 3]).unwrap();
    std::fs::write(dir.join("res/level.tmx"), "<map version=\"1.0\"/>").unwrap();
    std::fs::write(dir.join("res/config.json"), r#"{"lives": 3}"#).unwrap();
    std::fs::write(dir.join("res/broken.json"), "{ lives: ").unwrap();
    dir
}

fn drive(preloader: &mut Preloader) -> Option<BatchReport> {
    for _ in 0..32 {
        if let TickOutcome::Completed(report) = preloader.tick(None).unwrap() {
            return Some(report);
        }
    }
    None
}

#[test]
fn test_load_from_directory() {
    let dir = asset_dir("load");
    let mut preloader = Preloader::new(Backends::from_dir(&dir));

    let resources = ResourceDescriptor::list_from_json(
        r#"["res/hero.png?v=2", {"src": "res/level.tmx"}, "res/config.json"]"#,
    )
    .unwrap();
    preloader.preload(&resources, |_| {});

    let report = drive(&mut preloader).unwrap();
    assert_eq!(report.total, 3);
    assert!(report.is_clean(), "unexpected failures: {:?}", report.failed);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_failed_files_still_complete_batch() {
    let dir = asset_dir("failures");
    let mut preloader = Preloader::new(Backends::from_dir(&dir));

    let resources: Vec<_> = ["res/missing.png", "res/broken.json", "res/hero.png"]
        .into_iter()
        .map(ResourceDescriptor::from)
        .collect();
    preloader.preload(&resources, |_| {});

    let report = drive(&mut preloader).unwrap();
    assert_eq!(report.loaded, 3);
    assert_eq!(report.succeeded(), 1);

    let failed: Vec<_> = report.failed.iter().map(|item| item.path.as_str()).collect();
    assert_eq!(failed, vec!["res/missing.png", "res/broken.json"]);
    assert!(report.failed[1].reason.contains("JSON"));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_purge_evicts_cached_file() {
    let dir = asset_dir("purge");
    let images = Rc::new(RefCell::new(FileCache::new(&dir, FileCacheMode::Bytes)));
    let texts = Rc::new(RefCell::new(FileCache::new(&dir, FileCacheMode::Text)));
    let backends = Backends::new(
        images.clone(),
        FileCache::new(&dir, FileCacheMode::Bytes),
        FileCache::new(&dir, FileCacheMode::Bytes),
        texts.clone(),
    );
    let mut preloader = Preloader::new(backends);

    let resources: Vec<_> = ["res/hero.png", "res/config.json"]
        .into_iter()
        .map(ResourceDescriptor::from)
        .collect();
    preloader.preload(&resources, |_| {});
    drive(&mut preloader).unwrap();

    assert!(images.borrow().contains("res/hero.png"));
    assert_eq!(
        texts.borrow_mut().get_text("res/config.json").as_deref(),
        Some(r#"{"lives": 3}"#)
    );

    preloader.purge_cached_data(&resources).unwrap();
    assert!(!images.borrow().contains("res/hero.png"));
    assert!(texts.borrow().is_empty());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_sound_needs_audio_engine() {
    let dir = asset_dir("sound");
    let mut preloader = Preloader::new(Backends::from_dir(&dir));
    preloader.preload(&[ResourceDescriptor::from("res/theme.mp3")], |_| {});

    assert_eq!(
        preloader.tick(None).unwrap_err(),
        PreloadError::MissingCollaborator("AudioEngine")
    );

    std::fs::remove_dir_all(dir).ok();
}
