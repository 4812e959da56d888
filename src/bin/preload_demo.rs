use scene_preloader::prelude::*;
use std::time::{Duration, Instant};

#[cfg(feature = "profiling")]
use std::fs::File;

const DEFAULT_LIST: &str = r#"[
    "res/HelloWorld.png",
    { "src": "res/Maps/zt.tmx" },
    "res/config.json"
]"#;

const FRAME: Duration = Duration::from_millis(16);

/// `preload_demo [resources.json] [asset_dir]`
fn load_args() -> Result<(Vec<ResourceDescriptor>, String)> {
    let mut args = std::env::args().skip(1);
    let list = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_LIST.to_string(),
    };
    let base = args.next().unwrap_or_else(|| ".".to_string());
    Ok((ResourceDescriptor::list_from_json(&list)?, base))
}

fn run(resources: &[ResourceDescriptor], base: &str) -> Result<()> {
    let mut app = App::new(Backends::from_dir(base));

    app.show_loading_screen(resources, |report| {
        println!(
            "Batch {} finished: {}/{} loaded, {} failed",
            report.id.0,
            report.succeeded(),
            report.total,
            report.failed.len()
        );
        for item in &report.failed {
            println!("  {}: {}", item.path, item.reason);
        }
    });

    let start = Instant::now();
    let frames = app.run_until_idle(FRAME, 10_000)?;
    println!(
        "{} after {} frames ({:?})",
        app.loading_screen.label(),
        frames,
        start.elapsed()
    );
    Ok(())
}

#[cfg(feature = "profiling")]
fn main() {
    let file = match File::create("trace.json") {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cannot create trace.json: {err}");
            std::process::exit(1);
        }
    };
    let (non_blocking, _guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .init();

    let outcome = load_args().and_then(|(resources, base)| {
        let _span = tracing::info_span!("preload_demo", items = resources.len()).entered();
        run(&resources, &base)
    });
    if let Err(err) = outcome {
        eprintln!("preload_demo: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "profiling"))]
fn main() {
    let outcome = load_args().and_then(|(resources, base)| run(&resources, &base));
    if let Err(err) = outcome {
        eprintln!("preload_demo: {err}");
        std::process::exit(1);
    }
}
