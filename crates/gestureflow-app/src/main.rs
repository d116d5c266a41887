#![warn(missing_docs)]
//! # gestureflow-app binary
//!
//! Headless walkthrough of the portal surfaces, useful for smoke-checking
//! the runtime without the rendering layer.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use gestureflow_app::{AppError, PortalApp, app_version};
use gestureflow_capture::SyntheticCameraBackend;
use gestureflow_core::FileInput;
use gestureflow_platform::StaticHostEnvironment;

fn main() {
    if let Err(error) = run() {
        eprintln!("gestureflow walkthrough failed: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    println!("gestureflow-app {}", app_version());

    let url_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    let env = Arc::new(StaticHostEnvironment::native(false));
    let camera = Arc::new(SyntheticCameraBackend::new());
    let mut app = PortalApp::new(env, camera, 1_280, url_seed);
    let mut now_ms = 0;

    // Image surface: select, transfer to 100, reveal the interpretation.
    app.navigate("/image-upload");
    let image = FileInput::new("hands.png", "image/png", vec![0x89, b'P', b'N', b'G'])?;
    app.image_mut().select_file(&image, now_ms)?;
    now_ms = advance(&mut app, now_ms, 4_000)?;
    report(&mut app, "image");

    // Video surface: select, wait for the transfer, play for the script.
    app.navigate("/video-upload");
    let video = FileInput::new("greeting.mp4", "video/mp4", vec![0x00, 0x00, 0x00, 0x18])?;
    app.video_mut().select_file(&video, now_ms)?;
    now_ms = advance(&mut app, now_ms, 3_000)?;
    app.video_mut().toggle_playback(now_ms)?;
    now_ms = advance(&mut app, now_ms, 10_000)?;
    report(&mut app, "video");

    // Webcam surface: start, run the live script, stop.
    app.navigate("/webcam");
    app.webcam_mut().start(now_ms)?;
    advance(&mut app, now_ms, 15_000)?;
    report(&mut app, "webcam");
    app.webcam_mut().stop();

    app.teardown()
}

fn advance(app: &mut PortalApp, from_ms: u64, by_ms: u64) -> Result<u64, AppError> {
    let until_ms = from_ms + by_ms;
    let mut now_ms = from_ms;
    while now_ms < until_ms {
        now_ms += 50;
        app.tick(now_ms)?;
    }
    Ok(until_ms)
}

fn report(app: &mut PortalApp, surface: &str) {
    for notice in app.drain_notices() {
        println!("[{surface}] {:?}: {}", notice.level, notice.message);
    }

    let results = match surface {
        "image" => app.image().results().to_vec(),
        "video" => app.video().results().to_vec(),
        _ => app.webcam().results().to_vec(),
    };
    for line in &results {
        println!("[{surface}] interpretation: {line}");
    }
}
