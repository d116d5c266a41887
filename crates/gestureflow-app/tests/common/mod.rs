//! Shared fixtures for app integration tests.

use std::sync::Arc;

use gestureflow_app::PortalApp;
use gestureflow_capture::{CameraDevice, SyntheticCameraBackend};
use gestureflow_core::FileInput;
use gestureflow_platform::StaticHostEnvironment;

/// Creates a small valid image file input.
#[allow(dead_code)]
pub fn image_file() -> FileInput {
    FileInput::new("hands.png", "image/png", vec![0x89, b'P', b'N', b'G'])
        .expect("image fixture should be valid")
}

/// Creates a small valid video file input.
#[allow(dead_code)]
pub fn video_file() -> FileInput {
    FileInput::new("greeting.mp4", "video/mp4", vec![0x00, 0x00, 0x00, 0x18])
        .expect("video fixture should be valid")
}

/// Creates a file input no upload surface accepts.
#[allow(dead_code)]
pub fn text_file() -> FileInput {
    FileInput::new("notes.txt", "text/plain", vec![b'h', b'i'])
        .expect("text fixture should be valid")
}

/// Creates a desktop-width portal over a two-camera synthetic backend.
#[allow(dead_code)]
pub fn desktop_portal() -> (PortalApp, Arc<SyntheticCameraBackend>) {
    let camera = Arc::new(SyntheticCameraBackend::with_devices(vec![
        CameraDevice {
            id: "camera-1".to_string(),
            label: "Front Camera".to_string(),
        },
        CameraDevice {
            id: "camera-2".to_string(),
            label: "Rear Camera".to_string(),
        },
    ]));
    let app = PortalApp::new(
        Arc::new(StaticHostEnvironment::native(false)),
        camera.clone(),
        1_280,
        7,
    );
    (app, camera)
}
