//! Batch driver tests.

use std::fs;

use zigbee_ota_images::extract::{fetch_all, AppContext};

// nothing listens on port 1, so the manifest download fails without leaving the host
static UNREACHABLE_MANIFEST: &str = "http://127.0.0.1:1/feed/version_info.json";

fn context(name: &str, keep_temp: bool) -> AppContext {
    let base = std::env::temp_dir().join(format!("zigbee-ota-images-{}-{}", name, std::process::id()));
    AppContext {
        output_dir: base.join("images"),
        temp_dir: base.join("temp"),
        keep_temp,
    }
}

#[test]
fn temp_dir_removed_when_manifest_download_fails() {
    let app_ctx = context("cleanup", false);
    assert!(fetch_all(&app_ctx, UNREACHABLE_MANIFEST).is_err());
    assert!(!app_ctx.temp_dir.exists());

    fs::remove_dir_all(app_ctx.output_dir.parent().unwrap()).unwrap();
}

#[test]
fn temp_dir_kept_on_request() {
    let app_ctx = context("keep", true);
    assert!(fetch_all(&app_ctx, UNREACHABLE_MANIFEST).is_err());
    assert!(app_ctx.temp_dir.exists());

    fs::remove_dir_all(app_ctx.output_dir.parent().unwrap()).unwrap();
}
