use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::download;
use crate::formats::zigbee_ota::{self, ParsedImage};
use crate::manifest::{self, ManifestEntry};
use crate::output;

pub struct AppContext {
    pub output_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub keep_temp: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub fn print_image_info(parsed: &ParsedImage) {
    let hdr = &parsed.header;
    println!("\nImage info:\nManufacturer: {:04X}\nImage type: {:04X}\nFile version: {:08X}\nStack version: {}\nHeader string: {}\nTotal size: {}",
            hdr.manufacturer_code, hdr.image_type, hdr.file_version, hdr.zigbee_stack_version, output::device_name(hdr), hdr.total_image_size);
    if let Some(v) = hdr.security_credential_version {
        println!("Security credential version: {}", v);
    }
    if let Some(dest) = hdr.upgrade_file_destination {
        println!("Upgrade file destination: {}", hex::encode_upper(dest));
    }
    if let (Some(min), Some(max)) = (hdr.minimum_hardware_version, hdr.maximum_hardware_version) {
        println!("Hardware versions: {}..{}", min, max);
    }

    for (i, element) in parsed.elements.iter().enumerate() {
        println!("{}/{}: Tag: {:04X}({}), Size: {}", i + 1, parsed.elements.len(), element.tag_id, element.tag_name(), element.length);
    }
}

/// Decodes `data` and saves the image under its normalized name.
pub fn extract_buffer(data: &[u8], output_dir: &Path, version: &str, source: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let parsed = zigbee_ota::decode(data)?;
    print_image_info(&parsed);
    output::save_image(output_dir, &parsed, version, source)
}

/// Decodes a single local file.
pub fn extract_file(input: &Path, output_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    if !zigbee_ota::is_zigbee_ota_file(&data) {
        return Err("Input format not recognized!".into());
    }
    println!("Zigbee OTA file detected!");

    let file_name = input.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    extract_buffer(&data, output_dir, &output::version_token(&file_name), &input.display().to_string())
}

fn process_entry(app_ctx: &AppContext, entry: &ManifestEntry) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_name = entry.file_name();
    let temp_path = app_ctx.temp_dir.join(file_name);
    let data = download::download_file(&entry.fw_binary_url, &temp_path)?;

    extract_buffer(&data, &app_ctx.output_dir, &output::version_token(file_name), &entry.fw_binary_url)
}

/// Runs every signed OTA entry of the manifest. Failing entries are reported and skipped.
pub fn process_manifest(app_ctx: &AppContext, entries: &[ManifestEntry]) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for entry in entries {
        if !entry.is_signed_ota() {
            summary.skipped += 1;
            continue;
        }

        match process_entry(app_ctx, entry) {
            Ok(_) => summary.saved += 1,
            Err(e) => {
                warn!("Skipping {}: {}", entry.fw_binary_url, e);
                println!("- Failed: {}", e);
                summary.failed += 1;
            }
        }
    }

    summary
}

fn fetch_manifest_entries(app_ctx: &AppContext, manifest_url: &str) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    let manifest_data = download::download_file(manifest_url, &app_ctx.temp_dir.join("version_info.json"))?;
    let entries = manifest::parse_manifest(&manifest_data)?;
    println!("Manifest entries: {}", entries.len());

    Ok(process_manifest(app_ctx, &entries))
}

/// Downloads the manifest and processes its entries. The temp dir is removed
/// afterwards, whether or not the run succeeded, unless `keep_temp` is set.
pub fn fetch_all(app_ctx: &AppContext, manifest_url: &str) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    fs::create_dir_all(&app_ctx.temp_dir)?;
    fs::create_dir_all(&app_ctx.output_dir)?;

    let result = fetch_manifest_entries(app_ctx, manifest_url);

    if !app_ctx.keep_temp {
        if let Err(e) = fs::remove_dir_all(&app_ctx.temp_dir) {
            warn!("Failed to remove {}: {}", app_ctx.temp_dir.display(), e);
        }
    }

    let summary = result?;
    println!("\nSaved: {}, Skipped: {}, Failed: {}", summary.saved, summary.skipped, summary.failed);
    Ok(summary)
}
