//! Output naming and persistence of decoded images.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::formats::zigbee_ota::{OtaHeader, ParsedImage};
use crate::manifest::SIGNED_OTA_SUFFIX;
use crate::utils::common;

static HEADER_STRING_PREFIXES: [&str; 3] = ["EBL ", "GBL ", "GBL_"];

/// Firmware version token carried in a vendor file name,
/// e.g. `10035514-TRADFRI-bulb-ws-1000lm-1.0.012.ota.ota.signed` -> `1.0.012`.
pub fn version_token(file_name: &str) -> String {
    let stripped = file_name.replace("-prod", "").replace(SIGNED_OTA_SUFFIX, "");
    stripped.rsplit('-').next().unwrap_or_default().to_string()
}

/// Device name from the header string, bootloader prefixes and NUL padding removed.
pub fn device_name(header: &OtaHeader) -> String {
    let mut name = header.header_string();
    for prefix in HEADER_STRING_PREFIXES {
        name = name.replace(prefix, "");
    }
    name.replace('\0', "")
}

pub fn output_file_name(header: &OtaHeader, version: &str) -> String {
    format!(
        "{:X}-{:X}-{:08X}-{}-{}.zigbee",
        header.manufacturer_code,
        header.image_type,
        header.file_version,
        device_name(header),
        version
    )
}

pub fn metadata_text(source: &str, header: &OtaHeader) -> Result<String, serde_json::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    header.serialize(&mut serializer)?;

    Ok(format!("Source: {}\nImage Details: {}", source, String::from_utf8_lossy(&buf)))
}

/// Writes the raw image and its `.txt` side-file into `output_dir`; returns the image path.
pub fn save_image(output_dir: &Path, parsed: &ParsedImage, version: &str, source: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_name = output_file_name(&parsed.header, version);
    let output_path = output_dir.join(&file_name);
    println!("output = {}", output_path.display());

    common::write_file(&output_path, &parsed.raw_image)?;

    let metadata = metadata_text(source, &parsed.header)?;
    common::write_file(&output_dir.join(format!("{}.txt", file_name)), metadata.as_bytes())?;

    println!("- Saved file!");
    Ok(output_path)
}
