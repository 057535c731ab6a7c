//! Vendor firmware feed (`version_info.json`).

use serde::Deserialize;

pub static DEFAULT_MANIFEST_URL: &str = "http://fw.ota.homesmart.ikea.net/feed/version_info.json";
pub static SIGNED_OTA_SUFFIX: &str = ".ota.ota.signed";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub fw_binary_url: String,
    #[serde(default)]
    pub fw_type: Option<u32>,
    #[serde(default)]
    pub fw_image_type: Option<u16>,
    #[serde(default)]
    pub fw_manufacturer_id: Option<u16>,
    #[serde(default)]
    pub fw_sha3_256: Option<String>,
}
impl ManifestEntry {
    /// Last path segment of the binary URL.
    pub fn file_name(&self) -> &str {
        let path = self.fw_binary_url.split(['?', '#']).next().unwrap_or("");
        path.rsplit('/').next().unwrap_or(path)
    }
    pub fn is_signed_ota(&self) -> bool {
        self.file_name().ends_with(SIGNED_OTA_SUFFIX)
    }
}

pub fn parse_manifest(data: &[u8]) -> Result<Vec<ManifestEntry>, serde_json::Error> {
    serde_json::from_slice(data)
}
