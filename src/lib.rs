//! # zigbee-ota-images
//!
//! Fetches a vendor's Zigbee firmware feed, downloads the signed OTA files and
//! re-saves the OTA image found inside each one under a normalized name, with
//! a text side-file describing its header.
//!
//! The decoder in [`formats::zigbee_ota`] is pure and works on in-memory
//! buffers:
//!
//! ```no_run
//! use zigbee_ota_images::formats::zigbee_ota;
//!
//! let data = std::fs::read("bulb.ota.ota.signed").unwrap();
//! let parsed = zigbee_ota::decode(&data).unwrap();
//! println!("{:04X} {:08X}", parsed.header.manufacturer_code, parsed.header.file_version);
//! ```

pub mod download;
pub mod extract;
pub mod formats;
pub mod manifest;
pub mod output;
pub mod utils;
