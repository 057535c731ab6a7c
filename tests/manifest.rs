//! Firmware feed parsing tests.

use zigbee_ota_images::manifest::{parse_manifest, ManifestEntry};

static FEED: &str = r#"[
    {"fw_binary_url": "http://fw.ota.homesmart.ikea.net/global/GW1.0/01.17.023/bin/10037585-TRADFRI-gateway-1.17.023.ota.ota.signed", "fw_type": 0, "fw_update_prio": 5},
    {"fw_binary_url": "http://fw.ota.homesmart.ikea.net/global/GW1.0/01.17.023/bin/159699-5.1-TRADFRI-bulb-ws-1000lm-prod-2.3.093.ota.ota.signed", "fw_image_type": 8705, "fw_manufacturer_id": 4476, "fw_type": 2, "fw_sha3_256": "ab12"},
    {"fw_binary_url": "http://fw.ota.homesmart.ikea.net/global/GW1.0/01.17.023/bin/gateway-1.17.023.bin", "fw_type": 3}
]"#;

#[test]
fn parses_entries_in_order() {
    let entries = parse_manifest(FEED.as_bytes()).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].fw_type, Some(0));
    assert_eq!(entries[0].fw_image_type, None);
    assert_eq!(entries[1].fw_image_type, Some(8705));
    assert_eq!(entries[1].fw_manufacturer_id, Some(4476));
    assert_eq!(entries[1].fw_sha3_256.as_deref(), Some("ab12"));
}

#[test]
fn only_signed_ota_files_are_selected() {
    let entries = parse_manifest(FEED.as_bytes()).unwrap();
    let selected: Vec<&str> = entries.iter().filter(|e| e.is_signed_ota()).map(|e| e.file_name()).collect();
    assert_eq!(
        selected,
        vec![
            "10037585-TRADFRI-gateway-1.17.023.ota.ota.signed",
            "159699-5.1-TRADFRI-bulb-ws-1000lm-prod-2.3.093.ota.ota.signed",
        ]
    );
}

#[test]
fn file_name_ignores_query() {
    let entry = ManifestEntry {
        fw_binary_url: "https://example.com/a/b/x.ota.ota.signed?token=1".to_string(),
        fw_type: None,
        fw_image_type: None,
        fw_manufacturer_id: None,
        fw_sha3_256: None,
    };
    assert_eq!(entry.file_name(), "x.ota.ota.signed");
    assert!(entry.is_signed_ota());
}

#[test]
fn rejects_entry_without_url() {
    assert!(parse_manifest(br#"[{"fw_type": 1}]"#).is_err());
    assert!(parse_manifest(b"{}").is_err());
}
