use binrw::BinRead;
use serde::Serialize;

pub static UPGRADE_FILE_IDENTIFIER: [u8; 4] = [0x1E, 0xF1, 0xEE, 0x0B];

/// Size of the header up to and including `total_image_size`.
pub const FIXED_HEADER_SIZE: usize = 56;
/// Tag id + length.
pub const SUB_ELEMENT_HEADER_SIZE: usize = 6;

pub const FIELD_CONTROL_SECURITY_CREDENTIAL: u16 = 1 << 0;
pub const FIELD_CONTROL_DEVICE_SPECIFIC: u16 = 1 << 1;
pub const FIELD_CONTROL_HARDWARE_VERSIONS: u16 = 1 << 2;

#[derive(BinRead, Serialize, Debug, Clone, PartialEq, Eq)]
#[br(little)]
#[serde(rename_all = "camelCase")]
pub struct OtaHeader {
    #[serde(skip)]
    pub upgrade_file_identifier: [u8; 4],
    #[serde(rename = "otaHeaderVersion")]
    pub header_version: u16,
    #[serde(rename = "otaHeaderLength")]
    pub header_length: u16,
    #[serde(rename = "otaHeaderFieldControl")]
    pub header_field_control: u16,
    pub manufacturer_code: u16,
    pub image_type: u16,
    pub file_version: u32,
    pub zigbee_stack_version: u16,
    #[serde(rename = "otaHeaderString", serialize_with = "serialize_header_string")]
    pub header_string_bytes: [u8; 32],
    pub total_image_size: u32,
    #[br(if((header_field_control & FIELD_CONTROL_SECURITY_CREDENTIAL) != 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_credential_version: Option<u8>,
    #[br(if((header_field_control & FIELD_CONTROL_DEVICE_SPECIFIC) != 0))]
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_destination")]
    pub upgrade_file_destination: Option<[u8; 8]>,
    #[br(if((header_field_control & FIELD_CONTROL_HARDWARE_VERSIONS) != 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_hardware_version: Option<u16>,
    #[br(if((header_field_control & FIELD_CONTROL_HARDWARE_VERSIONS) != 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_hardware_version: Option<u16>,
}
impl OtaHeader {
    /// Header string as text, padding and NUL bytes included.
    pub fn header_string(&self) -> String {
        String::from_utf8_lossy(&self.header_string_bytes).into_owned()
    }
    pub fn has_valid_identifier(&self) -> bool {
        self.upgrade_file_identifier == UPGRADE_FILE_IDENTIFIER
    }
}

fn serialize_header_string<S: serde::Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(bytes))
}

fn serialize_destination<S: serde::Serializer>(dest: &Option<[u8; 8]>, s: S) -> Result<S::Ok, S::Error> {
    match dest {
        Some(bytes) => s.serialize_str(&hex::encode_upper(bytes)),
        None => s.serialize_none(),
    }
}

#[derive(BinRead, Debug)]
#[br(little)]
pub struct SubElementHeader {
    pub tag_id: u16,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubElement {
    pub tag_id: u16,
    pub length: u32,
    pub data: Vec<u8>,
}
impl SubElement {
    pub fn tag_name(&self) -> &str {
        match self.tag_id {
            0x0000 => "upgrade image",
            0x0001 => "ECDSA signature",
            0x0002 => "ECDSA signing certificate",
            0x0003 => "image integrity code",
            0x0004 => "picture data",
            0xF000..=0xFFFF => "manufacturer specific",
            _ => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImage {
    pub header: OtaHeader,
    pub elements: Vec<SubElement>,
    /// From the identifier through `total_image_size` bytes.
    pub raw_image: Vec<u8>,
}
