//! Zigbee OTA upgrade image container.
//!
//! An image starts with the `1E F1 EE 0B` identifier, followed by a 56 byte
//! fixed header, optional header fields selected by the field control
//! bitmask, and a list of tag/length/data sub-elements filling the image up
//! to `total_image_size`. Signed vendor files wrap the image, so it may not
//! start at offset 0.

mod error;
mod include;

use std::io::Cursor;

use binrw::BinReaderExt;
use log::debug;

use crate::utils::common;
pub use error::FormatError;
pub use include::*;

pub fn is_zigbee_ota_file(data: &[u8]) -> bool {
    locate(data).is_ok()
}

/// Byte offset of the first upgrade file identifier in `buffer`.
pub fn locate(buffer: &[u8]) -> Result<usize, FormatError> {
    common::find_bytes(buffer, &UPGRADE_FILE_IDENTIFIER)
        .ok_or(FormatError::MagicNotFound { searched: buffer.len() })
}

/// Width of the optional header fields selected by `field_control`.
pub fn conditional_fields_size(field_control: u16) -> usize {
    let mut size = 0;
    if field_control & FIELD_CONTROL_SECURITY_CREDENTIAL != 0 {
        size += 1;
    }
    if field_control & FIELD_CONTROL_DEVICE_SPECIFIC != 0 {
        size += 8;
    }
    if field_control & FIELD_CONTROL_HARDWARE_VERSIONS != 0 {
        size += 4;
    }
    size
}

pub fn parse_header(buffer: &[u8], offset: usize) -> Result<OtaHeader, FormatError> {
    let available = buffer.len().saturating_sub(offset);
    if available < FIXED_HEADER_SIZE {
        return Err(FormatError::TruncatedInput {
            what: "OTA header",
            offset: 0,
            needed: FIXED_HEADER_SIZE,
            available,
        });
    }
    let image = &buffer[offset..];

    let field_control = u16::from_le_bytes([image[8], image[9]]);
    let needed = FIXED_HEADER_SIZE + conditional_fields_size(field_control);
    if available < needed {
        return Err(FormatError::TruncatedInput {
            what: "optional header fields",
            offset: FIXED_HEADER_SIZE,
            needed: needed - FIXED_HEADER_SIZE,
            available: available - FIXED_HEADER_SIZE,
        });
    }

    let header: OtaHeader = Cursor::new(image).read_le()?;
    if !header.has_valid_identifier() {
        return Err(FormatError::IdentifierMismatch {
            found: header.upgrade_file_identifier,
            offset,
        });
    }

    if header.header_length as usize != needed {
        // sub-elements are located by header_length regardless
        debug!("Header length {} differs from computed header size {}", header.header_length, needed);
    }

    Ok(header)
}

/// Walks the sub-element list of `image` (which starts at the identifier)
/// from `start_offset` until `total_image_size` is reached.
pub fn parse_sub_elements(image: &[u8], start_offset: usize, total_image_size: u32) -> Result<Vec<SubElement>, FormatError> {
    let total = total_image_size as u64;
    let available = image.len() as u64;
    let mut reader = Cursor::new(image);
    let mut elements = Vec::new();
    let mut position = start_offset as u64;

    while position < total {
        if position >= available {
            // input ends short of total_image_size; reported as a size mismatch below
            break;
        }
        let data_start = position + SUB_ELEMENT_HEADER_SIZE as u64;
        if data_start > total {
            return Err(FormatError::SizeMismatch { expected: total_image_size, actual: data_start });
        }
        if data_start > available {
            return Err(FormatError::TruncatedInput {
                what: "sub-element header",
                offset: position as usize,
                needed: SUB_ELEMENT_HEADER_SIZE,
                available: (available - position) as usize,
            });
        }

        reader.set_position(position);
        let element_header: SubElementHeader = reader.read_le()?;

        let end = data_start + element_header.length as u64;
        if end > total {
            return Err(FormatError::SizeMismatch { expected: total_image_size, actual: end });
        }
        if end > available {
            return Err(FormatError::TruncatedInput {
                what: "sub-element data",
                offset: data_start as usize,
                needed: element_header.length as usize,
                available: (available - data_start) as usize,
            });
        }

        let element = SubElement {
            tag_id: element_header.tag_id,
            length: element_header.length,
            data: image[data_start as usize..end as usize].to_vec(),
        };
        debug!("Sub-element {:#06x} ({}) at {}, length {}", element.tag_id, element.tag_name(), position, element.length);

        elements.push(element);
        position = end;
    }

    if position != total {
        return Err(FormatError::SizeMismatch { expected: total_image_size, actual: position });
    }

    Ok(elements)
}

/// Locates and decodes the OTA image contained in `raw_buffer`.
pub fn decode(raw_buffer: &[u8]) -> Result<ParsedImage, FormatError> {
    let offset = locate(raw_buffer)?;
    debug!("Upgrade file identifier at offset {}", offset);

    let header = parse_header(raw_buffer, offset)?;

    let end = offset.saturating_add(header.total_image_size as usize).min(raw_buffer.len());
    let image = &raw_buffer[offset..end];

    let elements = parse_sub_elements(image, header.header_length as usize, header.total_image_size)?;

    Ok(ParsedImage {
        header,
        elements,
        raw_image: image.to_vec(),
    })
}
