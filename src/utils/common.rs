use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Offset of the first occurrence of `needle` in `haystack`.
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Writes `data` to `path`, creating parent directories and replacing any existing file.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out_file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
    out_file.write_all(data)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::find_bytes;

    #[test]
    fn finds_first_occurrence() {
        assert_eq!(find_bytes(b"xxabcabc", b"abc"), Some(2));
    }

    #[test]
    fn needle_longer_than_haystack() {
        assert_eq!(find_bytes(b"ab", b"abc"), None);
        assert_eq!(find_bytes(b"", b"a"), None);
    }
}
