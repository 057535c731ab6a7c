use std::io::Read;
use std::path::Path;

use crate::utils::common;

static ACCEPT: &str = concat!(
    "text/html,application/xhtml+xml,application/xml;q=0.9,",
    "image/avif,image/webp,*/*;q=0.8",
);
static ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
static USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) ",
    "Gecko/20100101 Firefox/118.0",
);

/// GETs `url` and returns the whole body. Redirects are followed, non-2xx responses are errors.
pub fn fetch(url: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let response = ureq::get(url)
        .set("Accept", ACCEPT)
        .set("Accept-Language", ACCEPT_LANGUAGE)
        .set("User-Agent", USER_AGENT)
        .call()?;

    let mut data = Vec::new();
    response.into_reader().read_to_end(&mut data)?;
    Ok(data)
}

pub fn download_file(url: &str, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    println!("Downloading {} -> {}", url, path.display());
    let data = fetch(url)?;
    common::write_file(path, &data)?;

    Ok(data)
}
