//! Employee picture loading.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Reads an image file into a `data:<mime>;base64,...` URL.
pub fn load_data_url(path: &Path) -> Result<String> {
    let mime = mime_for(path)
        .with_context(|| format!("unsupported image type `{}`", path.display()))?;
    let size = std::fs::metadata(path)
        .with_context(|| format!("could not read `{}`", path.display()))?
        .len();
    check_size(path, size)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("could not read `{}`", path.display()))?;
    check_size(path, bytes.len() as u64)?;
    Ok(encode_data_url(mime, &bytes))
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Rejects files over the size limit before and after reading; the file can
/// grow in between.
fn check_size(path: &Path, size: u64) -> Result<()> {
    if size > MAX_IMAGE_BYTES {
        bail!(
            "image `{}` is {size} bytes; the limit is {MAX_IMAGE_BYTES}",
            path.display()
        );
    }
    Ok(())
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_data_url, load_data_url, mime_for, MAX_IMAGE_BYTES};
    use std::path::Path;

    #[test]
    fn encodes_bytes_as_data_url() {
        assert_eq!(encode_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn mime_is_derived_from_extension() {
        assert_eq!(mime_for(Path::new("me.JPG")), Some("image/jpeg"));
        assert_eq!(mime_for(Path::new("me.bmp")), None);
        assert_eq!(mime_for(Path::new("me")), None);
    }

    #[test]
    fn oversized_file_is_rejected_by_its_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_IMAGE_BYTES + 1).unwrap();

        let err = load_data_url(&path).unwrap_err();
        assert!(err.to_string().contains("the limit is"));
    }

    #[test]
    fn small_file_becomes_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        assert_eq!(
            load_data_url(&path).unwrap(),
            "data:image/gif;base64,R0lGODlh"
        );
    }
}
