use std::{borrow::Cow, fs, io, path::Path, sync::OnceLock};

use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Largest photo accepted for a preview.
pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// Returns the contents of `assets/main.css` as a static string.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| load_text("/assets/main.css"))
        .as_str()
}

/// Reads a photo from disk and returns it as a data URI for previews.
pub fn file_data_uri(path: &Path) -> io::Result<String> {
    let mime = guess_mime(&path.to_string_lossy().to_ascii_lowercase());
    if !mime.starts_with("image/") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "only PNG, JPEG, WebP, GIF or SVG photos are supported",
        ));
    }
    if fs::metadata(path)?.len() > MAX_PHOTO_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "photos must be 10 MB or smaller",
        ));
    }
    let bytes = fs::read(path)?;
    Ok(format!("data:{mime};base64,{}", encode_base64(&bytes)))
}

fn load_text(path: &str) -> String {
    let asset = load_asset(path);
    String::from_utf8(asset.into_owned())
        .unwrap_or_else(|_| panic!("Embedded asset {path} is not valid UTF-8"))
}

fn load_asset(path: &str) -> Cow<'static, [u8]> {
    let canonical = canonical_asset_path(path);
    EmbeddedAssets::get(&canonical)
        .map(|file| file.data)
        .unwrap_or_else(|| panic!("Failed to locate embedded asset: {path}"))
}

fn canonical_asset_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if let Some(rest) = trimmed.strip_prefix("assets/") {
        rest.to_string()
    } else {
        trimmed.to_string()
    }
}

fn guess_mime(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".svg") {
        "image/svg+xml"
    } else if path.ends_with(".png") {
        "image/png"
    } else if path.ends_with(".jpg") || path.ends_with(".jpeg") {
        "image/jpeg"
    } else if path.ends_with(".webp") {
        "image/webp"
    } else if path.ends_with(".gif") {
        "image/gif"
    } else {
        "application/octet-stream"
    }
}

fn encode_base64(input: &[u8]) -> String {
    const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut output = String::with_capacity((input.len() + 2) / 3 * 4);

    for chunk in input.chunks(3) {
        let b0 = chunk[0];
        let b1 = *chunk.get(1).unwrap_or(&0);
        let b2 = *chunk.get(2).unwrap_or(&0);

        output.push(TABLE[(b0 >> 2) as usize] as char);
        output.push(TABLE[(((b0 & 0b11) << 4) | (b1 >> 4)) as usize] as char);

        if chunk.len() > 1 {
            output.push(TABLE[(((b1 & 0b1111) << 2) | (b2 >> 6)) as usize] as char);
        } else {
            output.push('=');
        }

        if chunk.len() > 2 {
            output.push(TABLE[(b2 & 0b0011_1111) as usize] as char);
        } else {
            output.push('=');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_padding() {
        assert_eq!(encode_base64(b""), "");
        assert_eq!(encode_base64(b"f"), "Zg==");
        assert_eq!(encode_base64(b"fo"), "Zm8=");
        assert_eq!(encode_base64(b"foo"), "Zm9v");
    }

    #[test]
    fn photo_becomes_data_uri() {
        let dir = tempfile::tempdir().expect("tempdir");
        let photo = dir.path().join("Lid.PNG");
        fs::write(&photo, b"foo").expect("write photo");
        assert_eq!(
            file_data_uri(&photo).expect("data uri"),
            "data:image/png;base64,Zm9v"
        );

        let notes = dir.path().join("notes.txt");
        fs::write(&notes, b"hi").expect("write notes");
        assert!(file_data_uri(&notes).is_err());
    }

    #[test]
    fn oversized_photo_is_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let photo = dir.path().join("huge.jpg");
        let file = fs::File::create(&photo).expect("create photo");
        file.set_len(MAX_PHOTO_BYTES + 1).expect("grow photo");

        let err = file_data_uri(&photo).expect_err("too large");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        file.set_len(MAX_PHOTO_BYTES).expect("shrink photo");
        assert!(file_data_uri(&photo).is_ok());
    }

    #[test]
    fn stylesheet_is_embedded() {
        assert!(main_css().contains(".wizard-card"));
    }
}
