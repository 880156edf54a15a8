use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use foodgram_shared::{Result, invalid};
use uuid::Uuid;

/// Decode a base64 image (raw or `data:image/...;base64,` url), validate it
/// and store it under `media_root/subdir`. Returns the path relative to
/// `media_root`.
pub fn save_base64_image(media_root: &Path, subdir: &str, data: &str) -> Result<String> {
    let encoded = match data.split_once("base64,") {
        Some((_, rest)) => rest,
        None => data,
    };

    let Ok(bytes) = STANDARD.decode(encoded.trim()) else {
        invalid!("Image is not valid base64 data.");
    };

    let Ok(format) = image::guess_format(&bytes) else {
        invalid!("Unsupported image format.");
    };

    if image::load_from_memory(&bytes).is_err() {
        invalid!("Could not decode image.");
    }

    let extension = format.extensions_str().first().copied().unwrap_or("bin");
    let file_name = format!("{}.{}", Uuid::new_v4(), extension);

    let dir = media_root.join(subdir);
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join(&file_name), &bytes)?;

    Ok(format!("{subdir}/{file_name}"))
}

/// Remove a previously stored media file. Failures are ignored, the file
/// may already be gone.
pub fn delete_media(media_root: &Path, relative: &str) {
    let _ = std::fs::remove_file(media_root.join(relative));
}
