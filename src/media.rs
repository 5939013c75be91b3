//! Filesystem store for uploaded airplane images. Files land under
//! `MEDIA_ROOT/uploads/airplanes/` and are served read-only at `/media/`.
//! The database keeps the path relative to `MEDIA_ROOT`.

use std::path::Path;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

const AIRPLANE_UPLOAD_DIR: &str = "uploads/airplanes";

/// Maps an accepted image content type to its file extension.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Lowercases and strips a display name down to `[a-z0-9-]` so it is safe
/// inside a filename.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("airplane");
    }
    slug
}

/// Public URL of a stored media path.
pub fn media_url(path: &str) -> String {
    format!("/media/{path}")
}

/// Writes an uploaded airplane image to disk and returns its media-relative
/// path. The filename embeds a fresh UUID, so collisions cannot occur and
/// re-uploads never clobber each other.
pub async fn save_airplane_image(
    media_root: &Path,
    airplane_name: &str,
    content_type: &str,
    data: &[u8],
) -> AppResult<String> {
    let Some(ext) = extension_for(content_type) else {
        return Err(AppError::validation(
            "image",
            format!("Unsupported image content type: {content_type}"),
        ));
    };
    if data.is_empty() {
        return Err(AppError::validation("image", "Uploaded file is empty"));
    }

    let filename = format!("{}-{}.{}", slugify(airplane_name), Uuid::new_v4(), ext);
    let relative = format!("{AIRPLANE_UPLOAD_DIR}/{filename}");

    let dir = media_root.join(AIRPLANE_UPLOAD_DIR);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|err| AppError::Internal(anyhow::anyhow!("create media dir: {err}")))?;
    tokio::fs::write(dir.join(&filename), data)
        .await
        .map_err(|err| AppError::Internal(anyhow::anyhow!("write media file: {err}")))?;

    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_flattens_punctuation_and_case() {
        assert_eq!(slugify("Boeing 747-400"), "boeing-747-400");
        assert_eq!(slugify("  Airbus A320  "), "airbus-a320");
        assert_eq!(slugify("!!!"), "airplane");
    }

    #[test]
    fn only_known_image_types_are_accepted() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("image/webp"), Some("webp"));
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(extension_for("text/plain"), None);
    }

    #[test]
    fn media_urls_are_rooted_at_media() {
        assert_eq!(
            media_url("uploads/airplanes/boeing-x.jpg"),
            "/media/uploads/airplanes/boeing-x.jpg"
        );
    }

    #[tokio::test]
    async fn saved_images_land_under_the_upload_dir() {
        let root = std::env::temp_dir().join(format!("media-test-{}", Uuid::new_v4()));
        let path = save_airplane_image(&root, "Test Plane", "image/png", b"png-bytes")
            .await
            .unwrap();
        assert!(path.starts_with("uploads/airplanes/test-plane-"));
        assert!(path.ends_with(".png"));
        let stored = tokio::fs::read(root.join(&path)).await.unwrap();
        assert_eq!(stored, b"png-bytes");
        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn unsupported_content_type_is_a_field_error() {
        let root = std::env::temp_dir();
        let err = save_airplane_image(&root, "Plane", "application/zip", b"data")
            .await
            .unwrap_err();
        match err {
            AppError::Validation(errors) => assert!(errors.contains_key("image")),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }
}
