use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use chrono::Utc;
use image::imageops::FilterType;
use serde::Serialize;
use uuid::Uuid;

/// Menu/merchandise photos only; animated gifs pass through untouched.
const ALLOWED_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Photos wider or taller than this get downscaled before storage.
const MAX_DIMENSION: u32 = 1600;

#[derive(Debug, Serialize)]
pub struct StoredUpload {
    pub url: String,
}

pub struct UploadService;

impl UploadService {
    /// Store an admin-uploaded image under `<uploads_dir>/<year>/<month>/`
    /// and return its public URL path. The file must decode as an image;
    /// oversized jpeg/png photos are downscaled on the way in.
    pub async fn store(uploads_dir: &str, mut multipart: Multipart) -> anyhow::Result<StoredUpload> {
        let mut file_data: Option<(Vec<u8>, String, String)> = None;

        while let Some(field) = multipart.next_field().await? {
            if field.name() == Some("file") {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?.to_vec();
                file_data = Some((bytes, filename, content_type));
            }
        }

        let (bytes, original_filename, content_type) =
            file_data.ok_or_else(|| anyhow::anyhow!("No file field in upload"))?;

        if !ALLOWED_TYPES.contains(&content_type.as_str()) {
            anyhow::bail!("Invalid file type. Only images are allowed.");
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            anyhow::bail!("File too large. Maximum size is 2MB.");
        }

        // Reject files whose bytes don't actually decode as an image,
        // whatever their declared content type says.
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| anyhow::anyhow!("Unreadable image: {e}"))?;

        let now = Utc::now();
        let year = now.format("%Y").to_string();
        let month = now.format("%m").to_string();
        let dir = PathBuf::from(uploads_dir).join(&year).join(&month);
        tokio::fs::create_dir_all(&dir).await?;

        let ext = Path::new(&original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_lowercase();
        let filename = format!("{}.{}", Uuid::new_v4(), ext);
        let full_path = dir.join(&filename);

        let resizable = matches!(content_type.as_str(), "image/jpeg" | "image/jpg" | "image/png");
        if resizable && (decoded.width() > MAX_DIMENSION || decoded.height() > MAX_DIMENSION) {
            let resized = decoded.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3);
            let path = full_path.clone();
            // image's encoders are synchronous; keep them off the runtime
            tokio::task::spawn_blocking(move || resized.save(path)).await??;
        } else {
            tokio::fs::write(&full_path, &bytes).await?;
        }

        tracing::info!(
            "Stored upload {original_filename:?} as {year}/{month}/{filename} ({} bytes)",
            bytes.len()
        );

        Ok(StoredUpload {
            url: format!("/uploads/{year}/{month}/{filename}"),
        })
    }
}
