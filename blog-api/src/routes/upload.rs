use axum::extract::Multipart;
use blog_errors::AppError;
use serde::Serialize;

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// An uploaded file as read from the `file` multipart field.
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Malformed multipart body: {}", e);
        AppError::UserInput("Malformed upload".to_string())
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::UserInput("Uploaded file has no name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|_| AppError::UserInput("Could not read the uploaded file".to_string()))?;

        return Ok(UploadedFile {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::UserInput("No 'file' field was sent".to_string()))
}
