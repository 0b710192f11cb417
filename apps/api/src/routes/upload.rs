use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// Returns the contents of the first file part. Later parts are ignored:
/// one file per upload.
///
/// A browser submitting the form with no file chosen still sends a part
/// with an empty file name and no body; that part does not count as a file.
pub async fn read_first_file(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() && field.name() != Some("file") {
            continue;
        }
        let unnamed = field.file_name().map_or(true, str::is_empty);
        let bytes = field.bytes().await?;
        if unnamed && bytes.is_empty() {
            continue;
        }
        return Ok(bytes);
    }
    Err(AppError::Validation("No file was uploaded".to_string()))
}
