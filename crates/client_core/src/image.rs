//! Reference photo acquisition: file bytes to a self-describing data URI.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::OrderError;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Builds `data:<mime>;base64,<payload>` from raw bytes.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// MIME type guessed from the file extension. Unknown extensions get
/// `application/octet-stream`; no content sniffing is done.
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string()
}

/// Reads the whole file and encodes it. Any file is attempted; there is no
/// type or size check.
pub async fn read_data_uri(path: &Path) -> Result<String, OrderError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| OrderError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(encode_data_uri(&guess_mime_type(path), &bytes))
}

/// Splits a data URI into its MIME type and decoded bytes.
pub fn decode_data_uri(data_uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = data_uri.strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime_type.to_string(), bytes))
}

#[cfg(test)]
#[path = "tests/image_tests.rs"]
mod tests;
