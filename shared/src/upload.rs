//! Image upload endpoint contract.
//!
//! The endpoint takes a multipart `file` field and answers with
//! `{ "downloadUrl": "https://..." }`. The URL is opaque to the console; it is
//! stored verbatim in the product's image field.

use serde::Deserialize;

use crate::error::{AdminError, AdminResult};
use crate::http::HttpResponse;

/// Multipart field name the endpoint expects.
pub const UPLOAD_FIELD: &str = "file";

#[async_trait::async_trait(?Send)]
pub trait ImageUploader {
    /// Platform file handle (a browser `File` in the frontend).
    type File;

    /// Upload and return the public URL.
    async fn upload(&self, file: Self::File) -> AdminResult<String>;
}

#[derive(Deserialize)]
struct UploadAnswer {
    #[serde(rename = "downloadUrl")]
    download_url: String,
}

/// Extract the public URL from the endpoint's answer.
pub fn parse_upload_response(resp: &HttpResponse) -> AdminResult<String> {
    if !resp.ok() {
        return Err(AdminError::provider(
            resp.status.to_string(),
            "error uploading image",
        )
        .in_op("upload.image"));
    }
    let answer: UploadAnswer = resp.json().map_err(|e| e.in_op("upload.image"))?;
    if answer.download_url.trim().is_empty() {
        return Err(AdminError::malformed("upload answer has an empty downloadUrl").in_op("upload.image"));
    }
    Ok(answer.download_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminErrorKind;

    fn resp(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn returns_download_url_verbatim() {
        let url = parse_upload_response(&resp(
            200,
            r#"{"downloadUrl":"https://cdn.example.com/kids-plastic-chair.jpg?v=2"}"#,
        ))
        .unwrap();
        assert_eq!(url, "https://cdn.example.com/kids-plastic-chair.jpg?v=2");
    }

    #[test]
    fn non_success_status_is_provider_error() {
        let err = parse_upload_response(&resp(413, "too large")).unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::Provider);
        assert_eq!(err.code.as_deref(), Some("413"));
    }

    #[test]
    fn unexpected_body_is_malformed() {
        let err = parse_upload_response(&resp(200, r#"{"url":"x"}"#)).unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::MalformedResponse);

        let err = parse_upload_response(&resp(200, r#"{"downloadUrl":""}"#)).unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::MalformedResponse);
    }
}
