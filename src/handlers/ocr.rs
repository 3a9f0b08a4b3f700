use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use log::{error, info, warn};

use crate::config::Config;
use crate::constants::UPLOAD_FIELD;
use crate::error::{AppError, AppResult};
use crate::models::OcrResponse;
use crate::services::OcrService;

#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// `POST /api/ocr`: rasterize the uploaded PDF and describe every page.
pub async fn upload_pdf(
    req: HttpRequest,
    payload: Multipart,
    config: web::Data<Config>,
    ocr_service: web::Data<OcrService>,
) -> AppResult<HttpResponse> {
    let upload = read_upload(&req, payload).await.inspect_err(|e| {
        warn!("Rejected upload: {}", e);
    })?;
    info!("Received {:?} ({} bytes)", upload.filename, upload.bytes.len());

    let base_url = public_base_url(&req, &config);
    let service = ocr_service.clone();
    let results = web::block(move || service.process(&upload.bytes, &base_url))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .inspect_err(|e| error!("Failed to process upload: {}", e))?;

    Ok(HttpResponse::Ok().json(OcrResponse { results }))
}

/// Pulls the first `file` part carrying a filename out of the form; other parts are drained.
pub async fn read_upload(req: &HttpRequest, mut payload: Multipart) -> AppResult<Upload> {
    if !is_multipart(req) {
        return Err(AppError::MissingFile);
    }

    let mut upload: Option<Upload> = None;
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let (is_file_field, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name() == Some(UPLOAD_FIELD),
                cd.get_filename().map(str::to_string),
            ),
            None => (false, None),
        };
        let wanted = upload.is_none() && is_file_field && filename.is_some();

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if wanted {
                bytes.extend_from_slice(&chunk);
            }
        }

        if let (true, Some(filename)) = (wanted, filename) {
            upload = Some(Upload { filename, bytes });
        }
    }

    match upload {
        None => Err(AppError::MissingFile),
        Some(upload) if upload.filename.is_empty() => Err(AppError::EmptyFilename),
        Some(upload) => Ok(upload),
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Scheme and host the client used to reach us, unless `PUBLIC_URL` pins them.
/// `Forwarded` / `X-Forwarded-*` are not consulted; set `PUBLIC_URL` behind a proxy.
pub fn public_base_url(req: &HttpRequest, config: &Config) -> String {
    if let Some(url) = &config.public_url {
        return url.clone();
    }

    let app_config = req.app_config();
    let scheme = if app_config.secure() { "https" } else { "http" };
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().authority().map(|a| a.to_string()))
        .unwrap_or_else(|| app_config.host().to_string());
    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_public_base_url_from_request() {
        let req = TestRequest::default()
            .insert_header((header::HOST, "localhost:5000"))
            .to_http_request();
        let config = Config::local("static");
        assert_eq!(public_base_url(&req, &config), "http://localhost:5000");
    }

    #[test]
    fn test_public_base_url_ignores_forwarding_headers() {
        let req = TestRequest::default()
            .insert_header((header::HOST, "localhost:5000"))
            .insert_header((header::FORWARDED, "host=attacker.example;proto=https"))
            .insert_header(("x-forwarded-host", "attacker.example"))
            .insert_header(("x-forwarded-proto", "https"))
            .to_http_request();
        let config = Config::local("static");
        assert_eq!(public_base_url(&req, &config), "http://localhost:5000");
    }

    #[test]
    fn test_public_base_url_override() {
        let req = TestRequest::default().to_http_request();
        let mut config = Config::local("static");
        config.public_url = Some("https://ocr.example.test".to_string());
        assert_eq!(public_base_url(&req, &config), "https://ocr.example.test");
    }

    #[test]
    fn test_is_multipart() {
        let req = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "multipart/form-data; boundary=abc"))
            .to_http_request();
        assert!(is_multipart(&req));

        let req = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .to_http_request();
        assert!(!is_multipart(&req));
    }
}
