//! HTTP 请求封装模块
//!
//! `gloo-net` transport for the core's `HttpClient` contract, plus the
//! multipart image uploader.

use furnish_shared::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use furnish_shared::upload::{UPLOAD_FIELD, parse_upload_response};
use furnish_shared::{AdminError, AdminResult, ImageUploader};
use gloo_net::http::{Request, RequestBuilder};
use web_sys::{File, FormData};

/// Browser `fetch` client.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttpClient;

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

async fn read_response(request: Request) -> AdminResult<HttpResponse> {
    let res = request
        .send()
        .await
        .map_err(|e| AdminError::network(e.to_string()))?;
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| AdminError::malformed(e.to_string()))?;
    Ok(HttpResponse { status, body })
}

#[async_trait::async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse> {
        log::debug!("[Http] {} {}", req.method.as_str(), req.url);

        let builder = req
            .headers
            .iter()
            .fold(builder(req.method, &req.url), |b, (k, v)| b.header(k, v));

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| AdminError::network(format!("请求构建失败: {}", e)))?;

        read_response(request).await
    }
}

/// Posts the picked file as multipart form data to the upload endpoint.
#[derive(Debug, Clone)]
pub struct BrowserUploader {
    endpoint: String,
}

impl BrowserUploader {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl ImageUploader for BrowserUploader {
    type File = File;

    async fn upload(&self, file: File) -> AdminResult<String> {
        let form = FormData::new()
            .and_then(|form| {
                form.append_with_blob_and_filename(UPLOAD_FIELD, &file, &file.name())?;
                Ok(form)
            })
            .map_err(|e| AdminError::network(format!("{:?}", e)).in_op("upload.image"))?;

        log::info!("[Upload] sending {} ({} bytes)", file.name(), file.size());

        let request = Request::post(&self.endpoint)
            .body(form)
            .map_err(|e| AdminError::network(e.to_string()).in_op("upload.image"))?;

        let resp = read_response(request)
            .await
            .map_err(|e| e.in_op("upload.image"))?;
        parse_upload_response(&resp)
    }
}
