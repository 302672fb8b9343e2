use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::{AdminError, AdminResult};

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Serialize `body` as JSON and set the content type.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> AdminResult<Self> {
        let text = serde_json::to_string(body).map_err(|e| {
            AdminError::malformed(format!("could not encode request body: {}", e))
        })?;
        self.body = Some(text);
        Ok(self.with_header("Content-Type", "application/json"))
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> AdminResult<T> {
        serde_json::from_str(&self.body).map_err(AdminError::from)
    }
}

/// Transport used by the REST gateways.
///
/// `?Send` because browser fetch futures are not `Send`.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// Resolve with whatever status the server answered; only transport
    /// failures are errors here.
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient> HttpClient for &T {
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // (METHOD URL) -> (Status, Response Body)
    responses: RefCell<HashMap<String, (u16, String)>>,
    // (METHOD, URL, Headers, Body)
    pub requests: RefCell<Vec<(String, String, HashMap<String, String>, Option<String>)>>,
    offline: RefCell<bool>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            offline: RefCell::new(false),
        }
    }

    pub fn mock_response(
        &self,
        method: HttpMethod,
        url: &str,
        status: u16,
        body: serde_json::Value,
    ) {
        self.responses.borrow_mut().insert(
            format!("{} {}", method.as_str(), url),
            (status, body.to_string()),
        );
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses.borrow_mut().insert(
            format!("{} {}", method.as_str(), url),
            (status, body.to_string()),
        );
    }

    /// Every request fails at the transport level.
    pub fn go_offline(&self) {
        *self.offline.borrow_mut() = true;
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> AdminResult<HttpResponse> {
        self.requests.borrow_mut().push((
            req.method.as_str().to_string(),
            req.url.clone(),
            req.headers.clone(),
            req.body.clone(),
        ));

        if *self.offline.borrow() {
            return Err(AdminError::network("connection refused"));
        }

        let key = format!("{} {}", req.method.as_str(), req.url);
        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
