use std::collections::HashMap;

use netinv_shared::protocol::HttpMethod;

use crate::error::ApiResult;

#[cfg(test)]
use crate::error::ApiError;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
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

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器环境下 fetch 相关的 JS 类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// 只有网络层失败才返回 Err；非 2xx 由调用方解释
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

/// 允许多个客户端共享同一个底层实现
#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for std::rc::Rc<T> {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 记录请求并按 "METHOD URL" 回放响应
///
/// 同一键可排队多个响应，最后一个会一直重复。
#[cfg(test)]
pub struct MockHttpClient {
    responses: RefCell<HashMap<String, VecDeque<(u16, String)>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
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

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .entry(Self::key(method, url))
            .or_default()
            .push_back((status, body.to_string()));
    }

    /// 模拟连接被拒绝
    pub fn go_offline(&self) {
        *self.offline.borrow_mut() = true;
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(req.clone());

        if *self.offline.borrow() {
            return Err(ApiError::transport("connection refused"));
        }

        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(&Self::key(req.method, &req.url)) {
            Some(queue) if queue.len() > 1 => {
                let (status, body) = queue.pop_front().unwrap_or((500, String::new()));
                Ok(HttpResponse { status, body })
            }
            Some(queue) => {
                let (status, body) = queue.front().cloned().unwrap_or((500, String::new()));
                Ok(HttpResponse { status, body })
            }
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"detail":"Not Found"}"#.to_string(),
            }),
        }
    }
}
