//! HTTP 请求封装模块
//!
//! 基于 `gloo-net` 的 fetch 实现，注入到核心层的 `HttpClient` 抽象中。

use async_trait::async_trait;
use gloo_net::http::{Method, RequestBuilder};
use netinv::error::{ApiError, ApiResult};
use netinv::request::{HttpClient, HttpRequest, HttpResponse};
use netinv_shared::protocol::HttpMethod;

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// 浏览器 fetch 客户端
///
/// 无状态，克隆与跨组件共享都没有开销。
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(to_method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::transport(format!("请求构建失败: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("网络错误: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("响应读取失败: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
