//! 浏览器适配层
//!
//! 核心层的 `HttpClient` / `TokenStore` 抽象在这里落到 fetch 与 LocalStorage 上；
//! 路由相关的 History API 操作也集中在此。

mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::FetchHttpClient;
pub use storage::LocalTokenStore;
