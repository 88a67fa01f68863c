//! NetInv 客户端核心
//!
//! 与平台无关的业务层，浏览器前端与测试共用：
//! - `request`: HTTP 抽象（由前端注入 fetch 实现，测试注入 Mock）
//! - `session`: 令牌存储与会话
//! - `api` / `auth`: 资源 CRUD 与认证调用
//! - `guard`: 路由守卫状态机
//! - `forms` / `views`: 表单模型与页面工作流

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys as __web_sys;

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::__web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::__web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::__web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod request;
pub mod session;
pub mod views;

pub use api::InventoryApi;
pub use auth::AuthClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult, FormError, SubmitError};
pub use guard::{GuardState, Redirect, RouteGuard};
pub use request::HttpClient;
pub use session::{MemoryTokenStore, Session, TokenStore};

pub use netinv_shared as shared;
