//! 会话模块
//!
//! 令牌只有一个持有者：`Session`。API 与认证客户端在构造时拿到同一个
//! `Session` 句柄，发送请求时读取令牌；只有登录、注销和身份校验失败会写入。

use std::sync::{Arc, Mutex};

/// 令牌持久化存储
///
/// 浏览器端由 LocalStorage 实现，测试与原生环境使用 `MemoryTokenStore`。
/// 不做任何过期校验：存在即视为已登录，直到受保护的调用失败。
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

/// 内存令牌存储
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn set(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// 会话句柄
///
/// 克隆开销很小，所有克隆共享同一个存储。
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore + Send + Sync>,
}

impl Session {
    pub fn new(store: impl TokenStore + Send + Sync + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// 内存会话（测试与原生环境）
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    pub fn token(&self) -> Option<String> {
        self.store.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// `Authorization` 头的值；无令牌时为 None，请求照常发出
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }

    pub(crate) fn store_token(&self, token: &str) {
        self.store.set(token);
    }

    pub(crate) fn clear(&self) {
        self.store.clear();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemoryTokenStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.get(), None);

        store.set("abc");
        assert!(store.is_authenticated());
        assert_eq!(store.get().as_deref(), Some("abc"));

        store.clear();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_session_clones_share_store() {
        let session = Session::in_memory();
        let other = session.clone();

        session.store_token("t0k3n");
        assert_eq!(other.bearer().as_deref(), Some("Bearer t0k3n"));

        other.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);
    }
}
