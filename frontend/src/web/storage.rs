//! LocalStorage 令牌存储
//!
//! 使用 `gloo-storage` 访问浏览器 LocalStorage，并把"是否持有令牌"同步到一个
//! 响应式信号中，供路由服务在导航时读取。

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use netinv::session::TokenStore;

/// 浏览器令牌存储
///
/// 刷新页面后令牌仍然保留；不做过期校验，失效由身份查询发现。
#[derive(Clone)]
pub struct LocalTokenStore {
    key: String,
    present: RwSignal<bool>,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let present = RwSignal::new(Self::read(&key).is_some());
        Self { key, present }
    }

    fn read(key: &str) -> Option<String> {
        LocalStorage::get::<String>(key)
            .ok()
            .filter(|token| !token.is_empty())
    }

    /// 令牌是否存在（响应式）
    pub fn presence(&self) -> Signal<bool> {
        self.present.into()
    }
}

impl TokenStore for LocalTokenStore {
    fn get(&self) -> Option<String> {
        Self::read(&self.key)
    }

    fn set(&self, token: &str) {
        match LocalStorage::set(&self.key, token) {
            Ok(()) => self.present.set(true),
            Err(e) => netinv::log_error!("[Storage] Failed to persist token: {}", e),
        }
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
        self.present.set(false);
    }
}
