//! 认证模块
//!
//! 持有整个应用共享的 API / 认证客户端（同一个 `Session`）。
//! 路由服务只通过注入的令牌信号感知认证状态，不依赖本模块。

use leptos::prelude::*;
use netinv::{AuthClient, ClientConfig, InventoryApi, Session};
use netinv_shared::User;

use crate::web::{FetchHttpClient, LocalTokenStore};

pub type Api = InventoryApi<FetchHttpClient>;
pub type Auth = AuthClient<FetchHttpClient>;

/// 认证上下文
///
/// 通过 Context 在组件间共享，`Copy` 便于在闭包中捕获。
#[derive(Clone, Copy)]
pub struct AuthContext {
    api: StoredValue<Api>,
    auth: StoredValue<Auth>,
    /// 是否持有令牌（响应式）
    has_token: Signal<bool>,
}

impl AuthContext {
    /// 创建认证上下文，令牌从 LocalStorage 恢复
    pub fn new() -> Self {
        let config = ClientConfig::from_env();
        let store = LocalTokenStore::new(config.token_key.clone());
        let has_token = store.presence();

        let api = InventoryApi::new(config, FetchHttpClient, Session::new(store));
        let auth = AuthClient::new(api.clone());

        Self {
            api: StoredValue::new(api),
            auth: StoredValue::new(auth),
            has_token,
        }
    }

    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    pub fn client(&self) -> Auth {
        self.auth.get_value()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.has_token
    }

    /// 注销：只清除本地令牌
    pub fn logout(&self) {
        self.auth.with_value(|auth| auth.logout());
        netinv::log_info!("[Auth] Logged out");
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 守卫解析出的当前用户，由 `ProtectedRoute` 提供给页面与导航栏
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub fn use_current_user() -> Option<User> {
    use_context::<CurrentUser>().map(|CurrentUser(user)| user)
}
