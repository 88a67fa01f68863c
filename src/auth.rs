//! 认证模块
//!
//! 登录成功写入令牌，身份校验失败清除令牌，注销只清除本地令牌。

use netinv_shared::protocol::CurrentUser;
use netinv_shared::{AccessToken, Credentials, Registration, User};

use crate::api::InventoryApi;
use crate::error::ApiResult;
use crate::request::HttpClient;
use crate::session::Session;


/// 认证客户端
///
/// 复用 `InventoryApi` 的请求通道，登录与注册不会携带令牌。
#[derive(Clone)]
pub struct AuthClient<C> {
    api: InventoryApi<C>,
}

impl<C: HttpClient> AuthClient<C> {
    pub fn new(api: InventoryApi<C>) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// 登录并保存令牌
    ///
    /// 凭据被拒绝时返回 `Unauthorized`，服务端文本保存在 `detail()` 中，
    /// 由调用方展示。失败时令牌存储保持原样。
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AccessToken> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token = self.api.call(&credentials).await?;

        if !token.access_token.is_empty() {
            self.session().store_token(&token.access_token);
            crate::log_info!("[Auth] Logged in as {}", username);
        } else {
            crate::log_warn!("[Auth] Login response carried no access token");
        }
        Ok(token)
    }

    /// 注册新账号；唯一性由服务端校验，错误文本原样透传
    pub async fn register(&self, registration: &Registration) -> ApiResult<User> {
        self.api.call(registration).await
    }

    /// 获取当前用户
    ///
    /// 没有令牌时直接返回 None，不发请求；任何失败（令牌过期、网络错误）
    /// 都会清除令牌并返回 None。这是唯一的会话失效途径。
    pub async fn current_user(&self) -> Option<User> {
        if !self.is_authenticated() {
            return None;
        }

        match self.api.call(&CurrentUser).await {
            Ok(user) => Some(user),
            Err(e) => {
                crate::log_warn!("[Auth] Identity check failed, clearing session: {}", e);
                self.logout();
                None
            }
        }
    }

    /// 注销：只清除本地令牌，不通知服务端
    pub fn logout(&self) {
        self.session().clear();
    }
}
