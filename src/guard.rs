//! 路由守卫状态机
//!
//! `Resolving -> Authorized | Redirecting`。不重试、不超时：
//! 身份请求挂起时守卫会一直停留在 `Resolving`。

use netinv_shared::{Role, User};

use crate::auth::AuthClient;
use crate::request::HttpClient;

/// 守卫重定向目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// 未登录
    Login,
    /// 已登录但角色不足
    Dashboard,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Login => "/login",
            Redirect::Dashboard => "/dashboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GuardState {
    #[default]
    Resolving,
    Authorized(User),
    Redirecting(Redirect),
}

impl GuardState {
    pub fn user(&self) -> Option<&User> {
        match self {
            GuardState::Authorized(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self, GuardState::Resolving)
    }
}

/// 路由守卫
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteGuard {
    pub required_role: Option<Role>,
}

impl RouteGuard {
    pub fn new(required_role: Option<Role>) -> Self {
        Self { required_role }
    }

    /// 纯状态转换：根据解析出的身份决定下一状态
    pub fn decide(&self, user: Option<User>) -> GuardState {
        let Some(user) = user else {
            return GuardState::Redirecting(Redirect::Login);
        };

        match self.required_role {
            Some(required) if !user.role.satisfies(required) => {
                GuardState::Redirecting(Redirect::Dashboard)
            }
            _ => GuardState::Authorized(user),
        }
    }

    /// 解析当前身份并给出最终状态
    pub async fn resolve<C: HttpClient>(&self, auth: &AuthClient<C>) -> GuardState {
        let state = self.decide(auth.current_user().await);
        if let GuardState::Redirecting(target) = &state {
            crate::log_info!("[Guard] Redirecting to {}", target.path());
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InventoryApi;
    use crate::config::ClientConfig;
    use crate::request::MockHttpClient;
    use crate::session::{MemoryTokenStore, Session};
    use netinv_shared::protocol::HttpMethod;
    use serde_json::json;
    use std::rc::Rc;

    fn user_with_role(role: Role) -> User {
        User {
            id: 1,
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            full_name: None,
            role,
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn test_decide_without_user_redirects_to_login() {
        let guard = RouteGuard::new(None);
        assert_eq!(guard.decide(None), GuardState::Redirecting(Redirect::Login));
    }

    #[test]
    fn test_decide_user_on_admin_page_redirects_to_dashboard() {
        let guard = RouteGuard::new(Some(Role::Admin));
        assert_eq!(
            guard.decide(Some(user_with_role(Role::User))),
            GuardState::Redirecting(Redirect::Dashboard)
        );
    }

    #[test]
    fn test_decide_admin_satisfies_any_role() {
        for required in [None, Some(Role::User), Some(Role::Admin)] {
            let guard = RouteGuard::new(required);
            let state = guard.decide(Some(user_with_role(Role::Admin)));
            assert!(matches!(state, GuardState::Authorized(_)), "{:?}", required);
        }
    }

    #[test]
    fn test_decide_matching_role_is_authorized() {
        let guard = RouteGuard::new(Some(Role::User));
        let state = guard.decide(Some(user_with_role(Role::User)));
        assert_eq!(state.user().map(|u| u.role), Some(Role::User));
    }

    #[tokio::test]
    async fn test_resolve_with_rejected_token_redirects_and_clears() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_response(
            HttpMethod::Get,
            "http://api.test/api/auth/me",
            401,
            json!({ "detail": "Could not validate credentials" }),
        );
        let session = Session::new(MemoryTokenStore::with_token("expired"));
        let api = InventoryApi::new(ClientConfig::new("http://api.test"), http.clone(), session.clone());
        let auth = AuthClient::new(api);

        let state = RouteGuard::new(None).resolve(&auth).await;

        assert_eq!(state, GuardState::Redirecting(Redirect::Login));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_resolve_admin_page_for_plain_user() {
        let http = Rc::new(MockHttpClient::new());
        http.mock_response(
            HttpMethod::Get,
            "http://api.test/api/auth/me",
            200,
            json!({ "id": 2, "username": "carol", "email": "carol@example.com", "role": "user", "is_active": true }),
        );
        let session = Session::new(MemoryTokenStore::with_token("valid"));
        let api = InventoryApi::new(ClientConfig::new("http://api.test"), http, session.clone());
        let auth = AuthClient::new(api);

        let state = RouteGuard::new(Some(Role::Admin)).resolve(&auth).await;

        assert_eq!(state, GuardState::Redirecting(Redirect::Dashboard));
        // 角色不足不会清除会话
        assert!(session.is_authenticated());
    }
}
