//! 路由定义模块 - 领域模型
//!
//! 纯粹的路由表，不依赖于 DOM 或 web_sys。

use std::fmt::Display;

use netinv_shared::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 落地页 (默认路由)
    #[default]
    Home,
    Login,
    Register,
    /// 以下三项需要认证
    Dashboard,
    Devices,
    Users,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/devices" => Self::Devices,
            "/users" => Self::Users,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Devices => "/devices",
            Self::Users => "/users",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Devices | Self::Users)
    }

    /// 访问该路由所需的最低角色
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::Users => Some(Role::Admin),
            _ => None,
        }
    }

    /// 已持有令牌的用户访问落地页时直接进入控制面板
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppRoute; 7] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::Dashboard,
        AppRoute::Devices,
        AppRoute::Users,
        AppRoute::NotFound,
    ];

    #[test]
    fn test_path_round_trip() {
        for route in ALL.into_iter().filter(|r| *r != AppRoute::NotFound) {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn test_trailing_slash_and_unknown_paths() {
        assert_eq!(AppRoute::from_path("/devices/"), AppRoute::Devices);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/devices/12"), AppRoute::NotFound);
    }

    #[test]
    fn test_protected_routes() {
        let protected: Vec<_> = ALL.into_iter().filter(AppRoute::requires_auth).collect();
        assert_eq!(
            protected,
            vec![AppRoute::Dashboard, AppRoute::Devices, AppRoute::Users]
        );
    }

    #[test]
    fn test_only_users_page_requires_admin() {
        for route in ALL {
            let expected = (route == AppRoute::Users).then_some(Role::Admin);
            assert_eq!(route.required_role(), expected, "{}", route);
        }
    }

    #[test]
    fn test_login_and_register_stay_reachable_when_authenticated() {
        assert!(AppRoute::Home.should_redirect_when_authenticated());
        assert!(!AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::Register.should_redirect_when_authenticated());
    }
}
