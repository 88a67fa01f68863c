//! NetInv 前端应用
//!
//! 采用 Context-Driven 的分层结构：
//! - `web::route`: 路由表（领域模型）
//! - `web::router`: 路由服务（History API 引擎）
//! - `auth`: 共享客户端与会话
//! - `components`: UI 组件层，受保护页面外包 `ProtectedRoute`

mod auth;
mod components {
    pub mod dashboard;
    mod device_dialog;
    pub mod devices;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod navbar;
    pub mod protected_route;
    pub mod register;
    mod toast;
    mod user_dialog;
    pub mod users;
}
mod web;

use leptos::prelude::*;
use netinv_shared::Role;

use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::devices::DevicesPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::protected_route::ProtectedRoute;
use crate::components::register::RegisterPage;
use crate::components::users::UsersPage;
use crate::web::route::AppRoute;
use crate::web::router::{Link, Router, RouterOutlet};

/// 受保护页面的公共外壳：身份确认后显示导航栏与页面内容
#[component]
fn AppShell(
    #[prop(optional_no_strip)] required_role: Option<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <ProtectedRoute required_role=required_role>
            <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
                <div class="max-w-7xl mx-auto space-y-8">
                    <Navbar />
                    {children()}
                </div>
            </div>
        </ProtectedRoute>
    }
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    let required_role = route.required_role();
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! {
            <AppShell><DashboardPage /></AppShell>
        }
        .into_any(),
        AppRoute::Devices => view! {
            <AppShell><DevicesPage /></AppShell>
        }
        .into_any(),
        AppRoute::Users => view! {
            <AppShell required_role=required_role><UsersPage /></AppShell>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to="/" class="btn btn-ghost mt-6">"Back to home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（从 LocalStorage 恢复令牌）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 令牌信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
