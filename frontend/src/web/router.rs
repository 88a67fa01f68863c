//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："监听 -> 验证 -> 处理 -> 加载"。
//!
//! 这里只做基于令牌存在与否的快速判断；令牌是否仍然有效、角色是否足够，
//! 由页面外层的 `ProtectedRoute` 向服务端查询后决定。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 历史记录写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    /// 用户主动导航，新增一条记录
    Push,
    /// 守卫重定向，替换当前记录
    Replace,
}

/// 一次路由切换是否以及如何写入历史记录；已处于目标路由时不写
fn history_mode(current: AppRoute, next: AppRoute, requested: HistoryMode) -> Option<HistoryMode> {
    (current != next).then_some(requested)
}

fn write_history(path: &str, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证状态以信号形式注入，与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 是否持有令牌
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到指定路径（pushState）
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), HistoryMode::Push);
    }

    /// 守卫重定向（replaceState），不留下可以后退回去的中间页
    pub fn redirect(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), HistoryMode::Replace);
    }

    /// 守卫判定：返回实际应当进入的路由
    fn resolve(target: AppRoute, is_auth: bool) -> AppRoute {
        if target.requires_auth() && !is_auth {
            netinv::log_info!("[Router] Access to {} denied. Redirecting to login.", target);
            return AppRoute::auth_failure_redirect();
        }
        if target.should_redirect_when_authenticated() && is_auth {
            netinv::log_info!("[Router] Already authenticated. Redirecting to dashboard.");
            return AppRoute::auth_success_redirect();
        }
        target
    }

    fn navigate_to_route(&self, target: AppRoute, mode: HistoryMode) {
        let route = Self::resolve(target, self.is_authenticated.get_untracked());
        if let Some(mode) = history_mode(self.current_route.get_untracked(), route, mode) {
            write_history(route.to_path(), mode);
        }
        self.set_route.set(route);
    }

    /// 初始路由同样经过守卫，重定向时替换而不是新增历史记录
    fn guard_initial_route(&self) {
        let initial = self.current_route.get_untracked();
        let route = Self::resolve(initial, self.is_authenticated.get_untracked());
        if route != initial {
            write_history(route.to_path(), HistoryMode::Replace);
            self.set_route.set(route);
        }
    }

    /// 浏览器地址已由后退/前进改变：只在守卫改写了目标时替换记录
    fn sync_from_location(&self) {
        let target = AppRoute::from_path(&current_path());
        let route = Self::resolve(target, self.is_authenticated.get_untracked());
        if route != target {
            write_history(route.to_path(), HistoryMode::Replace);
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            service.sync_from_location();
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 令牌被清除（注销或身份校验失败）时离开受保护页面
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if !is_auth && route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                write_history(redirect.to_path(), HistoryMode::Replace);
                set_route.set(redirect);
                netinv::log_info!("[Router] Session ended, redirecting to login.");
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.guard_initial_route();
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone + Copy {
    let router = use_router();
    move |to: &str| router.navigate(to)
}

/// 重定向函数，供守卫使用
pub fn use_redirect() -> impl Fn(&str) + Clone + Copy {
    let router = use_router();
    move |to: &str| router.redirect(to)
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接：拦截点击，走路由服务而不是整页跳转
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_to_current_route_writes_nothing() {
        // 路由器与守卫同时把过期会话送往登录页时，只应留下一条记录
        assert_eq!(
            history_mode(AppRoute::Dashboard, AppRoute::Login, HistoryMode::Replace),
            Some(HistoryMode::Replace)
        );
        assert_eq!(
            history_mode(AppRoute::Login, AppRoute::Login, HistoryMode::Replace),
            None
        );
    }

    #[test]
    fn test_user_navigation_pushes() {
        assert_eq!(
            history_mode(AppRoute::Dashboard, AppRoute::Devices, HistoryMode::Push),
            Some(HistoryMode::Push)
        );
        assert_eq!(
            history_mode(AppRoute::Devices, AppRoute::Devices, HistoryMode::Push),
            None
        );
    }

    #[test]
    fn test_resolve_guards_by_token_presence() {
        assert_eq!(RouterService::resolve(AppRoute::Users, false), AppRoute::Login);
        assert_eq!(RouterService::resolve(AppRoute::Home, true), AppRoute::Dashboard);
        assert_eq!(RouterService::resolve(AppRoute::Login, true), AppRoute::Login);
        assert_eq!(RouterService::resolve(AppRoute::Devices, true), AppRoute::Devices);
    }
}
