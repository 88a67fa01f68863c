use leptos::prelude::*;
use leptos::task::spawn_local;
use netinv::{GuardState, RouteGuard};
use netinv_shared::Role;

use crate::auth::{CurrentUser, use_auth};
use crate::web::router::use_redirect;

/// 受保护路由
///
/// 挂载时向服务端确认身份：确认期间显示加载动画，失败或角色不足时跳转，
/// 只有通过后才渲染子组件，并把当前用户放入 Context。
#[component]
pub fn ProtectedRoute(
    /// 访问所需的最低角色
    #[prop(optional_no_strip)]
    required_role: Option<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let redirect = use_redirect();
    let state = RwSignal::new(GuardState::Resolving);
    let guard = RouteGuard::new(required_role);

    let client = auth.client();
    spawn_local(async move {
        state.set(guard.resolve(&client).await);
    });

    Effect::new(move |_| {
        if let GuardState::Redirecting(target) = state.get() {
            redirect(target.path());
        }
    });

    move || match state.get() {
        GuardState::Authorized(user) => {
            provide_context(CurrentUser(user));
            children().into_any()
        }
        GuardState::Resolving | GuardState::Redirecting(_) => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}
