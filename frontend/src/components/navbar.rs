use leptos::prelude::*;
use netinv_shared::Role;

use crate::auth::{use_auth, use_current_user};
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_navigate, use_router};

#[component]
fn NavLink(route: AppRoute, label: &'static str, children: Children) -> impl IntoView {
    let router = use_router();
    let class = move || {
        if router.current_route().get() == route {
            "btn btn-ghost btn-sm gap-2 btn-active"
        } else {
            "btn btn-ghost btn-sm gap-2"
        }
    };

    view! {
        <li>
            <a
                href=route.to_path()
                class=class
                on:click=move |ev| {
                    ev.prevent_default();
                    router.navigate(route.to_path());
                }
            >
                {children()}
                {label}
            </a>
        </li>
    }
}

/// 顶部导航栏
///
/// 用户管理入口只对管理员显示。
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let user = use_current_user();

    let is_admin = user.as_ref().is_some_and(|u| u.role == Role::Admin);
    let username = user
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_default();
    let role = user.as_ref().map(|u| u.role.as_str()).unwrap_or_default();

    let on_logout = move |_| {
        auth.logout();
        navigate(AppRoute::Login.to_path());
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <Network attr:class="text-primary h-6 w-6" />
                <Link to=AppRoute::Dashboard.to_path() class="btn btn-ghost text-xl">
                    "NetInv"
                </Link>
                <ul class="menu menu-horizontal px-1 gap-1 hidden md:flex">
                    <NavLink route=AppRoute::Dashboard label="Dashboard">
                        <LayoutDashboard attr:class="h-4 w-4" />
                    </NavLink>
                    <NavLink route=AppRoute::Devices label="Devices">
                        <Server attr:class="h-4 w-4" />
                    </NavLink>
                    <Show when=move || is_admin>
                        <NavLink route=AppRoute::Users label="Users">
                            <UsersIcon attr:class="h-4 w-4" />
                        </NavLink>
                    </Show>
                </ul>
            </div>
            <div class="flex-none">
                <div class="dropdown dropdown-end">
                    <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                        <span class="font-semibold">{username}</span>
                        <span class="badge badge-outline badge-sm">{role}</span>
                        <ChevronDown attr:class="h-4 w-4" />
                    </div>
                    <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-52">
                        <li>
                            <a on:click=on_logout class="text-error hover:bg-error/10">
                                <LogOut attr:class="mr-2 h-4 w-4" />
                                "Logout"
                            </a>
                        </li>
                    </ul>
                </div>
            </div>
        </div>
    }
}
