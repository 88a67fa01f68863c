use leptos::prelude::*;

use crate::components::icons::Network;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 落地页；已登录用户由路由服务直接送往控制面板
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md flex flex-col items-center gap-4">
                    <div class="p-4 bg-primary/10 rounded-2xl text-primary">
                        <Network attr:class="h-12 w-12" />
                    </div>
                    <h1 class="text-5xl font-bold">"NetInv"</h1>
                    <p class="text-base-content/70">
                        "Keep track of every switch, router and server in your network: "
                        "addresses, platforms, access details and lifecycle status in one place."
                    </p>
                    <div class="flex gap-2">
                        <Link to=AppRoute::Login.to_path() class="btn btn-primary">"Sign in"</Link>
                        <Link to=AppRoute::Register.to_path() class="btn btn-outline">"Register"</Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
