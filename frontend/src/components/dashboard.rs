use leptos::prelude::*;
use leptos::task::spawn_local;
use netinv::views::{Dashboard, DeviceStats};
use netinv_shared::date::format_last_sync;

use crate::auth::{use_auth, use_current_user};
use crate::components::devices::status_badge;
use crate::components::icons::*;
use crate::web::router::Link;

#[component]
fn StatCard(title: &'static str, value: usize, class: &'static str) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value {}", class)>{value}</div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let guard_user = use_current_user();

    let data = RwSignal::new(Option::<Dashboard>::None);

    // 设备列表与当前用户并发拉取
    let api = auth.api();
    let client = auth.client();
    spawn_local(async move {
        data.set(Some(Dashboard::load(&api, &client).await));
    });

    let welcome_name = move || {
        data.with(|d| d.as_ref().and_then(|d| d.user.clone()))
            .or_else(|| guard_user.clone())
            .map(|u| u.display_name().to_string())
            .unwrap_or_default()
    };
    let stats = move || data.with(|d| d.as_ref().map(Dashboard::stats).unwrap_or_default());
    let recent = move || data.with(|d| d.as_ref().map(Dashboard::recent).unwrap_or_default());
    let error = move || data.with(|d| d.as_ref().and_then(|d| d.error.clone()));
    let is_loading = move || data.with(Option::is_none);

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-2xl">"Welcome, " {welcome_name} "!"</h2>
                <p class="text-base-content/70">"Here is an overview of your network inventory."</p>
            </div>
        </div>

        <Show when=move || error().is_some()>
            <div role="alert" class="alert alert-error text-sm">
                <AlertCircle attr:class="h-5 w-5 shrink-0" />
                <span>{move || error().unwrap_or_default()}</span>
            </div>
        </Show>

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            {move || {
                let DeviceStats { total, active, inactive, pending } = stats();
                view! {
                    <StatCard title="Total Devices" value=total class="text-primary" />
                    <StatCard title="Active" value=active class="text-success" />
                    <StatCard title="Inactive" value=inactive class="text-error" />
                    <StatCard title="Pending" value=pending class="text-warning" />
                }
            }}
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <div>
                        <h3 class="card-title">"Recent Devices"</h3>
                        <p class="text-base-content/70 text-sm">"The most recently listed devices."</p>
                    </div>
                    <Link to="/devices" class="btn btn-ghost btn-sm gap-2">
                        <Server attr:class="h-4 w-4" /> "View all"
                    </Link>
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table w-full">
                        <thead>
                            <tr>
                                <th>"Hostname"</th>
                                <th>"IP Address"</th>
                                <th>"Type"</th>
                                <th>"Status"</th>
                                <th class="hidden md:table-cell">"Last Sync"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=is_loading>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !is_loading() && recent().is_empty()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No devices in the inventory yet."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=recent
                                key=|d| d.id
                                children=move |device| {
                                    view! {
                                        <tr>
                                            <td class="font-mono text-sm font-bold">{device.hostname}</td>
                                            <td class="font-mono text-sm">{device.ip_address}</td>
                                            <td>{device.device_type.label().to_string()}</td>
                                            <td>{status_badge(device.status)}</td>
                                            <td class="hidden md:table-cell text-xs opacity-70">
                                                {format_last_sync(device.last_sync.as_ref())}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
