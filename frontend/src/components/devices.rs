use leptos::prelude::*;
use leptos::task::spawn_local;
use netinv::views::{self, Refetch};
use netinv_shared::date::format_last_sync;
use netinv_shared::{Device, DeviceStatus};

use crate::auth::use_auth;
use crate::components::device_dialog::DeviceDialog;
use crate::components::device_dialog::form_state::DeviceFormState;
use crate::components::icons::*;
use crate::components::toast::{Notice, Toast};

/// 状态徽章
pub fn status_badge(status: DeviceStatus) -> impl IntoView {
    let class = match status {
        DeviceStatus::Active => "badge badge-success",
        DeviceStatus::Inactive => "badge badge-error",
        DeviceStatus::Pending => "badge badge-warning",
    };
    view! { <span class=class>{status.label()}</span> }
}

/// 浏览器原生确认框；无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

#[component]
pub fn DevicesPage() -> impl IntoView {
    let auth = use_auth();

    let devices = RwSignal::new(Vec::<Device>::new());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let notice = RwSignal::new(Option::<Notice>::None);

    let dialog_open = RwSignal::new(false);
    let form_state = DeviceFormState::new();

    let load_devices = move || {
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            match api.list_devices().await {
                Ok(list) => {
                    devices.set(list);
                    set_load_error.set(None);
                }
                Err(e) => {
                    netinv::log_error!("[Devices] Error fetching devices: {}", e);
                    set_load_error.set(Some(e.user_message("Failed to load devices")));
                }
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    load_devices();

    // 变更之后的刷新：失败只作为列表加载错误展示
    let apply_refetch = move |refetch: Refetch<Device>| match refetch {
        Ok(list) => {
            devices.set(list);
            set_load_error.set(None);
        }
        Err(e) => set_load_error.set(Some(e.user_message("Failed to load devices"))),
    };

    let open_create = move |_| {
        form_state.reset();
        dialog_open.set(true);
    };

    let open_edit = move |device: Device| {
        form_state.load(&device);
        dialog_open.set(true);
    };

    let on_saved = move |refetch: Refetch<Device>| {
        let message = if form_state.is_edit() {
            "Device updated"
        } else {
            "Device created"
        };
        apply_refetch(refetch);
        notice.set(Some(Notice::success(message)));
    };

    let handle_delete = move |id: i64| {
        if !confirm("Are you sure you want to delete this device?") {
            return;
        }
        let api = auth.api();
        spawn_local(async move {
            match views::delete_device(&api, id).await {
                Ok(refetch) => {
                    apply_refetch(refetch);
                    notice.set(Some(Notice::success("Device deleted")));
                }
                Err(e) => {
                    notice.set(Some(Notice::error(e.user_message("Failed to delete device"))));
                }
            }
        });
    };

    let device_count = move || devices.with(|d| d.len());

    view! {
        <Toast notice=notice />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <div>
                        <h3 class="card-title">"Devices"</h3>
                        <p class="text-base-content/70 text-sm">"Manage your network device inventory."</p>
                    </div>
                    <div class="flex gap-2">
                        <button on:click=move |_| load_devices() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                        <button class="btn btn-primary gap-2" on:click=open_create>
                            <Plus attr:class="h-4 w-4" /> "Add Device"
                        </button>
                    </div>
                </div>

                <Show when=move || load_error.get().is_some()>
                    <div role="alert" class="alert alert-error mx-6 text-sm">
                        <AlertCircle attr:class="h-5 w-5 shrink-0" />
                        <span>{move || load_error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Hostname"</th>
                                <th>"IP Address"</th>
                                <th>"Type"</th>
                                <th class="hidden md:table-cell">"Location"</th>
                                <th>"Status"</th>
                                <th class="hidden md:table-cell">"Last Sync"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || device_count() == 0 && !loading.get()>
                                <tr>
                                    <td colspan="7" class="text-center py-8 text-base-content/50">
                                        "No devices yet. Add one to get started."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || loading.get() && device_count() == 0>
                                <tr>
                                    <td colspan="7" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || devices.get()
                                key=|d| (d.id, d.hostname.clone(), d.updated_at, d.status)
                                children=move |device| {
                                    let id = device.id;
                                    let for_edit = device.clone();
                                    view! {
                                        <tr>
                                            <td class="font-mono text-sm font-bold">{device.hostname}</td>
                                            <td class="font-mono text-sm">{device.ip_address}</td>
                                            <td>
                                                <div class="badge badge-accent badge-outline">
                                                    {device.device_type.label().to_string()}
                                                </div>
                                            </td>
                                            <td class="hidden md:table-cell">{device.location.unwrap_or_default()}</td>
                                            <td>{status_badge(device.status)}</td>
                                            <td class="hidden md:table-cell text-xs opacity-70">
                                                {format_last_sync(device.last_sync.as_ref())}
                                            </td>
                                            <td>
                                                <div class="flex gap-1 justify-end">
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square"
                                                        title="Edit"
                                                        on:click=move |_| open_edit(for_edit.clone())
                                                    >
                                                        <Pencil attr:class="h-4 w-4" />
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square text-error"
                                                        title="Delete"
                                                        on:click=move |_| handle_delete(id)
                                                    >
                                                        <Trash2 attr:class="h-4 w-4" />
                                                    </button>
                                                </div>
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

        <DeviceDialog state=form_state open=dialog_open on_saved=on_saved />
    }
}
