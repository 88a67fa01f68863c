//! 设备标识表单区
//!
//! 主机名、IP、类型、厂商信息、状态与位置。

use leptos::prelude::*;
use netinv_shared::{DeviceStatus, DeviceType};

use super::form_state::DeviceFormState;

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type="text"
                placeholder=placeholder
                required=required
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
                class="input input-bordered w-full"
            />
        </div>
    }
}

#[component]
pub fn IdentitySection(state: DeviceFormState) -> impl IntoView {
    // 记录中的未知类型也要能显示并保持选中
    let type_options = move || {
        let current = state.device_type.get();
        let mut options = DeviceType::KNOWN.to_vec();
        if !options.contains(&current) {
            options.push(current);
        }
        options
    };

    view! {
        <div class="grid grid-cols-2 gap-4">
            <TextField id="hostname" label="Hostname" value=state.hostname placeholder="core-sw-01" required=true />
            <TextField id="ip_address" label="IP Address" value=state.ip_address placeholder="10.0.0.1" required=true />
        </div>

        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label for="device_type" class="label">
                    <span class="label-text">"Device Type"</span>
                </label>
                <select
                    id="device_type"
                    class="select select-bordered w-full"
                    on:change=move |ev| state.device_type.set(DeviceType::from(event_target_value(&ev)))
                >
                    {move || {
                        type_options()
                            .into_iter()
                            .map(|t| {
                                let selected = state.device_type.with(|current| *current == t);
                                view! {
                                    <option value=t.as_str().to_string() selected=selected>
                                        {t.label().to_string()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>
            <div class="form-control">
                <label for="status" class="label">
                    <span class="label-text">"Status"</span>
                </label>
                <select
                    id="status"
                    class="select select-bordered w-full"
                    on:change=move |ev| {
                        if let Some(status) = DeviceStatus::parse(&event_target_value(&ev)) {
                            state.status.set(status);
                        }
                    }
                >
                    {DeviceStatus::ALL
                        .into_iter()
                        .map(|s| {
                            view! {
                                <option value=s.as_str() selected=move || state.status.get() == s>
                                    {s.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </div>

        <div class="grid grid-cols-3 gap-4">
            <TextField id="vendor" label="Vendor" value=state.vendor placeholder="Cisco" />
            <TextField id="model" label="Model" value=state.model placeholder="C9300-48P" />
            <TextField id="platform" label="Platform" value=state.platform placeholder="IOS-XE 17.9" />
        </div>

        <TextField id="location" label="Location" value=state.location placeholder="DC1 / Rack 12" />

        <div class="form-control">
            <label for="description" class="label">
                <span class="label-text">"Description"</span>
            </label>
            <textarea
                id="description"
                class="textarea textarea-bordered w-full"
                rows="2"
                on:input=move |ev| state.description.set(event_target_value(&ev))
                prop:value=move || state.description.get()
            ></textarea>
        </div>
    }
}
