//! 访问凭据表单区
//!
//! 密码框从不回显；编辑时留空表示保持原密码。

use leptos::prelude::*;

use super::form_state::DeviceFormState;

#[component]
pub fn AccessSection(state: DeviceFormState) -> impl IntoView {
    let password_hint = move || {
        if state.is_edit() {
            "Leave blank to keep the current password"
        } else {
            "Optional"
        }
    };

    view! {
        <div class="divider text-sm text-base-content/60">"Access"</div>

        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label for="ssh_port" class="label">
                    <span class="label-text">"SSH Port"</span>
                </label>
                <input id="ssh_port" type="number" min="1" max="65535" required
                    on:input=move |ev| state.ssh_port.set(event_target_value(&ev))
                    prop:value=move || state.ssh_port.get()
                    class="input input-bordered w-full"
                />
            </div>
            <div class="form-control">
                <label for="username" class="label">
                    <span class="label-text">"Username"</span>
                </label>
                <input id="username" type="text" autocomplete="off"
                    on:input=move |ev| state.username.set(event_target_value(&ev))
                    prop:value=move || state.username.get()
                    class="input input-bordered w-full"
                />
            </div>
        </div>

        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label for="password" class="label">
                    <span class="label-text">"Password"</span>
                </label>
                <input id="password" type="password" autocomplete="new-password"
                    on:input=move |ev| state.password.set(event_target_value(&ev))
                    prop:value=move || state.password.get()
                    class="input input-bordered w-full"
                />
                <label class="label">
                    <span class="label-text-alt text-base-content/50">{password_hint}</span>
                </label>
            </div>
            <div class="form-control">
                <label for="enable_password" class="label">
                    <span class="label-text">"Enable Password"</span>
                </label>
                <input id="enable_password" type="password" autocomplete="new-password"
                    on:input=move |ev| state.enable_password.set(event_target_value(&ev))
                    prop:value=move || state.enable_password.get()
                    class="input input-bordered w-full"
                />
                <label class="label">
                    <span class="label-text-alt text-base-content/50">{password_hint}</span>
                </label>
            </div>
        </div>
    }
}
