mod access_section;
pub mod form_state;
mod identity_section;

use leptos::prelude::*;
use leptos::task::spawn_local;
use netinv::views::{self, Refetch};
use netinv_shared::Device;

use crate::auth::use_auth;
use crate::components::icons::AlertCircle;
use access_section::AccessSection;
use form_state::DeviceFormState;
use identity_section::IdentitySection;

/// 新建与编辑共用的设备模态框
///
/// 变更被接受后把列表刷新结果交给 `on_saved` 并关闭；变更失败时在框内显示服务端消息。
#[component]
pub fn DeviceDialog(
    state: DeviceFormState,
    open: RwSignal<bool>,
    #[prop(into)] on_saved: Callback<Refetch<Device>>,
) -> impl IntoView {
    let auth = use_auth();
    let (saving, set_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        let Some(dialog) = dialog_ref.get() else {
            return;
        };
        if open.get() {
            set_error_msg.set(None);
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        } else if dialog.open() {
            dialog.close();
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        set_error_msg.set(None);

        let form = state.to_form();
        let api = auth.api();
        spawn_local(async move {
            match views::submit_device(&api, &form).await {
                Ok(refetch) => {
                    on_saved.run(refetch);
                    open.set(false);
                }
                Err(e) => set_error_msg.set(Some(e.user_message("Operation failed"))),
            }
            set_saving.set(false);
        });
    };

    let title = move || {
        if state.is_edit() {
            "Edit Device"
        } else {
            "Add Device"
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">{title}</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <AlertCircle attr:class="h-5 w-5 shrink-0" />
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <IdentitySection state=state />
                    <AccessSection state=state />

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" disabled=move || saving.get() class="btn btn-primary">
                            {move || if saving.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else if state.is_edit() {
                                "Update".into_any()
                            } else {
                                "Create".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
