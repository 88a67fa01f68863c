use leptos::prelude::*;
use leptos::task::spawn_local;
use netinv::forms::UserForm;
use netinv::views::{self, Refetch};
use netinv_shared::{Role, User};

use crate::auth::use_auth;
use crate::components::icons::AlertCircle;

fn update_form(form: RwSignal<Option<UserForm>>, apply: impl FnOnce(&mut UserForm)) {
    form.update(|f| {
        if let Some(f) = f {
            apply(f);
        }
    });
}

fn read_form(
    form: RwSignal<Option<UserForm>>,
    read: fn(&UserForm) -> String,
) -> impl Fn() -> String + Copy + Send + Sync + 'static {
    move || form.with(|f| f.as_ref().map(read).unwrap_or_default())
}

/// 用户编辑模态框（仅编辑，新用户通过注册页创建）
///
/// `form` 为 Some 时打开。
#[component]
pub fn UserDialog(
    form: RwSignal<Option<UserForm>>,
    #[prop(into)] on_saved: Callback<Refetch<User>>,
) -> impl IntoView {
    let auth = use_auth();
    let (saving, set_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let is_open = move || form.with(Option::is_some);

    Effect::new(move |_| {
        let Some(dialog) = dialog_ref.get() else {
            return;
        };
        if is_open() {
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
        let Some(current) = form.get_untracked() else {
            return;
        };
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        set_error_msg.set(None);

        let api = auth.api();
        spawn_local(async move {
            match views::submit_user(&api, &current).await {
                Ok(refetch) => {
                    on_saved.run(refetch);
                    form.set(None);
                }
                Err(e) => set_error_msg.set(Some(e.user_message("Operation failed"))),
            }
            set_saving.set(false);
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| form.set(None)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    "Edit User: "
                    {read_form(form, |f| f.username().to_string())}
                </h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <AlertCircle attr:class="h-5 w-5 shrink-0" />
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="user_email" class="label">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input id="user_email" type="email" required
                            on:input=move |ev| update_form(form, |f| f.email = event_target_value(&ev))
                            prop:value=read_form(form, |f| f.email.clone())
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="user_full_name" class="label">
                            <span class="label-text">"Full Name"</span>
                        </label>
                        <input id="user_full_name" type="text"
                            on:input=move |ev| update_form(form, |f| f.full_name = event_target_value(&ev))
                            prop:value=read_form(form, |f| f.full_name.clone())
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="grid grid-cols-2 gap-4 items-end">
                        <div class="form-control">
                            <label for="user_role" class="label">
                                <span class="label-text">"Role"</span>
                            </label>
                            <select id="user_role" class="select select-bordered w-full"
                                on:change=move |ev| {
                                    if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                        update_form(form, |f| f.role = role);
                                    }
                                }
                            >
                                {[Role::User, Role::Admin]
                                    .into_iter()
                                    .map(|r| view! {
                                        <option
                                            value=r.as_str()
                                            selected=move || form.with(|f| f.as_ref().is_some_and(|f| f.role == r))
                                        >
                                            {r.as_str()}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label cursor-pointer">
                                <span class="label-text">"Active"</span>
                                <input type="checkbox" class="toggle toggle-primary"
                                    prop:checked=move || form.with(|f| f.as_ref().is_some_and(|f| f.is_active))
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        update_form(form, |f| f.is_active = checked);
                                    }
                                />
                            </label>
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| form.set(None)>
                            "Cancel"
                        </button>
                        <button type="submit" disabled=move || saving.get() class="btn btn-primary">
                            {move || if saving.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Update".into_any()
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
