use leptos::prelude::*;
use leptos::task::spawn_local;
use netinv::forms::UserForm;
use netinv::views::{self, Refetch};
use netinv_shared::{Role, User};

use crate::auth::use_auth;
use crate::components::devices::confirm;
use crate::components::icons::*;
use crate::components::toast::{Notice, Toast};
use crate::components::user_dialog::UserDialog;

/// 用户管理页（仅管理员，由外层守卫保证）
#[component]
pub fn UsersPage() -> impl IntoView {
    let auth = use_auth();

    let users = RwSignal::new(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let notice = RwSignal::new(Option::<Notice>::None);
    let editing = RwSignal::new(Option::<UserForm>::None);

    let api = auth.api();
    spawn_local(async move {
        match api.list_users().await {
            Ok(list) => users.set(list),
            Err(e) => {
                netinv::log_error!("[Users] Error fetching users: {}", e);
                set_load_error.set(Some(e.user_message("Failed to load users")));
            }
        }
        set_loading.set(false);
    });

    // 变更之后的刷新：失败只作为列表加载错误展示
    let apply_refetch = move |refetch: Refetch<User>| match refetch {
        Ok(list) => {
            users.set(list);
            set_load_error.set(None);
        }
        Err(e) => set_load_error.set(Some(e.user_message("Failed to load users"))),
    };

    let on_saved = move |refetch: Refetch<User>| {
        apply_refetch(refetch);
        notice.set(Some(Notice::success("User updated")));
    };

    let handle_delete = move |id: i64| {
        if !confirm("Are you sure you want to delete this user?") {
            return;
        }
        let api = auth.api();
        spawn_local(async move {
            match views::delete_user(&api, id).await {
                Ok(refetch) => {
                    apply_refetch(refetch);
                    notice.set(Some(Notice::success("User deleted")));
                }
                Err(e) => {
                    notice.set(Some(Notice::error(e.user_message("Failed to delete user"))));
                }
            }
        });
    };

    view! {
        <Toast notice=notice />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="p-6 pb-2">
                    <h3 class="card-title">"Users"</h3>
                    <p class="text-base-content/70 text-sm">"Manage accounts and roles."</p>
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
                                <th>"Username"</th>
                                <th>"Email"</th>
                                <th class="hidden md:table-cell">"Full Name"</th>
                                <th>"Role"</th>
                                <th>"Status"</th>
                                <th class="hidden md:table-cell">"Created"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get()>
                                <tr>
                                    <td colspan="7" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || users.get()
                                key=|u| (u.id, u.email.clone(), u.full_name.clone(), u.role, u.is_active)
                                children=move |user| {
                                    let id = user.id;
                                    let for_edit = user.clone();
                                    let role_class = match user.role {
                                        Role::Admin => "badge badge-primary",
                                        Role::User => "badge badge-ghost",
                                    };
                                    let (status_class, status_label) = if user.is_active {
                                        ("badge badge-success", "Active")
                                    } else {
                                        ("badge badge-error", "Inactive")
                                    };
                                    view! {
                                        <tr>
                                            <td class="font-bold">{user.username}</td>
                                            <td>{user.email}</td>
                                            <td class="hidden md:table-cell">{user.full_name.unwrap_or_default()}</td>
                                            <td><span class=role_class>{user.role.as_str()}</span></td>
                                            <td><span class=status_class>{status_label}</span></td>
                                            <td class="hidden md:table-cell text-xs opacity-70">
                                                {user.created_at.map(|t| t.display_date()).unwrap_or_default()}
                                            </td>
                                            <td>
                                                <div class="flex gap-1 justify-end">
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square"
                                                        title="Edit"
                                                        on:click=move |_| editing.set(Some(UserForm::edit(&for_edit)))
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

        <UserDialog form=editing on_saved=on_saved />
    }
}
