use leptos::prelude::*;
use leptos::task::spawn_local;
use netinv::forms::RegisterForm;
use netinv_shared::Role;

use crate::auth::use_auth;
use crate::components::icons::{AlertCircle, UsersIcon};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_navigate};

fn text_input(
    id: &'static str,
    label: &'static str,
    kind: &'static str,
    value: RwSignal<String>,
    required: bool,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
                class="input input-bordered"
                required=required
            />
        </div>
    }
}

/// 注册页：成功后回到登录页，不自动登录
#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let role = RwSignal::new(Role::default());

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let form = RegisterForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            full_name: full_name.get_untracked(),
            role: role.get_untracked(),
        };
        let registration = match form.to_registration() {
            Ok(r) => r,
            Err(e) => {
                set_error_msg.set(Some(e.message));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let client = auth.client();
        spawn_local(async move {
            match client.register(&registration).await {
                Ok(user) => {
                    netinv::log_info!("[Register] Registered {}", user.username);
                    navigate(AppRoute::Login.to_path());
                }
                Err(e) => set_error_msg.set(Some(e.user_message("Registration failed"))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <UsersIcon attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create an account"</h1>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle attr:class="h-5 w-5 shrink-0" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        {text_input("reg_username", "Username", "text", username, true)}
                        {text_input("reg_email", "Email", "email", email, true)}
                        {text_input("reg_full_name", "Full Name", "text", full_name, false)}
                        {text_input("reg_password", "Password", "password", password, true)}

                        <div class="form-control">
                            <label class="label" for="reg_role">
                                <span class="label-text">"Role"</span>
                            </label>
                            <select id="reg_role" class="select select-bordered"
                                on:change=move |ev| {
                                    if let Some(r) = Role::parse(&event_target_value(&ev)) {
                                        role.set(r);
                                    }
                                }
                            >
                                <option value="user" selected=move || role.get() == Role::User>"User"</option>
                                <option value="admin" selected=move || role.get() == Role::Admin>"Admin"</option>
                            </select>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already registered? "
                            <Link to=AppRoute::Login.to_path() class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
