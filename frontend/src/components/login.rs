use crate::auth::{login, register, use_auth};
use crate::components::icons::Armchair;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (is_register, set_is_register) = signal(false);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (display_name, set_display_name) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let email = email.get().trim().to_string();
        let password = password.get();
        let registering = is_register.get();
        let display_name = display_name.get().trim().to_string();
        spawn_local(async move {
            let result = if registering {
                register(auth, email, password, display_name).await
            } else {
                login(auth, email, password).await
            };
            // 成功后由路由服务的认证监听负责跳转
            match result {
                Ok(profile) => log::info!("[Login] signed in as {}", profile.label()),
                Err(e) => {
                    log::warn!("[Login] {}", e);
                    set_error_msg.set(Some(e.user_message()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let toggle_mode = move |_| {
        set_is_register.update(|r| *r = !*r);
        set_error_msg.set(None);
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Armchair attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Furnish Admin"</h1>
                        <p class="text-base-content/70">
                            {move || if is_register.get() {
                                "Create an administrator account"
                            } else {
                                "Sign in to manage the catalog"
                            }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <Show when=move || is_register.get()>
                            <div class="form-control">
                                <label class="label" for="display-name">
                                    <span class="label-text">"Name"</span>
                                </label>
                                <input
                                    id="display-name"
                                    type="text"
                                    placeholder="Jane Doe"
                                    on:input=move |ev| set_display_name.set(event_target_value(&ev))
                                    prop:value=display_name
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="admin@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || match (is_submitting.get(), is_register.get()) {
                                    (true, _) => view! { <span class="loading loading-spinner"></span> "Please wait..." }.into_any(),
                                    (false, true) => "Create account".into_any(),
                                    (false, false) => "Sign in".into_any(),
                                }}
                            </button>
                        </div>
                        <button type="button" class="btn btn-link btn-sm" on:click=toggle_mode>
                            {move || if is_register.get() {
                                "Already have an account? Sign in"
                            } else {
                                "No account yet? Register"
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
