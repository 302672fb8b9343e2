use crate::auth::{logout, update_profile, use_auth};
use crate::components::icons::*;
use crate::components::notice::use_notifier;
use crate::web::router::{Link, use_router};
use furnish_shared::{AppRoute, ProfileUpdate};
use leptos::prelude::*;

/// Shell around every signed-in page: sidebar, navbar, content.
#[component]
pub fn DashboardLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 font-sans flex">
            <Sidebar />
            <div class="flex-1 p-4 md:p-8 space-y-6">
                <AdminNavbar />
                {children()}
            </div>
        </div>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let router = use_router();

    let item_class = move |active: fn(&AppRoute) -> bool| {
        Signal::derive(move || {
            if router.current_route().with(active) {
                "flex items-center gap-2 active".to_string()
            } else {
                "flex items-center gap-2".to_string()
            }
        })
    };

    view! {
        <aside class="w-60 bg-base-100 shadow-xl hidden md:block">
            <div class="p-6 flex items-center gap-2 text-xl font-bold">
                <Armchair attr:class="h-6 w-6 text-primary" />
                "Furnish Admin"
            </div>
            <ul class="menu p-4 gap-1">
                <li>
                    <Link
                        route=AppRoute::Products
                        class={item_class(|r| matches!(r, AppRoute::Products | AppRoute::ProductEdit(_)))}
                    >
                        <Package attr:class="h-4 w-4" />
                        "Products"
                    </Link>
                </li>
                <li>
                    <Link route=AppRoute::ProductNew class={item_class(|r| matches!(r, AppRoute::ProductNew))}>
                        <Plus attr:class="h-4 w-4" />
                        "Add product"
                    </Link>
                </li>
                <li>
                    <Link route=AppRoute::Orders class={item_class(|r| matches!(r, AppRoute::Orders))}>
                        <ShoppingCart attr:class="h-4 w-4" />
                        "Orders"
                    </Link>
                </li>
            </ul>
        </aside>
    }
}

#[component]
fn AdminNavbar() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let label = move || {
        auth.state
            .with(|s| s.profile().map(|p| p.label().to_string()))
            .unwrap_or_default()
    };
    let (new_name, set_new_name) = signal(String::new());

    let on_rename = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get().trim().to_string();
        if name.is_empty() {
            return;
        }
        let update = ProfileUpdate {
            display_name: Some(name),
            ..Default::default()
        };
        match update_profile(auth, update) {
            Ok(profile) => {
                notifier.success(format!("Profile saved as {}", profile.label()));
                set_new_name.set(String::new());
            }
            Err(e) => notifier.failure("Profile", &e),
        }
    };

    // 无需手动导航：路由服务监听认证状态并自动重定向
    let on_logout = move |_| logout(auth);

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <span class="text-lg font-semibold px-2">"Dashboard"</span>
            </div>
            <div class="flex-none gap-2">
                <div class="dropdown dropdown-end">
                    <div tabindex="0" role="button" class="btn btn-ghost">
                        {label}
                    </div>
                    <form
                        tabindex="0"
                        class="dropdown-content z-[1] p-4 shadow bg-base-100 rounded-box w-64 space-y-2"
                        on:submit=on_rename
                    >
                        <label class="label-text" for="profile-name">"Display name"</label>
                        <input
                            id="profile-name"
                            type="text"
                            class="input input-bordered input-sm w-full"
                            on:input=move |ev| set_new_name.set(event_target_value(&ev))
                            prop:value=new_name
                        />
                        <button class="btn btn-primary btn-sm w-full">"Save"</button>
                    </form>
                </div>
                <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Log out"
                </button>
            </div>
        </div>
    }
}
