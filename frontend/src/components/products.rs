//! Catalog listing.

use std::collections::BTreeMap;

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::notice::use_notifier;
use crate::web::router::{Link, use_router};
use furnish_shared::{AppRoute, Product, ProductGateway, ProductId};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let router = use_router();

    let (products, set_products) = signal(BTreeMap::<ProductId, Product>::new());
    let (loading, set_loading) = signal(true);

    let load_products = move || {
        let db = api().database();
        set_loading.set(true);
        spawn_local(async move {
            match db.list().await {
                Ok(data) => set_products.set(data),
                Err(e) => notifier.failure("Products", &e),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    load_products();

    let handle_delete = move |id: ProductId| {
        let db = api().database();
        spawn_local(async move {
            match db.delete(&id).await {
                Ok(()) => {
                    notifier.success("Product deleted");
                    set_products.update(|list| {
                        list.remove(&id);
                    });
                }
                Err(e) => notifier.failure("Products", &e),
            }
        });
    };

    let total = move || products.with(|p| p.len());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <div>
                        <h3 class="card-title">"Products"</h3>
                        <p class="text-base-content/70 text-sm">{move || format!("{} items in the catalog", total())}</p>
                    </div>
                    <div class="flex gap-2">
                        <button on:click=move |_| load_products() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                        <Link route=AppRoute::ProductNew class="btn btn-primary gap-2">
                            <Plus attr:class="h-4 w-4" /> "Add product"
                        </Link>
                    </div>
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Product"</th>
                                <th>"Category"</th>
                                <th class="text-right">"Price"</th>
                                <th class="hidden md:table-cell">"Material"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || total() == 0 && !loading.get()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No products yet."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || loading.get() && total() == 0>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || products.get()
                                key=|(id, _)| id.clone()
                                children=move |(id, product)| {
                                    let edit_id = id.clone();
                                    let category = product.category_path();
                                    view! {
                                        <tr>
                                            <td>
                                                <div class="flex items-center gap-3">
                                                    {(!product.image.is_empty()).then(|| view! {
                                                        <div class="avatar">
                                                            <div class="mask mask-squircle h-10 w-10">
                                                                <img src={product.image.clone()} alt={product.name.clone()} />
                                                            </div>
                                                        </div>
                                                    })}
                                                    <div>
                                                        <div class="font-bold">{product.name.clone()}</div>
                                                        <div class="text-xs opacity-60">{product.dimensions.clone()}</div>
                                                    </div>
                                                </div>
                                            </td>
                                            <td><span class="badge badge-ghost">{category}</span></td>
                                            <td class="text-right font-mono">{product.price.to_string()}</td>
                                            <td class="hidden md:table-cell">{product.material.clone()}</td>
                                            <td class="flex gap-1 justify-end">
                                                <button
                                                    class="btn btn-ghost btn-sm btn-square"
                                                    on:click=move |_| router.navigate_to(AppRoute::ProductEdit(edit_id.clone()))
                                                >
                                                    <Pencil attr:class="h-4 w-4" />
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-sm btn-square text-error"
                                                    on:click=move |_| handle_delete(id.clone())
                                                >
                                                    <Trash2 attr:class="h-4 w-4" />
                                                </button>
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
