//! Product create/edit page.
//!
//! The page keeps a `ProductFormController` in a signal; every input goes
//! through the controller's transitions so the category cascade and the
//! draft stay consistent.

mod category_fields;
mod detail_fields;

use crate::api::use_api;
use crate::components::icons::Upload;
use crate::components::notice::use_notifier;
use crate::web::router::{Link, use_router};
use category_fields::CategoryFields;
use detail_fields::DetailFields;
use furnish_shared::{
    AppRoute, FormError, ProductFormController, ProductId, SubmitOutcome, ValidationError,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

#[component]
pub fn ProductFormPage(#[prop(optional)] product_id: Option<ProductId>) -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let router = use_router();

    let form = RwSignal::new(ProductFormController::new());
    let (loading, set_loading) = signal(product_id.is_some());
    let (saving, set_saving) = signal(false);
    let (uploading, set_uploading) = signal(false);
    let validation = RwSignal::new(Option::<ValidationError>::None);

    // 编辑模式：加载已有记录
    if let Some(id) = product_id {
        let db = api().database();
        spawn_local(async move {
            match ProductFormController::load_for_edit(&db, &id).await {
                Ok(loaded) => form.set(loaded),
                Err(e) => {
                    notifier.failure("ProductForm", &e);
                    router.navigate_to(AppRoute::Products);
                }
            }
            set_loading.set(false);
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let mut controller = form.get_untracked();
        let db = api().database();
        set_saving.set(true);
        validation.set(None);

        spawn_local(async move {
            match controller.submit(&db).await {
                Ok(outcome) => {
                    form.set(controller);
                    notifier.success(match outcome {
                        SubmitOutcome::Created(_) => "Product created",
                        SubmitOutcome::Updated(_) => "Product updated",
                    });
                    router.navigate_to(AppRoute::Products);
                }
                Err(FormError::Validation(e)) => validation.set(Some(e)),
                // 保留草稿以便重试
                Err(FormError::Remote(e)) => notifier.failure("ProductForm", &e),
            }
            set_saving.set(false);
        });
    };

    let on_file = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let uploader = api().uploader();
        set_uploading.set(true);
        spawn_local(async move {
            // 只写回图片字段，上传期间的其它输入不受影响
            match ProductFormController::upload_image(&uploader, file).await {
                Ok(url) => {
                    form.update(|f| f.apply_image(url));
                    notifier.success("Image uploaded");
                }
                Err(e) => notifier.failure("Upload", &e),
            }
            set_uploading.set(false);
        });
    };

    let title = move || {
        if form.with(|f| f.is_edit()) {
            "Edit product"
        } else {
            "Add product"
        }
    };
    let image = move || form.with(|f| f.draft().image.clone());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">{title}</h3>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <div class="py-8 text-center"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
                >
                    <form on:submit=on_submit class="space-y-4">
                        {move || validation.get().map(|e| view! {
                            <div role="alert" class="alert alert-warning text-sm py-2">
                                <span>{e.to_string()}</span>
                            </div>
                        })}

                        <CategoryFields form=form validation=validation />
                        <DetailFields form=form validation=validation />

                        <div class="form-control">
                            <label for="image" class="label">
                                <span class="label-text">"Image"</span>
                            </label>
                            <div class="flex items-center gap-4">
                                <input
                                    id="image"
                                    type="file"
                                    accept="image/*"
                                    class="file-input file-input-bordered w-full max-w-xs"
                                    on:change=on_file
                                    disabled=move || uploading.get()
                                />
                                <Show when=move || uploading.get()>
                                    <span class="flex items-center gap-1 text-sm opacity-70">
                                        <Upload attr:class="h-4 w-4 animate-pulse" /> "Uploading..."
                                    </span>
                                </Show>
                            </div>
                            {move || {
                                let url = image();
                                (!url.is_empty()).then(|| view! {
                                    <img src=url class="mt-2 h-32 w-32 object-cover rounded-box" alt="product image" />
                                })
                            }}
                        </div>

                        <div class="flex justify-end gap-2 pt-4">
                            <Link route=AppRoute::Products class="btn btn-ghost">"Cancel"</Link>
                            <button type="submit" class="btn btn-primary" disabled=move || saving.get() || uploading.get()>
                                {move || if saving.get() {
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                } else {
                                    "Save".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </Show>
            </div>
        </div>
    }
}
