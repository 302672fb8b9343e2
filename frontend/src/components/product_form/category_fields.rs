//! 分类级联选择
//!
//! Three selects. Lower levels only render when the taxonomy has options for
//! the current selection; changing a level clears everything below it.

use furnish_shared::{ProductFormController, ValidationError};
use leptos::prelude::*;

fn select_class(validation: RwSignal<Option<ValidationError>>, field: &'static str) -> impl Fn() -> &'static str {
    move || {
        if validation.with(|v| v.as_ref().is_some_and(|e| e.field() == field)) {
            "select select-bordered select-error w-full"
        } else {
            "select select-bordered w-full"
        }
    }
}

/// Humanise a taxonomy key: `living-room` -> `Living room`.
fn option_label(key: &str) -> String {
    let text = key.replace('-', " ");
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}

#[component]
fn CategorySelect(
    id: &'static str,
    label: &'static str,
    placeholder: &'static str,
    #[prop(into)] options: Signal<Vec<&'static str>>,
    #[prop(into)] selected: Signal<String>,
    on_select: impl Fn(String) + 'static,
    validation: RwSignal<Option<ValidationError>>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            <select
                id=id
                class={select_class(validation, id)}
                on:change=move |ev| on_select(event_target_value(&ev))
                prop:value=move || selected.get()
            >
                <option value="" selected=move || selected.with(String::is_empty)>{placeholder}</option>
                <For
                    each=move || options.get()
                    key=|key| *key
                    children=move |key| view! {
                        <option value=key selected=move || selected.with(|s| s == key)>{option_label(key)}</option>
                    }
                />
            </select>
        </div>
    }
}

#[component]
pub fn CategoryFields(
    form: RwSignal<ProductFormController>,
    validation: RwSignal<Option<ValidationError>>,
) -> impl IntoView {
    let category = move |pick: fn(&ProductFormController) -> &str| {
        Signal::derive(move || form.with(|f| pick(f).to_string()))
    };

    let main_options = Signal::derive(move || form.with(|f| f.main_options()));
    let sub_options = Signal::derive(move || form.with(|f| f.sub_options()));
    let child_options = Signal::derive(move || form.with(|f| f.child_options().to_vec()));

    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <CategorySelect
                id="main_category"
                label="Main category"
                placeholder="Select a main category"
                options=main_options
                selected=category(|f| f.draft().category.main_category())
                on_select=move |v: String| form.update(|f| f.set_main_category(&v))
                validation=validation
            />
            <Show when=move || !sub_options.with(Vec::is_empty)>
                <CategorySelect
                    id="sub_category"
                    label="Sub category"
                    placeholder="Select a sub category"
                    options=sub_options
                    selected=category(|f| f.draft().category.sub_category())
                    on_select=move |v: String| form.update(|f| f.set_sub_category(&v))
                    validation=validation
                />
            </Show>
            <Show when=move || !child_options.with(Vec::is_empty)>
                <CategorySelect
                    id="child_category"
                    label="Child category"
                    placeholder="Select an option"
                    options=child_options
                    selected=category(|f| f.draft().category.child_category())
                    on_select=move |v: String| form.update(|f| f.set_child_category(&v))
                    validation=validation
                />
            </Show>
        </div>
    }
}
