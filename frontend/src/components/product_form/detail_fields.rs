//! 基础信息表单
//!
//! Free-text fields of the draft. Each input writes straight through
//! `set_field`; nothing is parsed until validation.

use furnish_shared::{ProductField, ProductFormController, ValidationError};
use leptos::prelude::*;

#[component]
fn DraftInput(
    form: RwSignal<ProductFormController>,
    validation: RwSignal<Option<ValidationError>>,
    field: ProductField,
    label: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] input_mode: Option<&'static str>,
) -> impl IntoView {
    let class = move || {
        if validation.with(|v| v.as_ref().is_some_and(|e| e.field() == field.as_str())) {
            "input input-bordered input-error w-full"
        } else {
            "input input-bordered w-full"
        }
    };

    view! {
        <div class="form-control">
            <label for={field.as_str()} class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                id={field.as_str()}
                type="text"
                inputmode=input_mode
                placeholder=placeholder
                on:input=move |ev| form.update(|f| f.set_field(field, event_target_value(&ev)))
                prop:value=move || form.with(|f| f.draft().field(field).to_string())
                class=class
            />
        </div>
    }
}

#[component]
pub fn DetailFields(
    form: RwSignal<ProductFormController>,
    validation: RwSignal<Option<ValidationError>>,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <DraftInput form=form validation=validation field=ProductField::Name label="Name" placeholder="Kids plastic chair" />
            <DraftInput
                form=form
                validation=validation
                field=ProductField::Price
                label="Price"
                placeholder="49.99"
                input_mode="decimal"
            />
            <DraftInput form=form validation=validation field=ProductField::Dimensions label="Dimensions" placeholder="40 x 40 x 60 cm" />
            <DraftInput form=form validation=validation field=ProductField::Material label="Material" placeholder="Polypropylene" />
        </div>

        <div class="form-control">
            <label for="description" class="label">
                <span class="label-text">"Description"</span>
            </label>
            <textarea
                id="description"
                class="textarea textarea-bordered h-24"
                on:input=move |ev| form.update(|f| f.set_field(ProductField::Description, event_target_value(&ev)))
                prop:value=move || form.with(|f| f.draft().description.clone())
            ></textarea>
        </div>
    }
}
