//! Product form controller.
//!
//! Holds the draft behind the create/edit page, keeps the category cascade
//! consistent, validates, and hands the finished snapshot to the product
//! gateway.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::category::CategorySelection;
use crate::error::{AdminResult, FormError, ValidationError};
use crate::gateway::ProductGateway;
use crate::product::{Product, ProductDraft, ProductField, ProductId};
use crate::taxonomy::CategoryTaxonomy;
use crate::upload::ImageUploader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(ProductId),
    Updated(ProductId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormController {
    taxonomy: CategoryTaxonomy,
    mode: FormMode,
    draft: ProductDraft,
}

impl ProductFormController {
    /// Empty form for a new product.
    pub fn new() -> Self {
        Self {
            taxonomy: CategoryTaxonomy,
            mode: FormMode::Create,
            draft: ProductDraft::default(),
        }
    }

    /// Form pre-populated from an existing record.
    pub fn for_edit(id: impl Into<ProductId>, product: &Product) -> Self {
        let taxonomy = CategoryTaxonomy;
        let category = CategorySelection::restore(
            &taxonomy,
            &product.main_category,
            &product.sub_category,
            &product.child_category,
        );
        Self {
            taxonomy,
            mode: FormMode::Edit(id.into()),
            draft: ProductDraft {
                name: product.name.clone(),
                description: product.description.clone(),
                price: product.price.to_string(),
                image: product.image.clone(),
                dimensions: product.dimensions.clone(),
                material: product.material.clone(),
                category,
            },
        }
    }

    /// Fetch `id` through the gateway and open it for editing.
    pub async fn load_for_edit<G: ProductGateway + ?Sized>(gateway: &G, id: &str) -> AdminResult<Self> {
        let product = gateway
            .get(id)
            .await
            .map_err(|e| e.in_op_with("form.load", id))?;
        Ok(Self::for_edit(id, &product))
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    // --- choices for the selects ---

    pub fn main_options(&self) -> Vec<&'static str> {
        self.taxonomy.main_categories()
    }

    pub fn sub_options(&self) -> Vec<&'static str> {
        self.taxonomy
            .sub_categories_for(self.draft.category.main_category())
    }

    pub fn child_options(&self) -> &'static [&'static str] {
        self.taxonomy.options_for(
            self.draft.category.main_category(),
            self.draft.category.sub_category(),
        )
    }

    // --- transitions ---

    pub fn set_main_category(&mut self, value: &str) {
        self.draft.category.set_main(&self.taxonomy, value);
    }

    pub fn set_sub_category(&mut self, value: &str) {
        self.draft.category.set_sub(&self.taxonomy, value);
    }

    pub fn set_child_category(&mut self, value: &str) {
        self.draft.category.set_child(&self.taxonomy, value);
    }

    pub fn set_field(&mut self, field: ProductField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    /// Drop the draft and start over with an empty create form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check the draft and build the snapshot that would be submitted.
    pub fn validate(&self) -> Result<Product, ValidationError> {
        let category = &self.draft.category;
        if category.main_category().is_empty() {
            return Err(ValidationError::MissingMainCategory);
        }
        let required = category.required_levels(&self.taxonomy);
        if required.sub && category.sub_category().is_empty() {
            return Err(ValidationError::MissingSubCategory);
        }
        if required.child && category.child_category().is_empty() {
            return Err(ValidationError::MissingChildCategory);
        }

        let name = self.draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let price = parse_price(&self.draft.price)?;

        Ok(Product {
            name: name.to_string(),
            description: self.draft.description.trim().to_string(),
            price,
            image: self.draft.image.trim().to_string(),
            dimensions: self.draft.dimensions.trim().to_string(),
            material: self.draft.material.trim().to_string(),
            main_category: category.main_category().to_string(),
            sub_category: category.sub_category().to_string(),
            child_category: category.child_category().to_string(),
        })
    }

    /// Validate, then create or update through the gateway.
    ///
    /// Validation failures never reach the network. On success the draft is
    /// discarded; on a remote failure it is kept so the user can retry.
    pub async fn submit<G: ProductGateway + ?Sized>(
        &mut self,
        gateway: &G,
    ) -> Result<SubmitOutcome, FormError> {
        let product = self.validate().inspect_err(|e| {
            log::debug!("[ProductForm] rejected: {} ({})", e, e.field());
        })?;

        let outcome = match &self.mode {
            FormMode::Create => SubmitOutcome::Created(gateway.create(&product).await?),
            FormMode::Edit(id) => {
                gateway.update(id, &product).await?;
                SubmitOutcome::Updated(id.clone())
            }
        };

        log::info!("[ProductForm] submitted {:?}", outcome);
        self.reset();
        Ok(outcome)
    }

    /// Posts `file` to the upload endpoint and returns the hosted URL.
    /// Nothing is stored until the URL is handed to [`Self::apply_image`],
    /// so a failed upload leaves the draft's image unchanged.
    pub async fn upload_image<U: ImageUploader + ?Sized>(
        uploader: &U,
        file: U::File,
    ) -> AdminResult<String> {
        let url = uploader
            .upload(file)
            .await
            .map_err(|e| e.in_op("form.upload_image"))?;
        log::info!("[ProductForm] image uploaded: {}", url);
        Ok(url)
    }

    /// Stores an uploaded image URL. Only the image field changes.
    pub fn apply_image(&mut self, url: impl Into<String>) {
        self.draft.image = url.into();
    }
}

impl Default for ProductFormController {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts only plain decimals: an optional `-`, digits, and at most one `.`.
/// Digit separators, exponents and anything `Decimal` would round are
/// rejected, so the stored price is exactly what was typed.
fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingPrice);
    }
    let invalid = || ValidationError::InvalidPrice(raw.to_string());

    let unsigned = raw.strip_prefix('-').unwrap_or(raw);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let plain = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !plain(whole) || !plain(fraction) {
        return Err(invalid());
    }

    let price = Decimal::from_str(raw).map_err(|_| invalid())?;
    if price.scale() as usize != fraction.len() {
        return Err(invalid());
    }
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::NegativePrice);
    }
    Ok(price)
}
