//! Furnish Admin core
//!
//! Platform-independent half of the furniture catalog console:
//! - `session`: sign-in state, persisted across restarts
//! - `taxonomy` / `category`: the static category tree and the cascading selection
//! - `form`: the product create/edit form controller
//! - `gateway` / `identity` / `upload`: contracts and REST clients for the hosted services
//! - `route`: routing table and guard
//!
//! Nothing here touches the DOM; the browser adapters live in the frontend crate.

pub mod category;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod http;
pub mod identity;
pub mod order;
pub mod product;
pub mod route;
pub mod session;
pub mod storage;
pub mod taxonomy;
pub mod upload;

pub use category::CategorySelection;
pub use config::AppConfig;
pub use error::{AdminError, AdminErrorKind, AdminResult, FormError, ValidationError};
pub use form::{FormMode, ProductFormController, SubmitOutcome};
pub use gateway::{OrderGateway, ProductGateway, RestDatabase};
pub use identity::{IdentityGrant, IdentityProvider, RestIdentityProvider};
pub use order::{Order, OrderBoard, OrderStatus, StatusChange};
pub use product::{Product, ProductDraft, ProductField, ProductId};
pub use route::{AppRoute, RouteDecision, RouteGuard};
pub use session::{Profile, ProfileUpdate, Session, SessionStatus, SessionStore};
pub use storage::{MemoryStorage, SessionStorage};
pub use taxonomy::CategoryTaxonomy;
pub use upload::ImageUploader;
