use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误类别
// =========================================================

/// Category of a failed remote or store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminErrorKind {
    /// The identity provider or database rejected the call with its own payload.
    Provider,
    /// The request never produced a response.
    Network,
    /// A response arrived but could not be decoded.
    MalformedResponse,
    /// Durable local storage could not be read or written.
    Storage,
    /// The addressed record does not exist.
    NotFound,
    /// Another login/register is still outstanding.
    Busy,
    /// The response belongs to a session epoch that has since ended.
    Superseded,
    /// The operation needs a signed-in session.
    NotAuthenticated,
}

impl AdminErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminErrorKind::Provider => "PROVIDER_ERROR",
            AdminErrorKind::Network => "NETWORK_ERROR",
            AdminErrorKind::MalformedResponse => "MALFORMED_RESPONSE",
            AdminErrorKind::Storage => "STORAGE_ERROR",
            AdminErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            AdminErrorKind::Busy => "OPERATION_PENDING",
            AdminErrorKind::Superseded => "STALE_RESPONSE",
            AdminErrorKind::NotAuthenticated => "UNAUTHENTICATED",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// One step of the operation trace attached to an [`AdminError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// Operation name, e.g. `"identity.sign_in"`, `"products.update"`.
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// Recoverable failure of a remote call or store operation.
///
/// Carries:
/// - `kind`: what went wrong
/// - `message`: human readable text (the provider's message when there is one)
/// - `code`: the provider's own error code, surfaced verbatim
/// - `spans`: which operations the error passed through
///
/// The type is `Clone` so the session can keep the last failure around for
/// the UI to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminError {
    pub kind: AdminErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    spans: Vec<ErrorSpan>,
}

impl AdminError {
    pub fn new(kind: AdminErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    /// Error payload returned by a remote provider, kept as-is.
    pub fn provider(code: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new(AdminErrorKind::Provider, message);
        err.code = Some(code.into());
        err
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Network, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::MalformedResponse, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Storage, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::NotFound, message)
    }

    pub fn busy() -> Self {
        Self::new(
            AdminErrorKind::Busy,
            "another sign-in request is still in progress",
        )
    }

    pub fn superseded() -> Self {
        Self::new(
            AdminErrorKind::Superseded,
            "response arrived after the session was reset",
        )
    }

    pub fn not_authenticated() -> Self {
        Self::new(AdminErrorKind::NotAuthenticated, "not signed in")
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    /// Text suitable for the dismissible notice in the UI.
    pub fn user_message(&self) -> String {
        match &self.code {
            Some(code) if code != &self.message => format!("{} ({})", self.message, code),
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for AdminError {}

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::malformed(e.to_string())
    }
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;

// =========================================================
// 表单错误
// =========================================================

/// Local validation failure of the product form. Never leaves the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("main category is required")]
    MissingMainCategory,
    #[error("sub category is required for this main category")]
    MissingSubCategory,
    #[error("child category is required for this sub category")]
    MissingChildCategory,
    #[error("product name is required")]
    MissingName,
    #[error("price is required")]
    MissingPrice,
    #[error("price `{0}` is not a number")]
    InvalidPrice(String),
    #[error("price must not be negative")]
    NegativePrice,
}

impl ValidationError {
    /// Name of the form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingMainCategory => "main_category",
            ValidationError::MissingSubCategory => "sub_category",
            ValidationError::MissingChildCategory => "child_category",
            ValidationError::MissingName => "name",
            ValidationError::MissingPrice
            | ValidationError::InvalidPrice(_)
            | ValidationError::NegativePrice => "price",
        }
    }
}

/// Outcome of a failed form submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] AdminError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_trace() {
        let err = AdminError::not_found("no such product")
            .in_op("products.get")
            .in_op_with("form.load", "p-1");
        assert_eq!(
            err.to_string(),
            "[RESOURCE_NOT_FOUND] no such product | trace: products.get -> form.load(p-1)"
        );
    }

    #[test]
    fn provider_error_keeps_payload_verbatim() {
        let err = AdminError::provider("INVALID_PASSWORD", "INVALID_PASSWORD");
        assert_eq!(err.kind, AdminErrorKind::Provider);
        assert_eq!(err.code.as_deref(), Some("INVALID_PASSWORD"));
        assert_eq!(err.user_message(), "INVALID_PASSWORD");
    }

    #[test]
    fn validation_errors_name_their_field() {
        assert_eq!(ValidationError::MissingSubCategory.field(), "sub_category");
        assert_eq!(ValidationError::InvalidPrice("abc".into()).field(), "price");
    }
}
