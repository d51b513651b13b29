//! Cart form submissions.
//!
//! Every cart control on the site is a plain HTML form posting to
//! `POST /cart`. The form carries a hidden `cartFormInput` field holding a
//! JSON document that names the action and its inputs:
//!
//! ```json
//! {"action": "LinesUpdate", "inputs": {"lines": [{"id": "gid://shopify/CartLine/1", "quantity": 2}]}}
//! ```
//!
//! The discount form adds a free-text `discountCode` field, and any form may
//! carry `redirectTo` for the non-HTMX fallback.

use serde::{Deserialize, Serialize};
use soap_store_core::CartLineId;
use thiserror::Error;

use crate::shopify::types::{CartLineInput, CartLineUpdateInput};

/// Errors parsing a cart form submission.
#[derive(Debug, Error)]
pub enum CartFormError {
    /// The `cartFormInput` field was not submitted.
    #[error("missing cartFormInput field")]
    MissingField,

    /// The JSON was malformed, named an unknown action, or held a malformed ID.
    #[error("invalid cartFormInput: {0}")]
    InvalidInput(#[from] serde_json::Error),
}

/// A cart mutation requested by a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "inputs")]
pub enum CartAction {
    /// Add lines, creating the cart if the visitor has none.
    LinesAdd { lines: Vec<CartLineInput> },
    /// Set line quantities.
    LinesUpdate { lines: Vec<CartLineUpdateInput> },
    /// Remove lines.
    LinesRemove {
        #[serde(rename = "lineIds")]
        line_ids: Vec<CartLineId>,
    },
    /// Replace the cart's discount codes.
    DiscountCodesUpdate {
        #[serde(rename = "discountCodes", default)]
        discount_codes: Vec<String>,
    },
}

impl CartAction {
    /// Short action name for logs and breadcrumbs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LinesAdd { .. } => "LinesAdd",
            Self::LinesUpdate { .. } => "LinesUpdate",
            Self::LinesRemove { .. } => "LinesRemove",
            Self::DiscountCodesUpdate { .. } => "DiscountCodesUpdate",
        }
    }

    /// Serialize for a hidden `cartFormInput` field.
    #[must_use]
    pub fn to_form_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Raw `POST /cart` form body.
#[derive(Debug, Default, Deserialize)]
pub struct CartForm {
    #[serde(rename = "cartFormInput")]
    pub cart_form_input: Option<String>,
    #[serde(rename = "discountCode")]
    pub discount_code: Option<String>,
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

impl CartForm {
    /// Parse the requested action.
    ///
    /// A non-empty `discountCode` is placed in front of the codes a
    /// `DiscountCodesUpdate` already carries.
    ///
    /// # Errors
    ///
    /// Returns [`CartFormError`] if the field is missing or its JSON cannot be
    /// parsed into a known action with well-formed IDs.
    pub fn action(&self) -> Result<CartAction, CartFormError> {
        let raw = self
            .cart_form_input
            .as_deref()
            .ok_or(CartFormError::MissingField)?;

        let mut action: CartAction = serde_json::from_str(raw)?;

        if let CartAction::DiscountCodesUpdate { discount_codes } = &mut action
            && let Some(code) = self
                .discount_code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
        {
            discount_codes.insert(0, code.to_string());
        }

        Ok(action)
    }

    /// The redirect target, if it is a local path.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_to.as_deref().and_then(safe_redirect_target)
    }
}

/// Accept only same-site absolute paths (`/cart`, `/?x=1`).
///
/// Protocol-relative (`//host`), backslash tricks and absolute URLs are
/// rejected so the form cannot be used as an open redirect.
#[must_use]
pub fn safe_redirect_target(target: &str) -> Option<&str> {
    let mut chars = target.chars();
    if chars.next() != Some('/') {
        return None;
    }
    if matches!(chars.next(), Some('/' | '\\')) {
        return None;
    }
    if target.chars().any(char::is_control) {
        return None;
    }
    Some(target)
}
