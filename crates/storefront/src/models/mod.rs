//! Request and session models for the storefront.

pub mod cart_form;
pub mod session;

pub use cart_form::{CartAction, CartForm, CartFormError, safe_redirect_target};
pub use session::keys as session_keys;
