//! Cart line quantity stepping.

use serde::{Deserialize, Serialize};

/// Quantity of a cart line as last reported by Shopify.
///
/// The storefront only proposes neighbouring quantities; whether a change is
/// accepted (stock, limits) is decided by Shopify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineQuantity(u32);

impl LineQuantity {
    #[must_use]
    pub const fn new(quantity: u32) -> Self {
        Self(quantity)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Quantity proposed by the decrease control, never below zero.
    #[must_use]
    pub const fn previous(self) -> u32 {
        self.0.saturating_sub(1)
    }

    /// Quantity proposed by the increase control.
    #[must_use]
    pub const fn next(self) -> u32 {
        self.0.saturating_add(1)
    }

    /// Whether the decrease control is enabled. Going from one to zero is a
    /// removal, which has its own control.
    #[must_use]
    pub const fn can_decrement(self) -> bool {
        self.0 > 1
    }
}

impl From<u32> for LineQuantity {
    fn from(quantity: u32) -> Self {
        Self(quantity)
    }
}
