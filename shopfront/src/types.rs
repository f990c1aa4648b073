//! Domain types shared across the state slices.
//!
//! Serialized field names are pinned with `serde(rename)` where the
//! persisted or wire format differs from the Rust name, so that data
//! written by previous releases keeps deserializing.

use shopfront_core::{DateTime, Deserialize, Serialize, Utc};

/// Aggregate customer rating attached to a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// A product as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

/// One line of the cart: a product reference plus a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: u64,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// Builds a fresh single-quantity line from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Price of this line, quantity included.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A placed order, as stored in the persisted history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "items")]
    pub lines: Vec<CartLine>,
    #[serde(rename = "totalPrice")]
    pub total_price: f64,
}

/// The signed-in user. Only the email is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
}

/// Visual theme of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The string form this mode is persisted under.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interprets a stored preference, defaulting anything unrecognized
    /// (including the legacy "system" value and a missing entry) to light.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Flips between light and dark.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
