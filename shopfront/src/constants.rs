//! Storage keys, demo credentials and catalog endpoints.
//!
//! The storage keys match the layout an earlier client of the same backend
//! persisted under, so existing on-device data is picked up unchanged.

use std::time::Duration;

/// Key under which the signed-in user is persisted.
pub const USER_KEY: &str = "@ecommerce_user";

/// Key under which the order history is persisted.
pub const ORDERS_KEY: &str = "@ecommerce_orders";

/// Key under which the theme preference is persisted.
pub const THEME_KEY: &str = "@ecommerce_theme";

/// Email addresses accepted by the built-in demo verifier.
pub const DEMO_EMAILS: [&str; 2] = ["test@zignuts.com", "practical@zignuts.com"];

/// Password accepted by the built-in demo verifier.
pub const DEMO_PASSWORD: &str = "123456";

/// Base URL of the product catalog API.
pub const CATALOG_BASE_URL: &str = "https://fakestoreapi.com";

/// Per-request timeout for catalog calls.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);
