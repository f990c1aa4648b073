//! Client-side state model for a small storefront.
//!
//! Four independent slices (cart, auth, orders, theme) are composed into a
//! single [`app::AppStore`]. Each slice owns its state, actions and
//! collaborators; persistence and the product catalog sit behind traits so
//! tests run against in-memory doubles.
//!
//! # Example
//!
//! ```ignore
//! let storage = Arc::new(FileStore::new("shopfront.json"));
//! let store = app::app_store(AppEnvironment::with_storage(storage));
//! app::hydrate(&store).await?;
//! store.send(AppAction::Cart(CartAction::AddProduct(product))).await?;
//! app::place_cart_order(&store).await?;
//! ```

pub mod app;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod orders;
pub mod storage;
pub mod theme;
pub mod types;

pub use app::{AppAction, AppEnvironment, AppReducer, AppState, AppStore};
pub use error::{AuthError, CatalogError};
pub use types::{AuthUser, CartLine, Order, Product, ThemeMode};
