//! Product catalog access.
//!
//! The catalog is read-only and lives outside the reducer loop: callers
//! fetch products and dispatch cart actions with the results. Failures
//! surface as [`CatalogError`] and never touch the store.

use std::future::Future;
use std::pin::Pin;

use reqwest::Client;

use crate::constants::{CATALOG_BASE_URL, CATALOG_TIMEOUT};
use crate::error::CatalogError;
use crate::types::Product;

/// Source of the product list.
pub trait CatalogService: Send + Sync {
    fn fetch_products(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>, CatalogError>> + Send + '_>>;
}

/// Catalog backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Client against the default catalog endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base_url(CATALOG_BASE_URL)
    }

    /// Client against a custom endpoint, e.g. a mock server in tests.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(CATALOG_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::ClientBuild(e.to_string()))?;
        Ok(Self { client, base_url: base_url.into() })
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products", self.base_url);
        tracing::debug!(%url, "Fetching product catalog");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout
            } else {
                CatalogError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api { status: status.as_u16(), message });
        }

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| CatalogError::ParseFailed(e.to_string()))
    }
}

impl CatalogService for HttpCatalog {
    fn fetch_products(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>, CatalogError>> + Send + '_>> {
        Box::pin(self.fetch())
    }
}

/// Fixed in-memory catalog, used as an offline fallback and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// A small hand-picked inventory for demos.
    #[must_use]
    pub fn with_sample_inventory() -> Self {
        use crate::types::Rating;
        Self::new(vec![
            Product {
                id: 1,
                title: "Fjallraven Foldsack No. 1 Backpack".to_string(),
                price: 109.95,
                description: "Fits 15 inch laptops".to_string(),
                category: "men's clothing".to_string(),
                image: "https://fakestoreapi.com/img/81fPKd-2AYL.jpg".to_string(),
                rating: Rating { rate: 3.9, count: 120 },
            },
            Product {
                id: 2,
                title: "Mens Casual Premium Slim Fit T-Shirt".to_string(),
                price: 22.3,
                description: "Slim-fitting, contrast raglan sleeves".to_string(),
                category: "men's clothing".to_string(),
                image: "https://fakestoreapi.com/img/71-3HjGNDUL.jpg".to_string(),
                rating: Rating { rate: 4.1, count: 259 },
            },
            Product {
                id: 3,
                title: "Solid Gold Petite Micropave Ring".to_string(),
                price: 168.0,
                description: "Satisfaction guaranteed".to_string(),
                category: "jewelery".to_string(),
                image: "https://fakestoreapi.com/img/71YAIFU48IL.jpg".to_string(),
                rating: Rating { rate: 3.9, count: 70 },
            },
        ])
    }
}

impl CatalogService for StaticCatalog {
    fn fetch_products(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>, CatalogError>> + Send + '_>> {
        let products = self.products.clone();
        Box::pin(async move { Ok(products) })
    }
}
