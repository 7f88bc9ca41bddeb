//! Wire type for the storefront `products.json` endpoint.
//!
//! ## Observed shape
//!
//! The endpoint returns `{"products": [...]}` with at most 250 entries per
//! page. Past the last page it keeps answering `200` with an empty list, so
//! an empty `products` array is the normal end-of-catalog marker.
//!
//! Product objects are kept exactly as sent: see
//! [`storescan_core::CatalogProduct`] for the typed views over them. A body
//! without a `products` key decodes as an empty page.

use serde::Deserialize;
use storescan_core::CatalogProduct;

/// One page of the `products.json` feed.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsPage {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}
