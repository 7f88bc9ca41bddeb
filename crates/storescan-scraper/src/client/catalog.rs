//! Multi-page catalog collection for `StorefrontClient`.

use storescan_core::CatalogProduct;

use crate::target::StoreTarget;

use super::StorefrontClient;

impl StorefrontClient {
    /// Collects the store's catalog by walking `products.json` pages from 1
    /// until a page comes back empty or `max_pages` pages have been read.
    ///
    /// **Best-effort semantics**: a failing page (network error, bad status,
    /// malformed body) ends the walk and the products gathered from earlier
    /// pages are returned. This never fails; a store without the feed simply
    /// yields an empty catalog.
    pub async fn collect_catalog(
        &self,
        target: &StoreTarget,
        max_pages: usize,
    ) -> Vec<CatalogProduct> {
        let mut products: Vec<CatalogProduct> = Vec::new();

        for page in 1..=max_pages {
            match self.fetch_products_page(target, page).await {
                Ok(batch) if batch.products.is_empty() => {
                    tracing::debug!(store = %target, page, "catalog exhausted");
                    return products;
                }
                Ok(batch) => {
                    tracing::debug!(
                        store = %target,
                        page,
                        count = batch.products.len(),
                        "catalog page fetched"
                    );
                    products.extend(batch.products);
                }
                Err(e) => {
                    tracing::warn!(
                        store = %target,
                        page,
                        error = %e,
                        collected = products.len(),
                        "catalog page failed; keeping products collected so far"
                    );
                    return products;
                }
            }
        }

        tracing::warn!(
            store = %target,
            max_pages,
            collected = products.len(),
            "catalog page cap reached"
        );
        products
    }
}
