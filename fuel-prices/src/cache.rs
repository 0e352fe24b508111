//! In-process cache for the reference datasets.
//!
//! The municipality list and the product catalog change rarely and are
//! needed by every lookup. Each is fetched at most once per
//! [`ReferenceCache`]; concurrent first callers wait on the same request.
//! A failed fetch is not cached, so the next caller retries.

use std::collections::BTreeSet;
use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::info;

use crate::api::{ApiClient, FetchError};
use crate::domain::{Ccaa, Municipality, Product, Province};

/// One cached dataset. The unit key means a single entry.
type Dataset<T> = MokaCache<(), Arc<Vec<T>>>;

/// Lazily fetched municipality list and product catalog.
#[derive(Clone)]
pub struct ReferenceCache {
    client: ApiClient,
    municipalities: Dataset<Municipality>,
    products: Dataset<Product>,
}

impl ReferenceCache {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            municipalities: MokaCache::new(1),
            products: MokaCache::new(1),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Every municipality, each carrying its province and community.
    pub async fn municipalities(&self) -> Result<Arc<Vec<Municipality>>, FetchError> {
        self.municipalities
            .try_get_with((), async {
                let list = self.client.fetch_municipalities().await?;
                info!(count = list.len(), "municipality list cached");
                Ok::<_, FetchError>(Arc::new(list))
            })
            .await
            .map_err(FetchError::Shared)
    }

    /// The product catalog.
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, FetchError> {
        self.products
            .try_get_with((), async {
                let list = self.client.fetch_products().await?;
                info!(count = list.len(), "product catalog cached");
                Ok::<_, FetchError>(Arc::new(list))
            })
            .await
            .map_err(FetchError::Shared)
    }

    /// Distinct provinces, optionally only those of one community.
    pub async fn provinces(&self, ccaa: Option<u32>) -> Result<BTreeSet<Province>, FetchError> {
        let municipalities = self.municipalities().await?;
        Ok(municipalities
            .iter()
            .map(Municipality::province)
            .filter(|p| ccaa.is_none_or(|code| p.ccaa().code() == code))
            .cloned()
            .collect())
    }

    /// Distinct autonomous communities.
    pub async fn autonomous_communities(&self) -> Result<BTreeSet<Ccaa>, FetchError> {
        let municipalities = self.municipalities().await?;
        Ok(municipalities.iter().map(Municipality::ccaa).cloned().collect())
    }

    /// Municipalities of one province, in listing order.
    pub async fn municipalities_in_province(
        &self,
        province: u32,
    ) -> Result<Vec<Municipality>, FetchError> {
        let municipalities = self.municipalities().await?;
        Ok(municipalities
            .iter()
            .filter(|m| m.province().code() == province)
            .cloned()
            .collect())
    }

    /// Fetch both datasets concurrently.
    pub async fn warm_up(&self) -> Result<(), FetchError> {
        let (municipalities, products) =
            futures::try_join!(self.municipalities(), self.products())?;
        info!(
            municipalities = municipalities.len(),
            products = products.len(),
            "reference data ready"
        );
        Ok(())
    }
}

impl std::fmt::Debug for ReferenceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceCache")
            .field("municipalities", &self.municipalities.entry_count())
            .field("products", &self.products.entry_count())
            .finish()
    }
}
