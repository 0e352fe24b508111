//! Name and code resolution against the reference datasets.
//!
//! A place name can denote a municipality, a province, a community, or
//! several of them at once ("Madrid" is all three). Every lookup scans the
//! whole municipality list and returns each distinct entity it hits.

use std::sync::Arc;

use crate::api::FetchError;
use crate::cache::ReferenceCache;
use crate::domain::{CodeArg, Matches, Municipality, Product, Zone, parse_codes};
use crate::text::match_key;

/// Every zone whose canonical name equals the query's.
///
/// Matching is exact after normalization, so "cadiz" finds "Cádiz" but not
/// "Cádiz Norte". A name shared across levels yields one hit per level:
/// "cadiz" is `Many([Municipality, Province])`, never a bare municipality,
/// so callers pick a level with the `first_*` helpers. Among same-named
/// towns the first in listing order wins.
pub fn resolve_name(municipalities: &[Municipality], query: &str) -> Matches<Zone> {
    let key = match_key(query);
    if key.is_empty() {
        return Matches::none();
    }

    let mut hits = Vec::new();
    for m in municipalities {
        if m.key() == key {
            hits.push(Zone::from(m.clone()));
        }
        if m.province().key() == key {
            hits.push(Zone::from(m.province().clone()));
        }
        if m.ccaa().key() == key {
            hits.push(Zone::from(m.ccaa().clone()));
        }
    }
    Matches::collect(hits)
}

/// Every zone, at any level, whose code is one of `codes`.
pub fn resolve_codes(municipalities: &[Municipality], codes: &[u32]) -> Matches<Zone> {
    if codes.is_empty() {
        return Matches::none();
    }

    let mut hits = Vec::new();
    for m in municipalities {
        if codes.contains(&m.code()) {
            hits.push(Zone::from(m.clone()));
        }
        if codes.contains(&m.province().code()) {
            hits.push(Zone::from(m.province().clone()));
        }
        if codes.contains(&m.ccaa().code()) {
            hits.push(Zone::from(m.ccaa().clone()));
        }
    }
    Matches::collect(hits)
}

/// Products whose abbreviation or description contains any query,
/// ignoring case. Blank queries match nothing.
pub fn match_products<S: AsRef<str>>(products: &[Product], queries: &[S]) -> Matches<Product> {
    let needles: Vec<String> = queries
        .iter()
        .map(|q| q.as_ref().trim().to_lowercase())
        .filter(|q| !q.is_empty())
        .collect();

    Matches::collect(
        products
            .iter()
            .filter(|p| needles.iter().any(|n| p.mentions(n)))
            .cloned(),
    )
}

/// Lookups backed by a shared [`ReferenceCache`].
#[derive(Debug, Clone)]
pub struct Resolver {
    reference: Arc<ReferenceCache>,
}

impl Resolver {
    pub fn new(reference: Arc<ReferenceCache>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &Arc<ReferenceCache> {
        &self.reference
    }

    /// Resolve a place name to every zone it names.
    pub async fn find_by_name(&self, query: &str) -> Result<Matches<Zone>, FetchError> {
        let municipalities = self.reference.municipalities().await?;
        Ok(resolve_name(&municipalities, query))
    }

    /// Resolve codes at every level. Arguments that are not positive
    /// integers are dropped.
    pub async fn find_by_code<I>(&self, codes: I) -> Result<Matches<Zone>, FetchError>
    where
        I: IntoIterator,
        I::Item: Into<CodeArg>,
    {
        let codes = parse_codes(codes);
        let municipalities = self.reference.municipalities().await?;
        Ok(resolve_codes(&municipalities, &codes))
    }

    /// Find products by abbreviation or description fragment.
    pub async fn find_product<S: AsRef<str>>(
        &self,
        queries: &[S],
    ) -> Result<Matches<Product>, FetchError> {
        let products = self.reference.products().await?;
        Ok(match_products(&products, queries))
    }
}
