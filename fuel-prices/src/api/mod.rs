//! Client for the Ministry of Industry fuel price REST service.
//!
//! Two services are involved:
//! - the listing service, serving the municipality list (each entry carries
//!   its province and community) and the product catalog
//! - the pricing service, serving station lists filtered by product and/or
//!   administrative zone
//!
//! Every response body is run through numeric coercion before it is turned
//! into domain types.

mod client;
mod convert;
mod error;
mod query;
mod types;

pub use client::{
    ApiClient, ApiConfig, DEFAULT_LISTING_URL, DEFAULT_PRICES_URL, DEFAULT_TIMEOUT_SECS,
};
pub use convert::{municipalities_from_json, price_list_from_json, products_from_json};
pub use error::FetchError;
pub use query::StationQuery;
pub use types::{MunicipalityRecord, PriceListResponse, ProductRecord, StationRecord};
