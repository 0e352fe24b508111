//! Domain types for the fuel price lookup.
//!
//! Reference entities (communities, provinces, municipalities, products) are
//! built once from the listing endpoints and never change afterwards.
//! Stations are built per query.

mod code;
mod matches;
mod product;
mod station;
mod zone;

pub use code::{CodeArg, InvalidCode, parse_codes};
pub use matches::Matches;
pub use product::Product;
pub use station::{FuelPrices, PriceList, Resolved, Station, sort_by_price};
pub use zone::{Ccaa, Municipality, Province, Zone, ZoneLevel};
