//! Service stations (EESS) as returned by the pricing endpoints.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;

use super::{Ccaa, Municipality, Province};

/// A hierarchy reference on a station: resolved, or the API's raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Entity(T),
    Raw(String),
}

impl<T> Resolved<T> {
    pub fn entity(&self) -> Option<&T> {
        match self {
            Resolved::Entity(e) => Some(e),
            Resolved::Raw(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolved::Entity(_))
    }
}

impl<T: fmt::Display> fmt::Display for Resolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Entity(e) => e.fmt(f),
            Resolved::Raw(s) => f.write_str(s),
        }
    }
}

impl<T> Default for Resolved<T> {
    fn default() -> Self {
        Resolved::Raw(String::new())
    }
}

/// Per-fuel prices in euros per litre (or kilogram for gases).
///
/// `None` means the station does not sell that fuel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelPrices {
    pub biodiesel: Option<f64>,
    pub bioethanol: Option<f64>,
    pub compressed_natural_gas: Option<f64>,
    pub liquefied_natural_gas: Option<f64>,
    pub liquefied_petroleum_gases: Option<f64>,
    pub diesel_a: Option<f64>,
    pub diesel_b: Option<f64>,
    pub diesel_premium: Option<f64>,
    pub gasoline_95_e10: Option<f64>,
    pub gasoline_95_e5: Option<f64>,
    pub gasoline_95_e5_premium: Option<f64>,
    pub gasoline_98_e10: Option<f64>,
    pub gasoline_98_e5: Option<f64>,
    pub hydrogen: Option<f64>,
}

/// A service station with its prices and location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Station {
    /// `IDEESS`
    pub code: u32,
    /// Brand shown on the forecourt (`Rótulo`).
    pub label: String,
    /// Price of the queried product, or of Gasolina 95 E5 when the query had
    /// no product. Primary sort key.
    pub price: Option<f64>,
    pub prices: FuelPrices,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub schedule: Option<String>,
    /// Side of the road (`D`, `I`, `N`).
    pub margin: Option<String>,
    pub remission: Option<String>,
    /// `P` for public sale, `R` for restricted.
    pub sale_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bioethanol_pct: Option<f64>,
    pub methyl_ester_pct: Option<f64>,
    pub municipality_code: Option<u32>,
    pub province_code: Option<u32>,
    pub ccaa_code: Option<u32>,
    pub municipality: Resolved<Municipality>,
    pub province: Resolved<Province>,
    pub ccaa: Option<Ccaa>,
}

impl Station {
    /// Ascending by price; stations without a price go last.
    pub fn cmp_price(&self, other: &Self) -> Ordering {
        match (self.price, other.price) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Stations returned by one pricing query.
///
/// An empty default is what callers get when the query fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceList {
    /// When the ministry published these prices (`Fecha`).
    pub published_at: Option<NaiveDateTime>,
    /// Free-text note attached by the API (`Nota`).
    pub note: Option<String>,
    pub stations: Vec<Station>,
}

impl PriceList {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }
}

impl<'a> IntoIterator for &'a PriceList {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

/// Stable sort by [`Station::cmp_price`].
pub fn sort_by_price(stations: &mut [Station]) {
    stations.sort_by(Station::cmp_price);
}
