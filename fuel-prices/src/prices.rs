//! Station price queries.
//!
//! Each query resolves its arguments to codes, issues one request to the
//! pricing service, replaces the hierarchy references on the returned
//! stations with reference entities, and sorts by price. Failures never
//! propagate: they are logged and the caller gets an empty [`PriceList`].

use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::api::{ApiClient, FetchError, StationQuery};
use crate::domain::{
    Ccaa, CodeArg, Municipality, PriceList, Province, Resolved, Station, ZoneLevel, sort_by_price,
};
use crate::resolve::{Resolver, resolve_name};
use crate::text::match_key;

/// Station queries over the pricing service.
#[derive(Debug, Clone)]
pub struct PriceService {
    client: ApiClient,
    resolver: Resolver,
}

impl PriceService {
    /// Build a service sharing the resolver's reference cache and client.
    pub fn new(resolver: Resolver) -> Self {
        let client = resolver.reference().client().clone();
        Self { client, resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Stations selling a product, nationwide.
    pub async fn by_product(&self, product: impl Into<CodeArg>) -> PriceList {
        let Some(product) = parse_or_warn(product) else {
            return PriceList::default();
        };
        self.query(StationQuery::Product { product }).await
    }

    pub async fn by_ccaa(&self, ccaa: impl Into<CodeArg>) -> PriceList {
        let Some(ccaa) = parse_or_warn(ccaa) else {
            return PriceList::default();
        };
        self.query(StationQuery::Ccaa { ccaa }).await
    }

    pub async fn by_province(&self, province: impl Into<CodeArg>) -> PriceList {
        let Some(province) = parse_or_warn(province) else {
            return PriceList::default();
        };
        self.query(StationQuery::Province { province }).await
    }

    pub async fn by_municipality(&self, municipality: impl Into<CodeArg>) -> PriceList {
        let Some(municipality) = parse_or_warn(municipality) else {
            return PriceList::default();
        };
        self.query(StationQuery::Municipality { municipality }).await
    }

    pub async fn by_ccaa_and_product(
        &self,
        ccaa: impl Into<CodeArg>,
        product: impl Into<CodeArg>,
    ) -> PriceList {
        let (Some(ccaa), Some(product)) = (parse_or_warn(ccaa), parse_or_warn(product)) else {
            return PriceList::default();
        };
        self.query(StationQuery::CcaaProduct { ccaa, product }).await
    }

    pub async fn by_province_and_product(
        &self,
        province: impl Into<CodeArg>,
        product: impl Into<CodeArg>,
    ) -> PriceList {
        let (Some(province), Some(product)) = (parse_or_warn(province), parse_or_warn(product))
        else {
            return PriceList::default();
        };
        self.query(StationQuery::ProvinceProduct { province, product })
            .await
    }

    pub async fn by_municipality_and_product(
        &self,
        municipality: impl Into<CodeArg>,
        product: impl Into<CodeArg>,
    ) -> PriceList {
        let (Some(municipality), Some(product)) =
            (parse_or_warn(municipality), parse_or_warn(product))
        else {
            return PriceList::default();
        };
        self.query(StationQuery::MunicipalityProduct {
            municipality,
            product,
        })
        .await
    }

    /// Run one query: fetch, enrich, sort. Empty on any failure.
    pub async fn query(&self, query: StationQuery) -> PriceList {
        match self.try_query(&query).await {
            Ok(list) => list,
            Err(err) => {
                error!(path = %query.path(), error = %err, "station query failed");
                PriceList::default()
            }
        }
    }

    async fn try_query(&self, query: &StationQuery) -> Result<PriceList, FetchError> {
        let mut list = self.client.fetch_stations(query).await?;

        if let Some(level) = query.level() {
            self.enrich(&mut list.stations, level).await;
        }
        sort_by_price(&mut list.stations);

        info!(path = %query.path(), stations = list.len(), "station query done");
        Ok(list)
    }

    /// Enrich against the cached municipality list. Without reference data
    /// the stations keep their raw references.
    async fn enrich(&self, stations: &mut [Station], level: ZoneLevel) {
        match self.resolver.reference().municipalities().await {
            Ok(municipalities) => enrich(stations, level, &municipalities),
            Err(err) => warn!(error = %err, "reference data unavailable, stations left unresolved"),
        }
    }
}

fn parse_or_warn(arg: impl Into<CodeArg>) -> Option<u32> {
    match arg.into().parse() {
        Ok(code) => Some(code),
        Err(err) => {
            warn!(error = %err, "skipping station query");
            None
        }
    }
}

/// Replace the station references of one hierarchy level with entities.
///
/// Municipalities and provinces resolve by name; a municipality name shared
/// by several towns prefers the one whose code the station carries.
/// Communities resolve by code. Each distinct reference is resolved once.
/// Unresolved references are left as they were.
pub fn enrich(stations: &mut [Station], level: ZoneLevel, municipalities: &[Municipality]) {
    match level {
        ZoneLevel::Municipality => {
            let mut memo: HashMap<(String, Option<u32>), Option<Municipality>> = HashMap::new();
            for station in stations {
                let Resolved::Raw(raw) = &station.municipality else {
                    continue;
                };
                let code = station.municipality_code;
                let found = memo
                    .entry((raw.clone(), code))
                    .or_insert_with(|| {
                        let key = match_key(raw);
                        code.and_then(|c| {
                            municipalities
                                .iter()
                                .find(|m| m.code() == c && m.key() == key)
                                .cloned()
                        })
                        .or_else(|| resolve_name(municipalities, raw).first_municipality().cloned())
                    })
                    .clone();
                if let Some(m) = found {
                    station.municipality = Resolved::Entity(m);
                }
            }
        }
        ZoneLevel::Province => {
            let mut memo: HashMap<String, Option<Province>> = HashMap::new();
            for station in stations {
                let Resolved::Raw(raw) = &station.province else {
                    continue;
                };
                let found = memo
                    .entry(raw.clone())
                    .or_insert_with(|| resolve_name(municipalities, raw).first_province().cloned())
                    .clone();
                if let Some(p) = found {
                    station.province = Resolved::Entity(p);
                }
            }
        }
        ZoneLevel::Ccaa => {
            let mut memo: HashMap<u32, Option<Ccaa>> = HashMap::new();
            for station in stations {
                let Some(code) = station.ccaa_code else {
                    continue;
                };
                let found = memo
                    .entry(code)
                    .or_insert_with(|| {
                        municipalities
                            .iter()
                            .map(Municipality::ccaa)
                            .find(|c| c.code() == code)
                            .cloned()
                    })
                    .clone();
                if found.is_some() {
                    station.ccaa = found;
                }
            }
        }
    }
}
