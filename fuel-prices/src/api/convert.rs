//! Conversion from API documents to domain types.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::{
    Ccaa, FuelPrices, Municipality, PriceList, Product, Province, Resolved, Station,
};
use crate::text::canonicalize_value;

use super::error::FetchError;
use super::query::StationQuery;
use super::types::{MunicipalityRecord, PriceListResponse, ProductRecord, StationRecord};

/// Format of the `Fecha` field.
const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Station fields that enrichment resolves later. They keep the API's text
/// so an unresolved reference still shows what the API sent.
const RAW_REFERENCE_FIELDS: &[&str] = &["Municipio", "Provincia"];

/// Build the municipality list from a coerced `Listados/Municipios/` body.
///
/// One malformed record fails the whole list.
pub fn municipalities_from_json(body: Value) -> Result<Vec<Municipality>, FetchError> {
    Ok(records::<MunicipalityRecord>(body, "municipality")?
        .into_iter()
        .map(municipality_from_record)
        .collect())
}

/// Build the product catalog from a coerced `ProductosPetroliferos` body.
pub fn products_from_json(body: Value) -> Result<Vec<Product>, FetchError> {
    Ok(records::<ProductRecord>(body, "product")?
        .into_iter()
        .map(|r| Product::new(r.code, r.abbreviation, r.description))
        .collect())
}

/// Build a price list from a coerced pricing body.
///
/// `price` is taken from `PrecioProducto` when the query names a product and
/// from the Gasolina 95 E5 column otherwise. Stations come back in API order.
pub fn price_list_from_json(body: Value, query: &StationQuery) -> Result<PriceList, FetchError> {
    let response: PriceListResponse =
        serde_json::from_value(body).map_err(|e| FetchError::json(e.to_string()))?;

    if let Some(result) = &response.result
        && !result.eq_ignore_ascii_case("OK")
    {
        return Err(FetchError::Rejected(result.clone()));
    }

    let published_at = response
        .date
        .as_deref()
        .and_then(|d| NaiveDateTime::parse_from_str(d, DATE_FORMAT).ok());

    let stations = response
        .stations
        .into_iter()
        .map(|raw| {
            let record: StationRecord = serde_json::from_value(canonicalize_station_fields(raw))
                .map_err(|e| FetchError::json(format!("station record: {e}")))?;
            Ok(station_from_record(record, query.product().is_some()))
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    Ok(PriceList {
        published_at,
        note: response.note,
        stations,
    })
}

/// Cascade a flat record into municipality, province and community.
pub fn municipality_from_record(r: MunicipalityRecord) -> Municipality {
    let ccaa = Ccaa::new(r.ccaa_code, &r.ccaa);
    let province = Province::new(r.province_code, &r.province, ccaa);
    Municipality::new(r.municipality_code, &r.municipality, province)
}

fn records<T: DeserializeOwned>(body: Value, what: &str) -> Result<Vec<T>, FetchError> {
    let Value::Array(items) = body else {
        return Err(FetchError::json(format!("expected a {what} array")));
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| FetchError::json(format!("{what} record: {e}")))
        })
        .collect()
}

/// Title-case every text field except the hierarchy references.
///
/// Non-string values, coerced codes and postal codes among them, pass
/// through untouched.
fn canonicalize_station_fields(raw: Value) -> Value {
    let Value::Object(fields) = raw else {
        return raw;
    };

    let fields: Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| {
            if RAW_REFERENCE_FIELDS.contains(&k.as_str()) {
                (k, v)
            } else {
                let canonical = canonicalize_value(&v);
                (k, canonical)
            }
        })
        .collect();

    Value::Object(fields)
}

fn station_from_record(r: StationRecord, with_product: bool) -> Station {
    let price = if with_product {
        r.product_price
    } else {
        r.gasoline_95_e5
    };

    Station {
        code: r.code,
        label: r.label.unwrap_or_default(),
        price,
        prices: FuelPrices {
            biodiesel: r.biodiesel,
            bioethanol: r.bioethanol,
            compressed_natural_gas: r.compressed_natural_gas,
            liquefied_natural_gas: r.liquefied_natural_gas,
            liquefied_petroleum_gases: r.liquefied_petroleum_gases,
            diesel_a: r.diesel_a,
            diesel_b: r.diesel_b,
            diesel_premium: r.diesel_premium,
            gasoline_95_e10: r.gasoline_95_e10,
            gasoline_95_e5: r.gasoline_95_e5,
            gasoline_95_e5_premium: r.gasoline_95_e5_premium,
            gasoline_98_e10: r.gasoline_98_e10,
            gasoline_98_e5: r.gasoline_98_e5,
            hydrogen: r.hydrogen,
        },
        address: r.address,
        locality: r.locality,
        postal_code: r.postal_code,
        schedule: r.schedule,
        margin: r.margin,
        remission: r.remission,
        sale_type: r.sale_type,
        latitude: r.latitude,
        longitude: r.longitude,
        bioethanol_pct: r.bioethanol_pct,
        methyl_ester_pct: r.methyl_ester_pct,
        municipality_code: r.municipality_code,
        province_code: r.province_code,
        ccaa_code: r.ccaa_code,
        municipality: Resolved::Raw(r.municipality.unwrap_or_default()),
        province: Resolved::Raw(r.province.unwrap_or_default()),
        ccaa: None,
    }
}
