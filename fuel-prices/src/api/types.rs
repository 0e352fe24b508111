//! Fuel price API response DTOs.
//!
//! Records are deserialized from documents that have already been through
//! [`crate::coerce::coerce_numbers`], so codes and prices usually arrive as
//! JSON numbers. The field helpers in [`de`] still accept strings, because
//! the API sends `""` for a fuel a station does not sell.

use serde::Deserialize;
use serde_json::Value;

/// One entry of `Listados/Municipios/`.
#[derive(Debug, Clone, Deserialize)]
pub struct MunicipalityRecord {
    #[serde(rename = "IDMunicipio", deserialize_with = "de::code")]
    pub municipality_code: u32,
    #[serde(rename = "Municipio", deserialize_with = "de::text")]
    pub municipality: String,
    #[serde(rename = "IDProvincia", deserialize_with = "de::code")]
    pub province_code: u32,
    #[serde(rename = "Provincia", deserialize_with = "de::text")]
    pub province: String,
    #[serde(rename = "IDCCAA", deserialize_with = "de::code")]
    pub ccaa_code: u32,
    #[serde(rename = "CCAA", deserialize_with = "de::text")]
    pub ccaa: String,
}

/// One entry of `Listados/ProductosPetroliferos/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "IDProducto", deserialize_with = "de::code")]
    pub code: u32,
    #[serde(rename = "NombreProducto", deserialize_with = "de::text")]
    pub description: String,
    #[serde(rename = "NombreProductoAbreviatura", deserialize_with = "de::text")]
    pub abbreviation: String,
}

/// Envelope of every pricing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceListResponse {
    /// Publication timestamp, `dd/mm/yyyy hh:mm:ss`.
    #[serde(rename = "Fecha", default, deserialize_with = "de::opt_text")]
    pub date: Option<String>,

    /// Station records, decoded one by one after field canonicalization.
    #[serde(rename = "ListaEESSPrecio")]
    pub stations: Vec<Value>,

    #[serde(rename = "Nota", default, deserialize_with = "de::opt_text")]
    pub note: Option<String>,

    /// `"OK"` on success.
    #[serde(rename = "ResultadoConsulta", default, deserialize_with = "de::opt_text")]
    pub result: Option<String>,
}

/// A station (EESS) inside `ListaEESSPrecio`.
///
/// Older API revisions used different names for some fuels; those are
/// accepted as aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "IDEESS", deserialize_with = "de::code")]
    pub code: u32,
    #[serde(rename = "Rótulo", default, deserialize_with = "de::opt_text")]
    pub label: Option<String>,
    #[serde(rename = "C.P.", default, deserialize_with = "de::opt_postal_code")]
    pub postal_code: Option<String>,
    #[serde(rename = "Dirección", default, deserialize_with = "de::opt_text")]
    pub address: Option<String>,
    #[serde(rename = "Horario", default, deserialize_with = "de::opt_text")]
    pub schedule: Option<String>,
    #[serde(rename = "Localidad", default, deserialize_with = "de::opt_text")]
    pub locality: Option<String>,
    #[serde(rename = "Margen", default, deserialize_with = "de::opt_text")]
    pub margin: Option<String>,
    #[serde(rename = "Remisión", default, deserialize_with = "de::opt_text")]
    pub remission: Option<String>,
    #[serde(rename = "Tipo Venta", default, deserialize_with = "de::opt_text")]
    pub sale_type: Option<String>,
    #[serde(rename = "Latitud", default, deserialize_with = "de::opt_number")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitud (WGS84)", default, deserialize_with = "de::opt_number")]
    pub longitude: Option<f64>,

    #[serde(rename = "Municipio", default, deserialize_with = "de::opt_text")]
    pub municipality: Option<String>,
    #[serde(rename = "Provincia", default, deserialize_with = "de::opt_text")]
    pub province: Option<String>,
    #[serde(rename = "IDMunicipio", default, deserialize_with = "de::opt_code")]
    pub municipality_code: Option<u32>,
    #[serde(rename = "IDProvincia", default, deserialize_with = "de::opt_code")]
    pub province_code: Option<u32>,
    #[serde(rename = "IDCCAA", default, deserialize_with = "de::opt_code")]
    pub ccaa_code: Option<u32>,

    /// Only present on the `*Producto` endpoints.
    #[serde(rename = "PrecioProducto", default, deserialize_with = "de::opt_number")]
    pub product_price: Option<f64>,

    #[serde(rename = "Precio Biodiesel", default, deserialize_with = "de::opt_number")]
    pub biodiesel: Option<f64>,
    #[serde(rename = "Precio Bioetanol", default, deserialize_with = "de::opt_number")]
    pub bioethanol: Option<f64>,
    #[serde(rename = "Precio Gas Natural Comprimido", default, deserialize_with = "de::opt_number")]
    pub compressed_natural_gas: Option<f64>,
    #[serde(rename = "Precio Gas Natural Licuado", default, deserialize_with = "de::opt_number")]
    pub liquefied_natural_gas: Option<f64>,
    #[serde(
        rename = "Precio Gases licuados del petróleo",
        default,
        deserialize_with = "de::opt_number"
    )]
    pub liquefied_petroleum_gases: Option<f64>,
    #[serde(rename = "Precio Gasoleo A", default, deserialize_with = "de::opt_number")]
    pub diesel_a: Option<f64>,
    #[serde(rename = "Precio Gasoleo B", default, deserialize_with = "de::opt_number")]
    pub diesel_b: Option<f64>,
    #[serde(
        rename = "Precio Gasoleo Premium",
        alias = "Precio Nuevo Gasoleo A",
        default,
        deserialize_with = "de::opt_number"
    )]
    pub diesel_premium: Option<f64>,
    #[serde(rename = "Precio Gasolina 95 E10", default, deserialize_with = "de::opt_number")]
    pub gasoline_95_e10: Option<f64>,
    #[serde(
        rename = "Precio Gasolina 95 E5",
        alias = "Precio Gasolina 95 Protección",
        default,
        deserialize_with = "de::opt_number"
    )]
    pub gasoline_95_e5: Option<f64>,
    #[serde(rename = "Precio Gasolina 95 E5 Premium", default, deserialize_with = "de::opt_number")]
    pub gasoline_95_e5_premium: Option<f64>,
    #[serde(rename = "Precio Gasolina 98 E10", default, deserialize_with = "de::opt_number")]
    pub gasoline_98_e10: Option<f64>,
    #[serde(
        rename = "Precio Gasolina 98 E5",
        alias = "Precio Gasolina  98",
        default,
        deserialize_with = "de::opt_number"
    )]
    pub gasoline_98_e5: Option<f64>,
    #[serde(rename = "Precio Hidrogeno", default, deserialize_with = "de::opt_number")]
    pub hydrogen: Option<f64>,

    #[serde(rename = "% BioEtanol", default, deserialize_with = "de::opt_number")]
    pub bioethanol_pct: Option<f64>,
    #[serde(rename = "% Éster metílico", default, deserialize_with = "de::opt_number")]
    pub methyl_ester_pct: Option<f64>,
}

/// Lenient field deserializers.
pub(crate) mod de {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    /// Any scalar the API may send for a field.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn code<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        match Scalar::deserialize(d)? {
            Scalar::Int(n) => {
                u32::try_from(n).map_err(|_| D::Error::custom(format!("code out of range: {n}")))
            }
            Scalar::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid code: {s:?}"))),
            Scalar::Float(f) => Err(D::Error::custom(format!("invalid code: {f}"))),
        }
    }

    pub fn opt_code<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Int(n)) => u32::try_from(n).ok(),
            Some(Scalar::Text(s)) => s.trim().parse().ok(),
            Some(Scalar::Float(_)) | None => None,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Scalar::deserialize(d)? {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        })
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Int(n)) => Some(n.to_string()),
            Some(Scalar::Float(f)) => Some(f.to_string()),
            Some(Scalar::Text(s)) => Some(s.trim().to_owned()).filter(|s| !s.is_empty()),
            None => None,
        })
    }

    /// Postal codes lose their leading zero in numeric coercion; put it back.
    pub fn opt_postal_code<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Int(n)) => Some(format!("{n:05}")),
            Some(Scalar::Float(f)) => Some(f.to_string()),
            Some(Scalar::Text(s)) => Some(s.trim().to_owned()).filter(|s| !s.is_empty()),
            None => None,
        })
    }

    /// Prices and coordinates. Empty or unparseable text means "absent".
    pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<Scalar>::deserialize(d)? {
            Some(Scalar::Int(n)) => Some(n as f64),
            Some(Scalar::Float(f)) => Some(f),
            Some(Scalar::Text(s)) => s.trim().replace(',', ".").parse().ok(),
            None => None,
        })
    }
}
