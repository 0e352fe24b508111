//! Pricing endpoint paths.

use crate::domain::ZoneLevel;

/// One of the seven filters the pricing service supports.
///
/// Codes are already validated; [`StationQuery::path`] only formats them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationQuery {
    Product { product: u32 },
    Ccaa { ccaa: u32 },
    Province { province: u32 },
    Municipality { municipality: u32 },
    CcaaProduct { ccaa: u32, product: u32 },
    ProvinceProduct { province: u32, product: u32 },
    MunicipalityProduct { municipality: u32, product: u32 },
}

impl StationQuery {
    /// Path relative to the pricing base URL.
    ///
    /// Product, community and province codes are padded to two digits,
    /// municipality codes to four.
    pub fn path(&self) -> String {
        match *self {
            StationQuery::Product { product } => format!("Producto/{product:02}"),
            StationQuery::Ccaa { ccaa } => format!("CCAA/{ccaa:02}"),
            StationQuery::Province { province } => format!("Provincia/{province:02}"),
            StationQuery::Municipality { municipality } => format!("Municipio/{municipality:04}"),
            StationQuery::CcaaProduct { ccaa, product } => {
                format!("CCAAProducto/{ccaa:02}/{product:02}")
            }
            StationQuery::ProvinceProduct { province, product } => {
                format!("ProvinciaProducto/{province:02}/{product:02}")
            }
            StationQuery::MunicipalityProduct {
                municipality,
                product,
            } => format!("MunicipioProducto/{municipality:04}/{product:02}"),
        }
    }

    /// Hierarchy level whose station references get enriched, if any.
    pub fn level(&self) -> Option<ZoneLevel> {
        match self {
            StationQuery::Product { .. } => None,
            StationQuery::Ccaa { .. } | StationQuery::CcaaProduct { .. } => Some(ZoneLevel::Ccaa),
            StationQuery::Province { .. } | StationQuery::ProvinceProduct { .. } => {
                Some(ZoneLevel::Province)
            }
            StationQuery::Municipality { .. } | StationQuery::MunicipalityProduct { .. } => {
                Some(ZoneLevel::Municipality)
            }
        }
    }

    /// Product filter, if the query has one.
    pub fn product(&self) -> Option<u32> {
        match *self {
            StationQuery::Product { product }
            | StationQuery::CcaaProduct { product, .. }
            | StationQuery::ProvinceProduct { product, .. }
            | StationQuery::MunicipalityProduct { product, .. } => Some(product),
            StationQuery::Ccaa { .. }
            | StationQuery::Province { .. }
            | StationQuery::Municipality { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_zero_padded() {
        assert_eq!(StationQuery::Product { product: 1 }.path(), "Producto/01");
        assert_eq!(StationQuery::Ccaa { ccaa: 5 }.path(), "CCAA/05");
        assert_eq!(StationQuery::Province { province: 11 }.path(), "Provincia/11");
        assert_eq!(StationQuery::Municipality { municipality: 79 }.path(), "Municipio/0079");
        assert_eq!(
            StationQuery::CcaaProduct { ccaa: 1, product: 4 }.path(),
            "CCAAProducto/01/04"
        );
        assert_eq!(
            StationQuery::ProvinceProduct { province: 28, product: 1 }.path(),
            "ProvinciaProducto/28/01"
        );
        assert_eq!(
            StationQuery::MunicipalityProduct { municipality: 4375, product: 23 }.path(),
            "MunicipioProducto/4375/23"
        );
    }

    #[test]
    fn wide_codes_are_not_truncated() {
        assert_eq!(StationQuery::Municipality { municipality: 12345 }.path(), "Municipio/12345");
    }

    #[test]
    fn levels_and_products() {
        assert_eq!(StationQuery::Product { product: 1 }.level(), None);
        assert_eq!(StationQuery::Ccaa { ccaa: 1 }.level(), Some(ZoneLevel::Ccaa));
        assert_eq!(
            StationQuery::ProvinceProduct { province: 1, product: 2 }.level(),
            Some(ZoneLevel::Province)
        );
        assert_eq!(
            StationQuery::Municipality { municipality: 1 }.level(),
            Some(ZoneLevel::Municipality)
        );

        assert_eq!(StationQuery::Product { product: 3 }.product(), Some(3));
        assert_eq!(StationQuery::CcaaProduct { ccaa: 1, product: 9 }.product(), Some(9));
        assert_eq!(StationQuery::Province { province: 1 }.product(), None);
    }
}
