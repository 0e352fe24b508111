//! End-to-end lookups against a mocked price service.

use std::sync::Arc;

use fuel_prices::api::{ApiClient, ApiConfig, FetchError};
use fuel_prices::cache::ReferenceCache;
use fuel_prices::domain::{Matches, Municipality, Resolved, Zone, ZoneLevel};
use fuel_prices::prices::PriceService;
use fuel_prices::resolve::Resolver;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> PriceService {
    let config = ApiConfig::new()
        .with_listing_url(format!("{}/Listados", server.uri()))
        .with_prices_url(format!("{}/Filtro", server.uri()))
        .with_timeout(5);
    let client = ApiClient::new(config).expect("client construction should not fail");
    PriceService::new(Resolver::new(Arc::new(ReferenceCache::new(client))))
}

fn municipalities() -> Value {
    json!([
        {"IDMunicipio": "1012", "IDProvincia": "11", "IDCCAA": "01",
         "Municipio": "Cádiz", "Provincia": "Cádiz", "CCAA": "Andalucía"},
        {"IDMunicipio": "1030", "IDProvincia": "11", "IDCCAA": "01",
         "Municipio": "Puerto de Santa María (El)", "Provincia": "Cádiz", "CCAA": "Andalucía"},
        {"IDMunicipio": "4279", "IDProvincia": "28", "IDCCAA": "13",
         "Municipio": "Madrid", "Provincia": "Madrid", "CCAA": "Madrid"},
        {"IDMunicipio": "4280", "IDProvincia": "28", "IDCCAA": "13",
         "Municipio": "Majadahonda", "Provincia": "Madrid", "CCAA": "Madrid"}
    ])
}

fn products() -> Value {
    json!([
        {"IDProducto": "1", "NombreProducto": "Gasolina 95 E5", "NombreProductoAbreviatura": "G95E5"},
        {"IDProducto": "4", "NombreProducto": "Gasóleo A habitual", "NombreProductoAbreviatura": "GOA"}
    ])
}

fn cadiz_station(id: &str, label: &str, product_price: &str) -> Value {
    json!({
        "C.P.": "11006",
        "Dirección": "AVENIDA DE ANDALUCIA, 1",
        "Horario": "L-D: 24H",
        "IDCCAA": "01",
        "IDEESS": id,
        "IDMunicipio": "1012",
        "IDProvincia": "11",
        "Latitud": "36,525",
        "Localidad": "CADIZ",
        "Longitud (WGS84)": "-6,284",
        "Margen": "D",
        "Municipio": "Cádiz",
        "PrecioProducto": product_price,
        "Provincia": "CÁDIZ",
        "Remisión": "dm",
        "Rótulo": label,
        "Tipo Venta": "P"
    })
}

fn price_list(stations: Vec<Value>) -> Value {
    json!({
        "Fecha": "19/10/2026 09:35:06",
        "ListaEESSPrecio": stations,
        "Nota": "Archivo de todos los productos en todas las estaciones de servicio.",
        "ResultadoConsulta": "OK"
    })
}

async fn mount_listing(server: &MockServer, route: &str, body: &Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn municipality_and_product_query_is_sorted_and_resolved() {
    let server = MockServer::start().await;
    mount_listing(&server, "/Listados/Municipios/", &municipalities(), 1).await;
    mount_listing(&server, "/Listados/ProductosPetroliferos/", &products(), 1).await;

    let body = price_list(vec![
        cadiz_station("4375", "REPSOL", "1,559"),
        cadiz_station("4376", "CEPSA", ""),
        cadiz_station("4377", "BALLENOIL", "1,409"),
    ]);
    Mock::given(method("GET"))
        .and(path("/Filtro/MunicipioProducto/1012/01"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(&server);
    let resolver = service.resolver();

    let found = resolver.find_by_name("cadiz").await.expect("lookup should succeed");
    let cadiz = found.first_municipality().expect("Cádiz is a municipality").clone();
    let product = resolver.find_product(&["G95E5"]).await.expect("catalog");
    let Matches::Single(product) = product else {
        panic!("expected one product, got {product:?}");
    };

    let list = service.by_municipality_and_product(&cadiz, &product).await;

    let labels: Vec<&str> = list.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Ballenoil", "Repsol", "Cepsa"]);
    assert_eq!(list.stations[0].price, Some(1.409));
    assert_eq!(list.stations[2].price, None);
    assert!(list.published_at.is_some());

    for station in &list {
        let Resolved::Entity(m) = &station.municipality else {
            panic!("station {} left unresolved", station.code);
        };
        assert_eq!(m, &cadiz);
        assert_eq!(m.province().ccaa().code(), 1);
        assert_eq!(station.postal_code.as_deref(), Some("11006"));
    }
}

#[tokio::test]
async fn reference_data_is_fetched_once() {
    let server = MockServer::start().await;
    mount_listing(&server, "/Listados/Municipios/", &municipalities(), 1).await;

    let service = service(&server);
    let resolver = service.resolver().clone();

    let (a, b) = tokio::join!(resolver.find_by_name("madrid"), resolver.find_by_name("cadiz"));
    assert_eq!(a.expect("first lookup").len(), 3);
    assert_eq!(b.expect("second lookup").len(), 2);

    let again = resolver.find_by_code([4280]).await.expect("cached lookup");
    assert_eq!(again.single().map(Zone::display_name), Some("Majadahonda"));

    let provinces = resolver.reference().provinces(Some(13)).await.expect("provinces");
    assert_eq!(provinces.len(), 1);
    let communities = resolver.reference().autonomous_communities().await.expect("communities");
    assert_eq!(communities.len(), 2);
    let in_cadiz = resolver
        .reference()
        .municipalities_in_province(11)
        .await
        .expect("municipalities");
    assert_eq!(
        in_cadiz.iter().map(Municipality::code).collect::<Vec<_>>(),
        vec![1012, 1030]
    );
}

#[tokio::test]
async fn failed_reference_fetch_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Listados/Municipios/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("mantenimiento"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let service = service(&server);
    let err = service
        .resolver()
        .find_by_name("madrid")
        .await
        .expect_err("first fetch fails");
    let FetchError::Shared(inner) = &err else {
        panic!("expected a shared cache error, got {err:?}");
    };
    assert!(matches!(**inner, FetchError::Api { status: 503, .. }));

    mount_listing(&server, "/Listados/Municipios/", &municipalities(), 1).await;
    let found = service.resolver().find_by_name("madrid").await.expect("retry succeeds");
    assert_eq!(found.len(), 3);
}

#[tokio::test]
async fn every_name_level_is_reachable() {
    let server = MockServer::start().await;
    mount_listing(&server, "/Listados/Municipios/", &municipalities(), 1).await;

    let service = service(&server);
    let resolver = service.resolver();

    let el_puerto = resolver.find_by_name("El Puerto de Santa Maria").await.unwrap();
    assert_eq!(el_puerto.single().map(Zone::level), Some(ZoneLevel::Municipality));

    let andalucia = resolver.find_by_name("ANDALUCIA").await.unwrap();
    assert_eq!(andalucia.single().map(Zone::level), Some(ZoneLevel::Ccaa));

    let madrid = resolver.find_by_name("Madrid").await.unwrap();
    assert!(madrid.first_municipality().is_some());
    assert!(madrid.first_province().is_some());
    assert!(madrid.first_ccaa().is_some());

    let nothing = resolver.find_by_name("Atlántida").await.unwrap();
    assert_eq!(nothing, Matches::Many(vec![]));
}

#[tokio::test]
async fn province_query_resolves_province_references() {
    let server = MockServer::start().await;
    mount_listing(&server, "/Listados/Municipios/", &municipalities(), 1).await;

    let body = price_list(vec![cadiz_station("4375", "REPSOL", "")]);
    Mock::given(method("GET"))
        .and(path("/Filtro/Provincia/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(&server);
    let list = service.by_province("11").await;

    assert_eq!(list.len(), 1);
    let station = &list.stations[0];
    assert_eq!(station.province.entity().map(|p| p.code()), Some(11));
    assert!(!station.municipality.is_resolved());
}

#[tokio::test]
async fn ccaa_query_resolves_community_by_code() {
    let server = MockServer::start().await;
    mount_listing(&server, "/Listados/Municipios/", &municipalities(), 1).await;

    let body = price_list(vec![cadiz_station("4375", "REPSOL", "")]);
    Mock::given(method("GET"))
        .and(path("/Filtro/CCAA/01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let list = service(&server).by_ccaa(1).await;
    assert_eq!(
        list.stations[0].ccaa.as_ref().map(|c| c.display_name()),
        Some("Andalucía")
    );
}

#[tokio::test]
async fn product_query_skips_enrichment() {
    let server = MockServer::start().await;
    mount_listing(&server, "/Listados/Municipios/", &municipalities(), 0).await;

    let body = price_list(vec![
        cadiz_station("1", "A", "1,6"),
        cadiz_station("2", "B", "1,5"),
    ]);
    Mock::given(method("GET"))
        .and(path("/Filtro/Producto/04"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let list = service(&server).by_product(4).await;
    assert_eq!(list.iter().map(|s| s.code).collect::<Vec<_>>(), vec![2, 1]);
    assert_eq!(list.stations[0].municipality, Resolved::Raw("Cádiz".into()));
}

#[tokio::test]
async fn failures_degrade_to_empty_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Filtro/Municipio/4279"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Filtro/Municipio/4280"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>no json</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Filtro/Municipio/1012"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ListaEESSPrecio": [],
            "ResultadoConsulta": "ERROR"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(&server);
    assert!(service.by_municipality(4279).await.is_empty());
    assert!(service.by_municipality("4280").await.is_empty());
    assert!(service.by_municipality(1012).await.is_empty());
    assert!(service.by_municipality("no-es-un-codigo").await.is_empty());
}

#[tokio::test]
async fn warm_up_fetches_both_datasets_once() {
    let server = MockServer::start().await;
    mount_listing(&server, "/Listados/Municipios/", &municipalities(), 1).await;
    mount_listing(&server, "/Listados/ProductosPetroliferos/", &products(), 1).await;

    let service = service(&server);
    let reference = service.resolver().reference();
    reference.warm_up().await.expect("warm-up should succeed");

    assert_eq!(reference.municipalities().await.unwrap().len(), 4);
    let goa = service.resolver().find_product(&["gasóleo"]).await.unwrap();
    assert_eq!(goa.single().map(|p| p.code()), Some(4));
}
