//! PostGIS Catalog Tests
//!
//! Run against a live PostGIS database. Ignored by default; to run them set
//! `CAPAS_TEST_DATABASE` to a JSON database config and pass `--ignored`:
//!
//! ```text
//! CAPAS_TEST_DATABASE='{"host":"localhost","password":"postgres"}' \
//!     cargo test --test postgis -- --ignored
//! ```
//!
//! Every test creates its own tables, prefixed with the process id, and drops
//! them again before asserting.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use capas::catalog::{
    CatalogError, DatabaseConfig, LayerName, LayerSource, PostgisCatalog, ScopedConnection,
};

use common::{get, get_json, router_with};

const DATABASE_VAR: &str = "CAPAS_TEST_DATABASE";

fn test_config() -> Option<DatabaseConfig> {
    let raw = std::env::var(DATABASE_VAR).ok()?;
    let config: DatabaseConfig =
        serde_json::from_str(&raw).expect("CAPAS_TEST_DATABASE must hold a database config");
    Some(config)
}

fn prefix() -> String {
    format!("capas_{}_", std::process::id())
}

fn table(suffix: &str) -> String {
    format!("{}{}", prefix(), suffix)
}

async fn execute(config: &DatabaseConfig, sql: &str) {
    let conn = ScopedConnection::open(config).await.unwrap();
    conn.batch_execute(sql).await.unwrap();
}

async fn drop_tables(config: &DatabaseConfig, names: &[String]) {
    for name in names {
        execute(config, &format!("DROP TABLE IF EXISTS \"{name}\"")).await;
    }
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
#[ignore = "needs a PostGIS database in CAPAS_TEST_DATABASE"]
async fn test_layers_listed_in_byte_order() {
    let Some(config) = test_config() else { return };
    let names = [table("b_layer"), table("a_layer"), table("B_up")];
    drop_tables(&config, &names).await;

    for name in &names {
        execute(
            &config,
            &format!("CREATE TABLE \"{name}\" (id integer, geom geometry(Point, 4326))"),
        )
        .await;
    }

    let catalog = Arc::new(PostgisCatalog::new(config.clone()));
    let listed = catalog.list_layers().await;
    let (status, body) = get_json(router_with(catalog), "/layers").await;
    drop_tables(&config, &names).await;

    let ours: Vec<String> = listed
        .unwrap()
        .into_iter()
        .filter(|name| name.starts_with(&prefix()))
        .collect();
    assert_eq!(ours, vec![table("B_up"), table("a_layer"), table("b_layer")]);

    assert_eq!(status, StatusCode::OK);
    let served: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .filter(|name| name.starts_with(&prefix()))
        .collect();
    assert_eq!(served, ours);
}

// =============================================================================
// Fetching
// =============================================================================

#[tokio::test]
#[ignore = "needs a PostGIS database in CAPAS_TEST_DATABASE"]
async fn test_fetch_skips_null_and_invalid_geometry() {
    let Some(config) = test_config() else { return };
    let roads = table("roads");
    drop_tables(&config, &[roads.clone()]).await;

    execute(
        &config,
        &format!(
            "CREATE TABLE \"{roads}\" (zona text, id integer, geom geometry(Geometry, 4326));
             INSERT INTO \"{roads}\" VALUES
                 ('norte', 1, ST_GeomFromText('POINT(-86.2 14.75)', 4326)),
                 ('sur', 2, NULL),
                 ('este', 3, ST_GeomFromText('POLYGON((0 0, 1 1, 1 0, 0 1, 0 0))', 4326)),
                 ('oeste', 4, ST_GeomFromText('LINESTRING(-87 14, -87.5 14.5)', 4326));"
        ),
    )
    .await;

    let catalog = Arc::new(PostgisCatalog::new(config.clone()));
    let uri = format!("/layer_data?name={roads}");
    let (status, raw) = get(router_with(catalog.clone()), &uri).await;
    let (_, body) = get_json(router_with(catalog), &uri).await;
    drop_tables(&config, &[roads]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");

    let features = body["features"].as_array().unwrap();
    let mut ids: Vec<i64> = features
        .iter()
        .map(|f| f["properties"]["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 4]);

    for feature in features {
        assert_eq!(feature["type"], "Feature");
        assert!(feature["geometry"].is_object());
        assert!(!feature["properties"].as_object().unwrap().contains_key("geom"));
    }

    // Properties keep the table's column order
    let text = String::from_utf8(raw).unwrap();
    let zona = text.find("\"zona\"").unwrap();
    let id = text.find("\"id\"").unwrap();
    assert!(zona < id);
}

#[tokio::test]
#[ignore = "needs a PostGIS database in CAPAS_TEST_DATABASE"]
async fn test_fetch_uses_registered_geometry_column() {
    let Some(config) = test_config() else { return };
    let parcels = table("parcels");
    drop_tables(&config, &[parcels.clone()]).await;

    execute(
        &config,
        &format!(
            "CREATE TABLE \"{parcels}\" (id integer, the_geom geometry(Point, 4326));
             INSERT INTO \"{parcels}\" VALUES (7, ST_GeomFromText('POINT(1 2)', 4326));"
        ),
    )
    .await;

    // The configured fallback column does not exist in this table
    assert_eq!(config.geometry_column, "geom");
    let catalog = PostgisCatalog::new(config.clone());
    let layer = LayerName::parse(parcels.clone()).unwrap();
    let document = catalog.fetch_layer(&layer).await;
    drop_tables(&config, &[parcels]).await;

    let document = document.unwrap();
    assert_eq!(document.len(), 1);

    let body: serde_json::Value = serde_json::from_str(document.as_str()).unwrap();
    assert_eq!(body["features"][0]["geometry"]["coordinates"], json!([1, 2]));
    assert_eq!(body["features"][0]["properties"], json!({"id": 7}));
}

#[tokio::test]
#[ignore = "needs a PostGIS database in CAPAS_TEST_DATABASE"]
async fn test_fetch_empty_layer() {
    let Some(config) = test_config() else { return };
    let empty = table("empty");
    drop_tables(&config, &[empty.clone()]).await;

    execute(
        &config,
        &format!("CREATE TABLE \"{empty}\" (id integer, geom geometry(Point, 4326))"),
    )
    .await;

    let catalog = Arc::new(PostgisCatalog::new(config.clone()));
    let (status, body) =
        get_json(router_with(catalog), &format!("/layer_data?name={empty}")).await;
    drop_tables(&config, &[empty]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "FeatureCollection", "features": []}));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
#[ignore = "needs a PostGIS database in CAPAS_TEST_DATABASE"]
async fn test_missing_table_is_server_error() {
    let Some(config) = test_config() else { return };
    let missing = table("missing");
    drop_tables(&config, &[missing.clone()]).await;

    let catalog = Arc::new(PostgisCatalog::new(config));
    let layer = LayerName::parse(missing.clone()).unwrap();

    match catalog.fetch_layer(&layer).await {
        Err(CatalogError::Query(message)) => {
            assert!(message.starts_with("42P01"), "{message}");
            assert!(message.contains(&missing), "{message}");
        }
        other => panic!("expected an undefined table error, got {other:?}"),
    }

    let (status, body) =
        get_json(router_with(catalog), &format!("/layer_data?name={missing}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Error al obtener capa"}));
}
