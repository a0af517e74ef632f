use std::path::{Path, PathBuf};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use migration::MigratorTrait;
use serde_json::{json, Value};
use server::routes::{self, ServerState};
use service::malaria::SeaOrmMalariaRepository;
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

const NOT_FOUND: &str = "Malaria data not found";

fn fixture_csv() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/estimated_numbers.csv")
}

/// Router over a fresh SQLite file; keep the `TempDir` alive for the test.
async fn test_app(csv: PathBuf) -> anyhow::Result<(Router, TempDir)> {
    let dir = tempfile::tempdir()?;
    let cfg = configs::DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("api.db").display()),
        max_connections: 4,
        min_connections: 1,
        ..Default::default()
    };
    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    let state = ServerState::new(SeaOrmMalariaRepository::new(db), csv);
    Ok((routes::build_router(CorsLayer::very_permissive(), state), dir))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let (status, body) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK, "{uri}: {body}");
    serde_json::from_str(&body).unwrap()
}

async fn create(app: &Router, payload: Value) {
    let (status, body) = send(app, Method::POST, "/api/malaria/", Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body, "Successfully added malaria data");
}

fn ids(v: &Value) -> Vec<i64> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|r| r["malaria_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_is_plain_ok() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Ok");
}

#[tokio::test]
async fn created_record_is_served_in_projected_shape() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    create(
        &app,
        json!({
            "id": 999,
            "region": "Kenya",
            "year": "2016",
            "cases": "3000000[2000000-4000000]",
            "cases_median": 3000000,
            "deaths_median": 10700,
            "iso": "KEN",
            "land_area_kmsq_2012": 569140.0,
            "languages_en_2012": "English (official), Kiswahili (official)",
            "who_region": "Africa",
            "world_bank_income_group": "Lower middle income"
        }),
    )
    .await;

    let list = get_json(&app, "/api/malaria/").await;
    let id = ids(&list)[0];
    assert_ne!(id, 999);

    let (status, body) = send(&app, Method::GET, &format!("/api/malaria/{id}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(r#"{"malaria_id":"#), "{body}");
    let record: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        record,
        json!({
            "malaria_id": id,
            "region": "Kenya",
            "iso": "KEN",
            "year": 2016,
            "cases_median": 3000000,
            "deaths_median": 10700,
            "land_area_kmsq_2012": 569140,
            "languages_en_2012": "English (official), Kiswahili (official)",
            "who_region": "Africa",
            "world_bank_income_group": "Lower middle income"
        })
    );
}

#[tokio::test]
async fn unknown_or_malformed_id_is_404() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    for uri in ["/api/malaria/42/", "/api/malaria/abc/"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, NOT_FOUND);
    }
    let (status, body) = send(&app, Method::PUT, "/api/malaria/42/", Some(json!({"region": "X"}))).await;
    assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, NOT_FOUND));
    let (status, body) = send(&app, Method::DELETE, "/api/malaria/42/", None).await;
    assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, NOT_FOUND));
    let (status, body) = send(&app, Method::GET, "/api/malaria/iso/XYZ", None).await;
    assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, NOT_FOUND));
}

#[tokio::test]
async fn filter_paginates_with_links() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    for year in 2000..2025 {
        create(&app, json!({"region": "Africa", "year": year, "iso": "AGO", "who_region": "Africa"})).await;
    }
    create(&app, json!({"region": "Europe", "year": 2010, "iso": "FRA"})).await;

    let first = get_json(&app, "/api/malaria/filter?region=africa&page=1&per_page=10").await;
    assert_eq!(first["malaria_data"].as_array().unwrap().len(), 10);
    assert_eq!(first["total_items"], 25);
    assert_eq!(first["total_pages"], 3);
    assert_eq!(first["previous_page"], Value::Null);
    assert_eq!(first["next_page"], "/api/malaria/filter?region=africa&page=2&per_page=10");
    assert_eq!(first["current_page"], "/api/malaria/filter?region=africa&page=1&per_page=10");

    let last = get_json(&app, "/api/malaria/filter?region=africa&page=3&per_page=10").await;
    assert_eq!(last["malaria_data"].as_array().unwrap().len(), 5);
    assert_eq!(last["next_page"], Value::Null);
    assert_eq!(last["previous_page"], "/api/malaria/filter?region=africa&page=2&per_page=10");

    let both = get_json(&app, "/api/malaria/filter?region=Africa&year=2010").await;
    assert_eq!(both["total_items"], 1);
    assert_eq!(both["malaria_data"][0]["year"], 2010);

    let years = get_json(&app, "/api/malaria/filter?year=2010,2011").await;
    assert_eq!(years["total_items"], 3);
}

#[tokio::test]
async fn filter_tolerates_bad_parameters() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    create(&app, json!({"region": "Africa", "year": 2010})).await;

    let page = get_json(&app, "/api/malaria/filter?page=abc&per_page=-3&unknown=1").await;
    assert_eq!(page["total_items"], 1);
    assert_eq!(page["current_page"], "/api/malaria/filter?page=1&per_page=10");

    let none = get_json(&app, "/api/malaria/filter?year=soon").await;
    assert_eq!(none["total_items"], 0);
    assert_eq!(none["total_pages"], 0);
    assert_eq!(none["malaria_data"], json!([]));
}

#[tokio::test]
async fn update_is_partial_and_null_clears() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    create(&app, json!({"region": "Kenya", "year": 2016, "iso": "KEN", "who_region": "Africa"})).await;
    let id = ids(&get_json(&app, "/api/malaria/").await)[0];
    let uri = format!("/api/malaria/{id}/");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"region": "X"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Successfully updated malaria data");
    let rec = get_json(&app, &uri).await;
    assert_eq!(rec["region"], "X");
    assert_eq!(rec["year"], 2016);
    assert_eq!(rec["iso"], "KEN");
    assert_eq!(rec["who_region"], "Africa");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"iso": null}))).await;
    assert_eq!(status, StatusCode::OK);
    let rec = get_json(&app, &uri).await;
    assert_eq!(rec["iso"], Value::Null);
    assert_eq!(rec["region"], "X");
}

#[tokio::test]
async fn invalid_payloads_fail_as_storage_errors() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    create(&app, json!({"region": "Kenya", "year": 2016, "iso": "KEN"})).await;
    let id = ids(&get_json(&app, "/api/malaria/").await)[0];
    let uri = format!("/api/malaria/{id}/");
    let before = get_json(&app, &uri).await;

    for payload in [json!({"year": "abc"}), json!({"year": 99999999999i64}), json!({"region": 5})] {
        let (status, body) = send(&app, Method::POST, "/api/malaria/", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{payload}");
        assert_eq!(body, "Error adding malaria data");

        let (status, body) = send(&app, Method::PUT, &uri, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{payload}");
        assert_eq!(body, "Error updating malaria data");
    }

    // nothing was written by the failed requests
    assert_eq!(get_json(&app, &uri).await, before);
    assert_eq!(ids(&get_json(&app, "/api/malaria/").await), vec![id]);

    let (status, body) = send(&app, Method::PUT, "/api/malaria/424242/", Some(json!({"year": "abc"}))).await;
    assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, NOT_FOUND));
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    create(&app, json!({"region": "Kenya"})).await;
    create(&app, json!({"region": "Nepal"})).await;
    let all = ids(&get_json(&app, "/api/malaria/").await);
    let uri = format!("/api/malaria/{}/", all[0]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Successfully deleted malaria data");
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(ids(&get_json(&app, "/api/malaria/").await), vec![all[1]]);
}

#[tokio::test]
async fn iso_listing_and_lookup() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    create(&app, json!({"region": "Kenya", "year": 2015, "iso": "KEN"})).await;
    create(&app, json!({"region": "Angola", "iso": "AGO"})).await;
    create(&app, json!({"region": "Kenya", "year": 2016, "iso": "KEN"})).await;
    create(&app, json!({"region": "Nowhere"})).await;

    assert_eq!(get_json(&app, "/api/malaria/iso/").await, json!(["AGO", "KEN"]));
    let first = get_json(&app, "/api/malaria/iso/ken").await;
    assert_eq!(first["year"], 2015);
}

#[tokio::test]
async fn reset_reloads_bulk_source_with_zero_based_ids() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    create(&app, json!({"region": "Stale"})).await;

    let (status, body) = send(&app, Method::PUT, "/api/reset/malaria/", None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body, "Successfully reset the malaria database");

    let list = get_json(&app, "/api/malaria/").await;
    assert_eq!(ids(&list), vec![0, 1, 2, 3, 4]);
    assert_eq!(list[0]["region"], "Afghanistan");
    assert_eq!(list[0]["land_area_kmsq_2012"], 652230);

    // new records continue after the imported ids
    create(&app, json!({"region": "Kenya"})).await;
    let after = ids(&get_json(&app, "/api/malaria/").await);
    assert_eq!(after.len(), 6);
    assert!(after[5] >= 5, "{after:?}");
}

#[tokio::test]
async fn reset_with_missing_source_is_501_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _db_dir) = test_app(dir.path().join("absent.csv")).await.unwrap();
    create(&app, json!({"region": "Kenya"})).await;

    let (status, body) = send(&app, Method::PUT, "/api/reset/malaria/", None).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body, "Error resetting the malaria database");
    assert_eq!(get_json(&app, "/api/malaria/").await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let (app, _dir) = test_app(fixture_csv()).await.unwrap();
    let doc = get_json(&app, "/api-docs/openapi.json").await;
    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/malaria/filter"));
    assert!(paths.contains_key("/api/malaria/{id}/"));
    assert!(paths.contains_key("/api/reset/malaria/"));
}
