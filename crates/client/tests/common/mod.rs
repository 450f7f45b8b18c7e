//! In-process catalog backend for integration tests.
//!
//! Serves a small fixed catalog over HTTP on an ephemeral port and records
//! every request URI so tests can assert on the exact query strings sent.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct Backend {
    pub requests: Arc<Mutex<Vec<String>>>,
    /// When set, `/streets` omits the joined names (older backends)
    pub bare_streets: bool,
}

impl Backend {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, uri: &Uri) {
        self.requests.lock().unwrap().push(uri.to_string());
    }
}

/// Starts the backend and returns its base URL (e.g. "http://127.0.0.1:12345").
pub async fn start(backend: Backend) -> String {
    let app = Router::new()
        .route("/regions", get(regions))
        .route("/provinces", get(provinces))
        .route("/cities", get(cities))
        .route("/streets", get(streets).post(create_street))
        .route("/streets/{id}", get(street))
        .route("/broken/regions", get(broken))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn province_rows() -> Vec<Value> {
    vec![
        json!({"id": 131, "name": "Santiago", "region_id": 13}),
        json!({"id": 132, "name": "Cordillera", "region_id": 13}),
        json!({"id": 51, "name": "Valparaíso", "region_id": "5"}),
    ]
}

fn city_rows() -> Vec<Value> {
    vec![
        json!({"id": 1301, "name": "Santiago Centro", "province_id": 131}),
        json!({"id": 1321, "name": "Puente Alto", "province_id": 132}),
        json!({"id": 5101, "name": "Viña del Mar", "province_id": 51}),
    ]
}

fn street_rows(bare: bool) -> Vec<Value> {
    let rows = vec![
        (1, "Alameda", 1301, "Metropolitana", "Santiago", "Santiago Centro"),
        (2, "Concha y Toro", 1321, "Metropolitana", "Cordillera", "Puente Alto"),
        (3, "Avenida Libertad", 5101, "Valparaíso", "Valparaíso", "Viña del Mar"),
    ];
    rows.into_iter()
        .map(|(id, name, city_id, region, province, city)| {
            if bare {
                json!({"id": id, "name": name, "city_id": city_id})
            } else {
                json!({
                    "id": id, "name": name, "city_id": city_id,
                    "region": region, "province": province, "city": city
                })
            }
        })
        .collect()
}

async fn regions(State(backend): State<Backend>, uri: Uri) -> Json<Value> {
    backend.record(&uri);
    Json(json!([
        {"id": 13, "name": "Metropolitana"},
        {"id": 5, "name": "Valparaíso"}
    ]))
}

async fn provinces(
    State(backend): State<Backend>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.record(&uri);
    let rows = province_rows()
        .into_iter()
        .filter(|p| match params.get("region_id") {
            Some(id) => p["region_id"].to_string().trim_matches('"') == id,
            None => true,
        })
        .collect();
    Json(Value::Array(rows))
}

async fn cities(
    State(backend): State<Backend>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.record(&uri);
    let rows = city_rows()
        .into_iter()
        .filter(|c| match params.get("province_id") {
            Some(id) => c["province_id"].to_string() == *id,
            None => true,
        })
        .collect();
    Json(Value::Array(rows))
}

async fn streets(
    State(backend): State<Backend>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.record(&uri);
    let rows = street_rows(backend.bare_streets)
        .into_iter()
        .zip(street_rows(false))
        .filter(|(_, full)| match params.get("search") {
            Some(text) => full["name"]
                .as_str()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&text.to_lowercase()),
            None => true,
        })
        .filter(|(_, full)| match params.get("city_id") {
            Some(id) => full["city_id"].to_string() == *id,
            None => true,
        })
        .map(|(row, _)| row)
        .collect();
    Json(Value::Array(rows))
}

async fn street(
    State(backend): State<Backend>,
    uri: Uri,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    backend.record(&uri);
    street_rows(backend.bare_streets)
        .into_iter()
        .find(|s| s["id"] == json!(id))
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "not_found", "message": "street not found"})),
            )
        })
}

async fn create_street(
    State(backend): State<Backend>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    backend.record(&uri);
    let name = body["name"].as_str().unwrap_or_default();
    if name.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "name must not be empty"})),
        ));
    }
    Ok((StatusCode::CREATED, Json(json!({"id": 42}))))
}

async fn broken(State(backend): State<Backend>, uri: Uri) -> (StatusCode, &'static str) {
    backend.record(&uri);
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}
