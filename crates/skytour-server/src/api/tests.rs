use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, state::AppState};

fn setup_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default()));
    let app = api::routes().with_state(state.clone());
    (app, state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _state) = setup_app();
    let res = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn fleet_snapshot_reflects_ticks() {
    let (app, state) = setup_app();

    let res = app.clone().oneshot(get("/v1/fleet")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["tick"], 0);
    assert_eq!(body["drones"].as_array().unwrap().len(), 3);
    assert_eq!(body["summary"]["active"], 3);

    state.tick();
    state.tick();

    let body = read_json(app.clone().oneshot(get("/v1/fleet")).await.unwrap()).await;
    assert_eq!(body["tick"], 2);
    assert_eq!(body["total_alerts"], 1);
    assert_eq!(body["recent_alerts"][0]["drone_id"], "drone3");

    let summary = read_json(app.oneshot(get("/v1/fleet/summary")).await.unwrap()).await;
    assert_eq!(summary["active"], 2);
    assert_eq!(summary["grounded"], 1);
}

#[tokio::test]
async fn drone_lookup_and_not_found() {
    let (app, _state) = setup_app();

    let res = app.clone().oneshot(get("/v1/drones/drone1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["drone_id"], "drone1");
    assert_eq!(body["position"], serde_json::json!([29.5, 90.5]));

    let res = app.clone().oneshot(get("/v1/drones/ghost")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = read_json(res).await;
    assert_eq!(body["error"], "Drone ghost not found");

    let list = read_json(app.oneshot(get("/v1/drones")).await.unwrap()).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn resume_requires_a_grounded_drone() {
    let (app, state) = setup_app();

    let res = app.clone().oneshot(post("/v1/drones/drone1/resume")).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app.clone().oneshot(post("/v1/drones/ghost/resume")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    for _ in 0..4 {
        state.tick();
    }
    assert!(!state.get_drone("drone2").unwrap().is_flying);

    let res = app.oneshot(post("/v1/drones/drone2/resume")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["is_flying"], true);
    assert_eq!(body["grounded_reason"], Value::Null);
}

#[tokio::test]
async fn alerts_honour_limit() {
    let (app, state) = setup_app();
    for _ in 0..3 {
        state.tick();
    }
    state.resume("drone3").unwrap();
    state.tick();

    let all = read_json(app.clone().oneshot(get("/v1/alerts")).await.unwrap()).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["sequence"], 1);
    assert_eq!(all[1]["sequence"], 2);

    let last = read_json(app.oneshot(get("/v1/alerts?limit=1")).await.unwrap()).await;
    assert_eq!(last.as_array().unwrap().len(), 1);
    assert_eq!(last[0]["sequence"], 2);
}

#[tokio::test]
async fn routes_filter_by_site() {
    let (app, _state) = setup_app();

    let glacier = read_json(
        app.clone()
            .oneshot(get("/v1/routes?site=haba_tso"))
            .await
            .unwrap(),
    )
    .await;
    let glacier = glacier.as_array().unwrap();
    assert_eq!(glacier.len(), 2);
    assert!(glacier.iter().all(|r| r["site"] == "haba_tso"));

    let res = app.clone().oneshot(get("/v1/routes/haba-glacier-eye")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let route = read_json(res).await;
    assert_eq!(route["name"], "Glacier Eye Panorama");
    assert!(route["length_m"].as_f64().unwrap() > 1_000.0);

    let res = app.oneshot(get("/v1/routes/nowhere")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn services_filter_by_site_and_kind() {
    let (app, _state) = setup_app();

    let all = read_json(app.clone().oneshot(get("/v1/services")).await.unwrap()).await;
    assert_eq!(all["rentals"].as_array().unwrap().len(), 6);
    assert_eq!(all["content"].as_array().unwrap().len(), 10);

    let glacier_avatars = read_json(
        app.clone()
            .oneshot(get("/v1/services?site=haba_tso&kind=virtual_avatar"))
            .await
            .unwrap(),
    )
    .await;
    assert!(glacier_avatars["rentals"].as_array().unwrap().is_empty());
    let content = glacier_avatars["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert!(content
        .iter()
        .all(|c| c["site"] == "haba_tso" && c["type"] == "virtual_avatar"));
    assert!(content.iter().any(|c| c["checkpoint"] == "Kayak pier"));

    let onsite = read_json(
        app.clone()
            .oneshot(get("/v1/services?kind=onsite_rental"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(onsite["rentals"].as_array().unwrap().len(), 3);
    assert!(onsite["content"].as_array().unwrap().is_empty());

    let res = app.oneshot(get("/v1/services?kind=balloon")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_combine_fleet_and_orders() {
    let (app, state) = setup_app();
    state.tick();
    state.tick();

    let res = app.oneshot(get("/v1/stats")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats = read_json(res).await;
    assert_eq!(stats["available_drones"], 12);
    assert_eq!(stats["active_drones"], 2);
    assert_eq!(stats["grounded_drones"], 1);
    assert_eq!(stats["today_orders"], 77);
    assert_eq!(stats["total_revenue"], 48_300);
    assert_eq!(stats["services"]["drone_rentals"]["app_remote_count"], 780);
    assert_eq!(stats["services"]["generative_content"]["virtual_avatar_count"], 370);
}

#[tokio::test]
async fn geofence_point_check() {
    let (app, _state) = setup_app();

    let zone = read_json(app.clone().oneshot(get("/v1/geofence")).await.unwrap()).await;
    assert_eq!(zone["radius_m"], 500.0);
    assert_eq!(zone["center"], serde_json::json!([29.6, 90.4]));

    let inside = read_json(
        app.clone()
            .oneshot(get("/v1/geofence/check?lat=29.602&lon=90.401"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(inside["inside_geofence"], true);

    let outside = read_json(
        app.oneshot(get("/v1/geofence/check?lat=29.5&lon=90.5"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(outside["inside_geofence"], false);
    assert!(outside["distance_to_center_m"].as_f64().unwrap() > 10_000.0);
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let (app, _state) = setup_app();

    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");

    let res = app.clone().oneshot(get("/health")).await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let oversized = "x".repeat(200);
    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", oversized.as_str())
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let replaced = res.headers()["x-request-id"].to_str().unwrap();
    assert_ne!(replaced, oversized);
    assert_eq!(replaced.len(), 36);

    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "has space")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_ne!(res.headers()["x-request-id"], "has space");
}
