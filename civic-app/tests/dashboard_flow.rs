// civic-app/tests/dashboard_flow.rs
// Dashboard and report flows over HTTP against an in-process mock service

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{Duration, Utc};
use civic_app::dashboard::{OFFLINE_BANNER, PLACEHOLDER_COUNT};
use civic_app::report::{ReportDraft, ReportError, ReportService};
use civic_app::{Dashboard, LocalStore};
use civic_client::{ClientConfig, IssueCategory, IssueClient};
use serde_json::{Value, json};
use shared::IssueId;
use std::sync::Arc;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> Arc<IssueClient> {
    Arc::new(
        ClientConfig::new(base_url)
            .with_timeout_ms(2_000)
            .build_client()
            .unwrap(),
    )
}

/// Base URL nothing listens on
async fn unreachable() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn draft() -> ReportDraft {
    ReportDraft {
        category: IssueCategory::Water,
        description: "Blocked storm drain on Oak Street".into(),
        photo: Some("file:///camera/drain.jpg".into()),
        location: "Oak St, Industrial Area".into(),
        latitude: "34.05".into(),
        longitude: "-118.25".into(),
    }
}

#[tokio::test]
async fn test_resolved_issue_card_over_http() {
    let created = (Utc::now() - Duration::hours(2)).naive_utc();
    let issue: Value = json!({
        "id": 7,
        "description": "A".repeat(60),
        "category": "ROADS",
        "status": "RESOLVED",
        "latitude": 34.0522,
        "longitude": -118.2437,
        "createdAt": created.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
    });
    let router = Router::new()
        .route("/api/issues", get(move || async move { Json(json!([issue])) }))
        .route(
            "/api/issues/stats",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let base = spawn(router).await;

    let dashboard = Dashboard::new(client(&base), LocalStore::open_in_memory().unwrap());
    assert!(dashboard.load_issues().await);
    let state = dashboard.state().await;

    assert_eq!(state.issues.len(), 1);
    let card = &state.issues[0];
    assert_eq!(card.id, IssueId::Remote(7));
    assert_eq!(card.title, format!("{}...", "A".repeat(50)));
    assert_eq!(card.status_color, "#4CAF50");
    assert_eq!(card.time, "2h ago");
    assert_eq!(card.location, "Unknown location");
    assert!(state.error.is_none());
    assert!(state.statistics.is_none());
}

#[tokio::test]
async fn test_unreachable_service_degrades_to_local_and_placeholders() {
    let base = unreachable().await;
    let store = LocalStore::open_in_memory().unwrap();
    let api = client(&base);

    let service = ReportService::new(api.clone(), store.clone(), 1, 1);
    let saved = service.save_offline(&draft()).unwrap();

    let dashboard = Dashboard::new(api, store);
    dashboard.load_issues().await;
    let state = dashboard.state().await;

    assert_eq!(state.issues.len(), 1 + PLACEHOLDER_COUNT);
    assert_eq!(state.issues[0].id, IssueId::Local(saved.id));
    assert_eq!(state.issues[0].location, "Oak St, Industrial Area");
    assert_eq!(state.error.as_deref(), Some(OFFLINE_BANNER));
}

#[tokio::test]
async fn test_submit_routes_to_default_city_and_dedupes_on_next_load() {
    let router = Router::new()
        .route(
            "/api/issues/city/{city_id}/locality/{locality_id}",
            post(
                |Path((city_id, locality_id)): Path<(i64, i64)>, Json(body): Json<Value>| async move {
                    assert_eq!((city_id, locality_id), (4, 9));
                    Json(json!({
                        "id": 55,
                        "description": body["description"],
                        "category": body["category"],
                        "status": "SUBMITTED",
                        "latitude": body["latitude"],
                        "longitude": body["longitude"],
                        "photoUrl": body["photoUrl"],
                        "city": {"id": city_id, "name": "Springfield"},
                        "locality": {"id": locality_id, "name": "Oak"},
                    }))
                },
            ),
        )
        .route(
            "/api/issues",
            get(|| async {
                Json(json!([{
                    "id": 55,
                    "description": "Blocked storm drain on Oak Street",
                    "category": "WATER",
                    "status": "SUBMITTED",
                    "latitude": 34.05,
                    "longitude": -118.25,
                }]))
            }),
        )
        .route(
            "/api/issues/stats",
            get(|| async {
                Json(json!({"total": 1, "submitted": 1, "inProgress": 0, "resolved": 0, "rejected": 0}))
            }),
        );
    let base = spawn(router).await;
    let store = LocalStore::open_in_memory().unwrap();
    let api = client(&base);

    let service = ReportService::new(api.clone(), store.clone(), 4, 9);
    let outcome = service.submit(&draft()).await.unwrap();
    assert_eq!(outcome.issue.id, 55);
    assert_eq!(outcome.local.as_ref().and_then(|r| r.remote_id), Some(55));

    let dashboard = Dashboard::new(api, store.clone());
    dashboard.load_issues().await;
    let state = dashboard.state().await;

    assert_eq!(state.local_issues.len(), 1);
    assert_eq!(state.issues.len(), 1);
    assert_eq!(state.issues[0].id, IssueId::Remote(55));
    assert_eq!(state.statistics.map(|s| s.total), Some(1));
}

#[tokio::test]
async fn test_submit_against_unreachable_service_writes_nothing() {
    let base = unreachable().await;
    let store = LocalStore::open_in_memory().unwrap();
    let service = ReportService::new(client(&base), store.clone(), 1, 1);

    let err = service.submit(&draft()).await.unwrap_err();

    assert!(matches!(err, ReportError::Remote(ref e) if e.is_network()));
    assert!(store.load_user_issues().unwrap().is_empty());
}
