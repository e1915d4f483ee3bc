use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use tower::ServiceExt;

use super::*;
use crate::{
    ArcStr,
    app::collector::{CollectorState, MockData, RefreshStats},
};

fn state(cache: NewsCache, recent_count: usize) -> AppState {
    AppState {
        cache,
        collector: Collector::mock(MockData::default()),
        recent_count,
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[test]
fn test_format_news_layout() {
    let item = NewsItem {
        id: 7,
        published_at: Utc.with_ymd_and_hms(2024, 3, 4, 10, 5, 0).unwrap(),
        headline: ArcStr::from("Apple unveils new product"),
        summary: ArcStr::from("Apple announced something."),
        source: ArcStr::from("Yahoo"),
        url: ArcStr::from("https://news.test/7"),
    };

    assert_eq!(
        format_news(&[item]),
        "Recent News Stories\n\
         ===============================\n\
         \n\
         Apple unveils new product -- March, 4 2024 10:05AM\n\
         -------------------------------\n\
         Summary: Apple announced something.\n\
         Read more: https://news.test/7\n\
         \n"
    );
}

#[test]
fn test_format_news_afternoon_and_order() {
    let mut late = NewsItem::sample(2);
    late.published_at = Utc.with_ymd_and_hms(2023, 12, 25, 17, 45, 0).unwrap();
    let page = format_news(&[NewsItem::sample(1), late]);

    assert!(page.contains("Headline 2 -- December, 25 2023 17:45PM\n"));
    assert!(page.find("Headline 1").unwrap() < page.find("Headline 2").unwrap());
    assert_eq!(page.matches("===============================").count(), 2);
}

#[test]
fn test_format_no_news() {
    assert_eq!(format_news(&[]), "Recent News Stories\n");
}

#[test]
fn test_recent_news_limits_count() {
    let cache = NewsCache::new();
    cache.replace((1..=4).map(NewsItem::sample).collect());

    let ids: Vec<i64> = state(cache, 3).recent_news().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_news_route() {
    let cache = NewsCache::new();
    cache.replace((1..=4).map(NewsItem::sample).collect());

    let (status, content_type, body) = get(router(state(cache.clone(), 3)), "/news").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(body, format_news(&cache.read(3)));
    assert!(!body.contains("Headline 4"));
}

#[tokio::test]
async fn test_news_route_reflects_latest_snapshot() {
    let cache = NewsCache::new();
    let app = router(state(cache.clone(), 3));

    let (_, _, before) = get(app.clone(), "/news").await;
    assert_eq!(before, "Recent News Stories\n");

    cache.replace(vec![NewsItem::sample(9)]);
    let (_, _, after) = get(app, "/news").await;
    assert!(after.contains("Headline 9"));
}

#[tokio::test]
async fn test_health_route() {
    let stats = RefreshStats {
        attempts: 3,
        replaced: 2,
        failed: 1,
        last_error: Some("HTTP status 500".to_string()),
        snapshot_len: 4,
        ..RefreshStats::default()
    };
    let app = router(AppState {
        cache: NewsCache::new(),
        collector: Collector::mock(MockData {
            stats,
            state: CollectorState::Running,
        }),
        recent_count: 3,
    });

    let (status, _, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["state"], "running");
    assert_eq!(json["stats"]["attempts"], 3);
    assert_eq!(json["stats"]["failed"], 1);
    assert_eq!(json["stats"]["snapshot_len"], 4);
    assert_eq!(json["stats"]["last_error"], "HTTP status 500");
    assert!(json["stats"]["last_replaced_at"].is_null());
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _, _) = get(router(state(NewsCache::new(), 3)), "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serve_stops_on_cancel() {
    let listener = bind("127.0.0.1:0").await.unwrap();
    let token = CancellationToken::new();
    let log = Log::mock();

    let server = tokio::spawn(serve(
        listener,
        state(NewsCache::new(), 3),
        token.clone(),
        Duration::from_secs(1),
        log.clone(),
    ));
    token.cancel();

    server.await.unwrap().unwrap();
    let messages = log.get_messages().unwrap();
    assert!(messages.iter().any(|msg| msg.message.contains("Serving news on")));
}

#[tokio::test]
async fn test_bind_fails_on_taken_address() {
    let taken = bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    assert!(bind(&addr).await.is_err());
}
