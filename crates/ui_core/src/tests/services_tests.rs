use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{http::StatusCode, routing::get, Json, Router};
use shared::{
    domain::{ProcessorRef, Stream},
    error::ErrorCode,
};
use tokio::net::TcpListener;

fn sample_jobs() -> Vec<Job> {
    vec![
        Job {
            name: "index-apache-logs".into(),
            streams: vec![Stream {
                name: "parsing".into(),
                component: "KafkaRecordStreamParallelProcessing".into(),
                config: Vec::new(),
                processors: vec![ProcessorRef {
                    name: "split".into(),
                    component: "SplitText".into(),
                }],
            }],
        },
        Job {
            name: "empty".into(),
            streams: Vec::new(),
        },
    ]
}

async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn catalog_server() -> String {
    let app = Router::new()
        .route("/api/jobs", get(|| async { Json(sample_jobs()) }))
        .route(
            "/api/topics",
            get(|| async {
                Json(vec![Topic {
                    name: "logisland_raw".into(),
                    partitions: 4,
                    replication_factor: 2,
                    documentation: None,
                }])
            }),
        )
        .route(
            "/api/processors",
            get(|| async {
                Json(vec![Processor {
                    name: "split".into(),
                    component: "SplitText".into(),
                    description: Some("regex based line splitter".into()),
                }])
            }),
        );
    spawn_server(app).await
}

#[tokio::test]
async fn rest_client_queries_routes_under_base_path() {
    let base = catalog_server().await;
    let client = RestDataClient::new(&format!("{base}/api"), Duration::from_secs(5)).expect("client");

    let jobs = JobsDataService::query(&client).await.expect("jobs");
    assert_eq!(jobs, sample_jobs());

    let topics = TopicsDataService::query(&client).await.expect("topics");
    assert_eq!(topics[0].partitions, 4);

    let processors = ProcessorsDataService::query(&client).await.expect("processors");
    assert_eq!(processors[0].component, "SplitText");
}

#[tokio::test]
async fn rest_client_accepts_trailing_slash_in_base_url() {
    let base = catalog_server().await;
    let client =
        RestDataClient::new(&format!("{base}/api/"), Duration::from_secs(5)).expect("client");
    assert_eq!(client.base_url().path(), "/api/");
    assert_eq!(JobsDataService::query(&client).await.expect("jobs").len(), 2);
}

#[tokio::test]
async fn non_success_status_surfaces_api_error_message() {
    let app = Router::new().route(
        "/jobs",
        get(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiError::new(ErrorCode::Unavailable, "job registry offline")),
            )
        }),
    );
    let base = spawn_server(app).await;
    let client = RestDataClient::new(&base, Duration::from_secs(5)).expect("client");

    let err = JobsDataService::query(&client).await.expect_err("status error");
    match &err {
        ClientError::Status {
            status, message, ..
        } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "job registry offline");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn non_json_error_body_is_kept_as_text() {
    let app = Router::new().route(
        "/topics",
        get(|| async { (StatusCode::NOT_FOUND, "no such route\n") }),
    );
    let base = spawn_server(app).await;
    let client = RestDataClient::new(&base, Duration::from_secs(5)).expect("client");

    let err = TopicsDataService::query(&client).await.expect_err("status error");
    match &err {
        ClientError::Status {
            status, message, ..
        } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "no such route");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_transient());
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let app = Router::new().route("/jobs", get(|| async { "[{\"nom\": 1}]" }));
    let base = spawn_server(app).await;
    let client = RestDataClient::new(&base, Duration::from_secs(5)).expect("client");

    let err = JobsDataService::query(&client).await.expect_err("decode error");
    assert!(matches!(err, ClientError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client =
        RestDataClient::new(&format!("http://{addr}"), Duration::from_secs(2)).expect("client");
    let err = JobsDataService::query(&client).await.expect_err("transport error");
    assert!(matches!(err, ClientError::Transport { .. }), "{err:?}");
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = RestDataClient::new("not a url", Duration::from_secs(1))
        .err()
        .expect("invalid url");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[tokio::test]
async fn static_service_loads_fixture_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("job_console_fixture_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("catalog.json");
    fs::write(
        &path,
        r#"{"jobs": [{"name": "a"}, {"name": "b"}], "topics": [{"name": "raw"}]}"#,
    )
    .expect("write fixture");

    let service = StaticDataService::from_fixture(&path).await.expect("fixture");
    let jobs = JobsDataService::query(&service).await.expect("jobs");
    assert_eq!(jobs.len(), 2);
    assert_eq!(TopicsDataService::query(&service).await.expect("topics")[0].name, "raw");
    assert!(ProcessorsDataService::query(&service)
        .await
        .expect("processors")
        .is_empty());

    fs::remove_dir_all(dir).expect("cleanup");
}

#[tokio::test]
async fn missing_fixture_is_a_read_error() {
    let path = env::temp_dir().join("job_console_fixture_missing/catalog.json");
    let err = StaticDataService::from_fixture(&path)
        .await
        .expect_err("missing fixture");
    assert!(matches!(err, ClientError::FixtureRead { .. }));
}
