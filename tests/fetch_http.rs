use httpmock::prelude::*;
use leaderboard_bot::constants::API_ACCEPT;
use leaderboard_bot::leaderboard::{FetchError, LeaderboardQuery, LeaderboardSource, TrpcClient};
use serde_json::json;
use std::time::Duration;

const PATH: &str = "/api/trpc/referral.getPublicLeaderBoard";

fn query() -> LeaderboardQuery {
    LeaderboardQuery {
        leaderboard_uid: "1565-GC91E-MKCX".into(),
        client_uid: "154T-BFD91-4B8S".into(),
    }
}

fn client(server: &MockServer, timeout: Duration) -> TrpcClient {
    TrpcClient::with_options(server.url(PATH), "https://www.sbx.com/", timeout).expect("client")
}

#[tokio::test]
async fn sends_trpc_input_and_fixed_headers() {
    let server = MockServer::start_async().await;
    let data = json!({"json": {"name": "3dhaxxCpu", "users": []}});
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(PATH)
                .query_param("input", query().input_param())
                .header("user-agent", "Mozilla/5.0")
                .header("accept", API_ACCEPT)
                .header("referer", "https://www.sbx.com/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"result": {"data": data.clone()}}));
        })
        .await;

    let snapshot = client(&server, Duration::from_secs(10))
        .fetch(&query())
        .await
        .expect("fetch ok");
    mock.assert_async().await;
    assert_eq!(snapshot.raw(), &data);
    assert_eq!(snapshot.name(), Some("3dhaxxCpu"));
}

#[tokio::test]
async fn batched_array_response_is_unwrapped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(200)
                .json_body(json!([{"result": {"data": {"json": {"uid": "1565-GC91E-MKCX"}}}}]));
        })
        .await;

    let snapshot = client(&server, Duration::from_secs(10))
        .fetch(&query())
        .await
        .expect("fetch ok");
    assert_eq!(snapshot.uid(), Some("1565-GC91E-MKCX"));
}

#[tokio::test]
async fn non_success_status_is_a_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(503).body("busy");
        })
        .await;

    let err = client(&server, Duration::from_secs(10))
        .fetch(&query())
        .await
        .expect_err("503 must fail");
    match err {
        FetchError::Network(reason) => assert!(reason.contains("503"), "{reason}"),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_body_is_a_protocol_error_with_raw_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).body(r#"{"error":{"message":"NOT_FOUND"}}"#);
        })
        .await;

    let err = client(&server, Duration::from_secs(10))
        .fetch(&query())
        .await
        .expect_err("shape mismatch");
    match err {
        FetchError::Protocol { body } => assert!(body.contains("NOT_FOUND")),
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn html_body_is_a_protocol_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).body("<html>challenge</html>");
        })
        .await;

    let err = client(&server, Duration::from_secs(10))
        .fetch(&query())
        .await
        .expect_err("not json");
    assert!(matches!(err, FetchError::Protocol { ref body } if body == "<html>challenge</html>"));
}

#[tokio::test]
async fn slow_responses_time_out_as_network_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({"result": {"data": {}}}));
        })
        .await;

    let err = client(&server, Duration::from_millis(200))
        .fetch(&query())
        .await
        .expect_err("should time out");
    assert!(matches!(err, FetchError::Network(_)), "{err:?}");
}
