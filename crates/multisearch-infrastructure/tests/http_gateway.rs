use multisearch_core::SearchErrorKind;
use multisearch_core::gateway::{SearchGateway, SuggestionSource};
use multisearch_core::outcome::SearchOutcome;
use multisearch_core::request::{
    LocationContext, RawInput, RequestContext, RequestNormalizer, SearchRequest, SearchType,
};
use multisearch_infrastructure::HttpSearchGateway;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves exactly one HTTP response and hands back the request body it received.
async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        // Read headers, then as many body bytes as Content-Length announces.
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buffer.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buffer[header_end..]).into_owned();

        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(request_body);
    });

    (format!("http://{addr}/webhook/search"), rx)
}

async fn text_request(location: Option<LocationContext>) -> SearchRequest {
    RequestNormalizer::new()
        .build_request(
            RawInput::Text("phone repair".into()),
            RequestContext {
                search_type: SearchType::All,
                location,
                user_id: None,
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_success_response_is_parsed() {
    let (url, received) = serve_once(
        200,
        r#"{"results":[{"id":"1","title":"Fix-It","price":"15.000FCFA"}],"executionTime":0.3}"#,
    )
    .await;
    let gateway = HttpSearchGateway::new(&url).unwrap();
    let request = text_request(None).await;

    match gateway.submit(&request).await {
        SearchOutcome::Success(success) => {
            assert_eq!(success.total_results, 1);
            assert_eq!(success.results[0].title, "Fix-It");
            assert_eq!(success.processing_time, Some(0.3));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let body: Value = serde_json::from_str(&received.await.unwrap()).unwrap();
    assert_eq!(body["query"], "phone repair");
    assert_eq!(body["type"], "all");
    assert_eq!(body["requestId"], request.request_id().to_string());
    assert!(body.get("uid").is_none());
}

#[tokio::test]
async fn test_partial_location_never_reaches_the_wire() {
    let (url, received) = serve_once(200, r#"{"results":[]}"#).await;
    let gateway = HttpSearchGateway::new(&url).unwrap();
    let request = text_request(Some(LocationContext {
        country: "France".into(),
        city: "Paris".into(),
        latitude: Some(48.85),
        longitude: None,
        is_fallback: false,
    }))
    .await;

    assert!(gateway.submit(&request).await.is_success());
    let body: Value = serde_json::from_str(&received.await.unwrap()).unwrap();
    assert!(body.get("location").is_none());
}

#[tokio::test]
async fn test_server_error_is_remote_failure() {
    let (url, _received) = serve_once(500, r#"{"error":"workflow failed"}"#).await;
    let gateway = HttpSearchGateway::new(&url).unwrap();

    match gateway.submit(&text_request(None).await).await {
        SearchOutcome::Failure(failure) => {
            assert_eq!(failure.kind, SearchErrorKind::Remote);
            assert_eq!(failure.status, Some(500));
            assert!(failure.detail.unwrap().contains("workflow failed"));
            assert!(!failure.message.is_empty());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_remote_failure() {
    let (url, _received) = serve_once(200, "<html>oops</html>").await;
    let gateway = HttpSearchGateway::new(&url).unwrap();

    match gateway.submit(&text_request(None).await).await {
        SearchOutcome::Failure(failure) => assert_eq!(failure.kind, SearchErrorKind::Remote),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_failure() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = HttpSearchGateway::new(&format!("http://{addr}/hook")).unwrap();
    match gateway.submit(&text_request(None).await).await {
        SearchOutcome::Failure(failure) => assert_eq!(failure.kind, SearchErrorKind::Transport),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_suggestions_endpoint() {
    let (url, _received) = serve_once(200, r#"{"suggestions":["phone case","phone repair"]}"#).await;
    let gateway = HttpSearchGateway::new("http://127.0.0.1:9/hook")
        .unwrap()
        .with_suggestions_url(&url)
        .unwrap();

    let suggestions = gateway.suggestions("phone", SearchType::Product).await;
    assert_eq!(suggestions, vec!["phone case", "phone repair"]);
}

#[tokio::test]
async fn test_trending_failure_yields_empty_list() {
    let (url, _received) = serve_once(503, "down").await;
    let gateway = HttpSearchGateway::new("http://127.0.0.1:9/hook")
        .unwrap()
        .with_trending_url(&url)
        .unwrap();

    assert!(gateway.trending(SearchType::All).await.is_empty());
}
