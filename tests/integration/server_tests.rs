//! HTTP endpoint tests with the router bound to a local listener
//!
//! The upstreams are mocked with wiremock; the router is exercised over a
//! real socket so the whole inbound-to-outbound path is covered.

use std::time::Duration;

use medtox::server::create_router;
use medtox::{ClientConfig, MedToxClient, RetryConfig, ToxicityReport};
use tokio::net::TcpListener;
use tracing_test::traced_test;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_happy_upstreams(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"/compound/name/.*/cids/JSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"IdentifierList": {"CID": [2244]}}"#.to_string()),
        )
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "esearchresult": {"count": "2", "retmax": "2", "idlist": ["111", "222"]}
        })))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": {
                "uids": ["111", "222"],
                "111": {"title": "First", "fulljournalname": "J1", "pubdate": "2020"},
                "222": {"title": "Second", "fulljournalname": "J2", "pubdate": "2021"}
            }
        })))
        .mount(mock_server)
        .await;
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server(mock_server: &MockServer) -> String {
    let config = ClientConfig::new()
        .with_pubchem_base_url(mock_server.uri())
        .with_pubmed_base_url(mock_server.uri())
        .with_min_interval(Duration::from_millis(5))
        .with_retry_config(RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(50),
        });
    let app = create_router(MedToxClient::with_config(&config));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });

    format!("http://{addr}")
}

#[tokio::test]
#[traced_test]
async fn test_toxicity_endpoint_returns_report() {
    let mock_server = MockServer::start().await;
    mount_happy_upstreams(&mock_server).await;
    let base = spawn_server(&mock_server).await;

    let response = reqwest::get(format!(
        "{base}/toxicity?drug=Aspirin&disease=Peptic+ulcer+disease&retmax=5"
    ))
    .await
    .expect("request should succeed");

    assert_eq!(response.status(), 200);

    let report: ToxicityReport = response.json().await.expect("body should deserialize");
    assert_eq!(report.drug, "Aspirin");
    assert_eq!(report.disease, "Peptic ulcer disease");
    assert_eq!(report.pubchem_cid, Some(2244));
    assert!(report.pubmed_term.contains("toxicity[Subheading]"));
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].pmid, "111");
    assert_eq!(report.results[0].title.as_deref(), Some("First"));
}

#[tokio::test]
#[traced_test]
async fn test_toxicity_endpoint_defaults_retmax() {
    let mock_server = MockServer::start().await;
    mount_happy_upstreams(&mock_server).await;
    let base = spawn_server(&mock_server).await;

    let response = reqwest::get(format!("{base}/toxicity?drug=Aspirin&disease=Hypertension"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);

    // The search request must carry the default cap of 10.
    let received = mock_server.received_requests().await.unwrap();
    let esearch = received
        .iter()
        .find(|r| r.url.path() == "/esearch.fcgi")
        .expect("esearch request was made");
    assert!(esearch.url.query().unwrap_or("").contains("retmax=10"));
}

#[tokio::test]
#[traced_test]
async fn test_empty_drug_is_rejected_without_upstream_calls() {
    let mock_server = MockServer::start().await;
    mount_happy_upstreams(&mock_server).await;
    let base = spawn_server(&mock_server).await;

    let response = reqwest::get(format!("{base}/toxicity?drug=&disease=Hypertension"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.expect("error body is JSON");
    assert!(body["error"]
        .as_str()
        .unwrap_or("")
        .contains("drug must not be empty"));

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 0, "validation must precede outbound calls");
}

#[tokio::test]
#[traced_test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;
    let base = spawn_server(&mock_server).await;

    let response = reqwest::get(format!("{base}/toxicity?drug=Aspirin&disease=Hypertension"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), 502);

    let body: serde_json::Value = response.json().await.expect("error body is JSON");
    let message = body["error"].as_str().unwrap_or("");
    assert!(message.contains("500"));
    assert!(message.contains("upstream exploded"));
}

#[tokio::test]
#[traced_test]
async fn test_health_endpoint() {
    let mock_server = MockServer::start().await;
    let base = spawn_server(&mock_server).await;

    let response = reqwest::get(format!("{base}/health"))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("body is JSON");
    assert_eq!(body["status"], "ok");
}
