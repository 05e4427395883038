//! Rate limiting tests against a mocked upstream
//!
//! Verify the minimum inter-call spacing for the PubMed service, including
//! under concurrent request-handling tasks, and that PubChem stays
//! unthrottled.

use std::time::{Duration, Instant};

use medtox::{ClientConfig, MedToxClient, RetryConfig};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERVAL: Duration = Duration::from_millis(200);

fn esearch_ok() -> serde_json::Value {
    serde_json::json!({
        "esearchresult": {"count": "1", "retmax": "1", "idlist": ["11111111"]}
    })
}

fn esummary_ok() -> serde_json::Value {
    serde_json::json!({
        "result": {
            "uids": ["11111111"],
            "11111111": {"title": "T", "fulljournalname": "J", "pubdate": "2020"}
        }
    })
}

async fn setup(mock_server: &MockServer) -> MedToxClient {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_ok()))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esummary_ok()))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"/compound/name/.*/cids/JSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"IdentifierList": {"CID": [2244]}}"#.to_string()),
        )
        .mount(mock_server)
        .await;

    let config = ClientConfig::new()
        .with_pubchem_base_url(mock_server.uri())
        .with_pubmed_base_url(mock_server.uri())
        .with_min_interval(INTERVAL)
        .with_retry_config(RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(50),
        });

    MedToxClient::with_config(&config)
}

#[tokio::test]
#[traced_test]
async fn test_search_then_summary_are_spaced() {
    let mock_server = MockServer::start().await;
    let client = setup(&mock_server).await;

    let start = Instant::now();
    let pmids = client
        .pubmed()
        .search("term", 10)
        .await
        .expect("search should succeed");
    client
        .pubmed()
        .summaries(&pmids)
        .await
        .expect("summaries should succeed");

    // The summary call must wait out the interval opened by the search.
    assert!(start.elapsed() >= INTERVAL);
}

#[tokio::test]
#[traced_test]
async fn test_consecutive_searches_are_spaced() {
    let mock_server = MockServer::start().await;
    let client = setup(&mock_server).await;

    let start = Instant::now();
    for _ in 0..3 {
        client
            .pubmed()
            .search("term", 10)
            .await
            .expect("search should succeed");
    }

    assert!(start.elapsed() >= INTERVAL * 2);
}

#[tokio::test]
#[traced_test]
async fn test_concurrent_tasks_cannot_race_past_the_limiter() {
    let mock_server = MockServer::start().await;
    let client = setup(&mock_server).await;

    let start = Instant::now();
    let mut handles = Vec::new();
    for _ in 0..4 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.pubmed().search("term", 10).await
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("task should not panic")
            .expect("search should succeed");
    }

    // Four calls from concurrent tasks still need three full intervals.
    assert!(start.elapsed() >= INTERVAL * 3);

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 4);
}

#[tokio::test]
#[traced_test]
async fn test_pubchem_is_not_rate_limited() {
    let mock_server = MockServer::start().await;
    let client = setup(&mock_server).await;

    let start = Instant::now();
    for _ in 0..3 {
        client
            .pubchem()
            .fetch_cid("Aspirin")
            .await
            .expect("lookup should succeed");
    }

    // Three PubChem lookups finish well inside one PubMed interval.
    assert!(start.elapsed() < INTERVAL);
}
