//! Provider sync against mocked endpoints

use mcp_catalog::catalog::{CatalogAggregator, ServiceRegistry, Transport};
use mcp_catalog::config::HttpClientConfig;
use mcp_catalog::providers::{
    HttpFetcher, ProviderConfig, ProviderFetcher, ProviderKind, ProviderSyncService,
};
use mcp_catalog::utils::errors::CatalogError;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_provider(id: &str, endpoint: String, normalizer: &str) -> ProviderConfig {
    ProviderConfig {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        kind: ProviderKind::Api,
        endpoint,
        enabled: true,
        homepage: None,
        normalizer: Some(normalizer.to_string()),
    }
}

fn empty_catalog() -> Arc<CatalogAggregator> {
    Arc::new(CatalogAggregator::new(ServiceRegistry::from_entries(Vec::new()).unwrap()))
}

fn fetcher() -> Arc<HttpFetcher> {
    Arc::new(HttpFetcher::new(&HttpClientConfig::default()).unwrap())
}

async fn mock_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/aitempl.json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mcps": [
                {
                    "name": "postgres",
                    "description": "Query Postgres",
                    "category": "database",
                    "downloads": 42,
                    "content": "{\"mcpServers\":{\"postgres\":{\"command\":\"uvx\",\"args\":[\"mcp-postgres\"],\"env\":{\"DATABASE_URL\":\"postgres://localhost\"}}}}"
                },
                {
                    "name": "broken",
                    "content": "{not json"
                },
                "not a record"
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/canonical.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": "1.0.0",
            "servers": [{
                "id": "remote-docs",
                "name": "Remote Docs",
                "description": "Hosted documentation search",
                "category": "documentation",
                "icon": "book",
                "source": "official",
                "version": "2.0.0",
                "transport": "sse",
                "configuration": { "template": { "type": "sse", "url": "https://docs.example.com/sse" } }
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/down.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_http_fetcher_reports_status() {
    let server = mock_server().await;
    let fetcher = fetcher();

    let ok = fetcher
        .fetch(&api_provider("aitempl", format!("{}/aitempl.json", server.uri()), "aitempl"))
        .await
        .unwrap();
    assert!(ok["mcps"].is_array());

    let err = fetcher
        .fetch(&api_provider("down", format!("{}/down.json", server.uri()), "aitempl"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_aitempl_provider_normalizes() {
    let server = mock_server().await;
    let sync = ProviderSyncService::new(
        vec![api_provider("aitempl", format!("{}/aitempl.json", server.uri()), "aitempl")],
        empty_catalog(),
        fetcher(),
    );

    let servers = sync.sync_provider("aitempl").await.unwrap();
    assert_eq!(servers.len(), 2);

    let postgres = &servers[0];
    assert_eq!(postgres.id, "aitempl-postgres");
    assert_eq!(postgres.transport, Transport::Stdio);
    let template = postgres.template().as_stdio().unwrap();
    assert_eq!(template.command, "uvx");
    assert!(postgres.inputs.contains_key("DATABASE_URL"));

    let broken = servers[1].template().as_stdio().unwrap();
    assert_eq!(broken.command, "npx");
    assert!(broken.args.is_empty());
    assert!(broken.env.is_empty());
}

#[tokio::test]
async fn test_sync_all_survives_one_failure() {
    let server = mock_server().await;
    let sync = ProviderSyncService::new(
        vec![
            api_provider("aitempl", format!("{}/aitempl.json", server.uri()), "aitempl"),
            api_provider("down", format!("{}/down.json", server.uri()), "aitempl"),
            api_provider("mirror", format!("{}/canonical.json", server.uri()), "canonical"),
        ],
        empty_catalog(),
        fetcher(),
    );

    let all = sync.sync_all().await;
    let providers: Vec<Option<&str>> = all.iter().map(|d| d.provider.as_deref()).collect();
    assert_eq!(all.len(), 3);
    assert!(providers.iter().all(|p| *p != Some("down")));
    assert_eq!(all.last().map(|d| d.id.as_str()), Some("remote-docs"));

    assert!(matches!(
        sync.sync_provider("down").await,
        Err(CatalogError::ProviderSync { .. })
    ));
    assert!(sync.find_server("remote-docs").await.is_some());
}
