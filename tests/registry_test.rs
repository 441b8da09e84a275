//! Integration tests for the registry composition and cached lookups

use lookout::config::Config;
use lookout::registry::Registry;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.lookup.base_url = base_url.to_string();
    config.lookup.rate_limit = 1000;
    config
}

/// A cached lookup hits the remote exactly once across repeat calls
#[tokio::test]
async fn test_cached_lookup_hits_remote_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"login": "octocat"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let registry = Registry::from_config(test_config(&server.uri())).unwrap();

    let first = registry.cached_lookup("octocat").await.unwrap();
    let second = registry.cached_lookup("octocat").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(registry.cache().stats().hits, 1);
}

/// Disabling the cache routes every call to the remote
#[tokio::test]
async fn test_cache_disabled_always_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"login": "octocat"}"#),
        )
        .expect(2)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.cache.enabled = false;
    let registry = Registry::from_config(config).unwrap();

    registry.cached_lookup("octocat").await.unwrap();
    registry.cached_lookup("octocat").await.unwrap();

    assert!(registry.cache().is_empty());
}

/// A failed lookup is not cached; the next call tries the remote again
#[tokio::test]
async fn test_failed_lookup_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"login": "flaky"}"#))
        .mount(&server)
        .await;

    let registry = Registry::from_config(test_config(&server.uri())).unwrap();

    assert!(registry.cached_lookup("flaky").await.is_err());
    let profile = registry.cached_lookup("flaky").await.unwrap();
    assert_eq!(profile.login, "flaky");
}

/// Registry batches behave like the coordinator's
#[tokio::test]
async fn test_registry_run_batch() {
    let server = MockServer::start().await;
    for login in ["a", "b"] {
        Mock::given(method("GET"))
            .and(path(format!("/users/{login}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#"{{"login": "{login}"}}"#)),
            )
            .mount(&server)
            .await;
    }

    let registry = Registry::from_config(test_config(&server.uri())).unwrap();
    let report = registry.run_batch(["a", "b"]).await;

    assert_eq!(report.total(), 2);
    assert_eq!(report.success_count(), 2);
}
