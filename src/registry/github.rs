use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::{LicenseCache, DEFAULT_TTL};
use crate::error::LicenseError;
use crate::models::{LicenseDetail, LicenseSummary};
use crate::registry::http::HttpFetch;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Cache key of the catalogue. Content keys are `license:<key>`, and since
/// license keys cannot contain `:` the two namespaces never overlap.
const LIST_CACHE_KEY: &str = "licenses";

/// Accessors for the GitHub license API (`/licenses` and `/licenses/{key}`).
///
/// The fetcher and cache are borrowed: `main` owns both for the lifetime of
/// the process.
pub struct GithubLicenses<'a> {
    fetcher: &'a dyn HttpFetch,
    cache: &'a dyn LicenseCache,
    base_url: String,
    ttl: Duration,
}

impl<'a> GithubLicenses<'a> {
    pub fn new(fetcher: &'a dyn HttpFetch, cache: &'a dyn LicenseCache) -> Self {
        Self {
            fetcher,
            cache,
            base_url: DEFAULT_BASE_URL.to_string(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Fetch the license catalogue, in the order the API returns it.
    pub async fn list_licenses(&self) -> Result<Vec<LicenseSummary>, LicenseError> {
        if let Some(cached) = self.cache.get(LIST_CACHE_KEY) {
            match serde_json::from_value::<Vec<LicenseSummary>>(cached) {
                Ok(licenses) => {
                    debug!(count = licenses.len(), "license list served from cache");
                    return Ok(licenses);
                }
                Err(e) => debug!(error = %e, "discarding unusable cached license list"),
            }
        }

        let url = format!("{}/licenses", self.base_url);
        let body = self.get_ok(&url).await?;

        let parsed: Value = serde_json::from_str(&body).map_err(|_| LicenseError::ParseList)?;
        let licenses: Vec<LicenseSummary> =
            serde_json::from_value(parsed.clone()).map_err(|_| LicenseError::ParseList)?;

        self.cache.put(LIST_CACHE_KEY, parsed, self.ttl);
        Ok(licenses)
    }

    /// Fetch the full text of the license identified by `key`.
    pub async fn license_content(&self, key: &str) -> Result<String, LicenseError> {
        if !is_valid_key(key) {
            return Err(LicenseError::InvalidKey(key.to_string()));
        }

        let cache_key = content_cache_key(key);
        if let Some(Value::String(text)) = self.cache.get(&cache_key) {
            debug!(key, "license content served from cache");
            return Ok(text);
        }

        let url = format!("{}/licenses/{}", self.base_url, key);
        let body = self.get_ok(&url).await?;

        let detail: LicenseDetail =
            serde_json::from_str(&body).map_err(|_| LicenseError::ParseContent)?;

        self.cache
            .put(&cache_key, Value::String(detail.body.clone()), self.ttl);
        Ok(detail.body)
    }

    /// GET `url` and return the body, failing on anything but `200 OK`.
    async fn get_ok(&self, url: &str) -> Result<String, LicenseError> {
        let response = self.fetcher.get(url).await?;
        if response.status != 200 {
            return Err(LicenseError::Status {
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

fn content_cache_key(key: &str) -> String {
    format!("license:{}", key)
}

/// License keys are single URL path segments such as `mit` or `bsd-3-clause`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"._-".contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::cache::NoCache;
    use crate::testing::{FakeFetcher, BASE_URL};

    const LIST: &str = r#"[
        {"key": "mit", "name": "MIT License", "spdx_id": "MIT"},
        {"key": "apache-2.0", "name": "Apache License 2.0", "spdx_id": "Apache-2.0"}
    ]"#;

    fn api<'a>(fetcher: &'a FakeFetcher, cache: &'a dyn LicenseCache) -> GithubLicenses<'a> {
        GithubLicenses::new(fetcher, cache).with_base_url(BASE_URL)
    }

    #[tokio::test]
    async fn test_list_returns_parsed_array_in_order() {
        let fetcher = FakeFetcher::new().respond("/licenses", 200, LIST);
        let licenses = api(&fetcher, &NoCache).list_licenses().await.unwrap();

        assert_eq!(
            licenses,
            vec![
                LicenseSummary {
                    key: "mit".to_string(),
                    name: "MIT License".to_string()
                },
                LicenseSummary {
                    key: "apache-2.0".to_string(),
                    name: "Apache License 2.0".to_string()
                },
            ]
        );
        assert_eq!(fetcher.requests(), vec![format!("{}/licenses", BASE_URL)]);
    }

    #[tokio::test]
    async fn test_list_keeps_duplicates_and_order() {
        let body = r#"[
            {"key": "zlib", "name": "zlib License"},
            {"key": "mit", "name": "MIT License"},
            {"key": "mit", "name": "MIT License (again)"}
        ]"#;
        let fetcher = FakeFetcher::new().respond("/licenses", 200, body);
        let licenses = api(&fetcher, &NoCache).list_licenses().await.unwrap();

        let keys: Vec<_> = licenses.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["zlib", "mit", "mit"]);
    }

    #[tokio::test]
    async fn test_non_200_reports_status_code() {
        let fetcher = FakeFetcher::new().respond("/licenses", 500, "oops");
        let cache = NoCache;
        let api = api(&fetcher, &cache);

        let err = api.list_licenses().await.unwrap_err();
        assert!(matches!(err, LicenseError::Status { status: 500 }));
        assert!(err.to_string().contains("500"));

        // Unrouted URLs answer 404.
        let err = api.license_content("nope").await.unwrap_err();
        assert!(matches!(err, LicenseError::Status { status: 404 }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_a_parse_error() {
        let fetcher = FakeFetcher::new()
            .respond("/licenses", 200, "<html>")
            .respond("/licenses/mit", 200, "{not json");
        let cache = NoCache;
        let api = api(&fetcher, &cache);

        let list_err = api.list_licenses().await.unwrap_err();
        assert!(matches!(list_err, LicenseError::ParseList));

        let content_err = api.license_content("mit").await.unwrap_err();
        assert!(matches!(content_err, LicenseError::ParseContent));

        assert_ne!(list_err.to_string(), content_err.to_string());
        assert!(!list_err.to_string().contains("status code"));
    }

    #[tokio::test]
    async fn test_content_without_body_field_is_a_parse_error() {
        let fetcher = FakeFetcher::new().respond("/licenses/mit", 200, r#"{"key": "mit"}"#);
        let err = api(&fetcher, &NoCache).license_content("mit").await.unwrap_err();
        assert!(matches!(err, LicenseError::ParseContent));
    }

    #[tokio::test]
    async fn test_content_extracts_body() {
        let fetcher = FakeFetcher::new().respond(
            "/licenses/mit",
            200,
            r#"{"key": "mit", "name": "MIT License", "body": "MIT License text..."}"#,
        );
        let text = api(&fetcher, &NoCache).license_content("mit").await.unwrap();
        assert_eq!(text, "MIT License text...");
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let fetcher = FakeFetcher::new().fail("/licenses", "connection refused");
        let err = api(&fetcher, &NoCache).list_licenses().await.unwrap_err();
        match err {
            LicenseError::Transport(msg) => assert_eq!(msg, "connection refused"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cached_list_skips_network() {
        let fetcher = FakeFetcher::new().respond("/licenses", 200, LIST);
        let cache = MemoryCache::new();
        let api = api(&fetcher, &cache);

        let first = api.list_licenses().await.unwrap();
        let second = api.list_licenses().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_fetches_again() {
        let fetcher = FakeFetcher::new().respond("/licenses", 200, LIST);
        let cache = MemoryCache::new();
        let api = api(&fetcher, &cache).with_ttl(Duration::ZERO);

        api.list_licenses().await.unwrap();
        api.list_licenses().await.unwrap();

        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn test_content_cache_is_per_key() {
        let fetcher = FakeFetcher::new()
            .respond("/licenses/mit", 200, r#"{"body": "MIT text"}"#)
            .respond("/licenses/apache-2.0", 200, r#"{"body": "Apache text"}"#);
        let cache = MemoryCache::new();
        let api = api(&fetcher, &cache);

        assert_eq!(api.license_content("mit").await.unwrap(), "MIT text");
        assert_eq!(api.license_content("apache-2.0").await.unwrap(), "Apache text");
        assert_eq!(api.license_content("mit").await.unwrap(), "MIT text");
        assert_eq!(api.license_content("apache-2.0").await.unwrap(), "Apache text");
        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn test_content_cache_does_not_shadow_list() {
        let fetcher = FakeFetcher::new()
            .respond("/licenses", 200, LIST)
            .respond("/licenses/mit", 200, r#"{"body": "MIT text"}"#);
        let cache = MemoryCache::new();
        let api = api(&fetcher, &cache);

        api.license_content("mit").await.unwrap();
        let licenses = api.list_licenses().await.unwrap();
        assert_eq!(licenses.len(), 2);
        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let fetcher = FakeFetcher::new().respond("/licenses", 503, "");
        let cache = MemoryCache::new();
        let api = api(&fetcher, &cache);

        assert!(api.list_licenses().await.is_err());
        assert!(api.list_licenses().await.is_err());
        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn test_invalid_key_makes_no_request() {
        let fetcher = FakeFetcher::new();
        let err = api(&fetcher, &NoCache)
            .license_content("../../etc/passwd")
            .await
            .unwrap_err();
        assert!(matches!(err, LicenseError::InvalidKey(_)));
        assert_eq!(fetcher.request_count(), 0);
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("mit"));
        assert!(is_valid_key("apache-2.0"));
        assert!(is_valid_key("bsd-3-clause"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key(".."));
        assert!(!is_valid_key("a/b"));
        assert!(!is_valid_key("mit?x=1"));
        assert!(!is_valid_key("mit "));
        assert!(!is_valid_key("licence:mit"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let fetcher = FakeFetcher::new();
        let api = GithubLicenses::new(&fetcher, &NoCache).with_base_url("https://api.test/");
        assert_eq!(api.base_url, "https://api.test");
    }
}
