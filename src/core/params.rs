//! Request parameter access
//!
//! Hosts hand requests to the selector in different shapes: a real HTTP
//! request arriving through axum, or a hand-built request in a test harness.
//! Both are reduced to two small capabilities:
//!
//! - [`QueryLookup`]: "give me the value of parameter `key`, if any"
//! - [`RequestView`]: "give me your query parameters, if you have any"

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::http::{Method, Uri};
use axum::http::request::Parts;
use std::collections::{BTreeMap, HashMap};

/// Lookup of a single query parameter by key
pub trait QueryLookup {
    /// Value of the parameter, or `None` when it is absent
    ///
    /// A parameter given without a value (`?fields`) is present with an
    /// empty string.
    fn get_param(&self, key: &str) -> Option<&str>;
}

impl QueryLookup for HashMap<String, String> {
    fn get_param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl QueryLookup for BTreeMap<String, String> {
    fn get_param(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Non-string values cannot carry a directive and read as absent
impl QueryLookup for serde_json::Map<String, serde_json::Value> {
    fn get_param(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_json::Value::as_str)
    }
}

/// Decoded query string, as ordered `(key, value)` pairs
///
/// Keys may repeat; lookups return the last value, the way most web
/// frameworks resolve `?a=1&a=2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    pairs: Vec<(String, String)>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string (without the leading `?`)
    ///
    /// Decoding is lenient: spaces, `#` and stray `%` are kept as data.
    pub fn parse(query: &str) -> Self {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .unwrap_or_else(|err| {
                tracing::debug!(error = %err, "Failed to decode query string, ignoring it");
                Vec::new()
            });
        Self { pairs }
    }

    /// Decode the query string of a URI
    pub fn from_uri(uri: &Uri) -> Result<Self, QueryRejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)?;
        Ok(Self { pairs })
    }

    /// Append a pair, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl QueryLookup for QueryMap {
    fn get_param(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A request that may expose a query-parameter container
pub trait RequestView: Send + Sync {
    /// The request's query parameters, or `None` if this request has none
    fn query_params(&self) -> Option<&dyn QueryLookup>;
}

/// Production request flavor, built from an incoming HTTP request
///
/// A query string that cannot be decoded leaves the request without a
/// parameter container.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    query: Option<QueryMap>,
}

impl HttpRequest {
    /// Build from the parts of an axum request
    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(&parts.method, &parts.uri)
    }

    /// Build a GET request for a URI
    pub fn get(uri: Uri) -> Self {
        Self::new(&Method::GET, &uri)
    }

    fn new(method: &Method, uri: &Uri) -> Self {
        let query = match QueryMap::from_uri(uri) {
            Ok(query) => Some(query),
            Err(rejection) => {
                tracing::debug!(
                    method = %method,
                    uri = %uri,
                    error = %rejection,
                    "Failed to decode query string"
                );
                None
            }
        };
        Self { query }
    }
}

impl RequestView for HttpRequest {
    fn query_params(&self) -> Option<&dyn QueryLookup> {
        self.query.as_ref().map(|q| q as &dyn QueryLookup)
    }
}

/// Test-harness request flavor, built by hand
///
/// # Example
/// ```rust,ignore
/// let request = TestRequest::new().param("fields", "id,name");
/// let bare = TestRequest::without_params();
/// ```
#[derive(Debug, Clone)]
pub struct TestRequest {
    params: Option<QueryMap>,
}

impl TestRequest {
    /// A request with an empty parameter container
    pub fn new() -> Self {
        Self {
            params: Some(QueryMap::new()),
        }
    }

    /// A request with no parameter container at all
    pub fn without_params() -> Self {
        Self { params: None }
    }

    /// A request whose parameters come from a raw query string
    pub fn from_query(query: &str) -> Self {
        Self {
            params: Some(QueryMap::parse(query)),
        }
    }

    /// Add a parameter, builder style
    pub fn param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let params = self.params.unwrap_or_default().with(key, value);
        Self {
            params: Some(params),
        }
    }
}

impl Default for TestRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestView for TestRequest {
    fn query_params(&self) -> Option<&dyn QueryLookup> {
        self.params.as_ref().map(|q| q as &dyn QueryLookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_map_parse() {
        let params = QueryMap::parse("fields=id,name&omit=email");
        assert_eq!(params.get_param("fields"), Some("id,name"));
        assert_eq!(params.get_param("omit"), Some("email"));
        assert_eq!(params.get_param("page"), None);
    }

    #[test]
    fn test_query_map_key_without_value() {
        let params = QueryMap::parse("fields");
        assert_eq!(params.get_param("fields"), Some(""));

        let params = QueryMap::parse("fields=");
        assert_eq!(params.get_param("fields"), Some(""));
    }

    #[test]
    fn test_query_map_percent_decoding() {
        let params = QueryMap::parse("fields=id%2Cname");
        assert_eq!(params.get_param("fields"), Some("id,name"));
    }

    #[test]
    fn test_query_map_keeps_spaces_and_hashes() {
        let params = QueryMap::parse("fields=id name");
        assert_eq!(params.get_param("fields"), Some("id name"));

        let params = QueryMap::parse("fields=id#name&omit=url");
        assert_eq!(params.get_param("fields"), Some("id#name"));
        assert_eq!(params.get_param("omit"), Some("url"));
    }

    #[test]
    fn test_test_request_from_raw_query_always_has_params() {
        for query in ["fields=id name", "fields=id#name", "%zz", ""] {
            let request = TestRequest::from_query(query);
            assert!(request.query_params().is_some(), "query {query:?}");
        }

        let request = TestRequest::from_query("fields=id#name");
        assert_eq!(
            request.query_params().and_then(|p| p.get_param("fields")),
            Some("id#name")
        );
    }

    #[test]
    fn test_query_map_last_value_wins() {
        let params = QueryMap::parse("fields=id&fields=name");
        assert_eq!(params.get_param("fields"), Some("name"));
    }

    #[test]
    fn test_query_map_from_uri_without_query() {
        let uri: Uri = "/users".parse().unwrap();
        let params = QueryMap::from_uri(&uri).expect("empty query decodes");
        assert!(params.is_empty());
    }

    #[test]
    fn test_query_map_from_iter() {
        let params: QueryMap = [("fields", "id"), ("omit", "url")].into_iter().collect();
        assert_eq!(params.pairs().len(), 2);
        assert_eq!(params.get_param("omit"), Some("url"));
    }

    #[test]
    fn test_hash_map_lookup() {
        let mut params = HashMap::new();
        params.insert("fields".to_string(), "id".to_string());
        assert_eq!(params.get_param("fields"), Some("id"));
        assert_eq!(params.get_param("omit"), None);
    }

    #[test]
    fn test_json_map_non_string_is_absent() {
        let value = serde_json::json!({ "fields": ["id", "name"], "omit": "email" });
        let params = value.as_object().unwrap();
        assert_eq!(params.get_param("fields"), None);
        assert_eq!(params.get_param("omit"), Some("email"));
    }

    #[test]
    fn test_http_request_exposes_query() {
        let request = HttpRequest::get("/users?fields=id".parse().unwrap());
        let params = request.query_params().expect("query container");
        assert_eq!(params.get_param("fields"), Some("id"));
    }

    #[test]
    fn test_test_request_flavors() {
        let request = TestRequest::new().param("fields", "id").param("omit", "url");
        let params = request.query_params().expect("query container");
        assert_eq!(params.get_param("fields"), Some("id"));
        assert_eq!(params.get_param("omit"), Some("url"));

        assert!(TestRequest::without_params().query_params().is_none());
        assert!(TestRequest::default().query_params().is_some());

        let request = TestRequest::from_query("omit=email");
        assert_eq!(
            request.query_params().and_then(|p| p.get_param("omit")),
            Some("email")
        );
    }
}
