//! HTTP client for the listings API.
//!
//! Issues `GET {base}/api/listings?page=..&perPage=..[&name=..]` and decodes
//! the JSON array of listings.

use crate::config::Config;
use crate::error::FetchError;
use crate::listings::models::{Listing, PER_PAGE};
use anyhow::{Context, Result};
use reqwest::{Client, Request};
use std::future::Future;
use std::time::Duration;

/// Query parameters of one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number
    pub page: u32,
    /// Records per page
    pub per_page: u32,
    /// Name filter, sent only when present
    pub name: Option<String>,
}

impl PageQuery {
    /// Create a query for `page` with the fixed page size.
    pub fn new(page: u32, name: Option<String>) -> Self {
        Self {
            page,
            per_page: PER_PAGE,
            name,
        }
    }

    /// Query string pairs in request order.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
        ];
        if let Some(name) = &self.name {
            params.push(("name", name.clone()));
        }
        params
    }
}

/// Something that can fetch one page of listings.
pub trait ListingsSource {
    /// Fetch the listings for `query`.
    ///
    /// # Returns
    /// * `Result<Vec<Listing>, FetchError>` - Listings in server order, possibly empty
    fn fetch_page(
        &self,
        query: &PageQuery,
    ) -> impl Future<Output = Result<Vec<Listing>, FetchError>> + Send;
}

/// Listings API client.
#[derive(Debug, Clone)]
pub struct ListingsClient {
    /// HTTP client for API requests
    client: Client,
    /// API base URL without the `/api/listings` path
    base_url: String,
}

impl ListingsClient {
    /// Create a new client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<ListingsClient>` - New client or error
    ///
    /// # Details
    /// The base URL comes from `Config::api_base_url()`. No request timeout is
    /// set unless `request_timeout_secs` is configured.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url(),
        })
    }

    /// Full URL of the listings endpoint.
    pub fn listings_url(&self) -> String {
        format!("{}/api/listings", self.base_url.trim_end_matches('/'))
    }

    /// Build the GET request for `query` without sending it.
    pub fn build_request(&self, query: &PageQuery) -> Result<Request, FetchError> {
        self.client
            .get(self.listings_url())
            .query(&query.params())
            .build()
            .map_err(FetchError::Transport)
    }

    /// Fetch one page of listings.
    ///
    /// # Arguments
    /// * `query` - Page, page size and optional name filter
    ///
    /// # Returns
    /// * `Result<Vec<Listing>, FetchError>` - Listings or error
    ///
    /// # Details
    /// Non-2xx statuses and bodies that are not a JSON array are errors; an
    /// empty array is a valid, empty page.
    pub async fn fetch_listings(&self, query: &PageQuery) -> Result<Vec<Listing>, FetchError> {
        let request = self.build_request(query)?;
        log::debug!("GET {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        log::info!("Response status: {}", status);
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let listings = parse_listings(&body)?;

        log::debug!("Fetched {} listings for page {}", listings.len(), query.page);
        Ok(listings)
    }
}

/// Decode a response body into listings.
///
/// An empty array is a valid, empty page. Anything that is not a JSON array
/// is a `FetchError::Decode`.
pub fn parse_listings(body: &[u8]) -> Result<Vec<Listing>, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))
}

impl ListingsSource for ListingsClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Listing>, FetchError> {
        self.fetch_listings(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ListingsClient {
        let config = Config {
            api_base_url: Some(base.to_string()),
            ..Config::default()
        };
        ListingsClient::new(&config).unwrap()
    }

    #[test]
    fn test_request_url_without_name() {
        let client = client("https://listings.example.com");
        let request = client.build_request(&PageQuery::new(3, None)).unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://listings.example.com/api/listings?page=3&perPage=10"
        );
        assert_eq!(request.method(), &reqwest::Method::GET);
    }

    #[test]
    fn test_request_url_with_encoded_name() {
        let client = client("https://listings.example.com/");
        let request = client
            .build_request(&PageQuery::new(1, Some("Loft & View".to_string())))
            .unwrap();
        assert_eq!(
            request.url().query(),
            Some("page=1&perPage=10&name=Loft+%26+View")
        );
    }

    #[test]
    fn test_parse_empty_array_is_empty_page() {
        assert!(parse_listings(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array_bodies() {
        assert!(matches!(
            parse_listings(br#"{"error":"listing not found"}"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(
            parse_listings(b"<html>502 Bad Gateway</html>"),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(parse_listings(b""), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_parse_keeps_server_order() {
        let listings =
            parse_listings(br#"[{"_id":"b","name":"Second"},{"_id":"a","name":"First"}]"#).unwrap();
        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_listings_url_strips_trailing_slash() {
        assert_eq!(
            client("http://localhost:8080/").listings_url(),
            "http://localhost:8080/api/listings"
        );
    }
}
