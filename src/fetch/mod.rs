//! HTTP client construction and quote page retrieval.

use anyhow::{Context, Result};
use chrono::Local;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, REFERER,
};
use reqwest::Client;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/77.0.3865.120 Safari/537.36";

/// A fetched quote page plus the local capture timestamp (`%Y%m%d%H%M%S`),
/// taken at request time. The timestamp feeds the summary's
/// `Query Timestamp` field and the Excel file name.
#[derive(Debug)]
pub struct FetchedPage {
    pub body: String,
    pub timestamp: String,
}

/// Build a client that simulates an ordinary Chrome request; Yahoo serves
/// different (and sometimes empty) markup to obvious bots.
pub fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(REFERER, HeaderValue::from_static("https://google.com"));

    Client::builder()
        .default_headers(headers)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")
}

/// Fetch one quote page. Non-success statuses are errors; retrying is left
/// to the caller's next run.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage> {
    let url = Url::parse(url).with_context(|| format!("invalid URL: {url}"))?;
    let timestamp = Local::now().format("%Y%m%d%H%M%S").to_string();
    let body = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("failed to read body from {url}"))?;
    Ok(FetchedPage { body, timestamp })
}
