//! HTTP helpers.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub use reqwest::StatusCode;

use crate::{Error, Result};

/// Simplified HTTP response representation.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Headers,
    pub body: String,
}

impl Response {
    async fn read(res: reqwest::Response) -> Result<Response> {
        let status = res.status();
        let headers = Headers::from(res.headers());
        let body = match res.text().await {
            Ok(body) => body,
            Err(source) => {
                return Err(Error::Body {
                    status: status.as_u16(),
                    headers,
                    source,
                })
            }
        };
        debug!("<- {} ({} bytes)", status, body.len());

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

/// Response headers as a flat name to value map.
///
/// Repeated header names are joined with `", "`. Displayed as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    pub fn new() -> Headers {
        Headers::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&HeaderMap> for Headers {
    fn from(map: &HeaderMap) -> Headers {
        let mut headers = BTreeMap::<String, String>::new();
        for (name, value) in map {
            let value = String::from_utf8_lossy(value.as_bytes());
            headers
                .entry(name.as_str().to_string())
                .and_modify(|joined| {
                    joined.push_str(", ");
                    joined.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }
        Headers(headers)
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("{}"),
        }
    }
}

/// Minimal async HTTP client used by the accessor.
///
/// Any completed exchange is `Ok`, whatever its status code. `Err` is reserved
/// for requests that never produced a response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request to specified URL.
    async fn get(&self, url: &str) -> Result<Response>;

    /// POST an XML document to specified URL.
    async fn post(&self, url: &str, xml: String) -> Result<Response>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn get(&self, url: &str) -> Result<Response> {
        debug!("-> GET {}", url);
        let res = reqwest::Client::get(self, url).send().await?;
        Response::read(res).await
    }

    async fn post(&self, url: &str, xml: String) -> Result<Response> {
        debug!("-> POST {} ({} bytes)", url, xml.len());
        let res = reqwest::Client::post(self, url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(xml)
            .send()
            .await?;
        Response::read(res).await
    }
}
