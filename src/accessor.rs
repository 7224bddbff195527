use log::debug;
use xml::writer::EmitterConfig;
use xmltree::Element;

use crate::http::{Response, Transport};
use crate::{Config, Error, Result};

/// Fetches and saves testcase XML files on a Katana server.
///
/// Payloads pass through untouched in both directions. Every call issues a
/// single request and never retries.
pub struct TestcaseAccessor<T = reqwest::Client> {
    base_url: String,
    transport: T,
}

impl TestcaseAccessor<reqwest::Client> {
    pub fn new(base_url: impl Into<String>) -> Self {
        TestcaseAccessor::with_transport(base_url, reqwest::Client::new())
    }

    pub fn from_config(config: &Config) -> Self {
        TestcaseAccessor::new(config.base_url.as_str())
    }
}

impl<T> TestcaseAccessor<T> {
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        TestcaseAccessor {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Segments are concatenated as given, without escaping.
    pub fn testcase_url(&self, testcase: &str, subdirs: &str) -> String {
        format!("{}/testcase/{}/{}", self.base_url, testcase, subdirs)
    }

    pub fn save_url(&self, filename: &str, subdirs: &str) -> String {
        format!("{}/savetestcase/{}/{}", self.base_url, filename, subdirs)
    }
}

impl<T: Transport> TestcaseAccessor<T> {
    /// Fetch the testcase XML stored at `testcase` under `subdirs`.
    pub async fn fetch(&self, testcase: &str, subdirs: &str) -> Result<String> {
        let url = self.testcase_url(testcase, subdirs);
        match self.transport.get(&url).await {
            Ok(res) if res.status.is_success() => Ok(res.body),
            Ok(Response { status, headers, .. }) => Err(Error::FetchFailed {
                status: status.as_u16(),
                headers,
            }),
            Err(e) => {
                debug!("fetch {} failed: {}", url, e);
                Err(Error::FetchFailed {
                    status: e.status(),
                    headers: e.headers(),
                })
            }
        }
    }

    /// Post `payload` as the new content of `filename` under `subdirs`.
    ///
    /// Returns the server's reply body.
    pub async fn save(
        &self,
        filename: &str,
        subdirs: &str,
        payload: impl Into<String>,
    ) -> Result<String> {
        let url = self.save_url(filename, subdirs);
        match self.transport.post(&url, payload.into()).await {
            Ok(res) if res.status.is_success() => Ok(res.body),
            Ok(Response { status, headers, .. }) => Err(Error::SaveFailed {
                filename: filename.to_string(),
                status: status.as_u16(),
                headers,
            }),
            Err(e) => {
                debug!("save {} failed: {}", url, e);
                Err(Error::SaveFailed {
                    filename: filename.to_string(),
                    status: e.status(),
                    headers: e.headers(),
                })
            }
        }
    }

    /// Like [`fetch`](Self::fetch), parsing the body into an XML tree.
    pub async fn fetch_element(&self, testcase: &str, subdirs: &str) -> Result<Element> {
        let body = self.fetch(testcase, subdirs).await?;
        Ok(Element::parse(body.as_bytes())?)
    }

    /// Like [`save`](Self::save), serializing `element` as the payload.
    pub async fn save_element(
        &self,
        filename: &str,
        subdirs: &str,
        element: &Element,
    ) -> Result<String> {
        let mut buf = Vec::new();
        element.write_with_config(&mut buf, EmitterConfig::new())?;
        let xml = String::from_utf8_lossy(&buf).into_owned();
        self.save(filename, subdirs, xml).await
    }
}
