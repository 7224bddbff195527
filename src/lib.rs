//! Access Katana testcase XML files over the Katana REST API.
//!
//! ```no_run
//! use katana_testcase::TestcaseAccessor;
//!
//! # async fn run() -> katana_testcase::Result<()> {
//! let accessor = TestcaseAccessor::new("http://127.0.0.1:5000");
//! let xml = accessor.fetch("smoke.xml", "suite1").await?;
//! let reply = accessor.save("smoke.xml", "suite1", xml).await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

mod accessor;
mod config;
pub mod http;

pub use crate::accessor::TestcaseAccessor;
pub use crate::config::Config;
pub use crate::http::{Headers, Response, StatusCode, Transport};

use std::result;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Status line and headers arrived but the body could not be read.
    #[error("Failed to read response body ({status}): {source}")]
    Body {
        status: u16,
        headers: Headers,
        source: reqwest::Error,
    },
    /// Retrieval failed, either with a non-2xx status or before any response.
    #[error("Error fetching Testcase XML file: {status} {headers}")]
    FetchFailed { status: u16, headers: Headers },
    /// Persisting failed, either with a non-2xx status or before any response.
    #[error("Error while saving testcase xml: {filename} {status} {headers}")]
    SaveFailed {
        filename: String,
        status: u16,
        headers: Headers,
    },
    #[error("Invalid testcase XML: {0}")]
    Xml(#[from] xmltree::ParseError),
    #[error("Failed to write testcase XML: {0}")]
    XmlWrite(#[from] xml::writer::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status carried by the error, 0 when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            Error::Http(e) => e.status().map_or(0, |s| s.as_u16()),
            Error::Body { status, .. }
            | Error::FetchFailed { status, .. }
            | Error::SaveFailed { status, .. } => *status,
            _ => 0,
        }
    }

    /// Response headers carried by the error, empty when no response was received.
    pub fn headers(&self) -> Headers {
        match self {
            Error::Body { headers, .. }
            | Error::FetchFailed { headers, .. }
            | Error::SaveFailed { headers, .. } => headers.clone(),
            _ => Headers::new(),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
