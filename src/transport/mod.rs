//! Network transport
//!
//! All network access goes through [`Transport`]: one blocking GET per call,
//! no timeout and no retry. Operators re-run the tool to retry.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

use crate::ui::ProgressReporter;

const USER_AGENT: &str = concat!("sqlite-setup/", env!("CARGO_PKG_VERSION"));
const CHUNK_SIZE: usize = 32 * 1024;

/// Transfer failure, mapped by callers onto the setup error taxonomy
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Blocking HTTP capability
pub trait Transport {
    /// Fetch a document as text; non-success responses are errors
    fn get_text(&self, url: &str) -> Result<String, TransportError>;

    /// Stream a response body into `dest`, returning the byte count
    fn download_to(
        &self,
        url: &str,
        dest: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> Result<u64, TransportError>;
}

/// `reqwest` backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, TransportError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &str) -> Result<String, TransportError> {
        self.get(url)?
            .text()
            .map_err(|e| TransportError::Request(e.to_string()))
    }

    fn download_to(
        &self,
        url: &str,
        dest: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> Result<u64, TransportError> {
        let mut response = self.get(url)?;
        let label = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.start(&label, response.content_length());

        let result = copy_body(&mut response, dest, progress);
        match result {
            Ok(_) => progress.finish(),
            Err(_) => progress.abandon(),
        }
        result
    }
}

fn copy_body(
    reader: &mut dyn Read,
    dest: &Path,
    progress: &mut dyn ProgressReporter,
) -> Result<u64, TransportError> {
    let mut file = File::create(dest)?;
    let mut downloaded = 0u64;
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])?;
        downloaded += read as u64;
        progress.advance(downloaded);
    }
    file.flush()?;
    Ok(downloaded)
}
