use std::{fs, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Anything the viewer can re-read in full on every tick.
pub trait Source {
    fn fetch(&mut self) -> Result<String, SourceError>;

    /// Human readable locator, used in logs.
    fn describe(&self) -> String;
}

/// Picks an HTTP source for locators starting with `http`, a file otherwise.
pub fn open(locator: &str) -> Box<dyn Source> {
    if locator.starts_with("http") {
        Box::new(HttpSource::new(locator))
    } else {
        Box::new(FileSource::new(locator))
    }
}

#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn fetch(&mut self) -> Result<String, SourceError> {
        let bytes = fs::read(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Source for HttpSource {
    /// A failed request is fatal. A body that cannot be read yields empty
    /// content for this tick only.
    fn fetch(&mut self) -> Result<String, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|source| SourceError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered {}", self.url, status);
        }

        match response.text() {
            Ok(body) => Ok(body),
            Err(e) => {
                log::warn!("dropping unreadable body from {}: {}", self.url, e);
                Ok(String::new())
            }
        }
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
