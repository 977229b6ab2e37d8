#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use tgscrape::{FetchResponse, Fetcher, ScraperError};

/// Canned transport over fixture bodies. Unrouted URLs come back as 404
/// so a walk that strays off the expected pages fails loudly.
pub struct MockFetcher {
    routes: HashMap<String, FetchResponse>,
    log: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn route(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            FetchResponse {
                status: 200,
                body: body.to_string(),
                effective_url: url.to_string(),
            },
        );
        self
    }

    /// A route whose response lands on a different URL, as a redirect does.
    pub fn route_redirect(mut self, url: &str, effective_url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            FetchResponse {
                status: 200,
                body: body.to_string(),
                effective_url: effective_url.to_string(),
            },
        );
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl Fetcher for MockFetcher {
    fn fetch(
        &self,
        url: &str,
        _headers: &HashMap<String, String>,
    ) -> Result<FetchResponse, ScraperError> {
        self.log.borrow_mut().push(url.to_string());
        match self.routes.get(url) {
            Some(response) => Ok(response.clone()),
            None => Ok(FetchResponse {
                status: 404,
                body: String::new(),
                effective_url: url.to_string(),
            }),
        }
    }
}

/// Collects formatted log output so a test can assert on the warnings a
/// degraded parse emits. Plug into a scoped subscriber via
/// `tracing::subscriber::with_default`.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
