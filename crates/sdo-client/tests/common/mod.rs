//! Shared helpers for sdo-client integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use bytes::Bytes;
use sdo_client::{ImageApiError, ImageApiResult, Transport};

/// In-memory transport that counts calls and can fail on a given call.
pub struct CountingTransport {
    body: Bytes,
    fail_on_call: Option<usize>,
    calls: Cell<usize>,
    urls: RefCell<Vec<String>>,
}

impl CountingTransport {
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            body: Bytes::from(body),
            fail_on_call: None,
            calls: Cell::new(0),
            urls: RefCell::new(Vec::new()),
        }
    }

    /// Answer with a PNG of the given size.
    pub fn png(width: u32, height: u32) -> Self {
        Self::new(test_utils::png_bytes(width, height))
    }

    /// Return HTTP 503 on the `n`th call (1-based).
    pub fn failing_on(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }
}

impl Transport for CountingTransport {
    fn get(&self, url: &str) -> ImageApiResult<Bytes> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        self.urls.borrow_mut().push(url.to_string());

        if self.fail_on_call == Some(n) {
            return Err(ImageApiError::HttpStatus {
                url: url.to_string(),
                status: 503,
            });
        }
        Ok(self.body.clone())
    }
}
