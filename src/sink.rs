//! Response sink abstraction.
//!
//! The library stays framework-agnostic by writing through the
//! [`ResponseSink`] trait instead of any particular server's response type.
//! An embedder implements it once for their framework; [`Recorder`] is the
//! in-memory implementation used by this crate's own tests and handy for
//! testing handlers.

use std::io;

use http::{HeaderMap, StatusCode};

/// Destination for a rendered response.
///
/// Render methods call [`write_head`](Self::write_head) exactly once, then
/// [`write_body`](Self::write_body) zero or more times (streaming methods
/// write chunk by chunk). A render method that fails before `write_head`
/// leaves the sink untouched.
pub trait ResponseSink {
    /// Writes the status line and headers.
    ///
    /// Headers already present on the sink (set by the caller before
    /// rendering) should be kept; the given map is added on top.
    fn write_head(&mut self, status: StatusCode, headers: &HeaderMap) -> io::Result<()>;

    /// Writes a chunk of the response body.
    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()>;
}

/// In-memory [`ResponseSink`] capturing status, headers, and body.
///
/// ```rust
/// use http::StatusCode;
/// use respond::{Recorder, Render};
///
/// let rnd = Render::default();
/// let mut rec = Recorder::new();
/// rnd.text(&mut rec, StatusCode::OK, "hello").unwrap();
///
/// assert_eq!(rec.status(), StatusCode::OK);
/// assert_eq!(rec.body_string(), "hello");
/// ```
#[derive(Debug, Default)]
pub struct Recorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Recorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded status code, or `200 OK` if no head was written.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Whether a status line was written at all.
    pub fn head_written(&self) -> bool {
        self.status.is_some()
    }

    /// The recorded headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the headers, for pre-setting values before a render
    /// call (mirrors setting headers on a real response before writing).
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The value of a header, as a string. Empty if absent or non-UTF-8.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// The recorded body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The recorded body as a UTF-8 string (lossy).
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl ResponseSink for Recorder {
    fn write_head(&mut self, status: StatusCode, headers: &HeaderMap) -> io::Result<()> {
        self.status = Some(status);
        for (name, value) in headers {
            self.headers.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(chunk);
        Ok(())
    }
}
