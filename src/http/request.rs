/// The only method the server answers with a page.
pub const GET: &str = "GET";

/// The first line of a request, split into its three tokens.
///
/// Tokens are kept verbatim. The version is never checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub path: String,
    pub version: String,
}

impl RequestLine {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            version: version.into(),
        }
    }

    /// Case-sensitive: `get` is not `GET`.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::request::RequestLine;
    /// assert!(RequestLine::new("GET", "/", "HTTP/1.0").is_get());
    /// assert!(!RequestLine::new("get", "/", "HTTP/1.0").is_get());
    /// ```
    pub fn is_get(&self) -> bool {
        self.method == GET
    }
}
