use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::parser::{parse_head, strip_line_terminator};
use crate::http::request::RequestLine;
use crate::http::response::StatusCode;
use crate::http::writer;

/// Per-connection limits and options, derived from [`Config`].
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub read_timeout: Option<Duration>,
    /// Most lines accepted before the blank line, request line included.
    pub max_header_lines: usize,
    /// Longest line accepted, terminator included.
    pub max_line_bytes: usize,
    pub escape_path: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ConnectionSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            read_timeout: cfg.read_timeout(),
            max_header_lines: cfg.max_header_lines,
            max_line_bytes: cfg.max_line_bytes,
            escape_path: cfg.escape_path,
        }
    }
}

/// Why a connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// A response with this status was written.
    Responded(StatusCode),
    /// End of stream before the blank line.
    PeerClosed,
    LineTooLong,
    TooManyLines,
    /// The request line did not have exactly three tokens.
    Malformed,
}

pub enum ConnectionState {
    Reading,
    Dispatching(RequestLine),
    Closed(CloseReason),
}

enum LineRead {
    Line(String),
    /// Peer closed the stream before a terminator arrived.
    Eof,
    TooLong,
}

pub struct Connection<S> {
    stream: BufReader<S>,
    settings: ConnectionSettings,
    headers: Vec<String>,
    state: ConnectionState,
}

/// Serves one request on `stream`, then closes it.
///
/// Errors are logged, never returned. The stream is dropped on every path.
pub async fn handle<S>(stream: S, settings: &ConnectionSettings)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut conn = Connection::new(stream, settings.clone());
    match conn.run().await {
        Ok(reason) => debug!(?reason, "connection finished"),
        Err(e) => warn!(error = %e, "connection closed"),
    }
    conn.close().await;
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, settings: ConnectionSettings) -> Self {
        Self {
            stream: BufReader::new(stream),
            settings,
            headers: Vec::new(),
            state: ConnectionState::Reading,
        }
    }

    /// Raw lines received so far, terminating blank line included.
    pub fn header_lines(&self) -> &[String] {
        &self.headers
    }

    pub async fn run(&mut self) -> anyhow::Result<CloseReason> {
        loop {
            match &self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_head().await? {
                        Ok(request) => ConnectionState::Dispatching(request),
                        Err(reason) => ConnectionState::Closed(reason),
                    };
                }

                ConnectionState::Dispatching(request) => {
                    let request = request.clone();
                    let status = self.dispatch(&request).await?;
                    self.state = ConnectionState::Closed(CloseReason::Responded(status));
                }

                ConnectionState::Closed(reason) => {
                    return Ok(*reason);
                }
            }
        }
    }

    /// Reads lines up to the blank line and parses the first one.
    ///
    /// The inner `Err` carries the reason to close without a response.
    async fn read_head(&mut self) -> anyhow::Result<Result<RequestLine, CloseReason>> {
        loop {
            let line = match self.read_line().await? {
                LineRead::Line(line) => line,
                LineRead::Eof => {
                    info!("connection closed");
                    return Ok(Err(CloseReason::PeerClosed));
                }
                LineRead::TooLong => {
                    warn!(limit = self.settings.max_line_bytes, "line too long");
                    return Ok(Err(CloseReason::LineTooLong));
                }
            };

            info!(line = %line, "received");
            let blank = line.is_empty();
            self.headers.push(line);

            if blank {
                break;
            }

            if self.headers.len() > self.settings.max_header_lines {
                warn!(limit = self.settings.max_header_lines, "too many header lines");
                return Ok(Err(CloseReason::TooManyLines));
            }
        }

        match parse_head(&self.headers) {
            Ok(request) => {
                info!(
                    method = %request.method,
                    path = %request.path,
                    version = %request.version,
                    "request"
                );
                Ok(Ok(request))
            }
            Err(e) => {
                warn!(error = %e, line = ?self.headers.first(), "wrong request format");
                Ok(Err(CloseReason::Malformed))
            }
        }
    }

    async fn read_line(&mut self) -> anyhow::Result<LineRead> {
        let limit = self.settings.max_line_bytes as u64;
        let mut raw = Vec::new();
        // One byte past the limit tells an overlong line apart from EOF at the limit.
        let mut limited = (&mut self.stream).take(limit + 1);
        let read = limited.read_until(b'\n', &mut raw);

        let n = match self.settings.read_timeout {
            Some(dur) => timeout(dur, read)
                .await
                .with_context(|| format!("read timed out after {:?}", dur))??,
            None => read.await?,
        };

        if n == 0 {
            return Ok(LineRead::Eof);
        }
        if raw.len() as u64 > limit {
            return Ok(LineRead::TooLong);
        }

        match strip_line_terminator(&raw) {
            Some(line) => Ok(LineRead::Line(String::from_utf8_lossy(line).into_owned())),
            None => Ok(LineRead::Eof),
        }
    }

    async fn dispatch(&mut self, request: &RequestLine) -> anyhow::Result<StatusCode> {
        let stream = self.stream.get_mut();

        if request.is_get() {
            let status = writer::write_get(stream, &request.path, self.settings.escape_path).await?;
            info!(status = status.as_u16(), path = %request.path, "response sent");
            Ok(status)
        } else {
            info!(method = %request.method, "unsupported method");
            writer::write_not_implemented(stream).await?;
            Ok(StatusCode::NotImplemented)
        }
    }

    /// Shuts the write side down. Dropping `self` releases the stream.
    async fn close(mut self) {
        if let Err(e) = self.stream.get_mut().shutdown().await {
            debug!(error = %e, "shutdown failed");
        }
    }
}
