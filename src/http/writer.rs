use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.0";

fn put_status_line(buf: &mut BytesMut, status: StatusCode) {
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());
}

fn serialize_response(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(128 + resp.body.len());

    put_status_line(&mut buf, resp.status);

    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    buf.put_slice(&resp.body);

    buf
}

/// Serialized response bytes waiting to be written.
pub struct ResponseWriter {
    buffer: BytesMut,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
        }
    }

    /// A lone status line: no headers, no separator, no body.
    pub fn status_line(status: StatusCode) -> Self {
        let mut buffer = BytesMut::with_capacity(32);
        put_status_line(&mut buffer, status);
        Self { buffer }
    }

    /// Bytes not yet written.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Writes everything that is pending and flushes the stream.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let len = self.buffer.len();
        stream.write_all_buf(&mut self.buffer).await?;
        stream.flush().await?;
        debug!(bytes = len, "response written");
        Ok(())
    }
}

/// Answers a `GET` for `path`: the index page for `/`, a 404 page otherwise.
pub async fn write_get<W>(stream: &mut W, path: &str, escape_path: bool) -> anyhow::Result<StatusCode>
where
    W: AsyncWrite + Unpin,
{
    let response = Response::for_get(path, escape_path);
    ResponseWriter::new(&response).write_to_stream(stream).await?;
    Ok(response.status)
}

/// Writes `HTTP/1.0 501 Not Implemented\r\n` and nothing else.
pub async fn write_not_implemented<W>(stream: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    ResponseWriter::status_line(StatusCode::NotImplemented)
        .write_to_stream(stream)
        .await
}
