use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{Instrument, error, info, info_span};

use crate::config::{Config, ServeMode};
use crate::http::connection::{self, ConnectionSettings};

/// Binds `cfg.listen_addr` with `SO_REUSEADDR` and the configured backlog.
pub async fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr = tokio::net::lookup_host(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to resolve {}", cfg.listen_addr))?
        .next()
        .with_context(|| format!("no address for {}", cfg.listen_addr))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .context("failed to create socket")?;

    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("failed to bind {}", addr))?;
    let listener = socket
        .listen(cfg.backlog)
        .with_context(|| format!("failed to listen on {}", addr))?;

    info!("Listening on {}", addr);
    Ok(listener)
}

/// Accepts connections on `listener` until accept fails.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let settings = Arc::new(ConnectionSettings::from(cfg));
    let port = listener.local_addr()?.port();
    info!("open http://localhost:{}/ with your browser!", port);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "accept failed");
                return Err(e).context("accept failed");
            }
        };
        info!("Connection from {} has been established", peer);

        let span = info_span!("conn", %peer);
        match cfg.mode {
            ServeMode::Serial => {
                connection::handle(socket, &settings).instrument(span).await;
            }
            ServeMode::Concurrent => {
                let settings = Arc::clone(&settings);
                tokio::spawn(
                    async move { connection::handle(socket, &settings).await }.instrument(span),
                );
            }
        }
    }
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(cfg).await?;
    serve(listener, cfg).await
}
