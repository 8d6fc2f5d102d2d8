//! Core connection type

use crate::connection::ConnectionConfig;
use crate::{Error, Result};
use bytes::BytesMut;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::Instrument;

/// An established beanstalkd session
///
/// The protocol has no handshake: a successful TCP connect is a ready session,
/// so establishment is the connect itself plus the configured timeout. The
/// type owns the socket and exposes raw byte I/O for the command layer built
/// on top of it.
pub struct BeanstalkConnection {
    stream: Option<TcpStream>,
    peer_addr: SocketAddr,
    local_addr: SocketAddr,
}

impl std::fmt::Debug for BeanstalkConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanstalkConnection")
            .field("peer_addr", &self.peer_addr)
            .field("closed", &self.stream.is_none())
            .finish()
    }
}

impl BeanstalkConnection {
    /// Establish a session to the configured server.
    ///
    /// Applies `connect_timeout` when one is configured; an elapsed timeout
    /// surfaces as [`Error::ConnectTimeout`] rather than an I/O error so
    /// callers can tell the two apart.
    pub async fn establish(config: &ConnectionConfig) -> Result<Self> {
        async {
            let start = Instant::now();
            let connect = TcpStream::connect((config.host.as_str(), config.port));
            let connected = match config.connect_timeout {
                Some(limit) => match tokio::time::timeout(limit, connect).await {
                    Ok(connected) => connected,
                    Err(_) => {
                        crate::metrics::counters::connection_failed(
                            crate::metrics::labels::REASON_TIMEOUT,
                        );
                        return Err(Error::ConnectTimeout {
                            host: config.host.clone(),
                            port: config.port,
                            timeout: limit,
                        });
                    }
                },
                None => connect.await,
            };

            let stream = match connected {
                Ok(stream) => stream,
                Err(err) => {
                    crate::metrics::counters::connection_failed(crate::metrics::labels::REASON_IO);
                    return Err(err.into());
                }
            };

            let peer_addr = stream.peer_addr()?;
            let local_addr = stream.local_addr()?;
            crate::metrics::counters::connection_established();
            crate::metrics::histograms::connect_duration(start.elapsed().as_millis() as u64);
            tracing::info!(peer = %peer_addr, "connection established");

            Ok(Self {
                stream: Some(stream),
                peer_addr,
                local_addr,
            })
        }
        .instrument(tracing::info_span!(
            "establish",
            host = %config.host,
            port = %config.port
        ))
        .await
    }

    /// Address of the server end of the session
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Address of the local end of the session
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether `close` has already torn the session down
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    fn stream_mut(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or(Error::ConnectionClosed)
    }

    /// Write all bytes to the session
    pub async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.stream_mut()?.write_all(buf).await?;
        Ok(())
    }

    /// Flush buffered writes
    pub async fn flush(&mut self) -> Result<()> {
        self.stream_mut()?.flush().await?;
        Ok(())
    }

    /// Read bytes into the buffer, returning how many arrived.
    ///
    /// A return of 0 means the server closed its end.
    pub async fn read_buf(&mut self, buf: &mut BytesMut) -> Result<usize> {
        let n = self.stream_mut()?.read_buf(buf).await?;
        Ok(n)
    }

    /// Close the session.
    ///
    /// Shuts the socket down and drops it. Calling `close` again is a no-op;
    /// any other I/O afterwards returns [`Error::ConnectionClosed`].
    pub async fn close(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.as_mut() {
            stream.shutdown().await?;
            self.stream = None;
            tracing::debug!(peer = %self.peer_addr, "connection closed");
        }
        Ok(())
    }
}
