//! Error types

use std::time::Duration;
use thiserror::Error;

/// Result type for beanstalk-connect operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by configuration handling and connection establishment.
///
/// Configuration problems (bad DSN, unsupported scheme, malformed option values)
/// are reported as [`Error::Config`]. Failures from the underlying socket pass
/// through as [`Error::Io`] without translation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration (DSN or option values)
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error from the underlying socket, propagated verbatim
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Connection establishment exceeded the configured timeout
    #[error("connecting to {host}:{port} timed out after {timeout:?}")]
    ConnectTimeout {
        /// Host the connect was addressed to
        host: String,
        /// Port the connect was addressed to
        port: u16,
        /// The configured connect timeout
        timeout: Duration,
    },

    /// Connection has been closed
    #[error("connection closed")]
    ConnectionClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::Config("unsupported scheme \"amqp\"".into());
        assert_eq!(
            err.to_string(),
            "configuration error: unsupported scheme \"amqp\""
        );
    }

    #[test]
    fn test_io_error_passes_through() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::from(io);
        // Transparent: message and kind come straight from the io::Error
        assert_eq!(err.to_string(), "refused");
        match err {
            Error::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::ConnectionRefused),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_connect_timeout_display() {
        let err = Error::ConnectTimeout {
            host: "myhost".into(),
            port: 11300,
            timeout: Duration::from_secs(10),
        };
        let msg = err.to_string();
        assert!(msg.contains("myhost:11300"));
        assert!(msg.contains("10s"));
    }
}
