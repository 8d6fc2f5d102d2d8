//! Connection configuration
//!
//! The canonical option set for a beanstalkd connection. A config is built once,
//! either from explicit options or by merging DSN-supplied overrides onto the
//! defaults, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection configuration
///
/// Stores the complete option set used to establish a beanstalkd connection.
/// Every field holds either a caller-supplied value or its default.
///
/// # Defaults
///
/// - `host`: `"localhost"`
/// - `port`: `11300` (the beanstalkd default port)
/// - `connect_timeout`: 10 seconds (`None` means no timeout)
/// - `persisted`: `true`
///
/// # Examples
///
/// ```
/// use beanstalk_connect::connection::ConnectionConfig;
/// use std::time::Duration;
///
/// let config = ConnectionConfig::builder()
///     .host("queue.internal")
///     .port(11301)
///     .connect_timeout(Duration::from_secs(5))
///     .build();
///
/// assert_eq!(config.host, "queue.internal");
/// // Unset options keep their defaults
/// assert!(config.persisted);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Server hostname or address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Timeout for establishing the connection (`None` = no timeout).
    /// Carried as the `timeout` DSN option, in whole seconds.
    pub connect_timeout: Option<Duration>,
    /// Advisory hint that the connection should be kept for reuse.
    /// The factory memoizes its connection regardless; this flag is carried
    /// for host environments that key reuse decisions on it.
    pub persisted: bool,
}

impl ConnectionConfig {
    /// Default beanstalkd host
    pub const DEFAULT_HOST: &'static str = "localhost";
    /// Default beanstalkd port
    pub const DEFAULT_PORT: u16 = 11300;
    /// Default connect timeout
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a builder for assembling a configuration from partial options.
    ///
    /// Options left unset keep their defaults, so the built config is always
    /// a complete option set.
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Apply an override set on top of this configuration.
    ///
    /// Present override fields win; absent fields leave the existing value
    /// untouched. An absent component never clears a default.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(timeout) = overrides.connect_timeout {
            self.connect_timeout = Some(timeout);
        }
        if let Some(persisted) = overrides.persisted {
            self.persisted = persisted;
        }
        self
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            connect_timeout: Some(Self::DEFAULT_CONNECT_TIMEOUT),
            persisted: true,
        }
    }
}

/// Builder for [`ConnectionConfig`]
///
/// # Examples
///
/// ```
/// use beanstalk_connect::connection::ConnectionConfig;
///
/// let config = ConnectionConfig::builder()
///     .host("10.0.0.5")
///     .persisted(false)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionConfigBuilder {
    config: ConnectionConfig,
}

impl ConnectionConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Disable the connect timeout entirely
    pub fn no_connect_timeout(mut self) -> Self {
        self.config.connect_timeout = None;
        self
    }

    /// Set the persistence hint
    pub fn persisted(mut self, persisted: bool) -> Self {
        self.config.persisted = persisted;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConnectionConfig {
        self.config
    }
}

/// A partial option set produced by DSN parsing.
///
/// Each field is explicitly present or absent; merging onto a
/// [`ConnectionConfig`] applies only the present fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Override for the server host
    pub host: Option<String>,
    /// Override for the server port
    pub port: Option<u16>,
    /// Override for the connect timeout
    pub connect_timeout: Option<Duration>,
    /// Override for the persistence hint
    pub persisted: Option<bool>,
}

impl ConfigOverrides {
    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.host.is_none()
            && self.port.is_none()
            && self.connect_timeout.is_none()
            && self.persisted.is_none()
    }
}
