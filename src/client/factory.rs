//! Connection factory

use crate::client::context::BeanstalkContext;
use crate::client::dsn::Dsn;
use crate::connection::{BeanstalkConnection, ConnectionConfig, SharedConnection};
use crate::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The factory's single memoized session, explicitly two-state
enum ConnectionSlot {
    Unestablished,
    Established(SharedConnection),
}

/// DSN-driven factory for lazily-established beanstalkd sessions
///
/// Configuration is normalized once at construction and never mutated. The
/// session is established on the first [`create_context`] call and memoized;
/// every later call hands out a context bound to the same session. An
/// establishment failure propagates to the caller and leaves the factory
/// unestablished, so the next call retries.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> beanstalk_connect::Result<()> {
/// use beanstalk_connect::ConnectionFactory;
///
/// let factory = ConnectionFactory::from_dsn("beanstalk://queue.internal:11300?timeout=5")?;
/// let context = factory.create_context().await?;
/// # Ok(())
/// # }
/// ```
///
/// [`create_context`]: ConnectionFactory::create_context
pub struct ConnectionFactory {
    config: ConnectionConfig,
    slot: Mutex<ConnectionSlot>,
}

impl ConnectionFactory {
    /// Create a factory with the default configuration.
    ///
    /// Equivalent to `ConnectionFactory::from_dsn("beanstalk:")`.
    pub fn new() -> Self {
        Self::with_config(ConnectionConfig::default())
    }

    /// Create a factory from an explicit configuration.
    pub fn with_config(config: ConnectionConfig) -> Self {
        Self {
            config,
            slot: Mutex::new(ConnectionSlot::Unestablished),
        }
    }

    /// Create a factory from a DSN string.
    ///
    /// The DSN's overrides are merged onto the defaults; see [`Dsn`] for the
    /// accepted grammar and options.
    ///
    /// # Examples
    ///
    /// ```
    /// use beanstalk_connect::ConnectionFactory;
    ///
    /// let factory = ConnectionFactory::from_dsn("beanstalk://myhost:1234").unwrap();
    /// assert_eq!(factory.config().host, "myhost");
    /// assert_eq!(factory.config().port, 1234);
    /// ```
    pub fn from_dsn(dsn: &str) -> Result<Self> {
        Ok(Self::with_config(Dsn::parse(dsn)?.to_config()?))
    }

    /// The factory's immutable configuration
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Whether the memoized session has been established
    pub async fn is_established(&self) -> bool {
        matches!(&*self.slot.lock().await, ConnectionSlot::Established(_))
    }

    /// Produce a context bound to the factory's session.
    ///
    /// The first call establishes the session from the stored configuration;
    /// later calls reuse it. Establishment errors propagate unmodified and
    /// leave the factory unestablished.
    pub async fn create_context(&self) -> Result<BeanstalkContext> {
        // The lock spans the establish await so concurrent first calls
        // cannot race a second session into existence.
        let mut slot = self.slot.lock().await;
        let shared = match &*slot {
            ConnectionSlot::Established(shared) => {
                tracing::debug!("reusing established connection");
                crate::metrics::counters::context_created(true);
                Arc::clone(shared)
            }
            ConnectionSlot::Unestablished => {
                let conn = BeanstalkConnection::establish(&self.config).await?;
                let shared: SharedConnection = Arc::new(Mutex::new(conn));
                *slot = ConnectionSlot::Established(Arc::clone(&shared));
                crate::metrics::counters::context_created(false);
                shared
            }
        };
        Ok(BeanstalkContext::new(shared, self.config.clone()))
    }
}

impl Default for ConnectionFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::time::Duration;
    use tokio::net::{TcpListener, TcpSocket, TcpStream};

    async fn local_factory() -> (TcpListener, ConnectionFactory) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let config = ConnectionConfig::builder()
            .host("127.0.0.1")
            .port(port)
            .build();
        (listener, ConnectionFactory::with_config(config))
    }

    #[test]
    fn test_new_uses_defaults() {
        let factory = ConnectionFactory::new();
        assert_eq!(*factory.config(), ConnectionConfig::default());

        let factory = ConnectionFactory::default();
        assert_eq!(factory.config().host, ConnectionConfig::DEFAULT_HOST);
    }

    #[test]
    fn test_from_dsn_applies_overrides() {
        let factory =
            ConnectionFactory::from_dsn("beanstalk://myhost:1234?timeout=5&persisted=false")
                .unwrap();
        let config = factory.config();
        assert_eq!(config.host, "myhost");
        assert_eq!(config.port, 1234);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
        assert!(!config.persisted);
    }

    #[test]
    fn test_from_dsn_rejects_wrong_scheme() {
        assert!(ConnectionFactory::from_dsn("amqp://host:1234").is_err());
    }

    #[tokio::test]
    async fn test_connection_is_lazy() {
        let (_listener, factory) = local_factory().await;
        assert!(!factory.is_established().await);

        factory.create_context().await.unwrap();
        assert!(factory.is_established().await);
    }

    #[tokio::test]
    async fn test_contexts_share_one_connection() {
        let (_listener, factory) = local_factory().await;

        let first = factory.create_context().await.unwrap();
        let second = factory.create_context().await.unwrap();
        assert!(Arc::ptr_eq(first.connection(), second.connection()));
    }

    #[tokio::test]
    async fn test_failed_establishment_leaves_factory_unestablished() {
        // Grab a free port, then close the listener so connects are refused
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ConnectionConfig::builder()
            .host("127.0.0.1")
            .port(port)
            .build();
        let factory = ConnectionFactory::with_config(config);

        assert!(factory.create_context().await.is_err());
        assert!(!factory.is_established().await);

        // A server shows up on the same port: the next call succeeds
        let _listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
        factory.create_context().await.unwrap();
        assert!(factory.is_established().await);
    }

    #[tokio::test]
    async fn test_connect_timeout_leaves_factory_unestablished() {
        let socket = TcpSocket::new_v4().unwrap();
        socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let listener = socket.listen(1).unwrap();
        let addr = listener.local_addr().unwrap();

        // Fill the backlog-1 accept queue so the next connect hangs in SYN
        // retries instead of completing
        let mut parked = Vec::new();
        for _ in 0..16 {
            let connect = TcpStream::connect(addr);
            match tokio::time::timeout(Duration::from_millis(50), connect).await {
                Ok(Ok(stream)) => parked.push(stream),
                _ => break,
            }
        }

        let deadline = Duration::from_millis(300);
        let config = ConnectionConfig::builder()
            .host("127.0.0.1")
            .port(addr.port())
            .connect_timeout(deadline)
            .build();
        let factory = ConnectionFactory::with_config(config);

        match factory.create_context().await {
            Err(Error::ConnectTimeout {
                host,
                port,
                timeout,
            }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, addr.port());
                assert_eq!(timeout, deadline);
            }
            other => panic!("expected ConnectTimeout, got {:?}", other),
        }
        assert!(!factory.is_established().await);
    }

    #[tokio::test]
    async fn test_create_context_serializes_concurrent_first_calls() {
        let (_listener, factory) = local_factory().await;

        let factory = Arc::new(factory);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let factory = Arc::clone(&factory);
            handles.push(tokio::spawn(
                async move { factory.create_context().await },
            ));
        }

        let mut contexts = Vec::new();
        for handle in handles {
            contexts.push(handle.await.unwrap().unwrap());
        }
        for context in &contexts[1..] {
            assert!(Arc::ptr_eq(contexts[0].connection(), context.connection()));
        }
    }
}
