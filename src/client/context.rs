//! Queue context

use crate::connection::{ConnectionConfig, SharedConnection};
use crate::Result;

/// A queue context bound to the factory's session
///
/// Producer and consumer operations live in the command layer built on top of
/// the session; the context's job is to hand that layer an established
/// connection together with the configuration it was built from. Contexts are
/// cheap handles: cloning one, or creating more from the same factory, yields
/// handles to the same underlying session.
#[derive(Debug, Clone)]
pub struct BeanstalkContext {
    connection: SharedConnection,
    config: ConnectionConfig,
}

impl BeanstalkContext {
    pub(crate) fn new(connection: SharedConnection, config: ConnectionConfig) -> Self {
        Self { connection, config }
    }

    /// The shared session this context is bound to
    pub fn connection(&self) -> &SharedConnection {
        &self.connection
    }

    /// The configuration the session was established from
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Close the underlying session.
    ///
    /// The session is shared by every context the factory produced, so
    /// closing it here closes it for all of them. The factory keeps handing
    /// out the same closed session; build a new factory for a fresh one.
    pub async fn close(&self) -> Result<()> {
        self.connection.lock().await.close().await
    }
}
