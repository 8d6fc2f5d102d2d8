//! DSN-driven connection factory for beanstalkd work queues.
//!
//! The crate turns a configuration source into a lazily-established,
//! memoized connection wrapped in a queue context. Configuration arrives in
//! one of three shapes:
//!
//! - nothing at all ([`ConnectionFactory::new`]) - all defaults apply
//! - an explicit [`ConnectionConfig`] ([`ConnectionFactory::with_config`])
//! - a DSN string ([`ConnectionFactory::from_dsn`])
//!
//! Whatever the shape, the factory normalizes it once into a typed
//! configuration, connects on the first context request, and hands every
//! later request a context bound to the same session. The beanstalkd wire
//! protocol and job lifecycle live in the command layer built on top; this
//! crate delivers that layer an established session.
//!
//! # DSN format
//!
//! ```text
//! beanstalk:                                     all defaults
//! beanstalk://myhost                             another host, default port
//! beanstalk://myhost:1234?timeout=5&persisted=false
//! ```
//!
//! Recognized query options:
//!
//! - `host`, `port` - replaced by the authority's host/port when both appear
//! - `timeout` - connect timeout in whole seconds
//! - `persisted` - advisory reuse flag, `true`/`false`/`1`/`0`
//!
//! Unknown options and values that fail validation are rejected with
//! [`Error::Config`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use beanstalk_connect::ConnectionFactory;
//!
//! #[tokio::main]
//! async fn main() -> beanstalk_connect::Result<()> {
//!     let factory = ConnectionFactory::from_dsn("beanstalk://127.0.0.1:11300?timeout=5")?;
//!
//!     // The first context establishes the connection, later ones reuse it
//!     let context = factory.create_context().await?;
//!     let again = factory.create_context().await?;
//!     assert!(std::sync::Arc::ptr_eq(context.connection(), again.connection()));
//!
//!     context.close().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod metrics;

pub use client::{BeanstalkContext, ConnectionFactory, Dsn};
pub use connection::{ConnectionConfig, SharedConnection};
pub use error::{Error, Result};
