//! Client facade
//!
//! This module handles:
//! * DSN parsing into explicit present-or-absent components
//! * The connection factory with its lazily-established, memoized session
//! * The queue context handed to the command layer

mod context;
mod dsn;
mod factory;

pub use context::BeanstalkContext;
pub use dsn::Dsn;
pub use factory::ConnectionFactory;
