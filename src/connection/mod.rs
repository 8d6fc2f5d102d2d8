//! Connection management
//!
//! This module handles:
//! * Typed configuration with defaults and field-by-field override merging
//! * Session establishment (TCP connect with an optional timeout)
//! * Session teardown

mod config;
mod conn;

pub use config::{ConfigOverrides, ConnectionConfig, ConnectionConfigBuilder};
pub use conn::BeanstalkConnection;

use std::sync::Arc;
use tokio::sync::Mutex;

/// The session handle shared by every context a factory produces
pub type SharedConnection = Arc<Mutex<BeanstalkConnection>>;
